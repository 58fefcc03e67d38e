//! Server Module
//!
//! Builds the application state and the axum router.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (config, port)
//! └── init.rs         - State construction and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: secrets file and environment into `AppConfig`
//! 2. **Backend Selection**: remote store tried once, local file as fallback
//! 3. **Identity Client**: configured or demo, depending on the API key
//! 4. **Router Creation**: routes and trace layer over the shared state
//!
//! # Example
//!
//! ```rust,no_run
//! use threadboard::backend::server::create_app;
//! use threadboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
