//! Forum Module
//!
//! Threaded discussion storage with two interchangeable backends.
//!
//! # Architecture
//!
//! - **`store`** - the `PostStore` contract both backends implement
//! - **`local`** - JSON file fallback (`LocalFileStore`)
//! - **`remote`** - Firestore adapter (`FirestoreStore`)
//! - **`selector`** - startup check that picks one backend for the process
//! - **`service`** - `ForumService`, the operations callers use
//!
//! # Example
//!
//! ```rust,no_run
//! use threadboard::forum::ForumService;
//! use threadboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let forum = ForumService::from_config(&config);
//!
//! let id = forum.add_post("Alice", "Hello there", "First post on the board").await?;
//! forum.add_reply(id.as_str(), "Bob", "Welcome aboard!").await?;
//!
//! for post in forum.search("welcome").await {
//!     println!("{} ({} replies)", post.topic, post.reply_count);
//! }
//! # Ok(())
//! # }
//! ```

/// Store contract
pub mod store;

/// Local JSON file store
pub mod local;

/// Firestore store
pub mod remote;

/// Startup backend selection
pub mod selector;

/// Forum operations
pub mod service;

pub use local::LocalFileStore;
pub use remote::FirestoreStore;
pub use selector::{BackendMode, BackendSelection};
pub use service::ForumService;
pub use store::{PostStore, StoreKind};
