//! Custom assertion macros and utilities

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a forum result failed validation on `field`
#[macro_export]
macro_rules! assert_validation {
    ($result:expr, $field:expr) => {
        match $result {
            Err(threadboard::shared::ForumError::Validation { field, .. }) => {
                assert_eq!(field, $field, "validation failed on the wrong field")
            }
            Ok(value) => panic!("Expected validation error, got Ok: {:?}", value),
            Err(e) => panic!("Expected validation error, got: {:?}", e),
        }
    };
}
