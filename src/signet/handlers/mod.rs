pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod types;

// common responses for the handlers
pub(crate) const INVALID_JSON: &str = "Invalid JSON in request body";
pub(crate) const INTERNAL_ERROR: &str = "Internal server error";
