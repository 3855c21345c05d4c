pub mod accessor;
pub mod store;
pub mod valkey;

pub use accessor::{Session, cookie_value};
pub use store::{SessionError, SessionStore};
pub use valkey::ValkeySessionStore;
