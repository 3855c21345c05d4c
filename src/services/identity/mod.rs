pub mod postgres;
pub mod query;
pub mod types;

pub use postgres::PgIdentityQuery;
pub use query::{IdentityError, IdentityQuery};
pub use types::{AccountId, ApiKeyId, ApiKeyInfo, Role, SignedInUser, UnknownRole, UserId};
