pub mod api_key_repo;
pub mod error;
pub mod user_repo;
