pub mod cache;
pub mod identity;
pub mod render;
pub mod session;
