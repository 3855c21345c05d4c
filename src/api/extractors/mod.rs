pub mod request_ctx;

pub use request_ctx::{AuthSource, ContextShell, RequestContext, RequestCtxExtractor};
