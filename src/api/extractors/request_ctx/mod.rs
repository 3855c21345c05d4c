/*!
 * Request context extractor
 *
 * Responsibility:
 * - Provide the per-request RequestContext (identity + response helpers) to handlers
 * - The context middleware builds it and stores it in request extensions
 *
 * Public API:
 * - RequestContext, ContextShell, AuthSource
 * - RequestCtxExtractor
 */

mod core;
mod respond;
mod types;

pub use core::RequestCtxExtractor;
pub use types::{AuthSource, ContextShell, RequestContext};
