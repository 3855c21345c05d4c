/*
 * Responsibility
 * - HTTP surface: versioned routes, extractors, fallback
 */
pub mod extractors;
pub mod fallback;
pub mod v1;
