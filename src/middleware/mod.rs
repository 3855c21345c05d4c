/*
 * Responsibility
 * - middleware public interface
 * - context: identity resolution + RequestContext
 * - cors, http: cross-cutting transport concerns
 */
pub mod context;
pub mod cors;
pub mod http;
