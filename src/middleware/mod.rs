/*
 * Responsibility
 * - Public interface of the request gate (re-exports)
 * - Apply order matters: auth::apply must wrap admin::apply so that
 *   authentication always runs first
 */
pub mod admin;
pub mod auth;
