//! Authentication module
//!
//! OAuth client-credentials flow against the token endpoint, with an
//! in-memory token cache. The `Authenticator` serializes refreshes so
//! concurrent callers share a single in-flight token request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{CachedToken, Credentials};
