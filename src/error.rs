//! Error types for the cachemux library.
//!
//! The caller-facing cache contracts are total: a lookup miss is reported by
//! `Option`, a put on a zero-capacity cache is a no-op, and no public
//! operation returns a `Result`. The only error type in the crate backs the
//! `check_invariants` validation on the structurally interesting cores.

use std::error::Error;
use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types
/// (e.g. [`ArcCache::check_invariants`](crate::policy::arc::ArcCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    detail: String,
}

impl InvariantError {
    /// Creates an `InvariantError` describing the violated invariant.
    #[inline]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Returns the description of the violated invariant.
    #[inline]
    pub fn message(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl Error for InvariantError {}
