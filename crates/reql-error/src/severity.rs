//! Coarse-grained classification for programmatic handling of errors.
//!
//! Typical mappings:
//! - Warning: the caller may continue with a degraded result
//! - Error: the term or payload at hand is unusable
//! - Fatal: the process setup itself (configuration) is broken
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}
