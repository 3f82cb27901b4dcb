//! Base error type.
//!
//! Sub-crates define their own error enums and either wrap `HexError` as a
//! variant (via `#[from]`) or keep it separate — whichever keeps error sites
//! clean.

use thiserror::Error;

/// The error type for `hx-core` and a common base for the other `hx-*` crates.
#[derive(Debug, Error)]
pub enum HexError {
    #[error("invalid coordinate key {0:?} (expected \"r,c\")")]
    ParseKey(String),
}

/// Shorthand result type.
pub type HexResult<T> = Result<T, HexError>;
