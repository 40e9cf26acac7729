//! Misuse errors for the MD5 digest context.

use thiserror::Error;

/// Result type for fallible digest context operations.
pub type Md5Result<T> = Result<T, Md5Error>;

/// Errors raised when a digest context is used after finalisation.
///
/// A finalised context has discarded its absorbed history, so neither
/// misuse can be recovered automatically; the context must be reset
/// before reuse. Both variants exist to keep a wrong digest from being
/// produced silently.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Md5Error {
    /// `update` was called on a context whose digest was already produced.
    #[error("MD5 context already finalised; reset it before absorbing more data")]
    UpdateAfterFinalize,
    /// `finalize` was called twice without an intervening reset.
    #[error("MD5 context already finalised; reset it before requesting another digest")]
    DoubleFinalize,
}
