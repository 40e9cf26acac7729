//! Incremental MD5 digest engine.
//!
//! MD5 digests a byte stream through a fixed 64-byte block construction:
//! input is buffered until a full block is available, each block runs
//! through a four-round compression function over a 128-bit running
//! state, and finalisation appends a `0x80` terminator, zero padding,
//! and the 64-bit little-endian bit length before the last block(s) are
//! compressed. The digest is the running state serialised as four
//! little-endian words.
//!
//! # Chunk independence
//!
//! The engine guarantees that only the concatenation of the absorbed
//! bytes matters, never the call boundaries: any partition of the input
//! across `update` calls (including byte-at-a-time) yields the identical
//! digest. [`Md5::digest_pair`] builds on this to hash two discontiguous
//! buffers as if they were one.
//!
//! # Example
//!
//! ```rust
//! use mdigest::Md5;
//!
//! let mut split = Md5::new();
//! split.update(b"message ");
//! split.update(b"digest");
//!
//! assert_eq!(split.finalize(), Md5::digest(b"message digest"));
//! ```

mod compress;
mod context;
mod error;

pub use context::{Md5, Md5Context};
pub use error::{Md5Error, Md5Result};
