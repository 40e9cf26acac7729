use std::fmt;
use std::io::IoSlice;

use super::compress::{BLOCK_LEN, DIGEST_LEN, INIT, compress};
use super::error::{Md5Error, Md5Result};

/// Lifecycle of a digest context.
///
/// `reset` returns a context in any phase to `Fresh`; absorbing data
/// moves it to `Absorbing`; producing the digest moves it to
/// `Finalized`, after which further use is rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Fresh,
    Absorbing,
    Finalized,
}

/// Explicit MD5 digest context with a checked lifecycle.
///
/// The context owns the full hashing session state: the 128-bit running
/// value, up to one block of not-yet-compressed input, and the running
/// byte count that feeds the length padding. It exists for callers that
/// manage session lifecycles externally and therefore cannot hand the
/// hasher to [`Md5::finalize`] by value; in exchange, misuse after
/// finalisation surfaces as [`Md5Error`] instead of a silently wrong
/// digest.
///
/// For straight-line hashing prefer [`Md5`], whose ownership rules make
/// the same misuse unrepresentable.
///
/// # Examples
///
/// ```
/// use mdigest::{Md5Context, Md5Error};
///
/// let mut ctx = Md5Context::new();
/// ctx.update(b"ab")?;
/// ctx.update(b"c")?;
/// let digest = ctx.finalize()?;
///
/// // The context is spent until reset.
/// assert_eq!(ctx.finalize(), Err(Md5Error::DoubleFinalize));
///
/// ctx.reset();
/// ctx.update(b"abc")?;
/// assert_eq!(ctx.finalize()?, digest);
/// # Ok::<(), Md5Error>(())
/// ```
#[derive(Clone)]
pub struct Md5Context {
    state: [u32; 4],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    total_len: u64,
    phase: Phase,
}

impl fmt::Debug for Md5Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5Context")
            .field("phase", &self.phase)
            .field("buffered", &self.buffered)
            .field("total_len", &self.total_len)
            .finish_non_exhaustive()
    }
}

impl Default for Md5Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5Context {
    /// Creates a context in its initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: INIT,
            buffer: [0; BLOCK_LEN],
            buffered: 0,
            total_len: 0,
            phase: Phase::Fresh,
        }
    }

    /// Returns the context to its initial state, discarding any absorbed
    /// data. Valid in every phase, including after finalisation.
    pub const fn reset(&mut self) {
        self.state = INIT;
        self.buffer = [0; BLOCK_LEN];
        self.buffered = 0;
        self.total_len = 0;
        self.phase = Phase::Fresh;
    }

    /// Number of bytes absorbed since the last reset.
    #[inline]
    #[must_use]
    pub const fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Reports whether the context has produced its digest and must be
    /// reset before further use.
    #[inline]
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Finalized)
    }

    /// Appends `data` to the absorbed stream.
    ///
    /// Input may arrive in any chunking, including zero-length slices;
    /// only the concatenation of all updates determines the digest.
    ///
    /// # Errors
    ///
    /// Returns [`Md5Error::UpdateAfterFinalize`], without mutating any
    /// state, if the digest was already produced.
    pub fn update(&mut self, data: &[u8]) -> Md5Result<()> {
        if self.is_finalized() {
            return Err(Md5Error::UpdateAfterFinalize);
        }
        self.absorb(data);
        Ok(())
    }

    /// Pads the absorbed stream and produces the 16-byte digest.
    ///
    /// The context transitions to its spent state; call
    /// [`reset`](Self::reset) before reusing it.
    ///
    /// # Errors
    ///
    /// Returns [`Md5Error::DoubleFinalize`] if the digest was already
    /// produced since the last reset.
    pub fn finalize(&mut self) -> Md5Result<[u8; DIGEST_LEN]> {
        if self.is_finalized() {
            return Err(Md5Error::DoubleFinalize);
        }
        Ok(self.emit())
    }

    /// Merges `data` with any buffered partial block and compresses
    /// every complete block now available. Leftover bytes stay buffered.
    fn absorb(&mut self, data: &[u8]) {
        self.phase = Phase::Absorbing;
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let mut input = data;

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let (blocks, tail) = input.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            compress(&mut self.state, block);
        }
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffered = tail.len();
    }

    /// Applies terminator, zero padding, and the little-endian bit
    /// length, then serialises the state words.
    fn emit(&mut self) -> [u8; DIGEST_LEN] {
        // Bit length of the unpadded input, modulo 2^64 as MD5 defines.
        let bit_len = self.total_len.wrapping_mul(8);

        let mut padding = [0u8; BLOCK_LEN];
        padding[0] = 0x80;
        // One terminator byte plus zeros up to 56 mod 64.
        let pad_len = 1 + (55u64.wrapping_sub(self.total_len) % 64) as usize;

        let absorbed = self.total_len;
        self.absorb(&padding[..pad_len]);
        self.absorb(&bit_len.to_le_bytes());
        self.total_len = absorbed;

        debug_assert_eq!(self.buffered, 0);

        let mut digest = [0u8; DIGEST_LEN];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        self.phase = Phase::Finalized;
        digest
    }
}

/// Streaming MD5 hasher.
///
/// Owns a [`Md5Context`] and exposes the infallible surface:
/// [`finalize`](Self::finalize) consumes the hasher, so a spent state
/// can never be updated or finalised again.
///
/// # Examples
///
/// ```
/// use mdigest::Md5;
///
/// let mut hasher = Md5::new();
/// hasher.update(b"message ");
/// hasher.update(b"digest");
/// let digest = hasher.finalize();
///
/// assert_eq!(digest, Md5::digest(b"message digest"));
/// ```
#[derive(Clone, Default)]
pub struct Md5 {
    ctx: Md5Context,
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5").field("ctx", &self.ctx).finish()
    }
}

impl Md5 {
    /// Number of bytes in the serialised digest.
    pub const DIGEST_LEN: usize = DIGEST_LEN;

    /// Number of bytes the compression function consumes at a time.
    pub const BLOCK_LEN: usize = BLOCK_LEN;

    /// Creates a hasher with an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctx: Md5Context::new(),
        }
    }

    /// Feeds additional bytes into the digest state.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.ctx.absorb(data);
    }

    /// Updates the hasher from a vectored slice of byte buffers.
    ///
    /// Equivalent to calling [`update`](Self::update) once per buffer in
    /// order; callers holding data in any number of discontiguous
    /// regions can fold them all into one digest.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::IoSlice;
    /// use mdigest::Md5;
    ///
    /// let mut hasher = Md5::new();
    /// hasher.update_vectored(&[IoSlice::new(b"message "), IoSlice::new(b"digest")]);
    ///
    /// assert_eq!(hasher.finalize(), Md5::digest(b"message digest"));
    /// ```
    #[doc(alias = "writev")]
    pub fn update_vectored(&mut self, buffers: &[IoSlice<'_>]) {
        for buffer in buffers {
            self.update(buffer.as_ref());
        }
    }

    /// Finalises the digest and returns the 128-bit MD5 output.
    #[must_use]
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        self.ctx.emit()
    }

    /// Returns the hasher to its empty state.
    pub const fn reset(&mut self) {
        self.ctx.reset();
    }

    /// Convenience helper that computes the MD5 digest for `data` in one shot.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdigest::Md5;
    ///
    /// let digest = Md5::digest(b"abc");
    /// assert_eq!(digest[..4], [0x90, 0x01, 0x50, 0x98]);
    /// ```
    #[must_use]
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Computes the digest of two discontiguous buffers as if they were
    /// concatenated.
    ///
    /// Either buffer (or both) may be empty. The result equals
    /// [`digest`](Self::digest) over the concatenation, with no joint
    /// allocation.
    ///
    /// With the `tracing` feature enabled, emits a trace-level event
    /// under the `mdigest::md5` target carrying the buffer lengths and
    /// the hex digest. The raw input bytes are never logged.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdigest::Md5;
    ///
    /// let split = Md5::digest_pair(b"header", b"payload");
    /// assert_eq!(split, Md5::digest(b"headerpayload"));
    /// ```
    #[must_use]
    pub fn digest_pair(first: &[u8], second: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(first);
        hasher.update(second);
        let digest = hasher.finalize();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "mdigest::md5",
            first_len = first.len(),
            second_len = second.len(),
            digest = %DisplayHex(&digest),
            "hashed discontiguous buffer pair"
        );

        digest
    }
}

#[cfg(feature = "tracing")]
struct DisplayHex<'a>(&'a [u8]);

#[cfg(feature = "tracing")]
impl fmt::Display for DisplayHex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
