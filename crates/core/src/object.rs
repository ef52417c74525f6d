//! Canonical commit object construction and nonce encoding.
//!
//! The hashed buffer follows git's object serialization:
//! `"commit " || ascii(len) || NUL || body || "\n\n" || nonce`,
//! where `len` counts everything after the NUL byte. Only the
//! 16-character nonce field changes between attempts, so it is
//! addressed by a stored offset and rewritten in place.

use sha1::{Digest, Sha1};

use crate::params::{DIGEST_LEN, NONCE_LEN, OBJECT_TAG, TRAILER_LEN};

/// Lookup table for lowercase hex encoding
const HEX_LUT: &[u8; 16] = b"0123456789abcdef";

/// A serialized commit object with a mutable nonce field.
///
/// Each search worker owns exactly one of these; the buffer is never
/// shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitObject {
    buf: Vec<u8>,
    nonce_offset: usize,
}

impl CommitObject {
    /// Serialize `content` into the canonical hashed layout with the
    /// nonce field reserved at the tail.
    ///
    /// The field starts out as ASCII zeroes, which is the encoding of
    /// counter 0, so identical content always yields byte-identical
    /// buffers.
    pub fn build(content: &[u8]) -> Self {
        let data_len = content.len() + TRAILER_LEN + NONCE_LEN;
        let header = format!("{OBJECT_TAG} {data_len}\0");

        let mut buf = Vec::with_capacity(header.len() + data_len);
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(content);
        buf.extend_from_slice(b"\n\n");

        let nonce_offset = buf.len();
        buf.resize(nonce_offset + NONCE_LEN, b'0');

        Self { buf, nonce_offset }
    }

    /// Encode `counter` into the nonce field, least-significant nibble
    /// first.
    ///
    /// Injective over the full u64 domain. The nibble order has no
    /// external meaning; the field only enumerates distinct buffer
    /// contents.
    #[inline(always)]
    pub fn write_nonce(&mut self, counter: u64) {
        let field = &mut self.buf[self.nonce_offset..self.nonce_offset + NONCE_LEN];
        for (i, byte) in field.iter_mut().enumerate() {
            *byte = HEX_LUT[((counter >> (i * 4)) & 0xf) as usize];
        }
    }

    /// SHA-1 of the current buffer contents.
    #[inline(always)]
    pub fn digest(&self) -> [u8; DIGEST_LEN] {
        Sha1::digest(&self.buf).into()
    }

    /// The full hashed byte range.
    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Offset of the nonce field within the buffer.
    pub fn nonce_offset(&self) -> usize {
        self.nonce_offset
    }

    /// Total buffer length in bytes.
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Consume the object, returning the underlying buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
