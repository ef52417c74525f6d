//! Digest prefix matching, including half-digit (odd hex length) targets.

use crate::params::{DIGEST_LEN, MAX_PREFIX_LEN};
use crate::search::SearchError;

/// A target digest prefix.
///
/// `full` holds the whole bytes that must match exactly; `half` is an
/// optional high-nibble constraint on the byte just past them, which
/// is how a target with an odd number of hex digits is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPrefix {
    full: Vec<u8>,
    half: Option<u8>,
}

impl DigestPrefix {
    /// Build a prefix from raw target bytes.
    ///
    /// With `half_digit` set, the final byte of `target` contributes
    /// only its upper nibble as the last desired hex digit, so `target`
    /// must hold at least one byte.
    pub fn new(target: &[u8], half_digit: bool) -> Result<Self, SearchError> {
        if target.len() > MAX_PREFIX_LEN {
            return Err(SearchError::PrefixTooLong { len: target.len() });
        }
        if half_digit {
            let (&last, full) = target.split_last().ok_or(SearchError::EmptyHalfDigit)?;
            Ok(Self {
                full: full.to_vec(),
                half: Some(last >> 4),
            })
        } else {
            Ok(Self {
                full: target.to_vec(),
                half: None,
            })
        }
    }

    /// Parse a prefix from a hex string of at most 40 digits.
    ///
    /// An odd number of digits requests a half-digit match on the
    /// trailing nibble.
    pub fn from_hex(s: &str) -> Result<Self, SearchError> {
        if s.len() > 2 * MAX_PREFIX_LEN {
            return Err(SearchError::PrefixTooLong {
                len: s.len().div_ceil(2),
            });
        }

        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(SearchError::InvalidHex(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let full = digits
            .chunks_exact(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect();
        let half = if digits.len() % 2 == 1 {
            digits.last().copied()
        } else {
            None
        };

        Ok(Self { full, half })
    }

    /// Test a digest against this prefix. An empty prefix matches any
    /// digest.
    #[inline(always)]
    pub fn matches(&self, digest: &[u8; DIGEST_LEN]) -> bool {
        digest[..self.full.len()] == self.full[..]
            && self
                .half
                .is_none_or(|nibble| digest[self.full.len()] >> 4 == nibble)
    }
}
