//! Shaforge Library
//!
//! Brute-forces a nonce that steers a git commit's SHA-1 digest to a
//! chosen prefix. The search engine lives in `shaforge-core`; this
//! crate re-exports it so the binary and any embedders share one entry
//! point.
//!
//! # Example
//!
//! ```rust
//! use shaforge::bruteforce;
//!
//! // Find a commit object whose digest starts with the nibble 0xc.
//! let found = bruteforce(b"commit body", &[0xc0], true, 2).unwrap();
//! assert_eq!(found.digest[0] >> 4, 0xc);
//! ```

// Re-export the search engine
pub use shaforge_core as engine;

// Convenience re-exports
pub use engine::{CommitObject, DigestPrefix, Match, SearchError, SearchRequest, bruteforce};
