//! # shaforge-core
//!
//! Brute-force search for git commit objects whose SHA-1 digest starts
//! with a chosen prefix.
//!
//! A commit's identity is the SHA-1 of its serialized object
//! (`"commit <len>\0" || body`). Appending a 16-character hex nonce
//! inside the trailing blank lines of the message changes the digest
//! without changing what the commit means, so enumerating nonces and
//! hashing each candidate eventually reaches any desired digest
//! prefix. The counter space is split into residue classes, one per
//! worker thread; the first worker to find a match wins and the rest
//! are cancelled.
//!
//! ## Example
//!
//! ```rust
//! use shaforge_core::bruteforce;
//!
//! let body = b"tree 0000000000000000000000000000000000000000\n\
//!              author A <a@x> 0 +0000\n\
//!              committer A <a@x> 0 +0000\n\
//!              \nmsg";
//!
//! // Find an object whose digest starts with 0xab.
//! let found = bruteforce(body, &[0xab], false, 4).unwrap();
//! assert_eq!(found.digest[0], 0xab);
//! ```

mod object;
mod params;
mod prefix;
mod search;

pub use object::CommitObject;
pub use params::*;
pub use prefix::DigestPrefix;
pub use search::{Match, SearchError, SearchRequest, bruteforce};

#[cfg(test)]
mod tests;
