//! Search engine parameters.

/// SHA-1 digest length in bytes
pub const DIGEST_LEN: usize = 20;

/// Width of the brute-forced nonce field, in ASCII hex characters
pub const NONCE_LEN: usize = 16;

/// Bytes between the commit body and the nonce field (two newlines)
pub const TRAILER_LEN: usize = 2;

/// Maximum target prefix length in bytes (a full digest)
pub const MAX_PREFIX_LEN: usize = DIGEST_LEN;

/// Git object type tag written into the object header
pub const OBJECT_TAG: &str = "commit";

/// Worker loop iterations between cooperative cancellation checks
pub const CANCEL_CHECK_INTERVAL: u32 = 4096;
