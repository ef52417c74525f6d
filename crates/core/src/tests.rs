//! Tests for the commit object search engine.

use std::collections::HashMap;

use sha1::{Digest, Sha1};

use crate::{
    CommitObject, DIGEST_LEN, DigestPrefix, NONCE_LEN, SearchError, SearchRequest, bruteforce,
};

fn nonce_field(object: &CommitObject) -> &[u8] {
    &object.bytes()[object.nonce_offset()..]
}

#[test]
fn object_layout_matches_git_serialization() {
    let object = CommitObject::build(b"hello");

    // Recorded length covers body + two newlines + 16 nonce chars.
    assert_eq!(object.bytes(), b"commit 23\0hello\n\n0000000000000000");
    assert_eq!(object.nonce_offset(), object.byte_len() - NONCE_LEN);
}

#[test]
fn object_build_is_deterministic() {
    let a = CommitObject::build(b"same content");
    let b = CommitObject::build(b"same content");

    assert_eq!(a.bytes(), b.bytes());
}

#[test]
fn object_digest_matches_reference_vector() {
    let object = CommitObject::build(b"hello");

    assert_eq!(
        hex::encode(object.digest()),
        "7ee8610c0da2382083173283b80a3fbfaef4006f"
    );
}

#[test]
fn nonce_encoding_is_fixed_width_lsn_first() {
    let mut object = CommitObject::build(b"");

    object.write_nonce(0);
    assert_eq!(nonce_field(&object), b"0000000000000000");

    object.write_nonce(1);
    assert_eq!(nonce_field(&object), b"1000000000000000");

    object.write_nonce(0xdead_beef);
    assert_eq!(nonce_field(&object), b"feebdaed00000000");

    object.write_nonce(u64::MAX);
    assert_eq!(nonce_field(&object), b"ffffffffffffffff");
}

#[test]
fn nonce_encoding_is_injective_over_distinct_counters() {
    let mut object = CommitObject::build(b"");
    let mut seen: HashMap<Vec<u8>, u64> = HashMap::new();

    let counters = (0..1000u64)
        .chain((0..64).map(|shift| 1u64 << shift))
        .chain([u64::MAX, u64::MAX - 1, 0x0123_4567_89ab_cdef]);

    for counter in counters {
        object.write_nonce(counter);
        let field = nonce_field(&object).to_vec();
        if let Some(&prev) = seen.get(&field) {
            assert_eq!(prev, counter, "counters {prev} and {counter} collide");
        }
        seen.insert(field, counter);
    }
}

#[test]
fn residue_classes_partition_the_counter_space() {
    for workers in 1..=8u64 {
        let mut covered = vec![0u32; 1000];
        for start in 0..workers {
            let mut counter = start as usize;
            while counter < covered.len() {
                covered[counter] += 1;
                counter += workers as usize;
            }
        }
        assert!(
            covered.iter().all(|&hits| hits == 1),
            "partition broken for {workers} workers"
        );
    }
}

#[test]
fn empty_prefix_matches_any_digest() {
    let prefix = DigestPrefix::new(&[], false).unwrap();

    assert!(prefix.matches(&[0x00; DIGEST_LEN]));
    assert!(prefix.matches(&[0xff; DIGEST_LEN]));
}

#[test]
fn half_digit_compares_only_the_high_nibble() {
    let prefix = DigestPrefix::new(&[0xa0], true).unwrap();

    let mut digest = [0u8; DIGEST_LEN];
    digest[0] = 0xab;
    assert!(prefix.matches(&digest));
    digest[0] = 0xa0;
    assert!(prefix.matches(&digest));
    digest[0] = 0xba;
    assert!(!prefix.matches(&digest));
}

#[test]
fn full_byte_prefix_requires_exact_bytes() {
    let prefix = DigestPrefix::new(&[0x12, 0x34], false).unwrap();

    let mut digest = [0u8; DIGEST_LEN];
    digest[0] = 0x12;
    digest[1] = 0x34;
    assert!(prefix.matches(&digest));
    digest[1] = 0x35;
    assert!(!prefix.matches(&digest));
}

#[test]
fn hex_parsing_handles_even_odd_and_invalid_input() {
    assert_eq!(
        DigestPrefix::from_hex("abcd").unwrap(),
        DigestPrefix::new(&[0xab, 0xcd], false).unwrap()
    );
    // An odd digit count becomes a half-digit constraint.
    assert_eq!(
        DigestPrefix::from_hex("abc").unwrap(),
        DigestPrefix::new(&[0xab, 0xc0], true).unwrap()
    );
    assert!(matches!(
        DigestPrefix::from_hex("xyz"),
        Err(SearchError::InvalidHex('x'))
    ));
    assert!(matches!(
        DigestPrefix::from_hex(&"0".repeat(41)),
        Err(SearchError::PrefixTooLong { len: 21 })
    ));
}

#[test]
fn zero_workers_is_rejected_before_spawning() {
    let prefix = DigestPrefix::new(&[0x00], false).unwrap();

    assert!(matches!(
        SearchRequest::new(b"body".to_vec(), prefix, 0),
        Err(SearchError::NoWorkers)
    ));
}

#[test]
fn oversized_prefix_is_rejected() {
    assert!(matches!(
        DigestPrefix::new(&[0u8; 21], false),
        Err(SearchError::PrefixTooLong { len: 21 })
    ));
    // Same via the entry point, before any allocation.
    assert!(matches!(
        bruteforce(b"body", &[0u8; 21], false, 4),
        Err(SearchError::PrefixTooLong { len: 21 })
    ));
}

#[test]
fn half_digit_with_empty_prefix_is_rejected() {
    assert!(matches!(
        DigestPrefix::new(&[], true),
        Err(SearchError::EmptyHalfDigit)
    ));
}

#[test]
fn search_finds_a_two_zero_byte_prefix_and_round_trips() {
    let content = b"tree 0123456789abcdef0123456789abcdef01234567\n\
                    author A <a@x> 0 +0000\n\
                    committer A <a@x> 0 +0000\n\
                    \n\
                    msg";

    let found = bruteforce(content, &[0x00, 0x00], false, 4).unwrap();

    assert_eq!(&found.digest[..2], &[0x00, 0x00]);

    // Hashing the returned object reproduces the digest exactly.
    let recomputed: [u8; DIGEST_LEN] = Sha1::digest(&found.object).into();
    assert_eq!(recomputed, found.digest);

    // The object carries the canonical header and the original body.
    assert!(found.object.starts_with(b"commit "));
    assert!(
        found
            .object
            .windows(content.len())
            .any(|window| window == content.as_slice())
    );
}

#[test]
fn search_honors_half_digit_targets() {
    let found = bruteforce(b"half digit target", &[0x70], true, 2).unwrap();

    assert_eq!(found.digest[0] >> 4, 0x7);
}

#[test]
fn single_worker_search_completes() {
    let found = bruteforce(b"single worker body", &[0xab], false, 1).unwrap();

    assert_eq!(found.digest[0], 0xab);
}
