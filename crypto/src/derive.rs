//! Identifier derivation for tips and protected sources.
//!
//! Every identifier is `blake2b_256(domain || fields...)`. Variable-length
//! fields are prefixed with their byte length as a big-endian `u64`; integers
//! are fixed-width big-endian.

use tipline_types::{AccountHandle, SourceHash, SourceId, Timestamp, TipId};

use crate::hash::blake2b_256_multi;

/// Domain tag for tip identifiers.
pub const TIP_ID_DOMAIN: &[u8] = b"tipline/tip-id/v1";

/// Domain tag for source identifiers.
pub const SOURCE_ID_DOMAIN: &[u8] = b"tipline/source-id/v1";

/// Derive a tip identifier.
///
/// `nonce` must differ between tips submitted at the same timestamp; the
/// ledger feeds a strictly increasing counter.
pub fn derive_tip_id(
    sender: &AccountHandle,
    recipient: &AccountHandle,
    timestamp: Timestamp,
    nonce: u64,
    message: &[u8],
) -> TipId {
    let sender_len = len_prefix(sender.as_bytes());
    let recipient_len = len_prefix(recipient.as_bytes());
    let message_len = len_prefix(message);
    let ts = timestamp.to_be_bytes();
    let nonce = nonce.to_be_bytes();
    TipId::new(blake2b_256_multi(&[
        TIP_ID_DOMAIN,
        &sender_len,
        sender.as_bytes(),
        &recipient_len,
        recipient.as_bytes(),
        &ts,
        &nonce,
        &message_len,
        message,
    ]))
}

/// Derive a source identifier.
///
/// There is no nonce: the same hash protected twice within one timestamp
/// yields the same id.
pub fn derive_source_id(source_hash: &SourceHash, timestamp: Timestamp) -> SourceId {
    let ts = timestamp.to_be_bytes();
    SourceId::new(blake2b_256_multi(&[
        SOURCE_ID_DOMAIN,
        source_hash.as_bytes(),
        &ts,
    ]))
}

fn len_prefix(field: &[u8]) -> [u8; 8] {
    (field.len() as u64).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(s: &str) -> AccountHandle {
        AccountHandle::new(s).unwrap()
    }

    #[test]
    fn tip_id_is_deterministic() {
        let a = derive_tip_id(&handle("s"), &handle("r"), Timestamp::new(10), 7, b"msg");
        let b = derive_tip_id(&handle("s"), &handle("r"), Timestamp::new(10), 7, b"msg");
        assert_eq!(a, b);
    }

    #[test]
    fn nonce_separates_same_instant() {
        let a = derive_tip_id(&handle("s"), &handle("r"), Timestamp::new(10), 0, b"msg");
        let b = derive_tip_id(&handle("s"), &handle("r"), Timestamp::new(10), 1, b"msg");
        assert_ne!(a, b);
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        // "ab" + "c" and "a" + "bc" concatenate identically without length prefixes.
        let a = derive_tip_id(&handle("ab"), &handle("c"), Timestamp::new(1), 0, b"m");
        let b = derive_tip_id(&handle("a"), &handle("bc"), Timestamp::new(1), 0, b"m");
        assert_ne!(a, b);
    }

    #[test]
    fn source_id_depends_on_timestamp() {
        let h = SourceHash::new([9u8; 32]);
        assert_eq!(
            derive_source_id(&h, Timestamp::new(5)),
            derive_source_id(&h, Timestamp::new(5))
        );
        assert_ne!(
            derive_source_id(&h, Timestamp::new(5)),
            derive_source_id(&h, Timestamp::new(6))
        );
    }

    #[test]
    fn tip_and_source_domains_differ() {
        assert_ne!(TIP_ID_DOMAIN, SOURCE_ID_DOMAIN);
    }
}
