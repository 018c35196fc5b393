//! Fixed-size 32-byte identifiers: tip ids, source ids, and hashed source identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

macro_rules! hash_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Parse from a 64-character hex string (an optional `0x` prefix is accepted).
            pub fn from_hex(s: &str) -> Result<Self, TypesError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
                let arr: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| TypesError::InvalidLength(bytes.len()))?;
                Ok(Self(arr))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }
    };
}

hash_type!(
    /// Identifier of a recorded tip, unique across the ledger.
    TipId
);

hash_type!(
    /// Identifier of a protected source record, derived from `(SourceHash, Timestamp)`.
    SourceId
);

hash_type!(
    /// Caller-supplied hash of a source's identity. The ledger never sees the raw identity.
    SourceHash
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_with_prefix() {
        let id = TipId::new([0xab; 32]);
        let parsed = TipId::from_hex(&format!("0x{id}")).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn short_hex_rejected() {
        assert_eq!(SourceHash::from_hex("abcd"), Err(TypesError::InvalidLength(2)));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(matches!(
            SourceId::from_hex("zz"),
            Err(TypesError::InvalidHex(_))
        ));
    }

    #[test]
    fn debug_is_abbreviated() {
        let id = SourceId::new([1u8; 32]);
        assert_eq!(format!("{id:?}"), "SourceId(01010101)");
    }
}
