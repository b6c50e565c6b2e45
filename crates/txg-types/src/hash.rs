use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! digest_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wrap a pre-computed 32-byte digest.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The all-zero value.
            pub const fn zero() -> Self {
                Self([0u8; 32])
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// The raw 32 bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Hex-encoded string representation.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Short hex representation (first 8 characters).
            pub fn short_hex(&self) -> String {
                hex::encode(&self.0[..4])
            }

            /// Parse from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, TypeError> {
                let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.short_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; 32] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = TypeError;

            fn try_from(bytes: &[u8]) -> Result<Self, TypeError> {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
                    expected: 32,
                    actual: bytes.len(),
                })?;
                Ok(Self(arr))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

digest_newtype! {
    /// A 256-bit digest.
    ///
    /// Entry IDs, data commitments and extension hashes are all `Hash`
    /// values. The all-zero hash is the sentinel for "no entry".
    Hash
}

digest_newtype! {
    /// Identifier of an asset, carried in output commitments.
    ///
    /// Encodes exactly like a [`Hash`]: 32 raw bytes with no prefix.
    AssetId
}

impl From<AssetId> for Hash {
    fn from(id: AssetId) -> Self {
        Hash(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeros() {
        let zero = Hash::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.as_bytes(), &[0u8; 32]);
        assert_eq!(Hash::default(), zero);
    }

    #[test]
    fn hex_roundtrip() {
        let h = Hash::from_bytes([0xab; 32]);
        let parsed = Hash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = AssetId::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Hash::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn display_is_full_hex() {
        let h = Hash::from_bytes([1; 32]);
        let display = format!("{h}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, h.to_hex());
    }

    #[test]
    fn debug_names_the_type() {
        let id = AssetId::from_bytes([0x0f; 32]);
        assert_eq!(format!("{id:?}"), "AssetId(0f0f0f0f)");
    }

    #[test]
    fn asset_id_converts_to_hash() {
        let id = AssetId::from_bytes([7; 32]);
        let h: Hash = id.into();
        assert_eq!(h.as_bytes(), id.as_bytes());
    }

    #[test]
    fn serde_roundtrip() {
        let h = Hash::from_bytes([9; 32]);
        let json = serde_json::to_string(&h).unwrap();
        let parsed: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        assert!(Hash::from_bytes([0; 32]) < Hash::from_bytes([1; 32]));
    }
}
