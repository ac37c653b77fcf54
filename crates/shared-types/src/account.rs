//! # Accounts
//!
//! Raw account identifiers. The account format is inferred from byte
//! length: 20 bytes is an Ethereum-style key, 32 bytes a Substrate account.

use std::fmt;

use parity_scale_codec::{Encode, Output};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::PrimitiveError;
use crate::location::{Junction, NetworkId};

/// Account format, as named by the XCM junction that carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// 20-byte key.
    AccountKey20,
    /// 32-byte account id.
    AccountId32,
}

impl AccountKind {
    /// ASCII tag used in hashed account descriptions.
    pub fn tag(&self) -> &'static [u8] {
        match self {
            AccountKind::AccountKey20 => b"AccountKey20",
            AccountKind::AccountId32 => b"AccountId32",
        }
    }

    /// Byte length of accounts of this kind.
    pub fn byte_len(&self) -> usize {
        match self {
            AccountKind::AccountKey20 => 20,
            AccountKind::AccountId32 => 32,
        }
    }

    /// Infer the kind from a raw byte length.
    pub fn from_len(len: usize) -> Result<Self, PrimitiveError> {
        match len {
            20 => Ok(AccountKind::AccountKey20),
            32 => Ok(AccountKind::AccountId32),
            other => Err(PrimitiveError::UnrecognizedAddressFormat(other)),
        }
    }
}

/// A raw account identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountId {
    /// 20-byte key.
    Key20([u8; 20]),
    /// 32-byte account id.
    Id32([u8; 32]),
}

impl AccountId {
    /// Build from raw bytes; the length selects the kind.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        match AccountKind::from_len(bytes.len())? {
            AccountKind::AccountKey20 => {
                let mut key = [0u8; 20];
                key.copy_from_slice(bytes);
                Ok(AccountId::Key20(key))
            }
            AccountKind::AccountId32 => {
                let mut id = [0u8; 32];
                id.copy_from_slice(bytes);
                Ok(AccountId::Id32(id))
            }
        }
    }

    /// Parse a hex address (`0x` prefix optional).
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        let bytes =
            crate::serde_hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Account kind.
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountId::Key20(_) => AccountKind::AccountKey20,
            AccountId::Id32(_) => AccountKind::AccountId32,
        }
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AccountId::Key20(key) => key,
            AccountId::Id32(id) => id,
        }
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }

    /// The junction addressing this account in `network`.
    pub fn junction(&self, network: Option<NetworkId>) -> Junction {
        match *self {
            AccountId::Key20(key) => Junction::AccountKey20 { network, key },
            AccountId::Id32(id) => Junction::AccountId32 { network, id },
        }
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self.to_hex())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// Accounts are fixed-width on the wire: no length prefix.
impl Encode for AccountId {
    fn size_hint(&self) -> usize {
        self.as_bytes().len()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(self.as_bytes());
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
