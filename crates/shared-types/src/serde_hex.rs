//! `0x`-prefixed hex (de)serialization for byte fields in JSON records.

use serde::{Deserialize, Deserializer, Serializer};

/// Serialize bytes as a `0x`-prefixed lowercase hex string.
pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes.as_ref())))
}

/// Deserialize a hex string (prefix optional) into a fixed or growable buffer.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<Vec<u8>>,
{
    let s = String::deserialize(deserializer)?;
    let bytes = decode(&s).map_err(serde::de::Error::custom)?;
    let len = bytes.len();
    T::try_from(bytes)
        .map_err(|_| serde::de::Error::custom(format!("unexpected byte length {}", len)))
}

/// Decode a hex string, accepting an optional `0x` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}
