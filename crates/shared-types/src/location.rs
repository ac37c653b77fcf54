//! # Locations
//!
//! Cross-chain location descriptors (`{parents, interior}`) and their
//! junctions, with SCALE encodings for the XCM V2 and V3 wire formats and
//! the polkadot.js JSON shape used by chain configuration records.
//!
//! The in-memory representation is version independent: two locations are
//! equal iff their parent count and junction sequence match. V2 and V3 only
//! differ in how they are encoded.

use std::fmt;

use parity_scale_codec::{Compact, Encode, Output};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::account::AccountId;
use crate::errors::PrimitiveError;

/// Maximum number of junctions in a location interior (`X1`..`X8`).
pub const MAX_JUNCTIONS: usize = 8;

/// Consensus network a junction belongs to.
///
/// `None` in an `Option<NetworkId>` is what XCM V2 calls `Any`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Encode)]
pub enum NetworkId {
    /// Network identified by its genesis hash.
    #[codec(index = 0)]
    ByGenesis(#[serde(with = "crate::serde_hex")] [u8; 32]),
    /// Polkadot relay network.
    #[codec(index = 2)]
    Polkadot,
    /// Kusama relay network.
    #[codec(index = 3)]
    Kusama,
    /// Westend test network.
    #[codec(index = 4)]
    Westend,
    /// Rococo test network.
    #[codec(index = 5)]
    Rococo,
    /// An Ethereum chain.
    #[codec(index = 7)]
    Ethereum {
        /// EIP-155 chain id.
        #[codec(compact)]
        #[serde(rename = "chainId")]
        chain_id: u64,
    },
}

impl NetworkId {
    /// Append the XCM V2 `NetworkId` encoding of `network`.
    fn encode_v2_to(network: Option<&NetworkId>, dest: &mut Vec<u8>) -> Result<(), PrimitiveError> {
        match network {
            None => dest.push(0),
            Some(NetworkId::Polkadot) => dest.push(2),
            Some(NetworkId::Kusama) => dest.push(3),
            Some(other) => {
                return Err(PrimitiveError::NetworkNotRepresentable(format!(
                    "{:?}",
                    other
                )))
            }
        }
        Ok(())
    }
}

/// A single step in a location interior.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Encode)]
pub enum Junction {
    /// A parachain, by para-id.
    #[codec(index = 0)]
    Parachain(#[codec(compact)] u32),
    /// A 32-byte (Substrate) account.
    #[codec(index = 1)]
    AccountId32 {
        /// Network the account lives in.
        #[serde(default)]
        network: Option<NetworkId>,
        /// Raw account bytes.
        #[serde(with = "crate::serde_hex")]
        id: [u8; 32],
    },
    /// An indexed account.
    #[codec(index = 2)]
    AccountIndex64 {
        /// Network the account lives in.
        #[serde(default)]
        network: Option<NetworkId>,
        /// Account index.
        #[codec(compact)]
        index: u64,
    },
    /// A 20-byte (Ethereum-style) account.
    #[codec(index = 3)]
    AccountKey20 {
        /// Network the account lives in.
        #[serde(default)]
        network: Option<NetworkId>,
        /// Raw key bytes.
        #[serde(with = "crate::serde_hex")]
        key: [u8; 20],
    },
    /// A pallet, by its runtime index.
    #[codec(index = 4)]
    PalletInstance(u8),
    /// A numeric index, usually an asset id.
    #[codec(index = 5)]
    GeneralIndex(#[codec(compact)] u128),
    /// An opaque key of up to 32 bytes, zero padded.
    #[codec(index = 6)]
    GeneralKey {
        /// Number of meaningful bytes in `data`.
        length: u8,
        /// Key bytes, zero padded to 32.
        #[serde(with = "crate::serde_hex")]
        data: [u8; 32],
    },
}

impl Junction {
    /// Build a `GeneralKey` junction from up to 32 bytes.
    pub fn general_key(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        if bytes.len() > 32 {
            return Err(PrimitiveError::GeneralKeyTooLong(bytes.len()));
        }
        let mut data = [0u8; 32];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Junction::GeneralKey {
            length: bytes.len() as u8,
            data,
        })
    }

    /// Reject junctions whose fields violate their own bounds.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        match self {
            Junction::GeneralKey { length, .. } if *length as usize > 32 => {
                Err(PrimitiveError::GeneralKeyTooLong(*length as usize))
            }
            _ => Ok(()),
        }
    }

    /// Append the XCM V2 encoding of this junction.
    fn encode_v2_to(&self, dest: &mut Vec<u8>) -> Result<(), PrimitiveError> {
        match self {
            Junction::Parachain(id) => {
                dest.push(0);
                Compact(*id).encode_to(dest);
            }
            Junction::AccountId32 { network, id } => {
                dest.push(1);
                NetworkId::encode_v2_to(network.as_ref(), dest)?;
                dest.extend_from_slice(id);
            }
            Junction::AccountIndex64 { network, index } => {
                dest.push(2);
                NetworkId::encode_v2_to(network.as_ref(), dest)?;
                Compact(*index).encode_to(dest);
            }
            Junction::AccountKey20 { network, key } => {
                dest.push(3);
                NetworkId::encode_v2_to(network.as_ref(), dest)?;
                dest.extend_from_slice(key);
            }
            Junction::PalletInstance(index) => {
                dest.push(4);
                dest.push(*index);
            }
            Junction::GeneralIndex(index) => {
                dest.push(5);
                Compact(*index).encode_to(dest);
            }
            Junction::GeneralKey { length, data } => {
                self.validate()?;
                dest.push(6);
                data[..*length as usize].to_vec().encode_to(dest);
            }
        }
        Ok(())
    }
}

/// Location interior: `Here` or `X1`..`X8`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Junctions(Vec<Junction>);

impl Junctions {
    /// The empty interior.
    pub fn here() -> Self {
        Self(Vec::new())
    }

    /// Build an interior, enforcing the junction limit.
    pub fn new(junctions: Vec<Junction>) -> Result<Self, PrimitiveError> {
        if junctions.len() > MAX_JUNCTIONS {
            return Err(PrimitiveError::TooManyJunctions(junctions.len()));
        }
        Ok(Self(junctions))
    }

    /// Build an interior from a junction-count key (`Here`, `X1`..`X8`).
    ///
    /// Fails when the key is unrecognized or disagrees with the number of
    /// junctions supplied.
    pub fn from_key(key: &str, junctions: Vec<Junction>) -> Result<Self, PrimitiveError> {
        let arity = arity_of(key)?;
        if arity != junctions.len() {
            return Err(PrimitiveError::MalformedLocation(format!(
                "{} expects {} junctions, got {}",
                key,
                arity,
                junctions.len()
            )));
        }
        Self::new(junctions)
    }

    /// Junction-count key of this interior.
    pub fn key(&self) -> String {
        if self.0.is_empty() {
            "Here".to_string()
        } else {
            format!("X{}", self.0.len())
        }
    }

    /// True for the empty interior.
    pub fn is_here(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of junctions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no junctions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Junctions as a slice.
    pub fn as_slice(&self) -> &[Junction] {
        &self.0
    }

    /// First junction, if any.
    pub fn first(&self) -> Option<&Junction> {
        self.0.first()
    }

    /// A copy with `junction` appended.
    pub fn pushed(&self, junction: Junction) -> Result<Self, PrimitiveError> {
        let mut junctions = self.0.clone();
        junctions.push(junction);
        Self::new(junctions)
    }

    /// A copy with `junction` prepended.
    pub fn pushed_front(&self, junction: Junction) -> Result<Self, PrimitiveError> {
        let mut junctions = Vec::with_capacity(self.0.len() + 1);
        junctions.push(junction);
        junctions.extend(self.0.iter().cloned());
        Self::new(junctions)
    }

    /// A copy without the first junction.
    pub fn without_first(&self) -> Self {
        Self(self.0.iter().skip(1).cloned().collect())
    }
}

fn arity_of(key: &str) -> Result<usize, PrimitiveError> {
    if key == "Here" {
        return Ok(0);
    }
    key.strip_prefix('X')
        .filter(|n| !n.starts_with('0'))
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=MAX_JUNCTIONS).contains(n))
        .ok_or_else(|| {
            PrimitiveError::MalformedLocation(format!("unrecognized junction-count key `{}`", key))
        })
}

impl Encode for Junctions {
    fn size_hint(&self) -> usize {
        1 + self.0.iter().map(Encode::size_hint).sum::<usize>()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.push_byte(self.0.len() as u8);
        for junction in &self.0 {
            junction.encode_to(dest);
        }
    }
}

impl Serialize for Junctions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [] => serializer.serialize_str("Here"),
            [single] => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("X1", single)?;
                map.end()
            }
            many => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&self.key(), many)?;
                map.end()
            }
        }
    }
}

struct JunctionsVisitor;

impl<'de> Visitor<'de> for JunctionsVisitor {
    type Value = Junctions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"Here\" or a map with a single X1..X8 key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Junctions, E> {
        Junctions::from_key(v, Vec::new()).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Junctions, A::Error> {
        let key: String = map.next_key()?.ok_or_else(|| {
            de::Error::custom(PrimitiveError::MalformedLocation(
                "empty interior".to_string(),
            ))
        })?;
        let arity = arity_of(&key).map_err(de::Error::custom)?;
        let junctions: Vec<Junction> = match arity {
            0 => {
                map.next_value::<de::IgnoredAny>()?;
                Vec::new()
            }
            1 => vec![map.next_value::<Junction>()?],
            _ => map.next_value()?,
        };
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(PrimitiveError::MalformedLocation(
                "interior has more than one key".to_string(),
            )));
        }
        Junctions::from_key(&key, junctions).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Junctions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JunctionsVisitor)
    }
}

/// A location in the consensus universe, relative to some reference point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode)]
pub struct Location {
    /// Hops towards the common ancestor.
    pub parents: u8,
    /// Path down from that ancestor.
    pub interior: Junctions,
}

impl Location {
    /// Create a location.
    pub fn new(parents: u8, interior: Junctions) -> Self {
        Self { parents, interior }
    }

    /// The origin itself.
    pub fn here() -> Self {
        Self::default()
    }

    /// The relay chain, seen from a parachain.
    pub fn parent() -> Self {
        Self::new(1, Junctions::here())
    }

    /// A sibling parachain, seen from a parachain.
    pub fn sibling(para_id: u32) -> Self {
        Self::new(1, Junctions(vec![Junction::Parachain(para_id)]))
    }

    /// A junction inside a sibling parachain, e.g. a pallet or asset.
    pub fn sibling_with(para_id: u32, junction: Junction) -> Self {
        Self::new(1, Junctions(vec![Junction::Parachain(para_id), junction]))
    }

    /// Create a location from a parent count and junction list.
    pub fn with_junctions(parents: u8, junctions: Vec<Junction>) -> Result<Self, PrimitiveError> {
        Ok(Self::new(parents, Junctions::new(junctions)?))
    }

    /// A copy with `junction` appended to the interior.
    pub fn appended(&self, junction: Junction) -> Result<Self, PrimitiveError> {
        Ok(Self::new(self.parents, self.interior.pushed(junction)?))
    }

    /// A copy addressing `account` inside this location.
    pub fn with_account(
        &self,
        account: &AccountId,
        network: Option<NetworkId>,
    ) -> Result<Self, PrimitiveError> {
        self.appended(account.junction(network))
    }

    /// True for `{parents: 0, interior: Here}`.
    pub fn is_here(&self) -> bool {
        self.parents == 0 && self.interior.is_here()
    }

    /// Para-id of the leading `Parachain` junction, if present.
    pub fn para_id(&self) -> Option<u32> {
        match self.interior.first() {
            Some(Junction::Parachain(id)) => Some(*id),
            _ => None,
        }
    }

    /// Check every junction's bounds.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        self.interior.as_slice().iter().try_for_each(Junction::validate)
    }

    /// Encode in the XCM V2 `MultiLocation` wire format.
    pub fn encode_v2(&self) -> Result<Vec<u8>, PrimitiveError> {
        let mut out = Vec::with_capacity(2 + self.interior.len() * 34);
        out.push(self.parents);
        out.push(self.interior.len() as u8);
        for junction in self.interior.as_slice() {
            junction.encode_v2_to(&mut out)?;
        }
        Ok(out)
    }

    /// Wrap as `{V3: location}` for call arguments.
    pub fn versioned(&self) -> VersionedLocation {
        VersionedLocation::V3(self.clone())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{parents: {}, interior: {}", self.parents, self.interior.key())?;
        if !self.interior.is_here() {
            write!(f, "{:?}", self.interior.as_slice())?;
        }
        f.write_str("}")
    }
}

/// Version-tagged location, as taken by call arguments.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum VersionedLocation {
    /// XCM V3 location.
    #[codec(index = 3)]
    V3(Location),
}
