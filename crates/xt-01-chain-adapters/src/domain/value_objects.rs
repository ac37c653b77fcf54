//! # Domain Value Objects
//!
//! Immutable value types for the chain adapters.

use parity_scale_codec::{Encode, Output};
use serde::{Deserialize, Serialize};
use shared_types::AccountKind;
use std::fmt;

/// Adapter lifecycle state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterState {
    /// Created, no connection yet.
    #[default]
    Uninitialized,
    /// Connected; chain identity discovered.
    Connected,
    /// Connection released. Terminal.
    Destroyed,
}

impl AdapterState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: AdapterState) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Connected)
                | (Self::Uninitialized, Self::Destroyed)
                | (Self::Connected, Self::Destroyed)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// Identity discovered from the chain at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainIdentity {
    /// Parachain id (`parachainInfo.parachainId`).
    pub para_id: u32,
    /// SS58 address prefix (`system.ss58Prefix`).
    pub ss58_prefix: u16,
}

/// Account derivation algorithm generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivationVersion {
    /// Hash of the V2-encoded location, prefixed with `"multiloc"`.
    V2,
    /// `HashedDescription` over `"SiblingChain"`.
    V3,
}

/// How a chain family derives the accounts of remote origins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationScheme {
    /// Algorithm generation.
    pub version: DerivationVersion,
    /// Account format of the result. V2 always yields 32 bytes.
    pub output: AccountKind,
}

/// Which account pays for execution on the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Encode)]
pub enum InstructionSequence {
    /// The hub's sovereign account on the destination pays.
    #[codec(index = 0)]
    PayThroughSovereignAccount,
    /// The user's derived account on the destination pays.
    #[codec(index = 1)]
    PayThroughRemoteDerivativeAccount,
}

/// Position of a call in the runtime's call enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallIndex {
    /// Pallet index in `construct_runtime!`.
    pub pallet: u8,
    /// Call index within the pallet.
    pub call: u8,
}

impl CallIndex {
    /// Create a call index.
    pub const fn new(pallet: u8, call: u8) -> Self {
        Self { pallet, call }
    }

    /// The two leading bytes of an encoded call.
    pub fn to_bytes(self) -> [u8; 2] {
        [self.pallet, self.call]
    }
}

/// Caller-chosen task identifier, unique per owner on the hub.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvidedId(Vec<u8>);

impl ProvidedId {
    /// Create from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// A random UUID v4, as its hyphenated text.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into_bytes())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True if no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ProvidedId {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl fmt::Display for ProvidedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(text) => f.write_str(text),
            Err(_) => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

// On the wire a provided id is a `Vec<u8>`.
impl Encode for ProvidedId {
    fn size_hint(&self) -> usize {
        self.0.size_hint()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.0.encode_to(dest)
    }
}

/// On-chain task id: `blake2_256(owner ++ provided_id)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub [u8; 32]);

impl TaskId {
    /// `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.to_hex())
    }
}

impl Encode for TaskId {
    fn size_hint(&self) -> usize {
        32
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&self.0)
    }
}
