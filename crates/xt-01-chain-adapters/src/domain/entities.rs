//! # Domain Entities
//!
//! Calls, storage queries, transaction statuses and the argument bundles of
//! the scheduling and transact calls.

use super::value_objects::{CallIndex, InstructionSequence, ProvidedId};
use parity_scale_codec::{Encode, Output};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Location, ScheduleDescriptor, VersionedLocation, Weight, WeightLimit};

/// Hash type (32-byte).
pub type Hash = [u8; 32];

/// A SCALE-encoded runtime call: `[pallet, call] ++ args`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedCall(#[serde(with = "shared_types::serde_hex")] Vec<u8>);

impl EncodedCall {
    /// Encode `args` behind `index`.
    pub fn new<A: Encode>(index: CallIndex, args: A) -> Self {
        let mut bytes = index.to_bytes().to_vec();
        args.encode_to(&mut bytes);
        Self(bytes)
    }

    /// Wrap already-encoded call bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw call bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Call index, if the call is long enough to carry one.
    pub fn call_index(&self) -> Option<CallIndex> {
        match self.0.as_slice() {
            [pallet, call, ..] => Some(CallIndex::new(*pallet, *call)),
            _ => None,
        }
    }

    /// Argument bytes after the call index.
    pub fn args(&self) -> &[u8] {
        self.0.get(2..).unwrap_or_default()
    }

    /// `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl std::fmt::Debug for EncodedCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncodedCall({})", self.to_hex())
    }
}

// Nested inside another call, an encoded call is a length-prefixed `Vec<u8>`.
impl Encode for EncodedCall {
    fn size_hint(&self) -> usize {
        self.0.size_hint()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.0.encode_to(dest)
    }
}

/// A storage-map read.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageQuery {
    /// Pallet name, e.g. `"AssetRegistry"`.
    pub pallet: String,
    /// Storage entry name.
    pub entry: String,
    /// SCALE-encoded map key.
    pub key: Vec<u8>,
}

/// An event emitted by an included transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEvent {
    /// Emitting pallet.
    pub pallet: String,
    /// Event name.
    pub name: String,
}

/// Status updates from submit-and-watch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// Accepted into the pool.
    Ready,
    /// Included in a block, not yet final.
    InBlock(Hash),
    /// Finalized and dispatched successfully.
    Finalized {
        /// Finalized block.
        block_hash: Hash,
        /// Events of the extrinsic.
        events: Vec<ChainEvent>,
    },
    /// Included, but dispatch returned an error.
    DispatchFailed {
        /// Block that included the extrinsic.
        block_hash: Hash,
        /// Pallet that raised the error.
        module: String,
        /// Error name.
        error: String,
    },
    /// Rejected by the pool.
    Invalid(String),
    /// Dropped from the pool.
    Dropped,
}

/// Outcome of a finalized, successfully dispatched extrinsic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    /// Finalized block.
    pub block_hash: Hash,
    /// Events of the extrinsic.
    pub events: Vec<ChainEvent>,
}

impl TxReceipt {
    /// True if the extrinsic emitted `pallet.name`.
    pub fn has_event(&self, pallet: &str, name: &str) -> bool {
        self.events.iter().any(|e| e.pallet == pallet && e.name == name)
    }
}

/// Fee paid on the destination for task execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionFee {
    /// Absolute location of the fee asset.
    pub asset_location: Location,
    /// Amount in the asset's smallest unit.
    pub amount: u128,
}

impl Encode for ExecutionFee {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.asset_location.versioned().encode_to(dest);
        self.amount.encode_to(dest);
    }
}

/// Arguments of the hub's `schedule_xcmp_task` calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XcmpTask {
    /// Caller-chosen task id.
    pub provided_id: ProvidedId,
    /// Destination chain, seen from the hub.
    pub destination: Location,
    /// When the task runs.
    pub schedule: ScheduleDescriptor,
    /// Asset paying the hub's scheduling fee, relative to the hub.
    pub schedule_fee: Location,
    /// Fee for execution on the destination.
    pub execution_fee: ExecutionFee,
    /// Call executed on the destination.
    pub encoded_call: EncodedCall,
    /// Weight of `encoded_call` on the destination.
    pub encoded_call_weight: Weight,
    /// Total XCM weight on the destination.
    pub overall_weight: Weight,
}

/// Arguments of a destination-side transact toward another chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XcmTransactParams {
    /// Chain executing the call.
    pub destination: Location,
    /// Call to execute there.
    pub encoded_call: EncodedCall,
    /// Fee asset, as the executing chain sees it.
    pub fee_location: Location,
    /// Fee amount.
    pub fee_amount: u128,
    /// Weight of `encoded_call` on the executing chain.
    pub encoded_call_weight: Weight,
    /// Total XCM weight on the executing chain.
    pub overall_weight: Weight,
}

/// A reserve-backed asset transfer to another chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossChainTransfer {
    /// Destination chain.
    pub destination: Location,
    /// Beneficiary on the destination.
    pub recipient: AccountId,
    /// Asset to move, as the sending chain sees it.
    pub asset_location: Location,
    /// Amount in the asset's smallest unit.
    pub amount: u128,
    /// Weight the destination may use to buy execution.
    pub weight_limit: WeightLimit,
}

/// Positional arguments of `schedule_xcmp_task`.
pub(crate) fn schedule_xcmp_task_args(
    task: &XcmpTask,
    instruction_sequence: InstructionSequence,
) -> impl Encode + '_ {
    (
        &task.provided_id,
        VersionedLocation::V3(task.destination.clone()),
        &task.schedule,
        VersionedLocation::V3(task.schedule_fee.clone()),
        &task.execution_fee,
        &task.encoded_call,
        task.encoded_call_weight,
        task.overall_weight,
        instruction_sequence,
    )
}

/// Positional arguments of `schedule_xcmp_task_through_proxy`.
pub(crate) fn schedule_xcmp_task_through_proxy_args<'a>(
    task: &'a XcmpTask,
    schedule_as: &'a AccountId,
) -> impl Encode + 'a {
    (
        &task.provided_id,
        VersionedLocation::V3(task.destination.clone()),
        &task.schedule,
        VersionedLocation::V3(task.schedule_fee.clone()),
        &task.execution_fee,
        &task.encoded_call,
        task.encoded_call_weight,
        task.overall_weight,
        schedule_as,
    )
}
