//! In-Memory Chain
//!
//! Implements `ChainRpc` without a node. Serves scripted dry-run weights,
//! native fees and storage values, records every dry run and submission,
//! and models the hub's task table closely enough to reject duplicate
//! provided ids and cancellation of unknown tasks.

use super::hub::{HubCalls, AUTOMATION_PALLET};
use crate::algorithms::{blake2_256, fee_from_units_per_second, generate_task_id};
use crate::domain::{
    AdapterError, ChainEvent, EncodedCall, ProvidedId, StorageQuery, TaskId, TxStatus,
};
use crate::ports::{ChainRpc, Signer, TxStatusStream};
use async_trait::async_trait;
use parity_scale_codec::Decode;
use parking_lot::RwLock;
use shared_types::{AccountId, Weight};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Dry-run weight reported for calls without a scripted weight.
pub const DEFAULT_CALL_WEIGHT: Weight = Weight::new(500_000_000, 8_192);

/// Native units per second used when no native fee is scripted.
pub const DEFAULT_NATIVE_UNITS_PER_SECOND: u128 = 1_000_000_000_000;

/// A development keyring account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevSigner {
    name: &'static str,
    account: AccountId,
}

impl DevSigner {
    /// Create a signer for `account`.
    pub fn new(name: &'static str, account: AccountId) -> Self {
        Self { name, account }
    }

    /// Substrate dev account `//Alice`.
    pub fn alice() -> Self {
        Self::new(
            "alice",
            AccountId::Id32([
                0xd4, 0x35, 0x93, 0xc7, 0x15, 0xfd, 0xd3, 0x1c, 0x61, 0x14, 0x1a, 0xbd, 0x04,
                0xa9, 0x9f, 0xd6, 0x82, 0x2c, 0x85, 0x58, 0x85, 0x4c, 0xcd, 0xe3, 0x9a, 0x56,
                0x84, 0xe7, 0xa5, 0x6d, 0xa2, 0x7d,
            ]),
        )
    }

    /// Moonbeam dev account Alith.
    pub fn alith() -> Self {
        Self::new(
            "alith",
            AccountId::Key20([
                0xf2, 0x4f, 0xf3, 0xa9, 0xcf, 0x04, 0xc7, 0x1d, 0xbc, 0x94, 0xd0, 0xb5, 0x66,
                0xf7, 0xa2, 0x7b, 0x94, 0x56, 0x6c, 0xac,
            ]),
        )
    }

    /// Keyring name.
    pub fn name(&self) -> &str {
        self.name
    }
}

impl Signer for DevSigner {
    fn account_id(&self) -> AccountId {
        self.account
    }
}

/// A recorded submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Signing account.
    pub signer: AccountId,
    /// Submitted call.
    pub call: EncodedCall,
}

/// A recorded dry run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DryRun {
    /// Account the call was estimated for.
    pub sender: AccountId,
    /// Estimated call.
    pub call: EncodedCall,
}

#[derive(Default)]
struct ChainState {
    connected: bool,
    tasks: HashSet<TaskId>,
    submissions: Vec<Submission>,
    dry_runs: Vec<DryRun>,
}

/// In-memory `ChainRpc`.
pub struct InMemoryChain {
    para_id: u32,
    ss58_prefix: u16,
    fail_discovery: bool,
    reject_submissions: Option<String>,
    call_weights: HashMap<Vec<u8>, Weight>,
    default_call_weight: Option<Weight>,
    native_fees: HashMap<Weight, u128>,
    native_units_per_second: u128,
    storage: HashMap<StorageQuery, Vec<u8>>,
    hub_calls: Option<HubCalls>,
    state: RwLock<ChainState>,
}

impl InMemoryChain {
    /// A chain with parachain id `para_id`.
    pub fn new(para_id: u32) -> Self {
        Self {
            para_id,
            ss58_prefix: 42,
            fail_discovery: false,
            reject_submissions: None,
            call_weights: HashMap::new(),
            default_call_weight: Some(DEFAULT_CALL_WEIGHT),
            native_fees: HashMap::new(),
            native_units_per_second: DEFAULT_NATIVE_UNITS_PER_SECOND,
            storage: HashMap::new(),
            hub_calls: None,
            state: RwLock::new(ChainState::default()),
        }
    }

    /// Report `prefix` as the ss58 prefix.
    pub fn with_ss58_prefix(mut self, prefix: u16) -> Self {
        self.ss58_prefix = prefix;
        self
    }

    /// Report `weight` for dry runs of exactly `call`.
    pub fn with_call_weight(mut self, call: &EncodedCall, weight: Weight) -> Self {
        self.call_weights.insert(call.as_bytes().to_vec(), weight);
        self
    }

    /// Reject dry runs of calls without a scripted weight.
    pub fn without_default_call_weight(mut self) -> Self {
        self.default_call_weight = None;
        self
    }

    /// Report `fee` as the native fee for `weight`.
    pub fn with_native_fee(mut self, weight: Weight, fee: u128) -> Self {
        self.native_fees.insert(weight, fee);
        self
    }

    /// Native fee rate for weights without a scripted fee.
    pub fn with_native_units_per_second(mut self, rate: u128) -> Self {
        self.native_units_per_second = rate;
        self
    }

    /// Store `value` under `query`.
    pub fn with_storage(mut self, query: StorageQuery, value: Vec<u8>) -> Self {
        self.storage.insert(query, value);
        self
    }

    /// Model the hub task table for calls at these indices.
    pub fn with_hub_calls(mut self, calls: HubCalls) -> Self {
        self.hub_calls = Some(calls);
        self
    }

    /// Fail identity discovery with a connection error.
    pub fn failing_discovery(mut self) -> Self {
        self.fail_discovery = true;
        self
    }

    /// Reject every submission from the pool with `reason`.
    pub fn rejecting_submissions(mut self, reason: &str) -> Self {
        self.reject_submissions = Some(reason.to_string());
        self
    }

    /// True while connected.
    pub fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    /// Submissions so far, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.read().submissions.clone()
    }

    /// Dry runs so far, oldest first.
    pub fn dry_runs(&self) -> Vec<DryRun> {
        self.state.read().dry_runs.clone()
    }

    /// True if `task_id` is scheduled.
    pub fn has_task(&self, task_id: &TaskId) -> bool {
        self.state.read().tasks.contains(task_id)
    }

    fn ensure_connected(&self) -> Result<(), AdapterError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(AdapterError::Connection(format!(
                "parachain {} not connected",
                self.para_id
            )))
        }
    }

    /// Dispatch `call` against the task table.
    fn dispatch(&self, signer: &AccountId, call: &EncodedCall) -> Result<Vec<ChainEvent>, String> {
        let Some(calls) = self.hub_calls else {
            return Ok(vec![event("System", "ExtrinsicSuccess")]);
        };
        let index = call.call_index();
        let mut state = self.state.write();

        if index == Some(calls.schedule_xcmp_task)
            || index == Some(calls.schedule_xcmp_task_through_proxy)
        {
            let provided_id =
                Vec::<u8>::decode(&mut call.args()).map_err(|_| "InvalidProvidedId".to_string())?;
            // the proxy call schedules for the account appended last
            let owner = if index == Some(calls.schedule_xcmp_task_through_proxy) {
                let args = call.args();
                let tail = args.get(args.len().saturating_sub(32)..).unwrap_or_default();
                AccountId::from_slice(tail).map_err(|_| "InvalidScheduleAs".to_string())?
            } else {
                *signer
            };
            let task_id = generate_task_id(&owner, &ProvidedId::new(provided_id));
            if !state.tasks.insert(task_id) {
                return Err("DuplicateTask".to_string());
            }
            return Ok(vec![event(AUTOMATION_PALLET, "TaskScheduled")]);
        }

        if index == Some(calls.cancel_task) {
            let bytes = <[u8; 32]>::decode(&mut call.args())
                .map_err(|_| "InvalidTaskId".to_string())?;
            if !state.tasks.remove(&TaskId(bytes)) {
                return Err("TaskDoesNotExist".to_string());
            }
            return Ok(vec![event(AUTOMATION_PALLET, "TaskCancelled")]);
        }

        Ok(vec![event("System", "ExtrinsicSuccess")])
    }
}

fn event(pallet: &str, name: &str) -> ChainEvent {
    ChainEvent {
        pallet: pallet.to_string(),
        name: name.to_string(),
    }
}

#[async_trait]
impl ChainRpc for InMemoryChain {
    async fn connect(&self) -> Result<(), AdapterError> {
        self.state.write().connected = true;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), AdapterError> {
        self.state.write().connected = false;
        Ok(())
    }

    async fn para_id(&self) -> Result<u32, AdapterError> {
        self.ensure_connected()?;
        if self.fail_discovery {
            return Err(AdapterError::Connection(
                "parachainInfo.parachainId unavailable".to_string(),
            ));
        }
        Ok(self.para_id)
    }

    async fn ss58_prefix(&self) -> Result<u16, AdapterError> {
        self.ensure_connected()?;
        Ok(self.ss58_prefix)
    }

    async fn query_call_weight(
        &self,
        sender: &AccountId,
        call: &EncodedCall,
    ) -> Result<Weight, AdapterError> {
        self.ensure_connected()?;
        self.state.write().dry_runs.push(DryRun {
            sender: *sender,
            call: call.clone(),
        });
        if call.call_index().is_none() {
            return Err(AdapterError::WeightQuery("call too short to decode".to_string()));
        }
        self.call_weights
            .get(call.as_bytes())
            .copied()
            .or(self.default_call_weight)
            .ok_or_else(|| {
                AdapterError::WeightQuery(format!("dry run rejected: {}", call.to_hex()))
            })
    }

    async fn query_weight_to_fee(&self, weight: Weight) -> Result<u128, AdapterError> {
        self.ensure_connected()?;
        match self.native_fees.get(&weight) {
            Some(fee) => Ok(*fee),
            None => fee_from_units_per_second(weight, self.native_units_per_second),
        }
    }

    async fn read_storage(&self, query: &StorageQuery) -> Result<Option<Vec<u8>>, AdapterError> {
        self.ensure_connected()?;
        Ok(self.storage.get(query).cloned())
    }

    async fn submit_and_watch(
        &self,
        call: &EncodedCall,
        signer: &dyn Signer,
    ) -> Result<TxStatusStream, AdapterError> {
        self.ensure_connected()?;
        let account = signer.account_id();

        if let Some(reason) = &self.reject_submissions {
            let statuses = vec![TxStatus::Invalid(reason.clone())];
            return Ok(Box::pin(tokio_stream::iter(statuses)));
        }

        let nonce = {
            let mut state = self.state.write();
            state.submissions.push(Submission {
                signer: account,
                call: call.clone(),
            });
            state.submissions.len() as u64
        };
        let mut preimage = call.as_bytes().to_vec();
        preimage.extend(nonce.to_le_bytes());
        let block_hash = blake2_256(&preimage);
        debug!(para_id = self.para_id, call = %call.to_hex(), "[in-memory] submitted");

        let last = match self.dispatch(&account, call) {
            Ok(events) => TxStatus::Finalized { block_hash, events },
            Err(error) => TxStatus::DispatchFailed {
                block_hash,
                module: AUTOMATION_PALLET.to_string(),
                error,
            },
        };
        let statuses = vec![TxStatus::Ready, TxStatus::InBlock(block_hash), last];
        Ok(Box::pin(tokio_stream::iter(statuses)))
    }
}
