//! # Account Derivation
//!
//! Deterministic accounts by which a remote origin is addressed on a chain.
//! These must match the executing runtime bit for bit: a wrong byte means
//! the dry run is charged against an account that does not exist.
//!
//! ## V2 (`"multiloc"` hash)
//!
//! ```text
//! hash( SCALE("multiloc") ++ SCALE_v2({1, X2[Parachain(p), Account(a)]}) )
//! ```
//!
//! ## V3 (`HashedDescription`)
//!
//! ```text
//! blake2_256( "SiblingChain" ++ compact(p) ++ SCALE(tag ++ a) )
//! ```

use crate::domain::{AdapterError, DerivationScheme, DerivationVersion, ProvidedId, TaskId};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use parity_scale_codec::{Compact, Encode};
use sha3::Keccak256;
use shared_types::{AccountId, AccountKind, Junction, Location, NetworkId, RegistryHasher};

/// Prefix of V2 derivation preimages.
pub const MULTILOC_PREFIX: &[u8] = b"multiloc";

/// Prefix of V3 sibling-chain descriptions.
pub const SIBLING_CHAIN_PREFIX: &[u8] = b"SiblingChain";

type Blake2b256 = Blake2b<U32>;

/// Blake2b with 32-byte output.
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// Keccak-256.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

fn registry_hash(hasher: RegistryHasher, data: &[u8]) -> [u8; 32] {
    match hasher {
        RegistryHasher::Blake2_256 => blake2_256(data),
        RegistryHasher::Keccak256 => keccak_256(data),
    }
}

/// V2 derivation. Always yields a 32-byte account.
pub fn derive_account_v2(
    account: &[u8],
    para_id: u32,
    network: Option<NetworkId>,
    hasher: RegistryHasher,
) -> Result<AccountId, AdapterError> {
    let origin = AccountId::from_slice(account)?;
    let location = Location::with_junctions(
        1,
        vec![Junction::Parachain(para_id), origin.junction(network)],
    )?;

    let mut preimage = MULTILOC_PREFIX.encode();
    preimage.extend(location.encode_v2()?);
    Ok(AccountId::Id32(registry_hash(hasher, &preimage)))
}

/// V3 derivation, truncated to 20 bytes for `AccountKey20` output.
pub fn derive_account_v3(
    account: &[u8],
    para_id: u32,
    output: AccountKind,
) -> Result<AccountId, AdapterError> {
    let kind = AccountKind::from_len(account.len())?;

    let mut description = kind.tag().to_vec();
    description.extend_from_slice(account);

    let mut preimage = SIBLING_CHAIN_PREFIX.to_vec();
    Compact(para_id).encode_to(&mut preimage);
    description.encode_to(&mut preimage);

    let hash = blake2_256(&preimage);
    match output {
        AccountKind::AccountKey20 => AccountId::from_slice(&hash[..20]),
        AccountKind::AccountId32 => Ok(AccountId::Id32(hash)),
    }
    .map_err(AdapterError::from)
}

/// Derive with a chain family's scheme.
pub fn derive_account(
    scheme: &DerivationScheme,
    account: &[u8],
    para_id: u32,
    network: Option<NetworkId>,
    hasher: RegistryHasher,
) -> Result<AccountId, AdapterError> {
    match scheme.version {
        DerivationVersion::V2 => derive_account_v2(account, para_id, network, hasher),
        DerivationVersion::V3 => derive_account_v3(account, para_id, scheme.output),
    }
}

/// Task id the hub assigns to `provided_id` scheduled by `owner`.
pub fn generate_task_id(owner: &AccountId, provided_id: &ProvidedId) -> TaskId {
    let mut preimage = owner.encode();
    provided_id.encode_to(&mut preimage);
    TaskId(blake2_256(&preimage))
}
