//! orml Asset Registry
//!
//! Fee rates of chains keeping them in orml `AssetRegistry` metadata. The
//! asset id is resolved from the location through `LocationToAssetId`, then
//! `additional.xcm.fee_per_second` is read from `Metadata(asset_id)`:
//!
//! ```text
//! AssetMetadata {
//!     decimals: u32,
//!     name: BoundedVec<u8>,
//!     symbol: BoundedVec<u8>,
//!     existential_deposit: u128,
//!     location: Option<VersionedMultiLocation>,
//!     additional: { xcm: Option<{ fee_per_second: u128 }>, xyk: Option<..> },
//! }
//! ```

use crate::domain::{AdapterError, StorageQuery};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use shared_types::Location;

/// Storage entry mapping a location to its asset id.
pub const LOCATION_TO_ASSET_ID: &str = "LocationToAssetId";

/// Storage entry mapping an asset id to its metadata.
pub const METADATA: &str = "Metadata";

/// Version index of `VersionedMultiLocation::V2`.
const VERSIONED_V2: u8 = 1;

/// An orml asset registry pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRegistryMetadata {
    /// Pallet name.
    pub pallet: String,
}

impl AssetRegistryMetadata {
    /// Registry held by `pallet`.
    pub fn new(pallet: &str) -> Self {
        Self {
            pallet: pallet.to_string(),
        }
    }

    fn read(&self, entry: &str, key: Vec<u8>) -> StorageQuery {
        StorageQuery {
            pallet: self.pallet.clone(),
            entry: entry.to_string(),
            key,
        }
    }

    fn decode_error(&self, entry: &str, reason: impl std::fmt::Display) -> AdapterError {
        AdapterError::Decode(format!("{}.{}: {}", self.pallet, entry, reason))
    }

    /// `LocationToAssetId(location)`.
    pub fn asset_id_query(&self, location: &Location) -> StorageQuery {
        self.read(LOCATION_TO_ASSET_ID, location.encode())
    }

    /// Decode a stored asset id.
    pub fn decode_asset_id(&self, mut value: &[u8]) -> Result<u32, AdapterError> {
        u32::decode(&mut value).map_err(|e| self.decode_error(LOCATION_TO_ASSET_ID, e))
    }

    /// `Metadata(asset_id)`.
    pub fn metadata_query(&self, asset_id: u32) -> StorageQuery {
        self.read(METADATA, asset_id.encode())
    }

    /// Fee per second from the metadata of the asset at `location`; `None`
    /// when the asset carries no XCM metadata.
    ///
    /// The embedded location must be absent or encode `location`.
    pub fn decode_fee_per_second(
        &self,
        mut value: &[u8],
        location: &Location,
    ) -> Result<Option<u128>, AdapterError> {
        let input = &mut value;
        // decimals, name, symbol, existential_deposit
        <(u32, Vec<u8>, Vec<u8>, u128)>::decode(input)
            .map_err(|e| self.decode_error(METADATA, e))?;
        self.skip_location(input, location)?;
        // additional.xcm; XcmMetadata has the single field fee_per_second
        Option::<u128>::decode(input).map_err(|e| self.decode_error(METADATA, e))
    }

    fn skip_location(&self, input: &mut &[u8], location: &Location) -> Result<(), AdapterError> {
        match u8::decode(input).map_err(|e| self.decode_error(METADATA, e))? {
            0 => return Ok(()),
            1 => {}
            tag => {
                return Err(self.decode_error(METADATA, format!("invalid option tag {}", tag)))
            }
        }
        let mut candidates = vec![location.versioned().encode()];
        if let Ok(v2) = location.encode_v2() {
            let mut versioned = vec![VERSIONED_V2];
            versioned.extend(v2);
            candidates.push(versioned);
        }
        let rest: &[u8] = *input;
        let matched = candidates
            .iter()
            .find(|encoded| rest.starts_with(encoded))
            .ok_or_else(|| {
                self.decode_error(METADATA, format!("metadata location is not {}", location))
            })?;
        *input = &rest[matched.len()..];
        Ok(())
    }
}
