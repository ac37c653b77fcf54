//! # Adapter Integration Tests
//!
//! Chain adapters of every family against in-memory chains: lifecycle,
//! account derivation, fee computation and cross-chain transfers.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, HUB_PARA_ID, MOONBASE_PARA_ID};
    use parity_scale_codec::Encode;
    use shared_types::{AccountId, AccountKind, Junction, Location, Weight, WeightLimit};
    use std::sync::Arc;
    use xt_01_chain_adapters::{
        to_absolute, to_relative, AdapterError, AdapterState, AssetRegistryMetadata, ChainAdapter,
        ChainRegistry, CrossChainTransfer, DevSigner, HubAdapter, InMemoryChain, MangataAdapter,
        MoonbeamAdapter, Signer,
    };

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_not_initialized_before_connect_and_after_destroy() {
        fixtures::init_tracing();
        let registry = ChainRegistry::for_testing();
        let rpc = Arc::new(InMemoryChain::new(MOONBASE_PARA_ID));
        let mut adapter =
            MoonbeamAdapter::new(registry.get("moonbase-local").unwrap().clone(), rpc.clone());

        assert_eq!(adapter.state(), AdapterState::Uninitialized);
        assert!(matches!(
            adapter.get_location(),
            Err(AdapterError::NotInitialized { .. })
        ));
        assert!(matches!(
            adapter
                .get_extrinsic_weight(&fixtures::remark("hello"), &DevSigner::alith().account_id())
                .await,
            Err(AdapterError::NotInitialized { .. })
        ));

        adapter.initialize().await.unwrap();
        assert_eq!(adapter.identity().unwrap().ss58_prefix, 42);
        assert_eq!(adapter.get_location().unwrap(), Location::sibling(MOONBASE_PARA_ID));

        adapter.destroy().await.unwrap();
        assert_eq!(adapter.state(), AdapterState::Destroyed);
        assert!(!rpc.is_connected());
        assert!(matches!(
            adapter.calculate_overall_weight(Weight::zero(), 1),
            Err(AdapterError::NotInitialized { .. })
        ));
        assert!(adapter.initialize().await.is_err());
    }

    #[tokio::test]
    async fn test_failed_discovery_stays_uninitialized() {
        let registry = ChainRegistry::for_testing();
        let rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID).failing_discovery());
        let mut hub = HubAdapter::new(registry.get("turing-local").unwrap().clone(), rpc.clone());

        assert!(matches!(
            hub.initialize().await,
            Err(AdapterError::Connection(_))
        ));
        assert_eq!(hub.state(), AdapterState::Uninitialized);
        assert!(!rpc.is_connected());
    }

    // =============================================================================
    // DERIVATION
    // =============================================================================

    #[tokio::test]
    async fn test_hub_derives_known_account() {
        let (hub, _) = fixtures::hub().await;
        let evm = hex::decode("31C5aA398Ae12B0dc423f47D47549095aA8c93A5").unwrap();
        let derived = hub.get_derivative_account(&evm, HUB_PARA_ID).unwrap();
        assert_eq!(
            derived,
            AccountId::from_hex(
                "0x0541c9ba406915a2be747908552631a5bfaa82a5c7819aa9c5104345cf075468"
            )
            .unwrap()
        );
    }

    #[tokio::test]
    async fn test_derivation_output_follows_family() {
        let (hub, _) = fixtures::hub().await;
        let (moonbase, _) = fixtures::moonbase().await;
        let (mangata, _) = fixtures::mangata().await;
        let alice = DevSigner::alice().account_id();

        let on_moonbase = moonbase
            .get_derivative_account(alice.as_bytes(), HUB_PARA_ID)
            .unwrap();
        let on_mangata = mangata
            .get_derivative_account(alice.as_bytes(), HUB_PARA_ID)
            .unwrap();
        let on_hub = hub
            .get_derivative_account(DevSigner::alith().account_id().as_bytes(), MOONBASE_PARA_ID)
            .unwrap();

        assert_eq!(on_moonbase.kind(), AccountKind::AccountKey20);
        assert_eq!(on_mangata.kind(), AccountKind::AccountId32);
        assert_eq!(on_hub.kind(), AccountKind::AccountId32);
        // V2 and V3 hash different preimages
        assert_ne!(on_mangata, on_hub);
    }

    #[tokio::test]
    async fn test_unrecognized_address_length() {
        let (hub, _) = fixtures::hub().await;
        assert_eq!(
            hub.get_derivative_account(&[0u8; 16], MOONBASE_PARA_ID),
            Err(AdapterError::UnrecognizedAddressFormat(16))
        );
    }

    // =============================================================================
    // LOCATIONS
    // =============================================================================

    #[tokio::test]
    async fn test_relative_location_round_trip_for_native_assets() {
        let registry = ChainRegistry::for_testing();
        let moonbase = registry.get("moonbase-local").unwrap();
        let native = moonbase.default_asset().unwrap().location().clone();

        let relative = to_relative(&native).unwrap();
        assert_eq!(relative.parents, 0);
        assert_eq!(relative.interior.first(), Some(&Junction::PalletInstance(3)));
        assert_eq!(to_absolute(&relative, MOONBASE_PARA_ID).unwrap(), native);
        assert_eq!(to_relative(&Location::sibling(HUB_PARA_ID)).unwrap(), Location::here());
    }

    // =============================================================================
    // FEES
    // =============================================================================

    #[tokio::test]
    async fn test_native_fee_matches_chain_report() {
        let registry = ChainRegistry::for_testing();
        let weight = Weight::new(1_250_000_000, 10_000);
        let rpc =
            Arc::new(InMemoryChain::new(MOONBASE_PARA_ID).with_native_fee(weight, 123_456_789));
        let mut moonbase =
            MoonbeamAdapter::new(registry.get("moonbase-local").unwrap().clone(), rpc);
        moonbase.initialize().await.unwrap();

        let native = moonbase
            .chain_config()
            .default_asset()
            .unwrap()
            .location()
            .clone();
        assert_eq!(moonbase.weight_to_fee(weight, &native).await.unwrap(), 123_456_789);
        // the relative form names the same asset
        let relative = to_relative(&native).unwrap();
        assert_eq!(moonbase.weight_to_fee(weight, &relative).await.unwrap(), 123_456_789);
    }

    #[tokio::test]
    async fn test_foreign_fee_from_registry_metadata() {
        let registry = ChainRegistry::for_testing();
        let assets = AssetRegistryMetadata::new("AssetRegistry");
        let foreign = Location::sibling(2000);
        let unpriced = Location::sibling(2001);
        // orml AssetMetadata { decimals, name, symbol, existential_deposit, location,
        // additional: { xcm: Some({ fee_per_second }), xyk: None } }
        let priced_metadata = (
            18u32,
            b"Foreign".to_vec(),
            b"FRN".to_vec(),
            1_000_000u128,
            Some(foreign.versioned()),
            Some(5_000_000_000_000u128),
            None::<u8>,
        )
            .encode();
        let unpriced_metadata = (
            12u32,
            b"Unpriced".to_vec(),
            b"UNP".to_vec(),
            0u128,
            Some(unpriced.versioned()),
            None::<u128>,
            None::<u8>,
        )
            .encode();
        let rpc = Arc::new(
            InMemoryChain::new(2110)
                .with_storage(assets.asset_id_query(&foreign), 7u32.encode())
                .with_storage(assets.metadata_query(7), priced_metadata)
                .with_storage(assets.asset_id_query(&unpriced), 8u32.encode())
                .with_storage(assets.metadata_query(8), unpriced_metadata),
        );
        let mut mangata = MangataAdapter::new(registry.get("mangata-local").unwrap().clone(), rpc);
        mangata.initialize().await.unwrap();

        let fee = mangata
            .weight_to_fee(Weight::new(1_000_000_000, 0), &foreign)
            .await
            .unwrap();
        assert_eq!(fee, 5_000_000_000);

        // registered without xcm metadata
        assert!(matches!(
            mangata.weight_to_fee(Weight::new(1, 0), &unpriced).await,
            Err(AdapterError::AssetFeeRateNotFound { .. })
        ));
        // not registered
        assert!(matches!(
            mangata
                .weight_to_fee(Weight::new(1, 0), &Location::sibling(3000))
                .await,
            Err(AdapterError::AssetFeeRateNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_overall_weight_uses_chain_instruction_weight() {
        let (hub, _) = fixtures::hub().await;
        let (mangata, _) = fixtures::mangata().await;
        let call = Weight::new(700, 7);

        assert_eq!(
            hub.calculate_overall_weight(call, 6).unwrap(),
            Weight::new(6_000_000_700, 393_223)
        );
        assert_eq!(
            mangata.calculate_overall_weight(call, 6).unwrap(),
            Weight::new(900_000_700, 7)
        );
    }

    // =============================================================================
    // TRANSFERS
    // =============================================================================

    #[tokio::test]
    async fn test_cross_chain_transfer_submits_beneficiary() {
        let (hub, hub_rpc) = fixtures::hub().await;
        let recipient = DevSigner::alith().account_id();
        let transfer = CrossChainTransfer {
            destination: Location::sibling(MOONBASE_PARA_ID),
            recipient,
            asset_location: Location::here(),
            amount: 10_000_000_000,
            weight_limit: WeightLimit::Unlimited,
        };

        let receipt = hub
            .cross_chain_transfer(&transfer, &DevSigner::alice())
            .await
            .unwrap();
        assert!(receipt.has_event("System", "ExtrinsicSuccess"));

        let submitted = hub_rpc.submissions();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].call.call_index(), Some(hub.calls().transfer_multiasset));
        // beneficiary junction is inside the destination, before the weight limit
        let bytes = submitted[0].call.as_bytes();
        let tail = &bytes[bytes.len() - 21..bytes.len() - 1];
        assert_eq!(tail, recipient.as_bytes());
    }

    #[tokio::test]
    async fn test_rejected_transfer_is_invalid_transaction() {
        let registry = ChainRegistry::for_testing();
        let rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID).rejecting_submissions("Payment"));
        let mut hub = HubAdapter::new(registry.get("turing-local").unwrap().clone(), rpc.clone());
        hub.initialize().await.unwrap();

        let transfer = CrossChainTransfer {
            destination: Location::sibling(MOONBASE_PARA_ID),
            recipient: DevSigner::alith().account_id(),
            asset_location: Location::here(),
            amount: 1,
            weight_limit: WeightLimit::Unlimited,
        };
        assert!(matches!(
            hub.cross_chain_transfer(&transfer, &DevSigner::alice()).await,
            Err(AdapterError::InvalidTransaction(_))
        ));
        assert!(rpc.submissions().is_empty());
    }
}
