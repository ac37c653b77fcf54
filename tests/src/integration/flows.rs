//! # Scheduling Flow Tests
//!
//! Both scheduling flows end to end, from request to submitted call, plus
//! the hub task lifecycle the flows rely on.
//!
//! ## Flows Tested:
//!
//! 1. **Pay through sovereign account**: destination budget, hub submission
//! 2. **Pay through remote derivative account**: nested budgets, transact
//!    submitted on the destination
//! 3. **Task lifecycle**: duplicate provided ids, cancelling twice
//! 4. **Preconditions**: nothing reaches a chain when configuration is
//!    missing

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, HUB_PARA_ID, MOONBASE_PARA_ID, REMARK_WEIGHT};
    use parity_scale_codec::Encode;
    use shared_types::{Junction, Location, ScheduleDescriptor, Weight};
    use std::sync::Arc;
    use xt_01_chain_adapters::{
        generate_task_id, AdapterError, ChainAdapter, ChainRegistry, DevSigner, HubAdapter,
        InMemoryChain, InstructionSequence, MoonbeamAdapter, ProvidedId, Signer, AUTOMATION_PALLET,
    };
    use xt_02_task_scheduling::{
        ScheduleTaskRequest, SchedulingConfig, SchedulingError, TaskSchedulingApi,
        TaskSchedulingOrchestrator,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn hourly(provided_id: &str) -> ScheduleTaskRequest {
        ScheduleTaskRequest::new(
            ScheduleDescriptor::Recurring {
                next_execution_time: 1_700_000_000,
                frequency: 3600,
            },
            fixtures::remark("hello"),
        )
        .with_provided_id(provided_id)
    }

    // =============================================================================
    // PAY THROUGH SOVEREIGN ACCOUNT
    // =============================================================================

    #[tokio::test]
    async fn test_sovereign_overall_weight_adds_six_hub_instructions() {
        fixtures::init_tracing();
        let registry = ChainRegistry::for_testing();
        let (hub, _) = fixtures::hub().await;
        // a destination sharing the hub's instruction weight
        let mut config = registry.get("mangata-local").unwrap().clone();
        config.xcm = registry.get("turing-local").unwrap().xcm.clone();
        let rpc = Arc::new(
            InMemoryChain::new(2110).with_call_weight(&fixtures::remark("hello"), REMARK_WEIGHT),
        );
        let mut destination = xt_01_chain_adapters::MangataAdapter::new(config, rpc);
        destination.initialize().await.unwrap();

        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);
        let plan = orchestrator
            .plan_pay_through_sovereign_account(&hourly("weights"), &DevSigner::alice())
            .await
            .unwrap();

        assert_eq!(plan.payload.instruction_count, 6);
        assert_eq!(
            plan.payload.overall_weight.ref_time,
            plan.payload.encoded_call_weight.ref_time + 6_000_000_000
        );
        assert_eq!(plan.payload.overall_weight.proof_size, 2_048 + 6 * 65_536);
    }

    #[tokio::test]
    async fn test_sovereign_flow_schedules_on_hub() {
        fixtures::init_tracing();
        let (hub, hub_rpc) = fixtures::hub().await;
        let (destination, dest_rpc) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);
        let signer = DevSigner::alice();

        let scheduled = orchestrator
            .schedule_xcmp_task_through_sovereign_account(&hourly("sovereign"), &signer)
            .await
            .unwrap();

        // budget computed on the destination, fee in TUR at moonbase's rate
        let plan = &scheduled.plan;
        assert_eq!(plan.payload.chain, "moonbase-local");
        assert_eq!(plan.payload.encoded_call_weight, REMARK_WEIGHT);
        assert_eq!(plan.payload.overall_weight, Weight::new(1_800_000_000, 62_048));
        assert_eq!(plan.payload.fee, 748_800_000);
        assert_eq!(plan.task.execution_fee.amount, plan.payload.fee);
        assert!(dest_rpc.submissions().is_empty());

        // submitted on the hub, owned by the signer
        let submitted = hub_rpc.submissions();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].call, plan.call);
        assert!(scheduled.receipt.has_event(AUTOMATION_PALLET, "TaskScheduled"));
        assert_eq!(
            scheduled.task_id,
            generate_task_id(&signer.account_id(), &ProvidedId::from("sovereign"))
        );
        assert!(hub_rpc.has_task(&scheduled.task_id));
    }

    #[tokio::test]
    async fn test_sovereign_call_encodes_task_fields() {
        let (hub, _) = fixtures::hub().await;
        let (destination, _) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        let plan = orchestrator
            .plan_pay_through_sovereign_account(&hourly("layout"), &DevSigner::alice())
            .await
            .unwrap();

        let expected = hub
            .build_schedule_xcmp_task(&plan.task, InstructionSequence::PayThroughSovereignAccount)
            .unwrap();
        assert_eq!(plan.call, expected);
        let mut prefix = vec![60, 1];
        prefix.extend(ProvidedId::from("layout").encode());
        prefix.extend(Location::sibling(MOONBASE_PARA_ID).versioned().encode());
        assert!(plan.call.as_bytes().starts_with(&prefix));
    }

    // =============================================================================
    // PAY THROUGH REMOTE DERIVATIVE ACCOUNT
    // =============================================================================

    #[tokio::test]
    async fn test_remote_flow_budgets_each_call_where_it_runs() {
        fixtures::init_tracing();
        let (hub, hub_rpc) = fixtures::hub().await;
        let (destination, dest_rpc) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);
        let owner = DevSigner::alice().account_id();
        let signer = DevSigner::alith();

        let scheduled = orchestrator
            .schedule_xcmp_task_through_remote_derivative_account(
                &hourly("remote").with_schedule_as(owner),
                &signer,
            )
            .await
            .unwrap();
        let plan = &scheduled.plan;

        // payload: dry-run on moonbase as the owner's derived account
        let dest_dry_runs = dest_rpc.dry_runs();
        assert_eq!(dest_dry_runs.len(), 1);
        assert_eq!(dest_dry_runs[0].sender, plan.derived_account);
        assert_eq!(dest_dry_runs[0].call, fixtures::remark("hello"));
        assert_eq!(
            plan.derived_account,
            destination.get_derivative_account(owner.as_bytes(), HUB_PARA_ID).unwrap()
        );
        assert_eq!(plan.task.execution_fee.asset_location, Location::sibling_with(
            MOONBASE_PARA_ID,
            shared_types::Junction::PalletInstance(3),
        ));

        // wrapper: dry-run on the hub as the signer's derived account there
        let hub_dry_runs = hub_rpc.dry_runs();
        assert_eq!(hub_dry_runs.len(), 1);
        assert_eq!(hub_dry_runs[0].sender, plan.hub_origin);
        assert_eq!(hub_dry_runs[0].call, plan.proxy_call);
        assert_eq!(
            plan.hub_origin,
            hub.get_derivative_account(signer.account_id().as_bytes(), MOONBASE_PARA_ID)
                .unwrap()
        );
        assert_eq!(plan.outer.instruction_count, 4);
        assert_eq!(plan.transact.encoded_call_weight, plan.outer.encoded_call_weight);
        assert_eq!(plan.transact.overall_weight, plan.outer.overall_weight);
        assert_eq!(plan.transact.fee_location, Location::sibling(HUB_PARA_ID));

        // submitted on the destination only
        assert!(hub_rpc.submissions().is_empty());
        assert_eq!(dest_rpc.submissions().len(), 1);
        assert_eq!(
            scheduled.task_id,
            generate_task_id(&owner, &ProvidedId::from("remote"))
        );
    }

    #[tokio::test]
    async fn test_proxy_call_schedules_for_owner_when_executed_on_hub() {
        let (hub, hub_rpc) = fixtures::hub().await;
        let (destination, _) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);
        let owner = DevSigner::alice().account_id();

        let plan = orchestrator
            .plan_pay_through_remote_derivative_account(
                &hourly("proxy").with_schedule_as(owner),
                &DevSigner::alith(),
            )
            .await
            .unwrap();

        // deliver the transacted call as the hub would
        let origin = DevSigner::new("hub-origin", plan.hub_origin);
        hub.schedule_xcmp_task(&plan.proxy_call, &origin)
            .await
            .unwrap();
        let task_id = generate_task_id(&owner, &ProvidedId::from("proxy"));
        assert!(hub_rpc.has_task(&task_id));
    }

    #[tokio::test]
    async fn test_remote_flow_needs_transact_capability() {
        let (hub, hub_rpc) = fixtures::hub().await;
        let (mangata, mangata_rpc) = fixtures::mangata().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &mangata);

        let err = orchestrator
            .schedule_xcmp_task_through_remote_derivative_account(
                &hourly("remote"),
                &DevSigner::alice(),
            )
            .await
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(mangata_rpc.dry_runs().is_empty());
        assert!(hub_rpc.dry_runs().is_empty());
    }

    // =============================================================================
    // TASK LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_duplicate_provided_id_then_cancel_twice() {
        let (hub, hub_rpc) = fixtures::hub().await;
        let (destination, _) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);
        let signer = DevSigner::alice();

        let scheduled = orchestrator
            .schedule_xcmp_task_through_sovereign_account(&hourly("dup"), &signer)
            .await
            .unwrap();
        let second = orchestrator
            .schedule_xcmp_task_through_sovereign_account(&hourly("dup"), &signer)
            .await;
        assert_eq!(
            second.unwrap_err(),
            SchedulingError::Adapter(AdapterError::DuplicateTask {
                module: AUTOMATION_PALLET.to_string()
            })
        );

        // a different owner may reuse the provided id
        let bob = DevSigner::new("bob", shared_types::AccountId::Id32([0x8e; 32]));
        orchestrator
            .schedule_xcmp_task_through_sovereign_account(&hourly("dup"), &bob)
            .await
            .unwrap();

        hub.cancel_task(&scheduled.task_id, &signer).await.unwrap();
        assert!(!hub_rpc.has_task(&scheduled.task_id));
        assert_eq!(
            hub.cancel_task(&scheduled.task_id, &signer).await,
            Err(AdapterError::TaskDoesNotExist {
                module: AUTOMATION_PALLET.to_string()
            })
        );
    }

    // =============================================================================
    // PRECONDITIONS
    // =============================================================================

    #[tokio::test]
    async fn test_missing_hub_default_asset_fails_before_network() {
        let registry = ChainRegistry::for_testing();
        let mut config = registry.get("turing-local").unwrap().clone();
        config.default_asset = None;
        let hub_rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID));
        let mut hub = HubAdapter::new(config, hub_rpc.clone());
        hub.initialize().await.unwrap();
        let (destination, dest_rpc) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        for result in [
            orchestrator
                .schedule_xcmp_task_through_sovereign_account(&hourly("a"), &DevSigner::alice())
                .await
                .map(|_| ()),
            orchestrator
                .schedule_xcmp_task_through_remote_derivative_account(
                    &hourly("b"),
                    &DevSigner::alice(),
                )
                .await
                .map(|_| ()),
        ] {
            assert_eq!(
                result,
                Err(SchedulingError::Precondition(
                    "turing-local defaultAsset not set".to_string()
                ))
            );
        }
        assert!(dest_rpc.dry_runs().is_empty());
        assert!(dest_rpc.submissions().is_empty());
        assert!(hub_rpc.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_relay_hub_fee_asset_fails_before_network() {
        let registry = ChainRegistry::for_testing();
        let mut config = registry.get("turing-local").unwrap().clone();
        let fee_asset = config.default_asset.clone().unwrap();
        for asset in config.assets.iter_mut().filter(|a| a.asset.key == fee_asset) {
            asset.asset.location = Location::parent();
        }
        let hub_rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID));
        let mut hub = HubAdapter::new(config, hub_rpc.clone());
        hub.initialize().await.unwrap();
        let (destination, dest_rpc) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        let sovereign = orchestrator
            .plan_pay_through_sovereign_account(&hourly("a"), &DevSigner::alice())
            .await;
        assert!(matches!(
            sovereign,
            Err(SchedulingError::Adapter(AdapterError::MalformedLocation(_)))
        ));
        let remote = orchestrator
            .plan_pay_through_remote_derivative_account(&hourly("b"), &DevSigner::alice())
            .await;
        assert!(matches!(
            remote,
            Err(SchedulingError::Adapter(AdapterError::MalformedLocation(_)))
        ));
        assert!(dest_rpc.dry_runs().is_empty());
        assert!(hub_rpc.dry_runs().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_fee_asset_key_fails_before_network() {
        let registry = ChainRegistry::for_testing();
        let hub_rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID));
        let hub_config = registry.get("turing-local").unwrap().clone();
        let mut hub = HubAdapter::new(hub_config, hub_rpc.clone());
        hub.initialize().await.unwrap();
        let mut config = registry.get("moonbase-local").unwrap().clone();
        let fee_asset = config.default_asset.clone().unwrap();
        for asset in config.assets.iter_mut().filter(|a| a.asset.key == fee_asset) {
            asset.asset.location = Location::sibling_with(
                MOONBASE_PARA_ID,
                Junction::GeneralKey {
                    length: 40,
                    data: [0u8; 32],
                },
            );
        }
        let dest_rpc = Arc::new(InMemoryChain::new(MOONBASE_PARA_ID));
        let mut destination = MoonbeamAdapter::new(config, dest_rpc.clone());
        destination.initialize().await.unwrap();
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        let remote = orchestrator
            .plan_pay_through_remote_derivative_account(&hourly("c"), &DevSigner::alice())
            .await;
        assert!(matches!(
            remote,
            Err(SchedulingError::Adapter(AdapterError::InvalidInput(_)))
        ));
        assert!(dest_rpc.dry_runs().is_empty());
        assert!(hub_rpc.dry_runs().is_empty());
    }

    #[tokio::test]
    async fn test_unconnected_hub_fails_before_network() {
        let registry = ChainRegistry::for_testing();
        let hub = HubAdapter::new(
            registry.get("turing-local").unwrap().clone(),
            Arc::new(InMemoryChain::new(HUB_PARA_ID)),
        );
        let (destination, dest_rpc) = fixtures::moonbase().await;
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        let err = orchestrator
            .plan_pay_through_sovereign_account(&hourly("a"), &DevSigner::alice())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SchedulingError::Precondition("turing-local paraId not set".to_string())
        );
        assert!(dest_rpc.dry_runs().is_empty());
    }

    #[tokio::test]
    async fn test_failed_dry_run_submits_nothing() {
        let registry = ChainRegistry::for_testing();
        let (hub, hub_rpc) = fixtures::hub().await;
        let rpc = Arc::new(InMemoryChain::new(MOONBASE_PARA_ID).without_default_call_weight());
        let mut destination = xt_01_chain_adapters::MoonbeamAdapter::new(
            registry.get("moonbase-local").unwrap().clone(),
            rpc.clone(),
        );
        destination.initialize().await.unwrap();
        let orchestrator =
            TaskSchedulingOrchestrator::new(SchedulingConfig::default(), &hub, &destination);

        let err = orchestrator
            .schedule_xcmp_task_through_sovereign_account(&hourly("a"), &DevSigner::alice())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::Adapter(AdapterError::WeightQuery(_))
        ));
        assert_eq!(rpc.dry_runs().len(), 1);
        assert!(hub_rpc.submissions().is_empty());
    }
}
