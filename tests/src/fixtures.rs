//! # Test Fixtures
//!
//! Connected adapters over in-memory chains, keyed the way the local
//! registry names them.

use shared_types::Weight;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use xt_01_chain_adapters::{
    CallIndex, ChainAdapter, ChainRegistry, EncodedCall, HubAdapter, HubCalls, InMemoryChain,
    MangataAdapter, MoonbeamAdapter,
};

/// Para-id of the local hub.
pub const HUB_PARA_ID: u32 = 2114;
/// Para-id of the local Moonbeam-family chain.
pub const MOONBASE_PARA_ID: u32 = 1000;
/// Para-id of the local Mangata-family chain.
pub const MANGATA_PARA_ID: u32 = 2110;

/// Dry-run weight of [`remark`] on every destination.
pub const REMARK_WEIGHT: Weight = Weight::new(300_000_000, 2_048);

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `system.remarkWithEvent` payload.
pub fn remark(text: &str) -> EncodedCall {
    EncodedCall::new(CallIndex::new(0, 7), text.as_bytes().to_vec())
}

/// A connected hub with its chain.
pub async fn hub() -> (HubAdapter<InMemoryChain>, Arc<InMemoryChain>) {
    let registry = ChainRegistry::for_testing();
    let rpc = Arc::new(InMemoryChain::new(HUB_PARA_ID).with_hub_calls(HubCalls::default()));
    let mut hub = HubAdapter::new(registry.get("turing-local").expect("hub").clone(), rpc.clone());
    hub.initialize().await.expect("hub connects");
    (hub, rpc)
}

/// A connected Moonbeam-family destination with its chain.
pub async fn moonbase() -> (MoonbeamAdapter<InMemoryChain>, Arc<InMemoryChain>) {
    let registry = ChainRegistry::for_testing();
    let rpc = Arc::new(
        InMemoryChain::new(MOONBASE_PARA_ID)
            .with_ss58_prefix(1287)
            .with_call_weight(&remark("hello"), REMARK_WEIGHT),
    );
    let mut adapter = MoonbeamAdapter::new(
        registry.get("moonbase-local").expect("moonbase").clone(),
        rpc.clone(),
    );
    adapter.initialize().await.expect("moonbase connects");
    (adapter, rpc)
}

/// A connected Mangata-family destination with its chain.
pub async fn mangata() -> (MangataAdapter<InMemoryChain>, Arc<InMemoryChain>) {
    let registry = ChainRegistry::for_testing();
    let rpc = Arc::new(
        InMemoryChain::new(MANGATA_PARA_ID).with_call_weight(&remark("hello"), REMARK_WEIGHT),
    );
    let mut adapter = MangataAdapter::new(
        registry.get("mangata-local").expect("mangata").clone(),
        rpc.clone(),
    );
    adapter.initialize().await.expect("mangata connects");
    (adapter, rpc)
}
