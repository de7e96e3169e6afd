mod common;

use async_trait::async_trait;
use common::MockChainClient;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    error::Result, traits::ChainClient, ContractSnapshot, Error, FeeModel, PlatformTag,
    TokenStandard,
};
use mintpilot_platforms::{proxy, PlatformModule, PlatformRegistry};

/// Módulo de teste com detecção e marcador configuráveis
struct StubModule {
    name: &'static str,
    matches_address: Option<Address>,
    marker: u64,
}

impl StubModule {
    fn matching(name: &'static str, marker: u64) -> Self {
        Self { name, matches_address: None, marker }
    }

    fn matching_only(name: &'static str, address: Address, marker: u64) -> Self {
        Self { name, matches_address: Some(address), marker }
    }

    fn never_matching(name: &'static str, marker: u64) -> Self {
        Self { name, matches_address: Some(Address::repeat_byte(0xff)), marker }
    }
}

#[async_trait]
impl PlatformModule for StubModule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::CustomAuction
    }

    async fn detect(&self, _client: &dyn ChainClient, address: Address) -> bool {
        match self.matches_address {
            Some(expected) => address == expected,
            None => true,
        }
    }

    async fn analyze(
        &self,
        _client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: self.tag(),
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(uint256)".to_string(),
            mint_price_per_token: U256::from(self.marker),
            protocol_fee: U256::zero(),
            creator_fee: U256::zero(),
            fee_model: FeeModel::Flat,
            is_active: true,
            name: None,
            total_supply: None,
            max_supply: None,
            max_per_wallet: None,
            router_address: None,
        })
    }
}

#[tokio::test]
async fn registration_order_wins_when_both_modules_detect() {
    let registry = PlatformRegistry::with_modules(vec![
        Box::new(StubModule::matching("first", 1)),
        Box::new(StubModule::matching("second", 2)),
    ]);
    let mock = MockChainClient::new();

    let snapshot = registry
        .analyze(&mock, Address::repeat_byte(0xaa), 1, None)
        .await
        .unwrap();
    assert_eq!(snapshot.mint_price_per_token, U256::from(1));
}

#[tokio::test]
async fn forced_platform_bypasses_detection_entirely() {
    let registry = PlatformRegistry::with_modules(vec![
        Box::new(StubModule::matching("first", 1)),
        Box::new(StubModule::never_matching("second", 2)),
    ]);
    let mock = MockChainClient::new();

    // "second" nunca detectaria este endereço, mas a seleção forçada ignora isso
    let snapshot = registry
        .analyze(&mock, Address::repeat_byte(0xaa), 1, Some("second"))
        .await
        .unwrap();
    assert_eq!(snapshot.mint_price_per_token, U256::from(2));
}

#[tokio::test]
async fn unknown_forced_platform_is_a_configuration_error() {
    let registry = PlatformRegistry::with_modules(vec![Box::new(StubModule::matching("first", 1))]);
    let mock = MockChainClient::new();

    let err = registry
        .analyze(&mock, Address::repeat_byte(0xaa), 1, Some("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigurationError(_)));
}

#[tokio::test]
async fn falls_back_to_generic_when_nothing_matches() {
    let registry =
        PlatformRegistry::with_modules(vec![Box::new(StubModule::never_matching("first", 1))]);
    let mock = MockChainClient::new();

    let snapshot = registry
        .analyze(&mock, Address::repeat_byte(0xaa), 1, None)
        .await
        .unwrap();
    assert_eq!(snapshot.platform, PlatformTag::Generic);
    // O genérico nunca se recusa: campos ilegíveis viram defaults
    assert_eq!(snapshot.mint_price_per_token, U256::zero());
    assert!(snapshot.is_active);
}

#[tokio::test]
async fn forced_generic_is_always_available() {
    let registry = PlatformRegistry::standard();
    let mock = MockChainClient::new();

    let snapshot = registry
        .analyze(&mock, Address::repeat_byte(0xaa), 1, Some("generic"))
        .await
        .unwrap();
    assert_eq!(snapshot.platform, PlatformTag::Generic);
}

#[tokio::test]
async fn minimal_proxy_is_unwrapped_for_detection_but_analyzed_in_place() {
    let proxy_addr = Address::repeat_byte(0xaa);
    let implementation = Address::repeat_byte(0xbb);

    let mut mock = MockChainClient::new();
    mock.with_bytecode(proxy_addr, proxy::minimal_proxy_bytecode(implementation));

    // O módulo só reconhece a implementação, não o proxy
    let registry = PlatformRegistry::with_modules(vec![Box::new(StubModule::matching_only(
        "impl-only",
        implementation,
        7,
    ))]);

    let snapshot = registry.analyze(&mock, proxy_addr, 1, None).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, U256::from(7));
    // A análise continua apontando para o proxy, que é quem atende as chamadas
    assert_eq!(snapshot.address, proxy_addr);
}
