use crate::module::{probe, PlatformModule};
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{
    error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag, TokenStandard,
};

/// Loja com taxa fixa de mint por transação
///
/// A convenção expõe `mintFee()` com uma taxa de protocolo cobrada uma
/// única vez por transação, independente da quantidade. O valor total é
/// `preço × quantidade + taxa`.
pub struct FlatFeeStorePlatform;

impl FlatFeeStorePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlatFeeStorePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformModule for FlatFeeStorePlatform {
    fn name(&self) -> &'static str {
        "flat-fee-store"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::FlatFeeStore
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        probe(client, address, "mintFee()").await
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (fee, price, is_active, name, total_supply, max_supply, max_per_wallet) = tokio::join!(
            resolver.uint_or("mintFee()", Default::default()),
            resolver.first_success_uint(&["mintPrice()", "price()", "cost()"]),
            resolver.is_active(),
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
            resolver.wallet_limit(),
        );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::FlatFeeStore,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(uint256)".to_string(),
            mint_price_per_token: price,
            protocol_fee: fee,
            creator_fee: Default::default(),
            fee_model: FeeModel::PerTransaction(fee),
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet,
            router_address: None,
        })
    }
}
