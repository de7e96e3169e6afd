use crate::module::{probe, PlatformModule};
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{
    error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag, TokenStandard,
};

/// Edição com royalty do criador embutido no valor da compra
///
/// O acréscimo é percentual, expresso em pontos-base por
/// `royaltyBps()`; valores acima de 100% são truncados por segurança de
/// leitura adversarial.
pub struct RoyaltyEditionPlatform;

const MAX_ROYALTY_BPS: u64 = 10_000;

impl RoyaltyEditionPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RoyaltyEditionPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformModule for RoyaltyEditionPlatform {
    fn name(&self) -> &'static str {
        "royalty-edition"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::RoyaltyEdition
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        if probe(client, address, "editionInfo()").await {
            return true;
        }
        probe(client, address, "royaltyBps()").await
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (bps, price, is_active, name, total_supply, max_supply, max_per_wallet) = tokio::join!(
            resolver.uint_or("royaltyBps()", Default::default()),
            resolver.first_success_uint(&["salePrice()", "price()", "mintPrice()"]),
            resolver.is_active(),
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
            resolver.wallet_limit(),
        );

        let bps = bps.min(MAX_ROYALTY_BPS.into()).as_u64();
        let creator_fee = price * ethereum_types::U256::from(bps)
            / ethereum_types::U256::from(MAX_ROYALTY_BPS);

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::RoyaltyEdition,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(uint256)".to_string(),
            mint_price_per_token: price,
            protocol_fee: Default::default(),
            creator_fee,
            fee_model: FeeModel::PercentBps(bps),
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet,
            router_address: None,
        })
    }
}
