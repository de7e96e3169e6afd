use crate::module::{probe, PlatformModule};
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{
    error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag, TokenStandard,
};

/// Leilão holandês / curva de preço decrescente
///
/// Detectado pelo par `startPrice()` + `endPrice()`. O preço vigente
/// vem de `currentPrice()`; na ausência dele, `startPrice()` serve de
/// teto conservador (nunca se paga menos que o preço corrente real).
pub struct DutchAuctionPlatform;

impl DutchAuctionPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DutchAuctionPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformModule for DutchAuctionPlatform {
    fn name(&self) -> &'static str {
        "dutch-auction"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::DutchAuction
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        let (start, end) = tokio::join!(
            probe(client, address, "startPrice()"),
            probe(client, address, "endPrice()"),
        );
        start && end
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (current, start, is_active, name, total_supply, max_supply, max_per_wallet) =
            tokio::join!(
                resolver.first_success_uint_opt(&["currentPrice()", "getCurrentPrice()"]),
                resolver.uint_or("startPrice()", Default::default()),
                resolver.is_active(),
                resolver.string_opt("name()"),
                resolver.uint_opt("totalSupply()"),
                resolver.uint_opt("maxSupply()"),
                resolver.wallet_limit(),
            );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::DutchAuction,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(uint256)".to_string(),
            mint_price_per_token: current.unwrap_or(start),
            protocol_fee: Default::default(),
            creator_fee: Default::default(),
            fee_model: FeeModel::Flat,
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet,
            router_address: None,
        })
    }
}
