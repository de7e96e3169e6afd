use crate::module::PlatformModule;
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    abi, error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag,
    TokenStandard,
};

/// Leilão com janela de tempo e preço corrente exposto pelo contrato
///
/// O acessor de preço corrente já embute qualquer decaimento; quando
/// ele não existe, o par inicial/final serve de fallback e o maior dos
/// dois vale como teto conservador.
pub struct CustomAuctionPlatform;

impl CustomAuctionPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomAuctionPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformModule for CustomAuctionPlatform {
    fn name(&self) -> &'static str {
        "custom-auction"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::CustomAuction
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        let data = abi::encode_call0("auctionActive()");
        match client.read(address, data).await {
            Ok(out) => abi::decode_bool(&out).is_ok(),
            Err(_) => false,
        }
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (current, is_active, name, total_supply, max_supply) = tokio::join!(
            resolver.first_success_uint_opt(&["getCurrentPrice()", "currentPrice()"]),
            resolver.first_success_bool(&["auctionActive()"], false),
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
        );

        let price = match current {
            Some(price) => price,
            None => {
                let (start, end) = tokio::join!(
                    resolver.uint_or("auctionStartPrice()", U256::zero()),
                    resolver.uint_or("auctionEndPrice()", U256::zero()),
                );
                start.max(end)
            }
        };

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::CustomAuction,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "bid(uint256)".to_string(),
            mint_price_per_token: price,
            protocol_fee: Default::default(),
            creator_fee: Default::default(),
            fee_model: FeeModel::Flat,
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet: None,
            router_address: None,
        })
    }
}
