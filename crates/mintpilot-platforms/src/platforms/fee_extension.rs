use crate::module::{probe, PlatformModule};
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{
    error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag, TokenStandard,
};

/// Claim via extensão com taxa de protocolo por token
///
/// A convenção expõe a constante `MINT_FEE()`; diferente da loja de
/// taxa fixa, aqui a taxa incide sobre cada token mintado, então o
/// total é `(preço + taxa) × quantidade`.
pub struct FeeExtensionClaimPlatform;

impl FeeExtensionClaimPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeeExtensionClaimPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformModule for FeeExtensionClaimPlatform {
    fn name(&self) -> &'static str {
        "fee-extension-claim"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::FeeExtensionClaim
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        probe(client, address, "MINT_FEE()").await
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (fee, price, is_active, name, total_supply, max_supply, max_per_wallet) = tokio::join!(
            resolver.uint_or("MINT_FEE()", Default::default()),
            resolver.first_success_uint(&["claimPrice()", "price()", "mintPrice()"]),
            resolver.is_active(),
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
            resolver.wallet_limit(),
        );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::FeeExtensionClaim,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(uint256)".to_string(),
            mint_price_per_token: price,
            protocol_fee: fee,
            creator_fee: Default::default(),
            fee_model: FeeModel::PerToken(fee),
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet,
            router_address: None,
        })
    }
}
