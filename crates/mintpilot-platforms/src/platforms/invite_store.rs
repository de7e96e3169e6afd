use crate::module::PlatformModule;
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use mintpilot_core::{
    abi, error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag,
    TokenStandard,
};

/// Loja com preço computado por lista de convite
///
/// O preço é calculado por `computePrice(bytes32,uint256)` com o id da
/// lista como chave opaca. A lista pública usa a chave zero; quando o
/// cálculo falha para ela, tenta-se a chave alternativa derivada
/// `keccak256("public")` antes de desistir com preço zero.
pub struct InviteStorePlatform;

impl InviteStorePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InviteStorePlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn public_key() -> H256 {
    H256::zero()
}

fn derived_public_key() -> H256 {
    H256::from_slice(&abi::keccak256(b"public"))
}

async fn compute_price(client: &dyn ChainClient, address: Address, key: H256) -> Option<U256> {
    let data = abi::encode_call_bytes32_uint("computePrice(bytes32,uint256)", key, U256::one());
    let out = client.read(address, data).await.ok()?;
    abi::decode_uint(&out).ok()
}

#[async_trait]
impl PlatformModule for InviteStorePlatform {
    fn name(&self) -> &'static str {
        "invite-store"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::InviteStore
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        if compute_price(client, address, public_key()).await.is_some() {
            return true;
        }
        let data = abi::encode_call_bytes32("invites(bytes32)", public_key());
        match client.read(address, data).await {
            Ok(out) => out.len() >= 32,
            Err(_) => false,
        }
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let price = match compute_price(client, address, public_key()).await {
            Some(price) => price,
            None => compute_price(client, address, derived_public_key())
                .await
                .unwrap_or_default(),
        };

        let resolver = FieldResolver::new(client, address);
        let (is_active, name, total_supply, max_supply, max_per_wallet) = tokio::join!(
            resolver.is_active(),
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
            resolver.wallet_limit(),
        );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::InviteStore,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "mint(bytes32,uint256)".to_string(),
            mint_price_per_token: price,
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
