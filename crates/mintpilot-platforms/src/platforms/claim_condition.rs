use crate::module::{probe, PlatformModule};
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use chrono::Utc;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    abi, error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag,
    TokenStandard,
};

/// Drop baseado em condições de claim registradas no próprio contrato
///
/// O preço vem do registro da condição ativa, buscado em dois passos:
/// primeiro o id via `getActiveClaimConditionId()`, depois a struct via
/// `getClaimConditionById(uint256)`. Condição ausente ou malformada é
/// tratada como venda inativa, nunca como erro.
pub struct ClaimConditionDropPlatform;

impl ClaimConditionDropPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClaimConditionDropPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout da struct de condição retornada por valor:
/// (startTimestamp, maxClaimableSupply, supplyClaimed,
///  quantityLimitPerWallet, merkleRoot, pricePerToken, ...)
#[derive(Debug, Default, Clone, Copy)]
struct ClaimCondition {
    start: U256,
    max_claimable: U256,
    claimed: U256,
    per_wallet: U256,
    price: U256,
}

async fn active_condition(client: &dyn ChainClient, address: Address) -> Option<ClaimCondition> {
    let id_data = abi::encode_call0("getActiveClaimConditionId()");
    let id = abi::decode_uint(&client.read(address, id_data).await.ok()?).ok()?;

    let cond_data = abi::encode_call_uint("getClaimConditionById(uint256)", id);
    let out = client.read(address, cond_data).await.ok()?;
    Some(ClaimCondition {
        start: abi::decode_uint_at(&out, 0).ok()?,
        max_claimable: abi::decode_uint_at(&out, 1).ok()?,
        claimed: abi::decode_uint_at(&out, 2).ok()?,
        per_wallet: abi::decode_uint_at(&out, 3).ok()?,
        price: abi::decode_uint_at(&out, 5).ok()?,
    })
}

#[async_trait]
impl PlatformModule for ClaimConditionDropPlatform {
    fn name(&self) -> &'static str {
        "claim-condition-drop"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::ClaimConditionDrop
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        probe(client, address, "getActiveClaimConditionId()").await
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let condition = active_condition(client, address).await;

        let now = U256::from(Utc::now().timestamp().max(0) as u64);
        let (price, is_active, max_supply, total_supply_cond, per_wallet) = match condition {
            Some(cond) => {
                let open = cond.start <= now
                    && (cond.max_claimable.is_zero() || cond.claimed < cond.max_claimable);
                (
                    cond.price,
                    open,
                    (!cond.max_claimable.is_zero()).then_some(cond.max_claimable),
                    Some(cond.claimed),
                    (!cond.per_wallet.is_zero()).then_some(cond.per_wallet),
                )
            }
            // Sem condição ativa não há como comprar
            None => (U256::zero(), false, None, None, None),
        };

        let resolver = FieldResolver::new(client, address);
        let (name, total_supply_token) = tokio::join!(
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
        );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::ClaimConditionDrop,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "claim(uint256)".to_string(),
            mint_price_per_token: price,
            protocol_fee: Default::default(),
            creator_fee: Default::default(),
            fee_model: FeeModel::Flat,
            is_active,
            name,
            total_supply: total_supply_token.or(total_supply_cond),
            max_supply,
            max_per_wallet: per_wallet,
            router_address: None,
        })
    }
}
