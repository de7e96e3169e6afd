use crate::module::PlatformModule;
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use chrono::Utc;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    abi, error::Result, traits::ChainClient, utils, ContractSnapshot, FeeModel, PlatformTag,
    TokenStandard,
};

/// Drop cujo estado de venda vive em um contrato singleton compartilhado
///
/// O token delega preço e janela de atividade a um "router" registrado
/// em `minter()` (ou `dropRouter()`). O router responde
/// `saleDetails(address)` com a struct `(price, start, end,
/// maxPerWallet)`; a venda está ativa quando o horário atual cai em
/// `[start, end)`.
pub struct SingletonDropPlatform;

impl SingletonDropPlatform {
    pub fn new() -> Self {
        Self
    }

    async fn router_of(&self, client: &dyn ChainClient, address: Address) -> Option<Address> {
        for signature in ["minter()", "dropRouter()"] {
            let data = abi::encode_call0(signature);
            if let Ok(out) = client.read(address, data).await {
                if let Ok(router) = abi::decode_address(&out) {
                    if !router.is_zero() && utils::is_contract(client, &router).await {
                        return Some(router);
                    }
                }
            }
        }
        None
    }
}

impl Default for SingletonDropPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct SaleDetails {
    price: U256,
    start: U256,
    end: U256,
    max_per_wallet: U256,
}

async fn sale_details(
    client: &dyn ChainClient,
    router: Address,
    token: Address,
) -> Option<SaleDetails> {
    let data = abi::encode_call_address("saleDetails(address)", token);
    let out = client.read(router, data).await.ok()?;
    Some(SaleDetails {
        price: abi::decode_uint_at(&out, 0).ok()?,
        start: abi::decode_uint_at(&out, 1).ok()?,
        end: abi::decode_uint_at(&out, 2).ok()?,
        max_per_wallet: abi::decode_uint_at(&out, 3).ok()?,
    })
}

#[async_trait]
impl PlatformModule for SingletonDropPlatform {
    fn name(&self) -> &'static str {
        "singleton-drop"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::SingletonDrop
    }

    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool {
        self.router_of(client, address).await.is_some()
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let router = self.router_of(client, address).await;

        let details = match router {
            Some(router) => sale_details(client, router, address).await.unwrap_or_default(),
            None => SaleDetails::default(),
        };

        let now = U256::from(Utc::now().timestamp().max(0) as u64);
        // Janela inexistente (start == end == 0) conta como inativa
        let is_active = !details.end.is_zero() && details.start <= now && now < details.end;

        let resolver = FieldResolver::new(client, address);
        let (name, total_supply, max_supply) = tokio::join!(
            resolver.string_opt("name()"),
            resolver.uint_opt("totalSupply()"),
            resolver.uint_opt("maxSupply()"),
        );

        let max_per_wallet = if details.max_per_wallet.is_zero() {
            None
        } else {
            Some(details.max_per_wallet)
        };

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::SingletonDrop,
            token_standard: TokenStandard::Erc721,
            mint_function_signature: "purchase(uint256)".to_string(),
            mint_price_per_token: details.price,
            protocol_fee: Default::default(),
            creator_fee: Default::default(),
            fee_model: FeeModel::Flat,
            is_active,
            name,
            total_supply,
            max_supply,
            max_per_wallet,
            router_address: router,
        })
    }
}
