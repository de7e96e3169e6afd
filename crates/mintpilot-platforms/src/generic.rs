use crate::module::PlatformModule;
use crate::resolver::FieldResolver;
use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{
    abi, error::Result, traits::ChainClient, ContractSnapshot, FeeModel, PlatformTag,
    TokenStandard,
};

/// Nomes de acessores de preço em ordem de popularidade
const PRICE_SIGNATURES: &[&str] = &[
    "price()",
    "mintPrice()",
    "cost()",
    "publicPrice()",
    "salePrice()",
    "getPrice()",
    "MINT_PRICE()",
];

const MAX_SUPPLY_SIGNATURES: &[&str] = &["maxSupply()", "MAX_SUPPLY()", "collectionSize()"];

/// Identificadores ERC-165 dos padrões de token
const ERC721_INTERFACE_ID: [u8; 4] = [0x80, 0xac, 0x58, 0xcd];
const ERC1155_INTERFACE_ID: [u8; 4] = [0xd9, 0xb6, 0x7a, 0x26];

/// Fallback quando nenhuma convenção específica casa com o contrato
///
/// Nunca se recusa a produzir um snapshot: todos os campos têm default
/// independente e a assinatura de mint assume a forma canônica.
pub struct GenericAnalyzer;

impl GenericAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

async fn supports_interface(client: &dyn ChainClient, address: Address, id: [u8; 4]) -> bool {
    let data = abi::encode_call_bytes4("supportsInterface(bytes4)", id);
    match client.read(address, data).await {
        Ok(out) => abi::decode_bool(&out).unwrap_or(false),
        Err(_) => false,
    }
}

/// Sondagem ERC-165 do padrão do token; ERC-721 na ausência de resposta
pub(crate) async fn detect_standard(client: &dyn ChainClient, address: Address) -> TokenStandard {
    let (erc1155, _erc721) = tokio::join!(
        supports_interface(client, address, ERC1155_INTERFACE_ID),
        supports_interface(client, address, ERC721_INTERFACE_ID),
    );
    if erc1155 {
        TokenStandard::Erc1155
    } else {
        TokenStandard::Erc721
    }
}

#[async_trait]
impl PlatformModule for GenericAnalyzer {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Generic
    }

    async fn detect(&self, _client: &dyn ChainClient, _address: Address) -> bool {
        // O genérico aceita qualquer contrato; o registro só o consulta
        // depois que os módulos específicos falharam
        true
    }

    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot> {
        let resolver = FieldResolver::new(client, address);
        let (price, name, total_supply, max_supply, is_active, max_per_wallet, token_standard) =
            tokio::join!(
                resolver.first_success_uint(PRICE_SIGNATURES),
                resolver.string_opt("name()"),
                resolver.uint_opt("totalSupply()"),
                resolver.first_success_uint_opt(MAX_SUPPLY_SIGNATURES),
                resolver.is_active(),
                resolver.wallet_limit(),
                detect_standard(client, address),
            );

        Ok(ContractSnapshot {
            address,
            chain_id,
            platform: PlatformTag::Generic,
            token_standard,
            mint_function_signature: "mint(uint256)".to_string(),
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
