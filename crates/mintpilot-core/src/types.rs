/*!
 * Mintpilot Types
 *
 * Tipos comuns usados em toda a workspace Mintpilot
 */

use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Identidade imutável de um contrato de venda em uma rede específica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractTarget {
    pub address: Address,
    pub chain_id: u64,
}

/// Convenção de venda reconhecida por um módulo de plataforma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformTag {
    FlatFeeStore,
    SingletonDrop,
    CustomAuction,
    ClaimConditionDrop,
    DutchAuction,
    InviteStore,
    FeeExtensionClaim,
    RoyaltyEdition,
    Generic,
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformTag::FlatFeeStore => write!(f, "flat-fee-store"),
            PlatformTag::SingletonDrop => write!(f, "singleton-drop"),
            PlatformTag::CustomAuction => write!(f, "custom-auction"),
            PlatformTag::ClaimConditionDrop => write!(f, "claim-condition-drop"),
            PlatformTag::DutchAuction => write!(f, "dutch-auction"),
            PlatformTag::InviteStore => write!(f, "invite-store"),
            PlatformTag::FeeExtensionClaim => write!(f, "fee-extension-claim"),
            PlatformTag::RoyaltyEdition => write!(f, "royalty-edition"),
            PlatformTag::Generic => write!(f, "generic"),
        }
    }
}

/// Padrão do token vendido pelo contrato
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    Erc721,
    Erc1155,
}

/// Modelo de taxa aplicado sobre o preço base de mint
///
/// Todas as formas são lineares na quantidade com no máximo um termo
/// fixo por transação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeModel {
    /// Apenas preço por token
    Flat,
    /// Taxa fixa cobrada uma vez por transação
    PerTransaction(U256),
    /// Taxa adicional cobrada por token mintado
    PerToken(U256),
    /// Acréscimo percentual em pontos-base sobre o valor da venda
    PercentBps(u64),
}

/// Leitura pontual dos parâmetros de venda de um contrato
///
/// Produzido a cada chamada de `analyze`; nunca é cacheado entre
/// chamadas. O valor total de uma compra é derivado via `total_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub address: Address,
    pub chain_id: u64,
    pub platform: PlatformTag,
    pub token_standard: TokenStandard,
    /// Assinatura da função de mint, ex.: "mint(uint256)"
    pub mint_function_signature: String,
    pub mint_price_per_token: U256,
    pub protocol_fee: U256,
    pub creator_fee: U256,
    pub fee_model: FeeModel,
    pub is_active: bool,
    pub name: Option<String>,
    pub total_supply: Option<U256>,
    pub max_supply: Option<U256>,
    pub max_per_wallet: Option<U256>,
    /// Contrato compartilhado que concentra a lógica de venda, quando existe
    pub router_address: Option<Address>,
}

impl ContractSnapshot {
    /// Valor nativo total para mintar `quantity` tokens segundo o modelo
    /// de taxa da plataforma
    pub fn total_value(&self, quantity: U256) -> U256 {
        let base = self.mint_price_per_token * quantity;
        match self.fee_model {
            FeeModel::Flat => base,
            FeeModel::PerTransaction(fee) => base + fee,
            FeeModel::PerToken(fee) => (self.mint_price_per_token + fee) * quantity,
            FeeModel::PercentBps(bps) => base * U256::from(10_000 + bps) / U256::from(10_000),
        }
    }
}

/// Campos de taxa EIP-1559 derivados de uma estimativa de rede
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSettings {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Estimativa de taxa retornada pelo node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEstimate {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Requisição de chamada/transação contra um contrato
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Vec<u8>,
    pub value: U256,
    pub gas: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

impl TxRequest {
    /// Requisição mínima de leitura/simulação
    pub fn call(to: Address, data: Vec<u8>) -> Self {
        Self {
            from: None,
            to,
            data,
            value: U256::zero(),
            gas: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
        }
    }
}

/// Transação de mint pronta para envio
///
/// Imutável depois de montada: uma nova tentativa exige um novo ciclo
/// snapshot + prepare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTransaction {
    pub to: Address,
    pub data: Vec<u8>,
    pub value: U256,
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

impl PreparedTransaction {
    /// Converte para uma requisição de envio assinável pelo node
    pub fn to_request(&self, from: Address) -> TxRequest {
        TxRequest {
            from: Some(from),
            to: self.to,
            data: self.data.clone(),
            value: self.value,
            gas: Some(self.gas_limit),
            max_fee_per_gas: Some(self.max_fee_per_gas),
            max_priority_fee_per_gas: Some(self.max_priority_fee_per_gas),
        }
    }
}

/// Status de uma transação minerada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    Success,
    Reverted,
}

/// Recibo de uma transação minerada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TransactionHash,
    pub status: TxStatus,
    pub block_number: u64,
}
