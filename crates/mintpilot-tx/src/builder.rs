use crate::revert::decode_revert;
use ethereum_types::{Address, H256, U256};
use mintpilot_core::{
    error::{Error, Result},
    traits::ChainClient,
    abi, ContractSnapshot, FeeModel, FeeSettings, PreparedTransaction, TxRequest,
};
use tracing::{debug, warn};

/// Margem de segurança aplicada sobre a estimativa de gas
pub const GAS_MARGIN_PERCENT: u64 = 20;

/// Teto fixo usado quando a simulação é pulada ou a estimativa falha
pub const FALLBACK_GAS_LIMIT: u64 = 500_000;

/// Opções de preparo de uma transação de mint
#[derive(Debug, Clone, Copy, Default)]
pub struct PrepareOptions {
    /// Substitui o preço por token do snapshot (apenas plataformas sem taxa)
    pub price_override: Option<U256>,
    /// Pula a simulação e usa um teto de gas; troca validação por latência
    pub skip_simulation: bool,
    /// Teto de gas a usar quando a simulação é pulada; sem um, vale o
    /// teto fixo da crate
    pub gas_ceiling: Option<U256>,
}

/// Monta uma `PreparedTransaction` a partir de um snapshot e quantidade
pub struct TransactionBuilder<'a> {
    client: &'a dyn ChainClient,
    sender: Address,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(client: &'a dyn ChainClient, sender: Address) -> Self {
        Self { client, sender }
    }

    /// Codifica, valida e precifica a transação de mint
    ///
    /// A transação retornada é imutável e não é enviada automaticamente;
    /// uma nova tentativa exige um novo ciclo snapshot + prepare.
    pub async fn prepare(
        &self,
        snapshot: &ContractSnapshot,
        quantity: U256,
        fees: FeeSettings,
        options: PrepareOptions,
    ) -> Result<PreparedTransaction> {
        let data = encode_mint_call(&snapshot.mint_function_signature, self.sender, quantity);

        // Com modelo de taxa não trivial o valor total da plataforma
        // prevalece, inclusive sobre um override de preço: o componente
        // fixo/percentual continua sendo devido on-chain
        let value = match (snapshot.fee_model, options.price_override) {
            (FeeModel::Flat, Some(price)) => price * quantity,
            (FeeModel::Flat, None) => snapshot.mint_price_per_token * quantity,
            _ => snapshot.total_value(quantity),
        };

        let request = TxRequest {
            from: Some(self.sender),
            to: snapshot.address,
            data,
            value,
            gas: None,
            max_fee_per_gas: Some(fees.max_fee_per_gas),
            max_priority_fee_per_gas: Some(fees.max_priority_fee_per_gas),
        };

        let gas_limit = if options.skip_simulation {
            let ceiling = options
                .gas_ceiling
                .unwrap_or_else(|| U256::from(FALLBACK_GAS_LIMIT));
            debug!(%value, %ceiling, "simulação pulada, usando teto de gas");
            ceiling
        } else {
            self.simulate(&request, snapshot).await?;
            match self.client.estimate_gas(&request).await {
                Ok(estimate) => {
                    estimate + estimate * U256::from(GAS_MARGIN_PERCENT) / U256::from(100)
                }
                Err(e) => {
                    // Falha de estimativa não aborta: vale o teto conservador
                    warn!(
                        error = %Error::GasEstimationError(e.to_string()),
                        "estimativa de gas falhou, usando teto fixo"
                    );
                    U256::from(FALLBACK_GAS_LIMIT)
                }
            }
        };

        Ok(PreparedTransaction {
            to: snapshot.address,
            data: request.data,
            value,
            gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
        })
    }

    /// Dry-run contra o estado atual; qualquer falha aborta o preparo
    /// com o motivo decodificado e dicas contextuais
    async fn simulate(&self, request: &TxRequest, snapshot: &ContractSnapshot) -> Result<()> {
        match self.client.call(request).await {
            Ok(_) => Ok(()),
            Err(Error::Revert { data }) => {
                let mut reason = decode_revert(&data);
                append_hints(&mut reason, snapshot);
                Err(Error::SimulationError(reason))
            }
            Err(other) => {
                let mut reason = format!("chamada de simulação falhou: {}", other);
                append_hints(&mut reason, snapshot);
                Err(Error::SimulationError(reason))
            }
        }
    }
}

fn append_hints(reason: &mut String, snapshot: &ContractSnapshot) {
    if snapshot.mint_price_per_token.is_zero() {
        reason.push_str("; dica: o preço resolvido é zero, o valor enviado pode estar abaixo do exigido");
    }
    if !snapshot.is_active {
        reason.push_str("; dica: a venda aparenta estar inativa no momento");
    }
}

/// Codifica a chamada de mint para a assinatura resolvida
///
/// Uma assinatura fora da tabela conhecida cai no seletor canônico
/// `mint(uint256)` com a quantidade como único argumento.
pub fn encode_mint_call(signature: &str, minter: Address, quantity: U256) -> Vec<u8> {
    match signature {
        "mint(uint256)" | "purchase(uint256)" | "claim(uint256)" | "publicMint(uint256)"
        | "bid(uint256)" => abi::encode_call_uint(signature, quantity),
        "mint(address,uint256)" | "mintTo(address,uint256)" | "purchase(address,uint256)"
        | "claim(address,uint256)" => abi::encode_call_address_uint(signature, minter, quantity),
        // Lista pública: chave zero
        "mint(bytes32,uint256)" => {
            abi::encode_call_bytes32_uint(signature, H256::zero(), quantity)
        }
        _ => abi::encode_call_uint("mint(uint256)", quantity),
    }
}
