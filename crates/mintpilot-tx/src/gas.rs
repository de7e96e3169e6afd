use crate::builder::FALLBACK_GAS_LIMIT;
use ethereum_types::U256;
use mintpilot_core::{
    error::{Error, Result},
    traits::ChainClient,
    FeeSettings,
};
use tracing::debug;

/// Multiplicador aplicado à priority fee no modo turbo
pub const TURBO_PRIORITY_MULTIPLIER: u64 = 10;

/// Cotação de taxa com as escolhas de execução associadas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasQuote {
    pub fees: FeeSettings,
    /// Turbo pede ao builder para pular a simulação
    pub skip_simulation: bool,
    /// Teto fixo de gas a usar quando a simulação é pulada
    pub gas_ceiling: Option<U256>,
}

/// Deriva os campos de taxa a partir da estimativa da rede
///
/// O modo turbo multiplica apenas o componente de priority fee e
/// sinaliza o caminho de baixa latência (sem simulação, teto fixo de
/// gas); é uma troca documentada de validação por velocidade, não um
/// defeito.
pub struct GasStrategy<'a> {
    client: &'a dyn ChainClient,
}

impl<'a> GasStrategy<'a> {
    pub fn new(client: &'a dyn ChainClient) -> Self {
        Self { client }
    }

    pub async fn quote(&self, turbo: bool) -> Result<GasQuote> {
        let estimate = self
            .client
            .fee_estimate()
            .await
            .map_err(|e| Error::GasEstimationError(e.to_string()))?;

        if turbo {
            let quote = GasQuote {
                fees: FeeSettings {
                    max_fee_per_gas: estimate.max_fee_per_gas,
                    max_priority_fee_per_gas: estimate.max_priority_fee_per_gas
                        * U256::from(TURBO_PRIORITY_MULTIPLIER),
                },
                skip_simulation: true,
                gas_ceiling: Some(U256::from(FALLBACK_GAS_LIMIT)),
            };
            debug!(priority = %quote.fees.max_priority_fee_per_gas, "cotação turbo");
            return Ok(quote);
        }

        Ok(GasQuote {
            fees: FeeSettings {
                max_fee_per_gas: estimate.max_fee_per_gas,
                max_priority_fee_per_gas: estimate.max_priority_fee_per_gas,
            },
            skip_simulation: false,
            gas_ceiling: None,
        })
    }
}
