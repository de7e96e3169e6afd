/*!
 * Mintpilot TX
 *
 * Transforma um `ContractSnapshot` em uma transação de mint executável:
 * codificação da chamada, simulação com decodificação de revert,
 * estimativa de gas e estratégia de taxa (normal ou turbo).
 */

pub mod builder;
pub mod gas;
pub mod revert;

pub use builder::{PrepareOptions, TransactionBuilder, FALLBACK_GAS_LIMIT};
pub use gas::{GasQuote, GasStrategy, TURBO_PRIORITY_MULTIPLIER};
pub use revert::decode_revert;
