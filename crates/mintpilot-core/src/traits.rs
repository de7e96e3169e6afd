/*!
 * Mintpilot Traits
 *
 * Traits comuns usados em toda a workspace Mintpilot
 */

use crate::error::Result;
use crate::types::{FeeEstimate, TransactionHash, TxReceipt, TxRequest};
use async_trait::async_trait;
use ethereum_types::{Address, U256};

/// Handle de leitura e escrita contra um endpoint de chain
///
/// Toda interação do pipeline com a rede passa por esta trait. Uma
/// chamada de simulação que reverte deve retornar `Error::Revert` com
/// os bytes crus do payload, para que o decodificador de motivo de
/// revert possa trabalhar sobre eles.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Executa uma leitura (eth_call de view) contra um contrato
    async fn read(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>>;

    /// Simula uma transação completa contra o estado atual da chain
    async fn call(&self, tx: &TxRequest) -> Result<Vec<u8>>;

    /// Estima o gas necessário para a requisição
    async fn estimate_gas(&self, tx: &TxRequest) -> Result<U256>;

    /// Envia a transação para a rede
    async fn send_transaction(&self, tx: &TxRequest) -> Result<TransactionHash>;

    /// Aguarda a mineração e retorna o recibo
    async fn wait_for_receipt(&self, hash: TransactionHash) -> Result<TxReceipt>;

    /// Obtém a estimativa de taxa atual da rede
    async fn fee_estimate(&self) -> Result<FeeEstimate>;

    /// Obtém o bytecode de um endereço
    async fn get_bytecode(&self, address: Address) -> Result<Vec<u8>>;
}
