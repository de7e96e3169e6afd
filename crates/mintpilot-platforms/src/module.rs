use async_trait::async_trait;
use ethereum_types::Address;
use mintpilot_core::{abi, error::Result, traits::ChainClient, ContractSnapshot, PlatformTag};

/// Contrato de um módulo de plataforma
///
/// `detect` nunca propaga erro: qualquer falha de leitura ou retorno
/// malformado significa "não é esta convenção". `analyze` assume que a
/// detecção passou (ou foi ignorada por seleção forçada) e devolve um
/// snapshot completo, com campos indisponíveis zerados em vez de erro;
/// apenas a impossibilidade total de alcançar o contrato aborta.
#[async_trait]
pub trait PlatformModule: Send + Sync {
    /// Nome registrado, usado pela seleção forçada
    fn name(&self) -> &'static str;

    /// Tag gravada nos snapshots produzidos
    fn tag(&self) -> PlatformTag;

    /// Verifica se o contrato segue esta convenção
    async fn detect(&self, client: &dyn ChainClient, address: Address) -> bool;

    /// Extrai os parâmetros de venda do contrato
    async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
    ) -> Result<ContractSnapshot>;
}

/// Sondagem discriminante: a leitura precisa ter sucesso e devolver ao
/// menos uma palavra para contar como detecção
pub(crate) async fn probe(client: &dyn ChainClient, address: Address, signature: &str) -> bool {
    match client.read(address, abi::encode_call0(signature)).await {
        Ok(data) => data.len() >= 32,
        Err(_) => false,
    }
}
