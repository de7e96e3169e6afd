use ethereum_types::{Address, U256};
use futures::future::{self, FutureExt};
use mintpilot_core::{abi, error::Result, traits::ChainClient};

/// Resolve um campo lógico a partir de N leituras candidatas que
/// representam o mesmo dado sob convenções de nomes diferentes.
///
/// Dois modos de redução:
/// - *first-success-wins*: todas as leituras correm em paralelo e vence
///   a primeira que completa com sucesso; se todas falham, vale o
///   default documentado (zero). Usado para campos de preço, onde o
///   contrato expõe exatamente um dos nomes.
/// - *settle-com-default*: cada leitura falha de forma independente
///   para o seu fallback, sem abortar o grupo. Usado para nome, supply
///   e flags de atividade, onde ausência parcial é esperada.
pub struct FieldResolver<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl<'a> FieldResolver<'a> {
    pub fn new(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    async fn read_uint(&self, signature: &str) -> Result<U256> {
        let data = self.client.read(self.address, abi::encode_call0(signature)).await?;
        abi::decode_uint(&data)
    }

    async fn read_bool(&self, signature: &str) -> Result<bool> {
        let data = self.client.read(self.address, abi::encode_call0(signature)).await?;
        abi::decode_bool(&data)
    }

    async fn read_string(&self, signature: &str) -> Result<String> {
        let data = self.client.read(self.address, abi::encode_call0(signature)).await?;
        abi::decode_string(&data)
    }

    /// Primeira leitura uint que completar com sucesso; zero se todas falharem
    pub async fn first_success_uint(&self, signatures: &[&str]) -> U256 {
        self.first_success_uint_opt(signatures).await.unwrap_or_default()
    }

    /// Variante que distingue "todas falharam" de um valor zero legítimo
    pub async fn first_success_uint_opt(&self, signatures: &[&str]) -> Option<U256> {
        let candidates: Vec<_> = signatures
            .iter()
            .map(|sig| self.read_uint(sig).boxed())
            .collect();
        if candidates.is_empty() {
            return None;
        }
        match future::select_ok(candidates).await {
            Ok((value, _rest)) => Some(value),
            Err(_) => None,
        }
    }

    /// Primeira leitura bool que completar com sucesso; `default` se todas falharem
    pub async fn first_success_bool(&self, signatures: &[&str], default: bool) -> bool {
        let candidates: Vec<_> = signatures
            .iter()
            .map(|sig| self.read_bool(sig).boxed())
            .collect();
        if candidates.is_empty() {
            return default;
        }
        match future::select_ok(candidates).await {
            Ok((value, _rest)) => value,
            Err(_) => default,
        }
    }

    /// Leitura uint com default local
    pub async fn uint_or(&self, signature: &str, default: U256) -> U256 {
        self.read_uint(signature).await.unwrap_or(default)
    }

    /// Leitura uint opcional
    pub async fn uint_opt(&self, signature: &str) -> Option<U256> {
        self.read_uint(signature).await.ok()
    }

    /// Leitura string opcional
    pub async fn string_opt(&self, signature: &str) -> Option<String> {
        self.read_string(signature).await.ok()
    }

    /// Composição de atividade: AND entre negação de pausa, flag
    /// explícita de mint e flag de venda, cada uma com default
    /// conservador quando ilegível (pausa → false, flags → true)
    pub async fn is_active(&self) -> bool {
        let (paused, mint_active, sale_active) = tokio::join!(
            self.first_success_bool(&["paused()"], false),
            self.first_success_bool(&["mintActive()", "isMintActive()"], true),
            self.first_success_bool(&["saleActive()", "saleIsActive()", "isSaleActive()"], true),
        );
        !paused && mint_active && sale_active
    }

    /// Limite por carteira: prefere o campo explícito quando > 0, senão
    /// cai para o campo de limite de carteira
    pub async fn wallet_limit(&self) -> Option<U256> {
        let (explicit, fallback) = tokio::join!(
            self.first_success_uint_opt(&["maxPerWallet()", "maxMintPerWallet()"]),
            self.first_success_uint_opt(&["walletLimit()", "maxPerAddress()"]),
        );
        match explicit {
            Some(limit) if !limit.is_zero() => Some(limit),
            _ => fallback.filter(|limit| !limit.is_zero()),
        }
    }
}
