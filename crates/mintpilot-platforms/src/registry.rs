use crate::generic::GenericAnalyzer;
use crate::module::PlatformModule;
use crate::platforms::*;
use crate::proxy;
use ethereum_types::Address;
use mintpilot_core::{error::Result, traits::ChainClient, ContractSnapshot, Error};
use tracing::debug;

/// Limite de saltos ao seguir cadeias de proxies mínimos
const MAX_PROXY_HOPS: usize = 3;

/// Registro ordenado de módulos de plataforma com fallback genérico
///
/// A ordem de registro é autoritativa: um módulo mais genérico
/// registrado depois nunca toma a frente de um mais específico
/// registrado antes, mesmo que ambos detectem o contrato.
pub struct PlatformRegistry {
    modules: Vec<Box<dyn PlatformModule>>,
    generic: GenericAnalyzer,
}

impl PlatformRegistry {
    /// Registro com os módulos padrão, do mais específico ao mais genérico
    pub fn standard() -> Self {
        Self::with_modules(vec![
            Box::new(SingletonDropPlatform::new()),
            Box::new(ClaimConditionDropPlatform::new()),
            Box::new(FeeExtensionClaimPlatform::new()),
            Box::new(InviteStorePlatform::new()),
            Box::new(FlatFeeStorePlatform::new()),
            Box::new(RoyaltyEditionPlatform::new()),
            Box::new(CustomAuctionPlatform::new()),
            Box::new(DutchAuctionPlatform::new()),
        ])
    }

    /// Registro com uma lista arbitrária de módulos, na ordem dada
    pub fn with_modules(modules: Vec<Box<dyn PlatformModule>>) -> Self {
        Self {
            modules,
            generic: GenericAnalyzer::new(),
        }
    }

    /// Nomes registrados, na ordem de prioridade
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Resolve o módulo que governa o contrato e produz um snapshot
    ///
    /// Com `forced` presente a detecção é totalmente ignorada; um nome
    /// desconhecido é erro de configuração. Sem seleção forçada, os
    /// módulos são consultados em ordem; se nenhum casa nem após o
    /// desempacotamento de proxy, o analisador genérico responde.
    pub async fn analyze(
        &self,
        client: &dyn ChainClient,
        address: Address,
        chain_id: u64,
        forced: Option<&str>,
    ) -> Result<ContractSnapshot> {
        if let Some(name) = forced {
            if name == self.generic.name() {
                return self.generic.analyze(client, address, chain_id).await;
            }
            let module = self
                .modules
                .iter()
                .find(|m| m.name() == name)
                .ok_or_else(|| {
                    Error::ConfigurationError(format!("plataforma forçada desconhecida: {}", name))
                })?;
            debug!(platform = name, %address, "plataforma forçada, detecção ignorada");
            return module.analyze(client, address, chain_id).await;
        }

        if let Some(module) = self.detect_module(client, address).await {
            debug!(platform = module.name(), %address, "plataforma detectada");
            return module.analyze(client, address, chain_id).await;
        }

        // Fallback explícito, não é condição de erro
        debug!(%address, "nenhuma plataforma reconhecida, usando analisador genérico");
        self.generic.analyze(client, address, chain_id).await
    }

    /// Detecção em ordem de registro, seguindo proxies mínimos quando a
    /// rodada direta não reconhece o endereço
    async fn detect_module(
        &self,
        client: &dyn ChainClient,
        address: Address,
    ) -> Option<&dyn PlatformModule> {
        let mut current = address;
        for hop in 0..MAX_PROXY_HOPS {
            for module in &self.modules {
                if module.detect(client, current).await {
                    return Some(module.as_ref());
                }
            }
            match proxy::unwrap_proxy(client, current).await {
                Some(target) if target != current => {
                    debug!(%current, %target, hop, "proxy mínimo desempacotado para detecção");
                    current = target;
                }
                _ => break,
            }
        }
        None
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
