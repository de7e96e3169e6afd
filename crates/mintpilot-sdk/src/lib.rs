/*!
 * Mintpilot SDK
 *
 * Fachada de alto nível do pipeline de mint: análise de contrato,
 * preparo, envio e monitoramento de ativação atrás de um único objeto.
 */

use async_trait::async_trait;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    error::Result,
    traits::ChainClient,
    ContractSnapshot, ContractTarget, Error, PreparedTransaction, TransactionHash, TxReceipt,
    TxStatus,
};
use mintpilot_monitor::{ActivationMonitor, MintExecutor, MonitorState, SnapshotSource};
use mintpilot_platforms::PlatformRegistry;
use mintpilot_rpc::{RpcConfig, Web3ChainClient};
use mintpilot_tx::{GasStrategy, PrepareOptions, TransactionBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Configuração da fachada
#[derive(Debug, Clone)]
pub struct MintPilotConfig {
    pub endpoint: String,
    pub sender: Address,
    /// Pula a detecção e usa sempre a plataforma nomeada
    pub forced_platform: Option<String>,
    pub poll_interval: Duration,
    pub turbo: bool,
}

impl MintPilotConfig {
    /// Cria um builder para a configuração
    pub fn builder() -> MintPilotConfigBuilder {
        MintPilotConfigBuilder::default()
    }
}

/// Builder para configuração da fachada
#[derive(Debug, Default)]
pub struct MintPilotConfigBuilder {
    endpoint: Option<String>,
    sender: Option<Address>,
    forced_platform: Option<String>,
    poll_interval: Option<Duration>,
    turbo: bool,
}

impl MintPilotConfigBuilder {
    /// Define o endpoint RPC
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Define a conta remetente (destravada no node)
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Força uma plataforma pelo nome de registro
    pub fn forced_platform<S: Into<String>>(mut self, name: S) -> Self {
        self.forced_platform = Some(name.into());
        self
    }

    /// Define o intervalo de polling do monitor
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Ativa o modo turbo (priority fee multiplicada, sem simulação)
    pub fn turbo(mut self, turbo: bool) -> Self {
        self.turbo = turbo;
        self
    }

    /// Constrói a configuração
    pub fn build(self) -> Result<MintPilotConfig> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::ConfigurationError("endpoint é obrigatório".to_string()))?;

        let sender = self
            .sender
            .ok_or_else(|| Error::ConfigurationError("sender é obrigatório".to_string()))?;

        Ok(MintPilotConfig {
            endpoint,
            sender,
            forced_platform: self.forced_platform,
            poll_interval: self.poll_interval.unwrap_or(Duration::from_secs(2)),
            turbo: self.turbo,
        })
    }
}

/// Fachada do pipeline de mint
///
/// Reúne o registro de plataformas, o builder de transações e o monitor
/// de ativação sobre um único cliente de chain compartilhado.
pub struct MintPilot {
    client: Arc<dyn ChainClient>,
    registry: Arc<PlatformRegistry>,
    monitor: ActivationMonitor,
    chain_id: u64,
    sender: Address,
    forced_platform: Option<String>,
    poll_interval: Duration,
    turbo: bool,
}

impl MintPilot {
    /// Cria a fachada sobre um cliente já estabelecido
    pub fn new(client: Arc<dyn ChainClient>, chain_id: u64, sender: Address) -> Self {
        Self {
            client,
            registry: Arc::new(PlatformRegistry::standard()),
            monitor: ActivationMonitor::new(),
            chain_id,
            sender,
            forced_platform: None,
            poll_interval: Duration::from_secs(2),
            turbo: false,
        }
    }

    /// Conecta ao endpoint configurado e monta a fachada
    pub async fn connect(config: MintPilotConfig) -> Result<Self> {
        let rpc_config = RpcConfig {
            endpoint: config.endpoint.clone(),
            ..RpcConfig::default()
        };
        let client = Web3ChainClient::new(rpc_config).await?;
        let chain_id = client.chain_id().await?;

        let mut pilot = Self::new(Arc::new(client), chain_id, config.sender);
        pilot.forced_platform = config.forced_platform;
        pilot.poll_interval = config.poll_interval;
        pilot.turbo = config.turbo;
        Ok(pilot)
    }

    /// Substitui o registro padrão de plataformas
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Analisa o contrato e produz um snapshot fresco dos parâmetros de
    /// venda, respeitando a plataforma forçada quando configurada
    pub async fn analyze(&self, address: Address) -> Result<ContractSnapshot> {
        self.registry
            .analyze(
                self.client.as_ref(),
                address,
                self.chain_id,
                self.forced_platform.as_deref(),
            )
            .await
    }

    /// Analisa forçando uma plataforma pelo nome de registro
    pub async fn analyze_as(&self, address: Address, platform: &str) -> Result<ContractSnapshot> {
        self.registry
            .analyze(self.client.as_ref(), address, self.chain_id, Some(platform))
            .await
    }

    /// Prepara a transação de mint para o snapshot dado
    pub async fn prepare(
        &self,
        snapshot: &ContractSnapshot,
        quantity: U256,
        turbo: bool,
    ) -> Result<PreparedTransaction> {
        self.prepare_with(snapshot, quantity, turbo, PrepareOptions::default())
            .await
    }

    /// Preparo com opções explícitas (override de preço, pular simulação)
    pub async fn prepare_with(
        &self,
        snapshot: &ContractSnapshot,
        quantity: U256,
        turbo: bool,
        options: PrepareOptions,
    ) -> Result<PreparedTransaction> {
        let strategy = GasStrategy::new(self.client.as_ref());
        let quote = strategy.quote(turbo).await?;

        let builder = TransactionBuilder::new(self.client.as_ref(), self.sender);
        builder
            .prepare(
                snapshot,
                quantity,
                quote.fees,
                PrepareOptions {
                    price_override: options.price_override,
                    skip_simulation: options.skip_simulation || quote.skip_simulation,
                    gas_ceiling: options.gas_ceiling.or(quote.gas_ceiling),
                },
            )
            .await
    }

    /// Envia a transação preparada e aguarda o recibo
    ///
    /// Uma transação minerada porém revertida vira `ReceiptRevert`: o
    /// gas foi gasto e uma nova tentativa exige um novo ciclo completo.
    pub async fn submit(&self, prepared: &PreparedTransaction) -> Result<TxReceipt> {
        let hash = self
            .client
            .send_transaction(&prepared.to_request(self.sender))
            .await?;
        info!(hash = ?hash, to = %prepared.to, "transação de mint enviada");

        let receipt = self.client.wait_for_receipt(hash).await?;
        match receipt.status {
            TxStatus::Success => Ok(receipt),
            TxStatus::Reverted => Err(Error::ReceiptRevert {
                block: receipt.block_number,
            }),
        }
    }

    /// Ciclo completo: prepara e envia em sequência
    pub async fn mint(
        &self,
        snapshot: &ContractSnapshot,
        quantity: U256,
        turbo: bool,
    ) -> Result<TxReceipt> {
        let prepared = self.prepare(snapshot, quantity, turbo).await?;
        self.submit(&prepared).await
    }

    /// Inicia o monitoramento de ativação do contrato; quando a venda
    /// virar ativa, um único mint é disparado com a configuração atual
    pub fn start_monitor(&self, address: Address, quantity: U256) -> Result<()> {
        let target = ContractTarget {
            address,
            chain_id: self.chain_id,
        };
        let source = Arc::new(RegistrySnapshotSource {
            client: Arc::clone(&self.client),
            registry: Arc::clone(&self.registry),
            forced: self.forced_platform.clone(),
        });
        let executor = Arc::new(PipelineMintExecutor {
            client: Arc::clone(&self.client),
            sender: self.sender,
            turbo: self.turbo,
        });
        self.monitor
            .start(source, executor, target, quantity, self.poll_interval)
    }

    /// Encerra a sessão de monitoramento corrente; idempotente
    pub fn stop_monitor(&self) {
        self.monitor.stop();
    }

    /// Estado atual do monitor
    pub fn monitor_state(&self) -> MonitorState {
        self.monitor.state()
    }
}

/// Fonte de snapshots do monitor baseada no registro de plataformas
struct RegistrySnapshotSource {
    client: Arc<dyn ChainClient>,
    registry: Arc<PlatformRegistry>,
    forced: Option<String>,
}

#[async_trait]
impl SnapshotSource for RegistrySnapshotSource {
    async fn snapshot(&self, target: &ContractTarget) -> Result<ContractSnapshot> {
        self.registry
            .analyze(
                self.client.as_ref(),
                target.address,
                target.chain_id,
                self.forced.as_deref(),
            )
            .await
    }
}

/// Executor do monitor: cota gas, prepara e envia em um único ciclo
struct PipelineMintExecutor {
    client: Arc<dyn ChainClient>,
    sender: Address,
    turbo: bool,
}

#[async_trait]
impl MintExecutor for PipelineMintExecutor {
    async fn execute(
        &self,
        snapshot: &ContractSnapshot,
        quantity: U256,
    ) -> Result<TransactionHash> {
        let strategy = GasStrategy::new(self.client.as_ref());
        let quote = strategy.quote(self.turbo).await?;

        let builder = TransactionBuilder::new(self.client.as_ref(), self.sender);
        let prepared = builder
            .prepare(
                snapshot,
                quantity,
                quote.fees,
                PrepareOptions {
                    price_override: None,
                    skip_simulation: quote.skip_simulation,
                    gas_ceiling: quote.gas_ceiling,
                },
            )
            .await?;

        let hash = self
            .client
            .send_transaction(&prepared.to_request(self.sender))
            .await?;
        info!(hash = ?hash, to = %prepared.to, "mint disparado pelo monitor");
        Ok(hash)
    }
}
