/*!
 * Mintpilot RPC
 *
 * Cliente RPC para interação com nodes EVM
 */

use async_trait::async_trait;
use ethereum_types::{Address, U256};
use mintpilot_core::{
    error::Result,
    traits::ChainClient,
    types::*,
    utils, Error,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use web3::{
    transports::{Http, WebSocket},
    types::{
        BlockId, BlockNumber, Bytes, CallRequest, TransactionRequest, H160, H256 as Web3H256, U64,
    },
    Transport, Web3,
};

/// Configuração do cliente RPC
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub use_cache: bool,
    pub cache_ttl: Duration,
    pub receipt_poll_interval: Duration,
    pub receipt_timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            timeout: Duration::from_secs(30),
            use_cache: true,
            cache_ttl: Duration::from_secs(60),
            receipt_poll_interval: Duration::from_secs(2),
            receipt_timeout: Duration::from_secs(180),
        }
    }
}

/// Enum para diferentes tipos de transporte
pub enum TransportType {
    Http(Web3<Http>),
    WebSocket(Web3<WebSocket>),
}

/// Cliente de chain sobre web3
///
/// O node assina as transações enviadas (eth_sendTransaction); a conta
/// remetente precisa estar destravada no endpoint configurado.
pub struct Web3ChainClient {
    transport: TransportType,
    config: RpcConfig,
    bytecode_cache: Arc<RwLock<HashMap<Address, (Vec<u8>, Instant)>>>,
}

impl Web3ChainClient {
    /// Cria um novo cliente RPC HTTP
    pub async fn new_http(config: RpcConfig) -> Result<Self> {
        let transport = Http::new(&config.endpoint)
            .map_err(|e| Error::RpcError(format!("Falha ao conectar via HTTP: {}", e)))?;

        let web3 = Web3::new(transport);

        // Verifica a conexão
        web3.eth()
            .block_number()
            .await
            .map_err(|e| Error::RpcError(format!("Falha ao conectar ao node EVM: {}", e)))?;

        Ok(Self {
            transport: TransportType::Http(web3),
            config,
            bytecode_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Cria um novo cliente RPC WebSocket
    pub async fn new_websocket(config: RpcConfig) -> Result<Self> {
        let transport = WebSocket::new(&config.endpoint)
            .await
            .map_err(|e| Error::RpcError(format!("Falha ao conectar via WebSocket: {}", e)))?;

        let web3 = Web3::new(transport);

        // Verifica a conexão
        web3.eth()
            .block_number()
            .await
            .map_err(|e| Error::RpcError(format!("Falha ao conectar ao node EVM: {}", e)))?;

        Ok(Self {
            transport: TransportType::WebSocket(web3),
            config,
            bytecode_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Cria um novo cliente baseado na URL
    pub async fn new(config: RpcConfig) -> Result<Self> {
        if config.endpoint.starts_with("ws") {
            Self::new_websocket(config).await
        } else {
            Self::new_http(config).await
        }
    }

    /// Obtém o chain id do node conectado
    pub async fn chain_id(&self) -> Result<u64> {
        let chain_id = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .chain_id()
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter chain id: {}", e)))?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .chain_id()
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter chain id: {}", e)))?,
        };

        Ok(chain_id.as_u64())
    }

    /// Obtém o número do bloco atual
    pub async fn get_block_number(&self) -> Result<u64> {
        let block_number = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .block_number()
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter número do bloco: {}", e)))?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .block_number()
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter número do bloco: {}", e)))?,
        };

        Ok(block_number.as_u64())
    }

    /// Taxa de prioridade sugerida pelo node
    async fn max_priority_fee(&self) -> Result<U256> {
        // Executa a chamada RPC diretamente
        let result = match &self.transport {
            TransportType::Http(web3) => web3
                .transport()
                .execute("eth_maxPriorityFeePerGas", vec![])
                .await
                .map_err(|e| {
                    Error::RpcError(format!("Falha ao obter taxa de prioridade: {}", e))
                })?,
            TransportType::WebSocket(web3) => web3
                .transport()
                .execute("eth_maxPriorityFeePerGas", vec![])
                .await
                .map_err(|e| {
                    Error::RpcError(format!("Falha ao obter taxa de prioridade: {}", e))
                })?,
        };

        serde_json::from_value(result)
            .map_err(|e| Error::DecodeError(format!("Falha ao decodificar taxa de prioridade: {}", e)))
    }

    /// Base fee do bloco mais recente, quando a rede é EIP-1559
    async fn latest_base_fee(&self) -> Result<Option<U256>> {
        let block = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .block(BlockId::Number(BlockNumber::Latest))
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter bloco: {}", e)))?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .block(BlockId::Number(BlockNumber::Latest))
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter bloco: {}", e)))?,
        };

        Ok(block.and_then(|b| b.base_fee_per_gas))
    }

    /// Limpa o cache de bytecode
    pub fn clear_cache(&self) {
        let mut cache = self.bytecode_cache.write();
        cache.clear();
    }

    fn call_request(tx: &TxRequest) -> CallRequest {
        CallRequest {
            from: tx.from.map(|a| H160::from_slice(a.as_bytes())),
            to: Some(H160::from_slice(tx.to.as_bytes())),
            gas: tx.gas,
            gas_price: None,
            value: Some(tx.value),
            data: Some(Bytes(tx.data.clone())),
            transaction_type: None,
            access_list: None,
            max_fee_per_gas: tx.max_fee_per_gas,
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
        }
    }
}

/// Extrai os bytes de revert do campo `data` de um erro JSON-RPC
///
/// Nodes divergem no formato: string "0x...", string "Reverted 0x..."
/// ou um objeto aninhado com um campo `data`.
fn revert_payload(data: &serde_json::Value) -> Option<Vec<u8>> {
    match data {
        serde_json::Value::String(s) => {
            let idx = s.find("0x")?;
            utils::hex_to_bytes(&s[idx..])
        }
        serde_json::Value::Object(map) => map.get("data").and_then(revert_payload),
        _ => None,
    }
}

/// Converte um erro do web3 em erro do pipeline, preservando payloads
/// de revert para o decodificador de motivos
fn map_call_error(e: web3::Error) -> Error {
    match e {
        web3::Error::Rpc(rpc) => {
            if let Some(data) = rpc.data.as_ref().and_then(revert_payload) {
                return Error::Revert { data };
            }
            Error::RpcError(format!("Falha na chamada RPC: {}", rpc))
        }
        other => Error::RpcError(format!("Falha na chamada RPC: {}", other)),
    }
}

#[async_trait]
impl ChainClient for Web3ChainClient {
    async fn read(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let request = Self::call_request(&TxRequest::call(to, data));

        let result = match &self.transport {
            TransportType::Http(web3) => {
                web3.eth().call(request, None).await.map_err(map_call_error)?
            }
            TransportType::WebSocket(web3) => {
                web3.eth().call(request, None).await.map_err(map_call_error)?
            }
        };

        Ok(result.0)
    }

    async fn call(&self, tx: &TxRequest) -> Result<Vec<u8>> {
        let request = Self::call_request(tx);

        let result = match &self.transport {
            TransportType::Http(web3) => {
                web3.eth().call(request, None).await.map_err(map_call_error)?
            }
            TransportType::WebSocket(web3) => {
                web3.eth().call(request, None).await.map_err(map_call_error)?
            }
        };

        Ok(result.0)
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<U256> {
        let request = Self::call_request(tx);

        let gas = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .estimate_gas(request, None)
                .await
                .map_err(map_call_error)?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .estimate_gas(request, None)
                .await
                .map_err(map_call_error)?,
        };

        Ok(gas)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TransactionHash> {
        let from = tx.from.ok_or_else(|| {
            Error::ConfigurationError("requisição de envio sem remetente".to_string())
        })?;

        let request = TransactionRequest {
            from: H160::from_slice(from.as_bytes()),
            to: Some(H160::from_slice(tx.to.as_bytes())),
            gas: tx.gas,
            gas_price: None,
            value: Some(tx.value),
            data: Some(Bytes(tx.data.clone())),
            nonce: None,
            condition: None,
            transaction_type: tx.max_fee_per_gas.map(|_| U64::from(2)),
            access_list: None,
            max_fee_per_gas: tx.max_fee_per_gas,
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
        };

        let hash = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .send_transaction(request)
                .await
                .map_err(|e| Error::ExecutionError(format!("Falha ao enviar transação: {}", e)))?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .send_transaction(request)
                .await
                .map_err(|e| Error::ExecutionError(format!("Falha ao enviar transação: {}", e)))?,
        };

        Ok(TransactionHash::from_slice(hash.as_bytes()))
    }

    async fn wait_for_receipt(&self, hash: TransactionHash) -> Result<TxReceipt> {
        let web3_hash = Web3H256::from_slice(hash.as_bytes());
        let started = Instant::now();

        loop {
            let receipt = match &self.transport {
                TransportType::Http(web3) => web3
                    .eth()
                    .transaction_receipt(web3_hash)
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter recibo: {}", e)))?,
                TransportType::WebSocket(web3) => web3
                    .eth()
                    .transaction_receipt(web3_hash)
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter recibo: {}", e)))?,
            };

            if let Some(receipt) = receipt {
                if let Some(block_number) = receipt.block_number {
                    let status = match receipt.status.map(|s| s.as_u64()) {
                        Some(1) => TxStatus::Success,
                        _ => TxStatus::Reverted,
                    };
                    return Ok(TxReceipt {
                        tx_hash: hash,
                        status,
                        block_number: block_number.as_u64(),
                    });
                }
            }

            if started.elapsed() > self.config.receipt_timeout {
                return Err(Error::RpcError(format!(
                    "Transação {:?} não minerada dentro do timeout",
                    hash
                )));
            }

            debug!(hash = %utils::bytes_to_hex(hash.as_bytes()), "recibo ainda não disponível");
            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }
    }

    async fn fee_estimate(&self) -> Result<FeeEstimate> {
        let priority = self.max_priority_fee().await?;
        let base_fee = self.latest_base_fee().await?;

        let max_fee = match base_fee {
            // Margem de um bloco cheio de aumento de base fee
            Some(base) => base * U256::from(2) + priority,
            None => {
                return Err(Error::GasEstimationError(
                    "node não expõe base fee EIP-1559".to_string(),
                ))
            }
        };

        Ok(FeeEstimate {
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: priority,
        })
    }

    async fn get_bytecode(&self, address: Address) -> Result<Vec<u8>> {
        // Verifica o cache
        if self.config.use_cache {
            let cache = self.bytecode_cache.read();
            if let Some((code, timestamp)) = cache.get(&address) {
                if timestamp.elapsed() < self.config.cache_ttl {
                    return Ok(code.clone());
                }
            }
        }

        let result = match &self.transport {
            TransportType::Http(web3) => web3
                .eth()
                .code(H160::from_slice(address.as_bytes()), None)
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter código do contrato: {}", e)))?,
            TransportType::WebSocket(web3) => web3
                .eth()
                .code(H160::from_slice(address.as_bytes()), None)
                .await
                .map_err(|e| Error::RpcError(format!("Falha ao obter código do contrato: {}", e)))?,
        };

        // Atualiza o cache
        if self.config.use_cache {
            let mut cache = self.bytecode_cache.write();
            cache.insert(address, (result.0.clone(), Instant::now()));
        }

        Ok(result.0)
    }
}
