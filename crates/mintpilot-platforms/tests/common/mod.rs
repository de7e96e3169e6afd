use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use mintpilot_core::{
    abi,
    error::{Error, Result},
    traits::ChainClient,
    FeeEstimate, TransactionHash, TxReceipt, TxRequest, TxStatus,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Cliente de chain em memória para os testes de detecção e análise.
///
/// Leituras são mapeadas por calldata exata ou por seletor; qualquer
/// coisa não mapeada falha como uma RPC indisponível, que é exatamente
/// o comportamento que os defaults do pipeline precisam tolerar.
pub struct MockChainClient {
    reads_exact: HashMap<(Address, Vec<u8>), Vec<u8>>,
    reads: HashMap<(Address, [u8; 4]), Vec<u8>>,
    delays: HashMap<(Address, [u8; 4]), Duration>,
    bytecode: HashMap<Address, Vec<u8>>,
    call_outcome: Option<std::result::Result<Vec<u8>, Vec<u8>>>,
    gas: Option<U256>,
    fee: FeeEstimate,
    receipt_status: TxStatus,
    pub sent: Mutex<Vec<TxRequest>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            reads_exact: HashMap::new(),
            reads: HashMap::new(),
            delays: HashMap::new(),
            bytecode: HashMap::new(),
            call_outcome: Some(Ok(Vec::new())),
            gas: Some(U256::from(100_000u64)),
            fee: FeeEstimate {
                max_fee_per_gas: U256::from(30_000_000_000u64),
                max_priority_fee_per_gas: U256::from(2_000_000_000u64),
            },
            receipt_status: TxStatus::Success,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn on_read(&mut self, address: Address, signature: &str, response: Vec<u8>) {
        self.reads.insert((address, abi::selector(signature)), response);
    }

    pub fn on_read_data(&mut self, address: Address, data: Vec<u8>, response: Vec<u8>) {
        self.reads_exact.insert((address, data), response);
    }

    pub fn delay_read(&mut self, address: Address, signature: &str, delay: Duration) {
        self.delays.insert((address, abi::selector(signature)), delay);
    }

    pub fn with_bytecode(&mut self, address: Address, code: Vec<u8>) {
        self.bytecode.insert(address, code);
    }

    #[allow(dead_code)]
    pub fn with_call_revert(&mut self, payload: Vec<u8>) {
        self.call_outcome = Some(Err(payload));
    }

    #[allow(dead_code)]
    pub fn with_gas(&mut self, gas: Option<U256>) {
        self.gas = gas;
    }

    #[allow(dead_code)]
    pub fn with_receipt_status(&mut self, status: TxStatus) {
        self.receipt_status = status;
    }
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn read(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        if data.len() >= 4 {
            let mut sel = [0u8; 4];
            sel.copy_from_slice(&data[0..4]);
            if let Some(delay) = self.delays.get(&(to, sel)) {
                tokio::time::sleep(*delay).await;
            }
            if let Some(response) = self.reads_exact.get(&(to, data.clone())) {
                return Ok(response.clone());
            }
            if let Some(response) = self.reads.get(&(to, sel)) {
                return Ok(response.clone());
            }
        }
        Err(Error::RpcError("leitura não mapeada".to_string()))
    }

    async fn call(&self, _tx: &TxRequest) -> Result<Vec<u8>> {
        match &self.call_outcome {
            Some(Ok(data)) => Ok(data.clone()),
            Some(Err(payload)) => Err(Error::Revert { data: payload.clone() }),
            None => Err(Error::RpcError("chamada não mapeada".to_string())),
        }
    }

    async fn estimate_gas(&self, _tx: &TxRequest) -> Result<U256> {
        self.gas
            .ok_or_else(|| Error::RpcError("estimativa indisponível".to_string()))
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TransactionHash> {
        self.sent.lock().push(tx.clone());
        Ok(H256::repeat_byte(0x99))
    }

    async fn wait_for_receipt(&self, hash: TransactionHash) -> Result<TxReceipt> {
        Ok(TxReceipt {
            tx_hash: hash,
            status: self.receipt_status,
            block_number: 1234,
        })
    }

    async fn fee_estimate(&self) -> Result<FeeEstimate> {
        Ok(self.fee)
    }

    async fn get_bytecode(&self, address: Address) -> Result<Vec<u8>> {
        Ok(self.bytecode.get(&address).cloned().unwrap_or_default())
    }
}
