use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use mintpilot_core::{
    error::{Error, Result},
    traits::ChainClient,
    FeeEstimate, TransactionHash, TxReceipt, TxRequest, TxStatus,
};
use parking_lot::Mutex;

/// Cliente de chain roteirizado para os testes do builder e da
/// estratégia de gas.
pub struct ScriptedChainClient {
    pub call_outcome: std::result::Result<Vec<u8>, Vec<u8>>,
    pub gas: Option<U256>,
    pub fee: FeeEstimate,
    pub calls: Mutex<usize>,
    pub estimates: Mutex<usize>,
}

impl ScriptedChainClient {
    pub fn new() -> Self {
        Self {
            call_outcome: Ok(Vec::new()),
            gas: Some(U256::from(100_000u64)),
            fee: FeeEstimate {
                max_fee_per_gas: U256::from(30_000_000_000u64),
                max_priority_fee_per_gas: U256::from(2_000_000_000u64),
            },
            calls: Mutex::new(0),
            estimates: Mutex::new(0),
        }
    }

    pub fn reverting(payload: Vec<u8>) -> Self {
        let mut client = Self::new();
        client.call_outcome = Err(payload);
        client
    }
}

impl Default for ScriptedChainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for ScriptedChainClient {
    async fn read(&self, _to: Address, _data: Vec<u8>) -> Result<Vec<u8>> {
        Err(Error::RpcError("leitura não roteirizada".to_string()))
    }

    async fn call(&self, _tx: &TxRequest) -> Result<Vec<u8>> {
        *self.calls.lock() += 1;
        match &self.call_outcome {
            Ok(data) => Ok(data.clone()),
            Err(payload) => Err(Error::Revert { data: payload.clone() }),
        }
    }

    async fn estimate_gas(&self, _tx: &TxRequest) -> Result<U256> {
        *self.estimates.lock() += 1;
        self.gas
            .ok_or_else(|| Error::RpcError("estimativa indisponível".to_string()))
    }

    async fn send_transaction(&self, _tx: &TxRequest) -> Result<TransactionHash> {
        Ok(H256::repeat_byte(0x55))
    }

    async fn wait_for_receipt(&self, hash: TransactionHash) -> Result<TxReceipt> {
        Ok(TxReceipt {
            tx_hash: hash,
            status: TxStatus::Success,
            block_number: 1,
        })
    }

    async fn fee_estimate(&self) -> Result<FeeEstimate> {
        Ok(self.fee)
    }

    async fn get_bytecode(&self, _address: Address) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
