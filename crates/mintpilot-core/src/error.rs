use thiserror::Error;

/// Erros comuns da biblioteca Mintpilot
///
/// Falhas de detecção e de leitura de campos individuais nunca aparecem
/// aqui: são absorvidas na origem e viram valores default. Apenas erros
/// de simulação, execução e configuração chegam ao chamador.
#[derive(Error, Debug)]
pub enum Error {
    /// Erro de comunicação com o node Ethereum
    #[error("Erro de RPC: {0}")]
    RpcError(String),

    /// Chamada revertida; carrega os bytes crus do payload de revert
    #[error("Execução revertida ({} bytes de payload)", data.len())]
    Revert { data: Vec<u8> },

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Erro de codificação de dados
    #[error("Erro de codificação: {0}")]
    EncodeError(String),

    /// Simulação (dry-run) da transação de mint falhou; a mensagem já
    /// contém o motivo decodificado e eventuais dicas
    #[error("Simulação falhou: {0}")]
    SimulationError(String),

    /// Estimativa de gas falhou; tratada como aviso pelo builder
    #[error("Falha na estimativa de gas: {0}")]
    GasEstimationError(String),

    /// Falha no envio da transação (assinatura, rede, saldo)
    #[error("Falha na execução: {0}")]
    ExecutionError(String),

    /// Transação minerada porém revertida; gas foi gasto
    #[error("Transação minerada porém revertida no bloco {block}")]
    ReceiptRevert { block: u64 },

    /// Plataforma forçada inexistente ou sessão de monitoramento duplicada
    #[error("Erro de configuração: {0}")]
    ConfigurationError(String),

    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),

    /// Erro genérico
    #[error("{0}")]
    Other(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
