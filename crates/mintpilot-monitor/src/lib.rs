/*!
 * Mintpilot Monitor
 *
 * Polling de ativação de vendas. O monitor consulta um snapshot fresco
 * a cada intervalo e, quando a venda vira ativa, dispara exatamente um
 * ciclo de preparo e envio antes de voltar ao repouso.
 *
 * O laço é sequencial: cada iteração espera a checagem terminar e só
 * então dorme o restante do intervalo, de modo que nunca existem duas
 * checagens em voo e um duplo disparo é estruturalmente impossível. O
 * cancelamento é cooperativo: `stop()` baixa a flag da sessão e uma
 * checagem já em voo termina, mas seu resultado é descartado.
 */

use async_trait::async_trait;
use ethereum_types::U256;
use mintpilot_core::{
    error::{Error, Result},
    ContractSnapshot, ContractTarget, TransactionHash,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Fonte de snapshots frescos para o alvo monitorado
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self, target: &ContractTarget) -> Result<ContractSnapshot>;
}

/// Executor do ciclo único de preparo e envio do mint
#[async_trait]
pub trait MintExecutor: Send + Sync {
    async fn execute(&self, snapshot: &ContractSnapshot, quantity: U256)
        -> Result<TransactionHash>;
}

/// Estados do monitor: Idle → Polling → Triggered → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Polling,
    Triggered,
}

/// Sessão de monitoramento em andamento
///
/// No máximo uma por monitor; criada no `start`, desfeita no `stop` ou
/// após um único disparo bem-sucedido. Não se reinicia sozinha.
pub struct MonitorSession {
    pub target: ContractTarget,
    pub quantity: U256,
    pub poll_interval: Duration,
    active: Arc<AtomicBool>,
}

/// Monitor de ativação com ciclo de vida explícito
///
/// É um objeto de contexto criado pelo chamador e passado por
/// referência; não há estado global nem timers compartilhados.
pub struct ActivationMonitor {
    session: Mutex<Option<MonitorSession>>,
    state: Arc<Mutex<MonitorState>>,
    // Incrementado a cada start/stop; uma task antiga que acorda depois
    // de um restart não pode mais escrever no estado compartilhado
    generation: Arc<AtomicU64>,
}

impl ActivationMonitor {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            state: Arc::new(Mutex::new(MonitorState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> MonitorState {
        *self.state.lock()
    }

    /// Há uma sessão viva?
    pub fn is_active(&self) -> bool {
        self.session
            .lock()
            .as_ref()
            .map(|s| s.active.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Inicia o polling do alvo; falha se já existe uma sessão ativa
    pub fn start(
        &self,
        source: Arc<dyn SnapshotSource>,
        executor: Arc<dyn MintExecutor>,
        target: ContractTarget,
        quantity: U256,
        poll_interval: Duration,
    ) -> Result<()> {
        let mut session = self.session.lock();
        if session
            .as_ref()
            .map(|s| s.active.load(Ordering::SeqCst))
            .unwrap_or(false)
        {
            return Err(Error::ConfigurationError(
                "sessão de monitoramento já ativa".to_string(),
            ));
        }

        let active = Arc::new(AtomicBool::new(true));
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let session_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state.lock() = MonitorState::Polling;

        let task_active = Arc::clone(&active);
        tokio::spawn(async move {
            poll_loop(
                source,
                executor,
                target,
                quantity,
                poll_interval,
                task_active,
                state,
                generation,
                session_generation,
            )
            .await;
        });

        *session = Some(MonitorSession {
            target,
            quantity,
            poll_interval,
            active,
        });
        Ok(())
    }

    /// Encerra a sessão corrente; idempotente
    ///
    /// Uma checagem em voo termina normalmente, mas o laço reconfere a
    /// flag antes de disparar, então nenhum mint acontece após o stop.
    pub fn stop(&self) {
        let mut session = self.session.lock();
        if let Some(current) = session.take() {
            current.active.store(false, Ordering::SeqCst);
        }
        // Invalida as escritas de estado da task encerrada
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.lock() = MonitorState::Idle;
    }
}

impl Default for ActivationMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Escreve no estado compartilhado apenas se a sessão desta task ainda
/// é a corrente; protege contra uma task antiga acordando após restart
fn set_state_if_current(
    state: &Mutex<MonitorState>,
    generation: &AtomicU64,
    session_generation: u64,
    value: MonitorState,
) {
    let mut guard = state.lock();
    if generation.load(Ordering::SeqCst) == session_generation {
        *guard = value;
    }
}

#[allow(clippy::too_many_arguments)]
async fn poll_loop(
    source: Arc<dyn SnapshotSource>,
    executor: Arc<dyn MintExecutor>,
    target: ContractTarget,
    quantity: U256,
    poll_interval: Duration,
    active: Arc<AtomicBool>,
    state: Arc<Mutex<MonitorState>>,
    generation: Arc<AtomicU64>,
    session_generation: u64,
) {
    loop {
        if !active.load(Ordering::SeqCst) {
            break;
        }
        let started = Instant::now();

        match source.snapshot(&target).await {
            Ok(snapshot) => {
                // Resultado de uma checagem em voo não vale depois do stop
                if !active.load(Ordering::SeqCst) {
                    break;
                }
                if snapshot.is_active {
                    set_state_if_current(
                        &state,
                        &generation,
                        session_generation,
                        MonitorState::Triggered,
                    );
                    // Para o polling antes de disparar: um único ciclo
                    active.store(false, Ordering::SeqCst);
                    match executor.execute(&snapshot, quantity).await {
                        Ok(hash) => {
                            info!(%hash, address = %target.address, "venda ativa, mint disparado")
                        }
                        Err(e) => {
                            warn!(error = %e, address = %target.address, "disparo de mint falhou")
                        }
                    }
                    break;
                }
            }
            Err(e) => {
                // Falha de rede não conta para nenhum limiar de aborto
                warn!(error = %e, address = %target.address, "falha ao checar ativação, polling continua");
            }
        }

        let remaining = poll_interval.saturating_sub(started.elapsed());
        tokio::time::sleep(remaining).await;
    }

    active.store(false, Ordering::SeqCst);
    set_state_if_current(&state, &generation, session_generation, MonitorState::Idle);
}
