/// Transaction step executor
///
/// Drives a fetched transaction list through the wallet one step at a time:
/// fetch -> sign -> confirm, repeated until the list is drained. Steps are
/// strictly sequential and a failed step stays current so it can be retried
/// without re-fetching or skipping ahead.
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::chains::ChainId;
use crate::errors::{ArmadaError, WalletError};
use crate::logger::{self, LogTag};
use crate::types::Transaction;

/// Confirmations to wait for before a step counts as done
pub const CONFIRMATION_BLOCKS: u64 = 2;

// =============================================================================
// SEAMS
// =============================================================================

/// Wallet the executor submits through. The real thing is a browser wallet
/// or keystore signer; tests use an in-memory mock.
#[async_trait]
pub trait WalletClient: Send + Sync {
    async fn active_chain_id(&self) -> Result<ChainId, WalletError>;
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError>;
    /// Submit and return the transaction hash
    async fn send_transaction(&self, tx: &Transaction) -> Result<String, WalletError>;
    async fn wait_for_confirmations(
        &self,
        tx_hash: &str,
        confirmations: u64,
    ) -> Result<(), WalletError>;
}

/// Where the transaction list comes from (an API endpoint in practice)
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ArmadaError>;
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorPhase {
    Idle,
    FetchingList,
    AwaitingSignature,
    Confirming,
    StepComplete,
    AllComplete,
    Error,
}

pub struct TransactionExecutor<W: WalletClient, S: TransactionSource> {
    wallet: W,
    source: S,
    /// Chain every step must be signed on
    chain_id: ChainId,
    phase: ExecutorPhase,
    /// The step currently in flight; kept here on failure so retry re-runs it
    current: Option<Transaction>,
    remaining: VecDeque<Transaction>,
    last_tx_hash: Option<String>,
    last_error: Option<ArmadaError>,
}

impl<W: WalletClient, S: TransactionSource> TransactionExecutor<W, S> {
    pub fn new(wallet: W, source: S, chain_id: ChainId) -> Self {
        Self {
            wallet,
            source,
            chain_id,
            phase: ExecutorPhase::Idle,
            current: None,
            remaining: VecDeque::new(),
            last_tx_hash: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> ExecutorPhase {
        self.phase
    }

    pub fn current_transaction(&self) -> Option<&Transaction> {
        self.current.as_ref()
    }

    pub fn steps_remaining(&self) -> usize {
        self.remaining.len() + usize::from(self.current.is_some())
    }

    pub fn last_tx_hash(&self) -> Option<&str> {
        self.last_tx_hash.as_deref()
    }

    pub fn last_error(&self) -> Option<&ArmadaError> {
        self.last_error.as_ref()
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Fetch the transaction list and execute it front to back. Stops at the
    /// first failing step, leaving that step current for `retry`.
    pub async fn run(&mut self) {
        self.reset();
        self.phase = ExecutorPhase::FetchingList;
        logger::log(LogTag::Executor, "FETCH", "requesting transaction list");

        match self.source.fetch_transactions().await {
            Ok(list) if list.is_empty() => {
                // nothing to sign, drop straight back to idle
                logger::log(LogTag::Executor, "FETCH", "nothing to execute");
                self.phase = ExecutorPhase::Idle;
            }
            Ok(list) => {
                logger::log(
                    LogTag::Executor,
                    "FETCH",
                    &format!("{} transaction(s) to execute", list.len()),
                );
                self.remaining = list.into();
                self.drain().await;
            }
            Err(e) => {
                logger::error(LogTag::Executor, &format!("fetch failed: {}", e));
                self.last_error = Some(e);
                self.phase = ExecutorPhase::Error;
            }
        }
    }

    /// Re-run the failed step and continue. No-op unless in the error phase.
    pub async fn retry(&mut self) {
        if self.phase != ExecutorPhase::Error {
            return;
        }
        self.last_error = None;
        self.drain().await;
    }

    /// Move the wallet to the executor's chain, clearing a chain-mismatch
    /// error on success. The failed step itself still needs `retry`.
    pub async fn switch_chain(&mut self) -> Result<(), WalletError> {
        self.wallet.switch_chain(self.chain_id).await?;
        logger::log(
            LogTag::Executor,
            "CHAIN",
            &format!("wallet switched to chain {}", self.chain_id),
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        self.phase = ExecutorPhase::Idle;
        self.current = None;
        self.remaining.clear();
        self.last_tx_hash = None;
        self.last_error = None;
    }

    /// Execute steps until the queue is empty or a step fails
    async fn drain(&mut self) {
        loop {
            let tx = match self.current.take().or_else(|| self.remaining.pop_front()) {
                Some(tx) => tx,
                None => {
                    self.phase = ExecutorPhase::AllComplete;
                    logger::log(LogTag::Executor, "DONE", "all transactions confirmed");
                    return;
                }
            };

            match self.execute_step(&tx).await {
                Ok(hash) => {
                    logger::log(
                        LogTag::Executor,
                        "CONFIRMED",
                        &format!("{} ({})", tx.description, hash),
                    );
                    self.last_tx_hash = Some(hash);
                    self.phase = ExecutorPhase::StepComplete;
                }
                Err(e) => {
                    logger::warn(
                        LogTag::Executor,
                        &format!("step '{}' failed: {}", tx.description, e),
                    );
                    self.current = Some(tx);
                    self.last_error = Some(e.into());
                    self.phase = ExecutorPhase::Error;
                    return;
                }
            }
        }
    }

    /// One full step: chain guard, signature, confirmation wait
    async fn execute_step(&mut self, tx: &Transaction) -> Result<String, WalletError> {
        self.phase = ExecutorPhase::AwaitingSignature;

        let active = self.wallet.active_chain_id().await?;
        if active != self.chain_id {
            return Err(WalletError::WrongChain {
                expected: self.chain_id,
                actual: active,
            });
        }

        let hash = self.wallet.send_transaction(tx).await?;
        self.phase = ExecutorPhase::Confirming;
        self.wallet
            .wait_for_confirmations(&hash, CONFIRMATION_BLOCKS)
            .await?;
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::types::TransactionKind;

    struct MockWallet {
        chain: AtomicU64,
        sends: Mutex<Vec<String>>,
        confirmations_requested: Mutex<Vec<u64>>,
        sends_to_fail: AtomicUsize,
        confirms_to_fail: AtomicUsize,
    }

    impl MockWallet {
        fn on_chain(chain_id: ChainId) -> Self {
            Self {
                chain: AtomicU64::new(chain_id),
                sends: Mutex::new(Vec::new()),
                confirmations_requested: Mutex::new(Vec::new()),
                sends_to_fail: AtomicUsize::new(0),
                confirms_to_fail: AtomicUsize::new(0),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sends.lock().unwrap().clone()
        }

        fn take_failure_budget(counter: &AtomicUsize) -> bool {
            counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl WalletClient for MockWallet {
        async fn active_chain_id(&self) -> Result<ChainId, WalletError> {
            Ok(self.chain.load(Ordering::SeqCst))
        }

        async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError> {
            self.chain.store(chain_id, Ordering::SeqCst);
            Ok(())
        }

        async fn send_transaction(&self, tx: &Transaction) -> Result<String, WalletError> {
            if Self::take_failure_budget(&self.sends_to_fail) {
                return Err(WalletError::SignatureRejected {
                    reason: "user rejected".to_string(),
                });
            }
            let mut sends = self.sends.lock().unwrap();
            sends.push(tx.description.clone());
            Ok(format!("0xhash{:02}", sends.len()))
        }

        async fn wait_for_confirmations(
            &self,
            tx_hash: &str,
            confirmations: u64,
        ) -> Result<(), WalletError> {
            self.confirmations_requested
                .lock()
                .unwrap()
                .push(confirmations);
            if Self::take_failure_budget(&self.confirms_to_fail) {
                return Err(WalletError::ConfirmationFailed {
                    tx_hash: tx_hash.to_string(),
                    reason: "dropped from mempool".to_string(),
                });
            }
            Ok(())
        }
    }

    struct MockSource {
        list: Vec<Transaction>,
        fetches: AtomicUsize,
    }

    impl MockSource {
        fn with(list: Vec<Transaction>) -> Self {
            Self {
                list,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TransactionSource for MockSource {
        async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ArmadaError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.list.clone())
        }
    }

    fn tx(description: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            to: "0x2222222222222222222222222222222222222222".to_string(),
            data: "0xdeadbeef".to_string(),
            value: "0".to_string(),
            gas: None,
            kind,
            description: description.to_string(),
            metadata: None,
        }
    }

    fn deposit_flow() -> Vec<Transaction> {
        vec![
            tx("Approve 1 USDC", TransactionKind::Approval),
            tx("Deposit 1 USDC", TransactionKind::Operation),
        ]
    }

    #[tokio::test]
    async fn executes_all_steps_in_order() {
        let source = MockSource::with(deposit_flow());
        let mut executor = TransactionExecutor::new(MockWallet::on_chain(8453), source, 8453);

        executor.run().await;

        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);
        assert_eq!(
            executor.wallet().sent(),
            vec!["Approve 1 USDC".to_string(), "Deposit 1 USDC".to_string()]
        );
        assert_eq!(
            *executor.wallet().confirmations_requested.lock().unwrap(),
            vec![CONFIRMATION_BLOCKS, CONFIRMATION_BLOCKS]
        );
        assert_eq!(executor.last_tx_hash(), Some("0xhash02"));
        assert!(executor.last_error().is_none());
    }

    #[tokio::test]
    async fn empty_list_returns_to_idle_without_wallet_calls() {
        let source = MockSource::with(vec![]);
        let mut executor = TransactionExecutor::new(MockWallet::on_chain(8453), source, 8453);

        executor.run().await;

        assert_eq!(executor.phase(), ExecutorPhase::Idle);
        assert!(executor.wallet().sent().is_empty());
        assert!(executor.last_tx_hash().is_none());
    }

    #[tokio::test]
    async fn chain_mismatch_blocks_until_switch() {
        let source = MockSource::with(deposit_flow());
        let mut executor = TransactionExecutor::new(MockWallet::on_chain(1), source, 8453);

        executor.run().await;

        assert_eq!(executor.phase(), ExecutorPhase::Error);
        assert!(executor.wallet().sent().is_empty());
        assert_eq!(executor.steps_remaining(), 2);
        let err = executor.last_error().unwrap().to_string();
        assert!(err.contains("8453"), "unexpected error: {}", err);

        executor.switch_chain().await.unwrap();
        executor.retry().await;

        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);
        assert_eq!(executor.wallet().sent().len(), 2);
    }

    #[tokio::test]
    async fn rejected_signature_is_retryable_without_skipping() {
        let source = MockSource::with(deposit_flow());
        let wallet = MockWallet::on_chain(8453);
        wallet.sends_to_fail.store(1, Ordering::SeqCst);
        let mut executor = TransactionExecutor::new(wallet, source, 8453);

        executor.run().await;
        assert_eq!(executor.phase(), ExecutorPhase::Error);
        assert_eq!(
            executor.current_transaction().unwrap().description,
            "Approve 1 USDC"
        );

        executor.retry().await;
        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);
        // the rejected step ran again, nothing was skipped
        assert_eq!(
            executor.wallet().sent(),
            vec!["Approve 1 USDC".to_string(), "Deposit 1 USDC".to_string()]
        );
    }

    #[tokio::test]
    async fn confirmation_failure_reruns_the_same_step() {
        let source = MockSource::with(deposit_flow());
        let wallet = MockWallet::on_chain(8453);
        wallet.confirms_to_fail.store(1, Ordering::SeqCst);
        let mut executor = TransactionExecutor::new(wallet, source, 8453);

        executor.run().await;
        assert_eq!(executor.phase(), ExecutorPhase::Error);

        executor.retry().await;
        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);
        // first step was sent twice: once dropped, once confirmed
        assert_eq!(
            executor.wallet().sent(),
            vec![
                "Approve 1 USDC".to_string(),
                "Approve 1 USDC".to_string(),
                "Deposit 1 USDC".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn retry_outside_error_phase_is_a_no_op() {
        let source = MockSource::with(deposit_flow());
        let mut executor = TransactionExecutor::new(MockWallet::on_chain(8453), source, 8453);

        executor.run().await;
        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);

        executor.retry().await;
        assert_eq!(executor.phase(), ExecutorPhase::AllComplete);
        assert_eq!(executor.wallet().sent().len(), 2);
    }
}
