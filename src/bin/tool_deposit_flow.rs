/// Headless deposit flow driver
///
/// Fetches the deposit transaction list from a running playground server and
/// walks it through the step executor with a dry-run wallet that signs
/// nothing. Useful for exercising the whole fetch -> sign -> confirm
/// sequencing without a browser or real funds.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use serde_json::json;

use armada_playground::chains::ChainId;
use armada_playground::errors::{ArmadaError, WalletError};
use armada_playground::executor::{
    ExecutorPhase, TransactionExecutor, TransactionSource, WalletClient,
};
use armada_playground::logger::{self, LogTag};
use armada_playground::types::Transaction;

#[derive(Debug, Parser)]
#[command(name = "tool_deposit_flow", about = "Dry-run a deposit flow end to end")]
struct Arguments {
    /// Base URL of a running playground server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[arg(long, default_value_t = 8453)]
    chain_id: ChainId,

    #[arg(long)]
    sender_address: String,

    #[arg(long)]
    fleet_address: String,

    #[arg(long, default_value = "USDC")]
    asset_token_symbol: String,

    /// Start the dry-run wallet on the wrong chain to exercise the
    /// chain-switch path
    #[arg(long)]
    wrong_chain: bool,
}

/// Fetches the transaction list from the depositTx endpoint
struct ApiTransactionSource {
    http: reqwest::Client,
    endpoint: String,
    body: serde_json::Value,
}

#[async_trait]
impl TransactionSource for ApiTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ArmadaError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.body)
            .send()
            .await
            .map_err(|e| ArmadaError::network(&self.endpoint, e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArmadaError::Api {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ArmadaError::parse(&self.endpoint, e))
    }
}

/// Wallet that signs nothing: fabricates hashes and confirms after a pause
struct DryRunWallet {
    chain: AtomicU64,
    sent: AtomicU64,
}

#[async_trait]
impl WalletClient for DryRunWallet {
    async fn active_chain_id(&self) -> Result<ChainId, WalletError> {
        Ok(self.chain.load(Ordering::SeqCst))
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError> {
        self.chain.store(chain_id, Ordering::SeqCst);
        Ok(())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<String, WalletError> {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        logger::info(
            LogTag::Executor,
            &format!("dry-run sign: {} -> {}", tx.description, tx.to),
        );
        Ok(format!("0x{:064x}", n))
    }

    async fn wait_for_confirmations(
        &self,
        _tx_hash: &str,
        confirmations: u64,
    ) -> Result<(), WalletError> {
        tokio::time::sleep(Duration::from_millis(100 * confirmations)).await;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arguments = Arguments::parse();
    logger::header("deposit flow dry run");

    let source = ApiTransactionSource {
        http: reqwest::Client::new(),
        endpoint: format!("{}/api/depositTx", arguments.server.trim_end_matches('/')),
        body: json!({
            "chainId": arguments.chain_id,
            "senderAddress": arguments.sender_address,
            "fleetAddress": arguments.fleet_address,
            "assetTokenSymbol": arguments.asset_token_symbol,
        }),
    };
    let wallet = DryRunWallet {
        chain: AtomicU64::new(if arguments.wrong_chain {
            1
        } else {
            arguments.chain_id
        }),
        sent: AtomicU64::new(0),
    };

    let mut executor = TransactionExecutor::new(wallet, source, arguments.chain_id);
    executor.run().await;

    // one chain switch is the only recovery this tool performs on its own
    if executor.phase() == ExecutorPhase::Error {
        if let Some(err) = executor.last_error() {
            logger::warn(LogTag::Executor, &format!("flow stopped: {}", err));
        }
        executor.switch_chain().await.ok();
        executor.retry().await;
    }

    match executor.phase() {
        ExecutorPhase::AllComplete => {
            logger::info(
                LogTag::Executor,
                &format!(
                    "flow complete, last hash {}",
                    executor.last_tx_hash().unwrap_or("-")
                ),
            );
            Ok(())
        }
        ExecutorPhase::Idle => {
            logger::info(LogTag::Executor, "nothing to execute");
            Ok(())
        }
        _ => {
            if let Some(err) = executor.last_error() {
                logger::error(LogTag::Executor, &format!("flow failed: {}", err));
            }
            anyhow::bail!("deposit flow did not complete")
        }
    }
}
