/// Error taxonomy for the Armada playground
///
/// Three families of failures exist in this system: request validation
/// (rejected before any network call), upstream SDK/router failures
/// (logged, surfaced as a generic message, never retried automatically)
/// and wallet interaction failures (always retryable by the user).

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum ArmadaError {
    /// Required request fields were missing - no upstream call was attempted
    Validation { missing_fields: Vec<String> },

    /// A field was present but unusable (bad number, unknown environment, ...)
    InvalidField { field: String, reason: String },

    /// Transport-level failure talking to an upstream service
    Network { endpoint: String, message: String },

    /// Upstream service answered with a non-success status
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Upstream answered 2xx but the payload did not decode
    Parse { context: String, message: String },

    /// Wallet interaction failure (signature, chain switch, confirmation)
    Wallet(WalletError),
}

impl ArmadaError {
    pub fn network(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ArmadaError::Network {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn parse(context: &str, err: impl std::fmt::Display) -> Self {
        ArmadaError::Parse {
            context: context.to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid_field(field: &str, reason: &str) -> Self {
        ArmadaError::InvalidField {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors produced before any upstream call (HTTP 400 family)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ArmadaError::Validation { .. } | ArmadaError::InvalidField { .. }
        )
    }
}

impl std::fmt::Display for ArmadaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArmadaError::Validation { missing_fields } => {
                write!(f, "Missing required fields: {}", missing_fields.join(", "))
            }
            ArmadaError::InvalidField { field, reason } => {
                write!(f, "Invalid field '{}': {}", field, reason)
            }
            ArmadaError::Network { endpoint, message } => {
                write!(f, "Network error calling {}: {}", endpoint, message)
            }
            ArmadaError::Api {
                endpoint,
                status,
                body,
            } => {
                write!(f, "HTTP {} from {}: {}", status, endpoint, body)
            }
            ArmadaError::Parse { context, message } => {
                write!(f, "Failed to parse {}: {}", context, message)
            }
            ArmadaError::Wallet(e) => write!(f, "Wallet error: {}", e),
        }
    }
}

impl std::error::Error for ArmadaError {}

impl From<WalletError> for ArmadaError {
    fn from(e: WalletError) -> Self {
        ArmadaError::Wallet(e)
    }
}

// =============================================================================
// WALLET ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum WalletError {
    /// User declined the signature request in the wallet
    SignatureRejected { reason: String },

    /// Submission to the node failed after signing
    SubmissionFailed { reason: String },

    /// Connected wallet is on a different chain than the transaction targets
    WrongChain { expected: u64, actual: u64 },

    /// The wallet refused or failed to switch chains
    SwitchChainFailed { chain_id: u64, reason: String },

    /// The transaction never reached the required confirmation count
    ConfirmationFailed { tx_hash: String, reason: String },
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::SignatureRejected { reason } => {
                write!(f, "Signature rejected: {}", reason)
            }
            WalletError::SubmissionFailed { reason } => {
                write!(f, "Transaction submission failed: {}", reason)
            }
            WalletError::WrongChain { expected, actual } => {
                write!(
                    f,
                    "Wrong wallet chain: expected {}, wallet is on {}",
                    expected, actual
                )
            }
            WalletError::SwitchChainFailed { chain_id, reason } => {
                write!(f, "Failed to switch to chain {}: {}", chain_id, reason)
            }
            WalletError::ConfirmationFailed { tx_hash, reason } => {
                write!(f, "Confirmation failed for {}: {}", tx_hash, reason)
            }
        }
    }
}

impl std::error::Error for WalletError {}
