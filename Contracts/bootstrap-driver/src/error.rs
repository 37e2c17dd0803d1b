use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// Target network is outside the closed set; nothing gets deployed.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("stage plan is empty")]
    EmptyPlan,
    #[error("deploying stage {stage} failed: {reason}")]
    Deploy { stage: String, reason: String },
    #[error("initializing the root proxy failed: {0}")]
    ProxyInit(String),
    #[error("upgrading to stage {stage} failed: {reason}")]
    Upgrade { stage: String, reason: String },
    #[error("activating stage {stage} failed: {reason}")]
    Activate { stage: String, reason: String },
    #[error("terminal introspection failed: {0}")]
    Report(String),
}
