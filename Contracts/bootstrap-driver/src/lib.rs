//! Bootstrap Driver
//!
//! Thin, strictly sequential driver for the root proxy bootstrap chain. It
//! walks an ordered stage plan against a deployment backend: deploy the
//! stage-0 module, raise the proxy over it, then for every later stage
//! deploy, `implement` through the proxy and activate the module at the same
//! proxy address. After the terminal governance stage it performs a read-only
//! introspection pass and returns the resolved addresses and epoch scalars.
//!
//! The driver never touches upgrade authority itself; the terminal module's
//! own activation performs the governance hand-off.

mod error;

use core::fmt;
use std::str::FromStr;

pub use crate::error::DriverError;

/// Closed set of deployable target networks. Anything else fails fast,
/// before a single module is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    MainnetFork,
    Develop,
    Rinkeby,
    Ropsten,
}

impl Network {
    pub fn id(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::MainnetFork => "mainnet-fork",
            Network::Develop => "develop",
            Network::Rinkeby => "rinkeby",
            Network::Ropsten => "ropsten",
        }
    }
}

impl FromStr for Network {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, DriverError> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "mainnet-fork" => Ok(Network::MainnetFork),
            "develop" => Ok(Network::Develop),
            "rinkeby" => Ok(Network::Rinkeby),
            "ropsten" => Ok(Network::Ropsten),
            other => Err(DriverError::UnsupportedNetwork(other.to_string())),
        }
    }
}

/// Ordered stage labels, stage 0 first, terminal governance stage last.
/// The list is data rather than code so a plan with or without a generic
/// pool stage needs no driver change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    stages: Vec<String>,
}

impl StagePlan {
    pub fn new(stages: Vec<String>) -> Result<Self, DriverError> {
        if stages.is_empty() {
            return Err(DriverError::EmptyPlan);
        }
        Ok(Self { stages })
    }

    /// The chain as shipped: token, oracle, eur oracle, bootstrap pool, dao.
    pub fn standard() -> Self {
        Self {
            stages: ["token", "oracle", "eur_oracle", "bootstrap_pool", "dao"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn terminal(&self) -> &str {
        // Non-empty by construction.
        self.stages.last().map(String::as_str).unwrap_or_default()
    }
}

/// What a concrete deployment backend must provide. The driver only decides
/// ordering; deploying code, signing as the bootstrap operator and talking to
/// the proxy are the backend's business.
pub trait BootstrapHost {
    /// Handle for a deployed stage module (an address on a real backend).
    type ModuleRef: Clone + fmt::Debug;

    /// Deploy the module code for `stage`.
    fn deploy(&mut self, stage: &str) -> Result<Self::ModuleRef, DriverError>;
    /// Raise the root proxy over the stage-0 module.
    fn init_proxy(&mut self, initial: &Self::ModuleRef) -> Result<(), DriverError>;
    /// Repoint the proxy to `next` by calling `implement` as the operator.
    fn implement(&mut self, stage: &str, next: &Self::ModuleRef) -> Result<(), DriverError>;
    /// Initialize the freshly active stage through the proxy address.
    fn activate(&mut self, stage: &str) -> Result<(), DriverError>;
    /// Read-only introspection of the terminal governance module.
    fn report(&mut self) -> Result<DeployReport, DriverError>;
}

/// Resolved addresses and epoch scalars after the terminal stage. Pure
/// reporting; producing it mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub root: String,
    pub dao: String,
    pub euro: String,
    pub oracle: String,
    pub eur_oracle: String,
    pub pool: String,
    pub epoch: u32,
    pub epoch_time: u64,
}

impl fmt::Display for DeployReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root Address: {}", self.root)?;
        writeln!(f, "Dao Address: {}", self.dao)?;
        writeln!(f, "Token Address: {}", self.euro)?;
        writeln!(f, "Oracle Address: {}", self.oracle)?;
        writeln!(f, "EurOracle Address: {}", self.eur_oracle)?;
        writeln!(f, "Pool Address: {}", self.pool)?;
        writeln!(f, "Current Epoch: {}", self.epoch)?;
        write!(f, "Epoch Time: {}", self.epoch_time)
    }
}

/// Walk the whole chain on `host`. The network identifier is validated
/// before anything is deployed; every later error stops the walk where it
/// stands, with no retries.
pub fn run<H: BootstrapHost>(
    network: &str,
    plan: &StagePlan,
    host: &mut H,
) -> Result<DeployReport, DriverError> {
    let network: Network = network.parse()?;
    tracing::info!(network = network.id(), stages = plan.stages().len(), "starting bootstrap chain walk");

    let mut stages = plan.stages().iter();
    let first = stages.next().ok_or(DriverError::EmptyPlan)?;
    let module = host.deploy(first)?;
    host.init_proxy(&module)?;
    host.activate(first)?;
    tracing::info!(stage = %first, module = ?module, "stage 0 live behind the proxy");

    for stage in stages {
        let module = host.deploy(stage)?;
        host.implement(stage, &module)?;
        host.activate(stage)?;
        tracing::info!(stage = %stage, module = ?module, "stage applied");
    }

    let report = host.report()?;
    tracing::info!(%report, "bootstrap complete");
    Ok(report)
}
