// types.rs
use soroban_sdk::{contracttype, Address, Symbol};

/// Who is entitled to trigger the next upgrade.
///
/// Starts as `Operator` (the bootstrap key) and flips to `Governance`
/// exactly once, when the terminal stage module hands off. There is no
/// transition back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UpgradeAuthority {
    Operator(Address),
    Governance,
}

/// Append-only log entry written once per successful upgrade.
/// `sequence` is strictly increasing and gapless, starting at 1.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeRecord {
    pub sequence: u64,
    pub previous_implementation: Address,
    pub new_implementation: Address,
    pub authorizing_principal: Address,
    pub stage: Symbol,
    pub at: u64,
}
