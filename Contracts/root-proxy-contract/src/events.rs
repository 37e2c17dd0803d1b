use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::UpgradeRecord;

#[contracttype]
#[derive(Clone)]
pub struct UpgradeExecutedEvent {
    pub sequence: u64,
    pub previous_implementation: Address,
    pub new_implementation: Address,
    pub authorizing_principal: Address,
    pub stage: Symbol,
    pub at: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct GovernanceHandOffEvent {
    pub module: Address,
    pub at: u64,
}

pub struct Events;

impl Events {
    pub fn emit_upgrade_executed(env: &Env, record: &UpgradeRecord) {
        let event = UpgradeExecutedEvent {
            sequence: record.sequence,
            previous_implementation: record.previous_implementation.clone(),
            new_implementation: record.new_implementation.clone(),
            authorizing_principal: record.authorizing_principal.clone(),
            stage: record.stage.clone(),
            at: record.at,
        };
        env.events().publish((symbol_short!("upgrade"),), event);
    }

    pub fn emit_governance_hand_off(env: &Env, module: &Address) {
        let event = GovernanceHandOffEvent {
            module: module.clone(),
            at: env.ledger().timestamp(),
        };
        env.events().publish((symbol_short!("handoff"),), event);
    }
}
