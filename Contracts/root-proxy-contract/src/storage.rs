use soroban_sdk::{Address, Env, Symbol, Val, Vec};

use crate::{
    error::ProxyError,
    types::{UpgradeAuthority, UpgradeRecord},
    DataKey,
};

/// Thin wrapper over the proxy's storage. Proxy configuration lives in
/// instance storage; the upgrade log and the arena slots are persistent so
/// they survive however long the bootstrap and post-bootstrap lifetime runs.
pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Impl)
    }

    pub fn require_initialized(&self) -> Result<(), ProxyError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(ProxyError::NotInitialized)
        }
    }

    pub fn init(
        &self,
        operator: &Address,
        stage_plan: &Vec<Symbol>,
        initial_impl: &Address,
        layout_version: u32,
    ) {
        let authority = UpgradeAuthority::Operator(operator.clone());
        self.env.storage().instance().set(&DataKey::Authority, &authority);
        self.env.storage().instance().set(&DataKey::StagePlan, stage_plan);
        self.env.storage().instance().set(&DataKey::Impl, initial_impl);
        let cursor: u32 = 0;
        self.env.storage().instance().set(&DataKey::StageCursor, &cursor);
        self.env.storage().instance().set(&DataKey::LayoutVersion, &layout_version);
        let seq: u64 = 0;
        self.env.storage().instance().set(&DataKey::UpgradeSeq, &seq);
    }

    pub fn authority(&self) -> UpgradeAuthority {
        self.env.storage().instance().get(&DataKey::Authority).unwrap()
    }

    pub fn set_governance_authority(&self) {
        self.env
            .storage()
            .instance()
            .set(&DataKey::Authority, &UpgradeAuthority::Governance);
    }

    pub fn current_impl(&self) -> Option<Address> {
        self.env.storage().instance().get(&DataKey::Impl)
    }

    pub fn set_implementation(&self, new_impl: &Address) {
        self.env.storage().instance().set(&DataKey::Impl, new_impl);
    }

    pub fn stage_plan(&self) -> Vec<Symbol> {
        self.env.storage().instance().get(&DataKey::StagePlan).unwrap()
    }

    pub fn stage_cursor(&self) -> u32 {
        self.env.storage().instance().get(&DataKey::StageCursor).unwrap()
    }

    /// Move to the next stage in the plan; the cursor saturates at the
    /// terminal stage, where post-bootstrap upgrades keep landing.
    pub fn advance_stage(&self) {
        let plan = self.stage_plan();
        let cursor = self.stage_cursor();
        if cursor + 1 < plan.len() {
            let next = cursor + 1;
            self.env.storage().instance().set(&DataKey::StageCursor, &next);
        }
    }

    pub fn current_stage(&self) -> Symbol {
        let plan = self.stage_plan();
        plan.get_unchecked(self.stage_cursor())
    }

    pub fn is_terminal_stage(&self) -> bool {
        let plan = self.stage_plan();
        self.stage_cursor() + 1 == plan.len()
    }

    pub fn layout_version(&self) -> u32 {
        self.env.storage().instance().get(&DataKey::LayoutVersion).unwrap_or(0)
    }

    pub fn set_layout_version(&self, version: u32) {
        self.env.storage().instance().set(&DataKey::LayoutVersion, &version);
    }

    pub fn upgrade_count(&self) -> u64 {
        self.env.storage().instance().get(&DataKey::UpgradeSeq).unwrap_or(0)
    }

    pub fn next_upgrade_seq(&self) -> u64 {
        let mut seq: u64 = self.env.storage().instance().get(&DataKey::UpgradeSeq).unwrap();
        seq += 1;
        self.env.storage().instance().set(&DataKey::UpgradeSeq, &seq);
        seq
    }

    pub fn record_upgrade(&self, record: &UpgradeRecord) {
        self.env
            .storage()
            .persistent()
            .set(&DataKey::Record(record.sequence), record);
    }

    pub fn upgrade_record(&self, sequence: u64) -> Result<UpgradeRecord, ProxyError> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Record(sequence))
            .ok_or(ProxyError::RecordNotFound)
    }

    pub fn slot_set(&self, slot: &Symbol, value: &Val) {
        self.env.storage().persistent().set(&DataKey::Slot(slot.clone()), value);
    }

    pub fn slot_get(&self, slot: &Symbol) -> Option<Val> {
        self.env.storage().persistent().get(&DataKey::Slot(slot.clone()))
    }

    pub fn slot_has(&self, slot: &Symbol) -> bool {
        self.env.storage().persistent().has(&DataKey::Slot(slot.clone()))
    }
}
