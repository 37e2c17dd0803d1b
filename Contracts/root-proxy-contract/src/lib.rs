#![no_std]
//! Root Proxy Contract
//!
//! Single stable address for a system whose logic is swapped stage by stage.
//! The proxy owns the shared storage arena and an append-only upgrade log,
//! delegates external calls to the currently active stage module, and gates
//! every upgrade behind the current authority: the bootstrap operator key
//! until the terminal governance module hands off, the governance module
//! itself afterwards. The hand-off happens exactly once and cannot be
//! reversed.

mod error;
mod events;
mod storage;
mod types;

use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, Address, Env, Symbol, Val, Vec,
};

pub use crate::error::ProxyError;
use crate::events::Events;
use crate::storage::Storage;
pub use crate::types::{UpgradeAuthority, UpgradeRecord};

/// Capability interface every stage module must expose.
///
/// `layout_version` reports the storage-layout schema the module was built
/// against. The proxy refuses to repoint to a module whose version is zero or
/// below the version already recorded, which keeps slot evolution additive
/// across the chain.
#[contractclient(name = "StageModuleClient")]
pub trait StageModule {
    fn layout_version(env: Env) -> u32;
}

#[contract]
pub struct RootProxyContract;

/// Public interface for the root proxy.
pub trait RootProxyTrait {
    /// Initialize the proxy with the bootstrap operator, the ordered stage
    /// plan (last label is the terminal governance stage) and the stage-0
    /// module. Can only be called once.
    fn init(
        env: Env,
        operator: Address,
        stage_plan: Vec<Symbol>,
        initial_impl: Address,
    ) -> Result<(), ProxyError>;
    /// Atomically repoint delegation to `next_module` and append an upgrade
    /// record. `caller` must be the current upgrade authority.
    fn implement(env: Env, caller: Address, next_module: Address)
        -> Result<UpgradeRecord, ProxyError>;
    /// One-way transfer of upgrade authority to governance. Fired by the
    /// terminal stage module's own initialization, never by the driver.
    fn hand_off_to_governance(env: Env, module: Address) -> Result<(), ProxyError>;
    /// Forward an arbitrary call (symbol+args) to the active stage module.
    fn forward(env: Env, func: Symbol, args: Vec<Val>) -> Result<Val, ProxyError>;
    /// Write an arena slot. Only the authenticated current implementation may
    /// write; there is exactly one writer at any time.
    fn arena_set(env: Env, module: Address, slot: Symbol, value: Val) -> Result<(), ProxyError>;
    /// Read an arena slot (error if never written).
    fn arena_get(env: Env, slot: Symbol) -> Result<Val, ProxyError>;
    fn arena_has(env: Env, slot: Symbol) -> bool;
    /// Returns current implementation address (error if uninitialized).
    fn implementation(env: Env) -> Result<Address, ProxyError>;
    fn authority(env: Env) -> Result<UpgradeAuthority, ProxyError>;
    /// Label of the stage the active module occupies.
    fn stage(env: Env) -> Result<Symbol, ProxyError>;
    fn stage_plan(env: Env) -> Result<Vec<Symbol>, ProxyError>;
    /// Number of committed upgrades; also the latest record's sequence.
    fn upgrade_count(env: Env) -> u64;
    fn upgrade_record(env: Env, sequence: u64) -> Result<UpgradeRecord, ProxyError>;
    fn layout_version(env: Env) -> u32;
}

#[contractimpl]
impl RootProxyTrait for RootProxyContract {
    fn init(
        env: Env,
        operator: Address,
        stage_plan: Vec<Symbol>,
        initial_impl: Address,
    ) -> Result<(), ProxyError> {
        let store = Storage::new(&env);
        if store.is_initialized() {
            return Err(ProxyError::AlreadyInitialized);
        }
        if stage_plan.is_empty() {
            return Err(ProxyError::EmptyStagePlan);
        }
        if initial_impl == env.current_contract_address() {
            return Err(ProxyError::InvalidTarget);
        }
        let layout = probe_layout_version(&env, &initial_impl)?;
        if layout == 0 {
            return Err(ProxyError::IncompatibleLayout);
        }
        store.init(&operator, &stage_plan, &initial_impl, layout);
        Ok(())
    }

    fn implement(
        env: Env,
        caller: Address,
        next_module: Address,
    ) -> Result<UpgradeRecord, ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        caller.require_auth();
        let current = store.current_impl().ok_or(ProxyError::ImplementationNotSet)?;
        let authorized = match store.authority() {
            UpgradeAuthority::Operator(operator) => caller == operator,
            // Post-hand-off, upgrades come from the governance module itself.
            UpgradeAuthority::Governance => caller == current,
        };
        if !authorized {
            return Err(ProxyError::Unauthorized);
        }
        if next_module == current || next_module == env.current_contract_address() {
            return Err(ProxyError::InvalidTarget);
        }
        let layout = probe_layout_version(&env, &next_module)?;
        if layout == 0 || layout < store.layout_version() {
            return Err(ProxyError::IncompatibleLayout);
        }

        // Commit point. Everything below either all happens or the whole
        // invocation traps and leaves no state change.
        let sequence = store.next_upgrade_seq();
        store.set_implementation(&next_module);
        store.set_layout_version(layout);
        store.advance_stage();
        let record = UpgradeRecord {
            sequence,
            previous_implementation: current,
            new_implementation: next_module.clone(),
            authorizing_principal: caller,
            stage: store.current_stage(),
            at: env.ledger().timestamp(),
        };
        store.record_upgrade(&record);
        Events::emit_upgrade_executed(&env, &record);
        Ok(record)
    }

    fn hand_off_to_governance(env: Env, module: Address) -> Result<(), ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        module.require_auth();
        let current = store.current_impl().ok_or(ProxyError::ImplementationNotSet)?;
        if module != current {
            return Err(ProxyError::Unauthorized);
        }
        if !store.is_terminal_stage() {
            return Err(ProxyError::StageNotTerminal);
        }
        match store.authority() {
            UpgradeAuthority::Operator(_) => {}
            UpgradeAuthority::Governance => return Err(ProxyError::HandOffAlreadyDone),
        }
        store.set_governance_authority();
        Events::emit_governance_hand_off(&env, &module);
        Ok(())
    }

    fn forward(env: Env, func: Symbol, args: Vec<Val>) -> Result<Val, ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        let target = store.current_impl().ok_or(ProxyError::ImplementationNotSet)?;
        let res = env.invoke_contract(&target, &func, args);
        Ok(res)
    }

    fn arena_set(env: Env, module: Address, slot: Symbol, value: Val) -> Result<(), ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        module.require_auth();
        let current = store.current_impl().ok_or(ProxyError::ImplementationNotSet)?;
        if module != current {
            return Err(ProxyError::Unauthorized);
        }
        store.slot_set(&slot, &value);
        Ok(())
    }

    fn arena_get(env: Env, slot: Symbol) -> Result<Val, ProxyError> {
        Storage::new(&env).slot_get(&slot).ok_or(ProxyError::SlotUnset)
    }

    fn arena_has(env: Env, slot: Symbol) -> bool {
        Storage::new(&env).slot_has(&slot)
    }

    fn implementation(env: Env) -> Result<Address, ProxyError> {
        Storage::new(&env).current_impl().ok_or(ProxyError::ImplementationNotSet)
    }

    fn authority(env: Env) -> Result<UpgradeAuthority, ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        Ok(store.authority())
    }

    fn stage(env: Env) -> Result<Symbol, ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        Ok(store.current_stage())
    }

    fn stage_plan(env: Env) -> Result<Vec<Symbol>, ProxyError> {
        let store = Storage::new(&env);
        store.require_initialized()?;
        Ok(store.stage_plan())
    }

    fn upgrade_count(env: Env) -> u64 {
        Storage::new(&env).upgrade_count()
    }

    fn upgrade_record(env: Env, sequence: u64) -> Result<UpgradeRecord, ProxyError> {
        Storage::new(&env).upgrade_record(sequence)
    }

    fn layout_version(env: Env) -> u32 {
        Storage::new(&env).layout_version()
    }
}

/// Ask a candidate module for its layout version through the capability
/// interface. A module that cannot answer cleanly is not a valid target.
fn probe_layout_version(env: &Env, module: &Address) -> Result<u32, ProxyError> {
    match StageModuleClient::new(env, module).try_layout_version() {
        Ok(Ok(version)) => Ok(version),
        _ => Err(ProxyError::InvalidTarget),
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Authority,
    Impl,
    StagePlan,
    StageCursor,
    LayoutVersion,
    UpgradeSeq,
    Record(u64),
    Slot(Symbol),
}
