use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

// ── Types ────────────────────────────────────────────────────────────────────

/// What a pause applies to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Every gated operation.
    Global,
    /// A single operation, named by one of the `OP_*` symbols.
    Function(Symbol),
}

pub const OP_STAKE: Symbol = symbol_short!("STAKE");
pub const OP_WITHDRAW: Symbol = symbol_short!("WITHDRAW");
pub const OP_CLAIM: Symbol = symbol_short!("CLAIM");

// ── Storage keys ─────────────────────────────────────────────────────────────

fn global_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_key(op: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), op.clone())
}

// ── Checks ───────────────────────────────────────────────────────────────────

pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env.storage().instance().get(&global_key()).unwrap_or(false),
        PauseScope::Function(op) => env
            .storage()
            .instance()
            .get(&function_key(op))
            .unwrap_or(false),
    }
}

/// Fails with `PoolPaused` if `op` or the whole pool is paused.
pub fn require_not_paused(env: &Env, op: Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global) || is_paused(env, &PauseScope::Function(op)) {
        return Err(ContractError::PoolPaused);
    }
    Ok(())
}

// ── Switches ─────────────────────────────────────────────────────────────────

/// Engages the breaker for `scope`. Requires at least `OperatorAdmin`.
pub fn pause(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    set_paused(env, caller, &scope, true)?;
    events::publish_paused(env, caller.clone(), scope);
    Ok(())
}

/// Releases the breaker for `scope`. Requires at least `OperatorAdmin`.
pub fn resume(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    set_paused(env, caller, &scope, false)?;
    events::publish_resumed(env, caller.clone(), scope);
    Ok(())
}

fn set_paused(
    env: &Env,
    caller: &Address,
    scope: &PauseScope,
    paused: bool,
) -> Result<(), ContractError> {
    if !admin_tiers::require_tier(env, caller, &AdminTier::OperatorAdmin) {
        return Err(ContractError::Unauthorized);
    }

    match scope {
        PauseScope::Global => env.storage().instance().set(&global_key(), &paused),
        PauseScope::Function(op) => env.storage().instance().set(&function_key(op), &paused),
    }
    Ok(())
}
