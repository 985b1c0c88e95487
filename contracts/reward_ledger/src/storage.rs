use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{
    config::PoolConfig,
    pool::{Account, Pool},
    ContractError,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// Per-account persistent storage uses tuple keys: (prefix, address)
const ACCOUNT: Symbol = symbol_short!("ACCT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Instance records ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&POOL, pool);
}

pub fn get_pool(env: &Env) -> Result<Pool, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Accounts ─────────────────────────────────────────────────────────────────

fn account_key(owner: &Address) -> (Symbol, Address) {
    (ACCOUNT, owner.clone())
}

/// Loads `owner`'s account, or the empty account if none is stored.
pub fn get_account(env: &Env, owner: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&account_key(owner))
        .unwrap_or_else(|| Account::new(env))
}

/// Stores `account`; an empty account is removed rather than kept as a
/// zero record.
pub fn set_account(env: &Env, owner: &Address, account: &Account) {
    let key = account_key(owner);
    if account.is_empty() {
        if env.storage().persistent().has(&key) {
            env.storage().persistent().remove(&key);
        }
        return;
    }
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

#[cfg(test)]
pub fn has_account(env: &Env, owner: &Address) -> bool {
    env.storage().persistent().has(&account_key(owner))
}
