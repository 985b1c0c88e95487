#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, I256};

use crate::{
    config::{AccrualBasis, RewardFunding},
    pause::PauseScope,
};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub basis: AccrualBasis,
    pub funding: RewardFunding,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a staker exits without rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub forfeited_reward: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the emission rate changes. `acc_reward_per_unit` is the
/// accumulator value the old rate was closed out at.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub old_rate: i128,
    pub new_rate: i128,
    pub acc_reward_per_unit: I256,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensRescuedEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    reward_rate: i128,
    basis: AccrualBasis,
    funding: RewardFunding,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            reward_rate,
            basis,
            funding,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    staker: Address,
    amount: i128,
    forfeited_reward: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), staker.clone()),
        EmergencyWithdrawnEvent {
            staker,
            amount,
            forfeited_reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(
    env: &Env,
    old_rate: i128,
    new_rate: i128,
    acc_reward_per_unit: I256,
) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            old_rate,
            new_rate,
            acc_reward_per_unit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_rescued(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RESCUED"), token.clone()),
        TokensRescuedEvent {
            token,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address, scope: PauseScope) {
    env.events().publish(
        (symbol_short!("PAUSED"), caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_resumed(env: &Env, caller: Address, scope: PauseScope) {
    env.events().publish(
        (symbol_short!("RESUMED"), caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
