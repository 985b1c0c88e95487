use soroban_sdk::{contracttype, Address, Env};

/// Clock the pool accrues against.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AccrualBasis {
    /// `reward_rate` is per second of ledger close time.
    Timestamp = 0,
    /// `reward_rate` is per ledger (block).
    LedgerSequence = 1,
}

/// Where claimed rewards come from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardFunding {
    /// Paid from the contract's own reward-token balance.
    PreFunded = 0,
    /// Minted on claim; the contract must be the reward asset's admin.
    Minted = 1,
}

/// Immutable pool configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub stake_token: Address,
    pub reward_token: Address,
    pub basis: AccrualBasis,
    pub funding: RewardFunding,
}

impl PoolConfig {
    /// Current value of the configured clock.
    pub fn now(&self, env: &Env) -> u64 {
        match self.basis {
            AccrualBasis::Timestamp => env.ledger().timestamp(),
            AccrualBasis::LedgerSequence => u64::from(env.ledger().sequence()),
        }
    }
}
