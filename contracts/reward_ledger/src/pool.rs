//! Accrual engine.
//!
//! [`Pool`] is the single global accrual record and [`Account`] the
//! per-participant checkpoint. Both are plain values: the contract loads
//! them, runs the steps below in a fixed order, and stores them back.
//! Nothing here touches storage or tokens.
//!
//! Ordering every mutating operation follows:
//!
//! 1. [`Pool::settle`] or [`Pool::settle_account`] at the current clock value
//! 2. the stake or reward mutation
//! 3. the external transfer (performed by the caller)

use soroban_sdk::{contracttype, Env, I256};

use crate::{rewards, ContractError};

/// Global accrual state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Sum of every account's `staked`.
    pub total_staked: i128,
    /// Reward earned per staked unit since genesis, scaled by `SCALE`.
    pub acc_reward_per_unit: I256,
    /// Clock value `acc_reward_per_unit` was last advanced to.
    pub last_settlement: u64,
    /// Reward units emitted per clock unit while the pool is non-empty.
    pub reward_rate: i128,
    /// Reward distributed into `acc_reward_per_unit` since genesis.
    pub total_emitted: i128,
    /// Reward paid out to accounts since genesis.
    pub total_claimed: i128,
}

/// Per-participant accrual state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub staked: i128,
    /// `acc_reward_per_unit` as of this account's last settlement.
    pub checkpoint: I256,
    /// Reward banked but not yet paid out.
    pub settled_reward: i128,
}

impl Account {
    /// An account that never interacted.
    pub fn new(env: &Env) -> Self {
        Self {
            staked: 0,
            checkpoint: rewards::zero(env),
            settled_reward: 0,
        }
    }

    /// Holds neither stake nor reward. Such an account is equivalent to an
    /// absent one whatever its checkpoint.
    pub fn is_empty(&self) -> bool {
        self.staked == 0 && self.settled_reward == 0
    }

    /// Entitlement of this account against the given accumulator value.
    pub fn earned(&self, acc_reward_per_unit: &I256) -> Result<i128, ContractError> {
        rewards::earned(
            self.staked,
            acc_reward_per_unit,
            &self.checkpoint,
            self.settled_reward,
        )
        .ok_or(ContractError::Overflow)
    }
}

impl Pool {
    pub fn new(env: &Env, reward_rate: i128, now: u64) -> Self {
        Self {
            total_staked: 0,
            acc_reward_per_unit: rewards::zero(env),
            last_settlement: now,
            reward_rate,
            total_emitted: 0,
            total_claimed: 0,
        }
    }

    /// Whether accrual is currently running.
    pub fn is_active(&self) -> bool {
        self.total_staked > 0
    }

    /// Advances the accumulator to `now`.
    ///
    /// An empty pool only moves `last_settlement`; the idle interval emits
    /// nothing. A second call at the same `now` is a no-op. On error the pool
    /// is left untouched.
    pub fn settle(&mut self, now: u64) -> Result<(), ContractError> {
        if now <= self.last_settlement {
            return Ok(());
        }
        let elapsed = now - self.last_settlement;

        if self.is_active() {
            let reward =
                rewards::emission(self.reward_rate, elapsed).ok_or(ContractError::Overflow)?;
            let delta = rewards::reward_per_unit_delta(
                self.acc_reward_per_unit.env(),
                reward,
                self.total_staked,
            );
            let acc = rewards::accumulate(&self.acc_reward_per_unit, &delta)
                .ok_or(ContractError::Overflow)?;
            let emitted = self
                .total_emitted
                .checked_add(reward)
                .ok_or(ContractError::Overflow)?;

            self.acc_reward_per_unit = acc;
            self.total_emitted = emitted;
        }

        self.last_settlement = now;
        Ok(())
    }

    /// Settles up to `now` ahead of a rate change.
    ///
    /// An interval whose emission cannot be represented is closed without
    /// emitting anything, so a runaway rate can always be corrected. Returns
    /// `false` when that happened.
    pub fn close_out(&mut self, now: u64) -> bool {
        if self.settle(now).is_ok() {
            return true;
        }
        self.last_settlement = now;
        false
    }

    /// Settles the pool, then banks everything `account` earned since its
    /// checkpoint and moves the checkpoint up to the current accumulator.
    pub fn settle_account(&mut self, account: &mut Account, now: u64) -> Result<(), ContractError> {
        self.settle(now)?;
        account.settled_reward = account.earned(&self.acc_reward_per_unit)?;
        account.checkpoint = self.acc_reward_per_unit.clone();
        Ok(())
    }

    /// The pool as a settlement at `now` would leave it, without mutating
    /// `self`.
    pub fn settled_at(&self, now: u64) -> Result<Pool, ContractError> {
        let mut pool = self.clone();
        pool.settle(now)?;
        Ok(pool)
    }

    /// Current entitlement of `account` as of `now`, as a real settlement
    /// would compute it.
    pub fn pending_reward(&self, account: &Account, now: u64) -> Result<i128, ContractError> {
        let pool = self.settled_at(now)?;
        account.earned(&pool.acc_reward_per_unit)
    }

    /// Adds `amount` to a settled account's stake.
    pub fn deposit(&mut self, account: &mut Account, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        let staked = account
            .staked
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        self.total_staked = total;
        account.staked = staked;
        Ok(())
    }

    /// Removes `amount` from a settled account's stake.
    pub fn release(&mut self, account: &mut Account, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount > account.staked {
            return Err(ContractError::InsufficientStake);
        }

        self.total_staked -= amount;
        account.staked -= amount;
        Ok(())
    }

    /// Zeroes a settled account's banked reward and returns it for payout.
    pub fn take_reward(&mut self, account: &mut Account) -> Result<i128, ContractError> {
        let reward = account.settled_reward;
        if reward <= 0 {
            return Ok(0);
        }
        let claimed = self
            .total_claimed
            .checked_add(reward)
            .ok_or(ContractError::Overflow)?;

        self.total_claimed = claimed;
        account.settled_reward = 0;
        Ok(reward)
    }

    /// Zeroes a settled account's banked reward without paying it. The
    /// forfeited amount stays counted in `total_emitted`.
    pub fn forfeit(&mut self, account: &mut Account) -> i128 {
        let forfeited = account.settled_reward;
        account.settled_reward = 0;
        forfeited
    }

    /// Releases the whole stake of `account` and forfeits its reward.
    ///
    /// Never fails on overflow. When the pool cannot be settled, the
    /// unsettled interval stays with whoever remains staked; when only the
    /// account's own entitlement is unrepresentable, that entitlement is
    /// dropped. Returns the stake released and the reward forfeited.
    pub fn exit(&mut self, account: &mut Account, now: u64) -> Result<(i128, i128), ContractError> {
        let amount = account.staked;
        if amount <= 0 {
            return Err(ContractError::InsufficientStake);
        }
        if self.settle_account(account, now).is_err() {
            account.checkpoint = self.acc_reward_per_unit.clone();
        }

        let forfeited = self.forfeit(account);
        self.release(account, amount)?;
        Ok((amount, forfeited))
    }

    /// Reward emitted but not yet paid out. Upper bound on what accounts can
    /// still claim.
    pub fn outstanding_reward(&self) -> i128 {
        self.total_emitted.saturating_sub(self.total_claimed)
    }
}
