#![no_std]

pub mod config;
pub mod events;
pub mod pause;
pub mod pool;
pub mod rewards;
pub mod storage;
pub mod transfer;

use common::admin_tiers::{self, AdminTier};
use common::reentrancy::ReentrancyGuard;
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, I256};

pub use config::{AccrualBasis, PoolConfig, RewardFunding};
pub use pause::PauseScope;
pub use pool::{Account, Pool};

use storage::{ADMIN, PENDING_ADMIN};

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// Zero, negative, or otherwise disallowed amount.
    InvalidAmount = 4,
    /// Withdrawal exceeds the account's stake.
    InsufficientStake = 5,
    /// A token contract call did not succeed.
    TransferFailed = 6,
    /// Nested call into a guarded operation.
    Reentrant = 7,
    PoolPaused = 8,
    TokensIdentical = 9,
    InvalidInput = 10,
    /// Accrual arithmetic left its representable range.
    Overflow = 11,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of a position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_reward: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardLedger;

#[contractimpl]
impl RewardLedger {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `stake_token`  – asset users deposit.
    /// * `reward_token` – asset paid out as reward.
    /// * `reward_rate`  – reward units emitted per clock unit across all
    ///                    stakers.
    /// * `basis`        – whether the clock is seconds or ledgers.
    /// * `funding`      – whether claims are paid from balance or minted.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
        basis: AccrualBasis,
        funding: RewardFunding,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidInput);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        let config = PoolConfig {
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            basis,
            funding,
        };
        let pool = Pool::new(&env, reward_rate, config.now(&env));

        env.storage().instance().set(&ADMIN, &admin);
        storage::set_config(&env, &config);
        storage::set_pool(&env, &pool);
        storage::extend_instance_ttl(&env);

        admin_tiers::set_admin_tier(&env, &admin, AdminTier::SuperAdmin);

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_token,
            reward_rate,
            basis,
            funding,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The account is settled before its stake grows, so the new tokens
    /// earn nothing from accrual that happened before they arrived. Tokens
    /// are pulled before the stake is credited; a failed pull credits
    /// nothing.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        pause::require_not_paused(&env, pause::OP_STAKE)?;
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        let mut account = storage::get_account(&env, &staker);

        // 1. Settle.
        pool.settle_account(&mut account, config.now(&env))?;

        // 2. Credit locally; nothing is stored until the tokens arrive.
        pool.deposit(&mut account, amount)?;

        // 3. Pull tokens.
        transfer::move_asset(
            &env,
            &config.stake_token,
            &staker,
            &env.current_contract_address(),
            amount,
        )?;

        // 4. Commit.
        Self::commit(&env, &staker, &pool, &account);

        events::publish_staked(&env, staker, amount, pool.total_staked);

        Ok(())
    }

    /// Withdraw `amount` of the caller's stake and return the tokens.
    ///
    /// Accrued reward stays banked on the account for a later `claim`.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        pause::require_not_paused(&env, pause::OP_WITHDRAW)?;
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        let mut account = storage::get_account(&env, &staker);

        // 1. Settle.
        pool.settle_account(&mut account, config.now(&env))?;
        let settled = (pool.clone(), account.clone());

        // 2. Reduce stake and commit before any outbound call.
        pool.release(&mut account, amount)?;
        Self::commit(&env, &staker, &pool, &account);

        // 3. Return tokens, undoing step 2 if they cannot be sent.
        if let Err(e) = transfer::move_asset(
            &env,
            &config.stake_token,
            &env.current_contract_address(),
            &staker,
            amount,
        ) {
            Self::commit(&env, &staker, &settled.0, &settled.1);
            return Err(e);
        }

        events::publish_withdrawn(&env, staker, amount, pool.total_staked);

        Ok(())
    }

    /// Withdraw the whole stake and forfeit every unclaimed reward.
    ///
    /// Not subject to pause, and still returns the principal when accrual
    /// can no longer be settled. Returns the amount of stake returned.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        staker.require_auth();
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        let mut account = storage::get_account(&env, &staker);
        let loaded = (pool.clone(), account.clone());

        let (amount, forfeited) = pool.exit(&mut account, config.now(&env))?;
        Self::commit(&env, &staker, &pool, &account);

        if let Err(e) = transfer::move_asset(
            &env,
            &config.stake_token,
            &env.current_contract_address(),
            &staker,
            amount,
        ) {
            Self::commit(&env, &staker, &loaded.0, &loaded.1);
            return Err(e);
        }

        events::publish_emergency_withdrawn(&env, staker, amount, forfeited);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has earned.
    ///
    /// Returns the amount paid. With nothing earned this is a successful
    /// no-op returning 0; the settlement it performed is still kept.
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        staker.require_auth();

        pause::require_not_paused(&env, pause::OP_CLAIM)?;
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        let mut account = storage::get_account(&env, &staker);

        // 1. Settle.
        pool.settle_account(&mut account, config.now(&env))?;
        let settled = (pool.clone(), account.clone());

        // 2. Zero the banked reward and commit.
        let reward = pool.take_reward(&mut account)?;
        Self::commit(&env, &staker, &pool, &account);
        if reward == 0 {
            return Ok(0);
        }

        // 3. Pay out, restoring the banked reward on failure.
        let paid = match config.funding {
            RewardFunding::PreFunded => transfer::move_asset(
                &env,
                &config.reward_token,
                &env.current_contract_address(),
                &staker,
                reward,
            ),
            RewardFunding::Minted => {
                transfer::mint_asset(&env, &config.reward_token, &staker, reward)
            }
        };
        if let Err(e) = paid {
            Self::commit(&env, &staker, &settled.0, &settled.1);
            return Err(e);
        }

        events::publish_reward_claimed(&env, staker, reward);

        Ok(reward)
    }

    /// Top up the reward balance of a pre-funded pool.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if config.funding != RewardFunding::PreFunded {
            return Err(ContractError::InvalidInput);
        }
        let _guard = Self::lock(&env)?;

        transfer::move_asset(
            &env,
            &config.reward_token,
            &funder,
            &env.current_contract_address(),
            amount,
        )?;

        events::publish_rewards_funded(&env, funder, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        storage::get_config(&env)
    }

    /// Pool state as a settlement at the current clock would leave it.
    pub fn get_pool(env: Env) -> Result<Pool, ContractError> {
        let config = storage::get_config(&env)?;
        storage::get_pool(&env)?.settled_at(config.now(&env))
    }

    /// Raw stored account record.
    pub fn get_account(env: Env, staker: Address) -> Account {
        storage::get_account(&env, &staker)
    }

    pub fn get_staked(env: Env, staker: Address) -> i128 {
        storage::get_account(&env, &staker).staked
    }

    /// Reward `staker` would receive if it claimed right now.
    pub fn pending_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        let pool = storage::get_pool(&env)?;
        let account = storage::get_account(&env, &staker);
        pool.pending_reward(&account, config.now(&env))
    }

    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerInfo, ContractError> {
        let config = storage::get_config(&env)?;
        let pool = storage::get_pool(&env)?;
        let account = storage::get_account(&env, &staker);

        Ok(StakerInfo {
            staked: account.staked,
            pending_reward: pool.pending_reward(&account, config.now(&env))?,
        })
    }

    pub fn get_total_staked(env: Env) -> Result<i128, ContractError> {
        Ok(storage::get_pool(&env)?.total_staked)
    }

    pub fn get_reward_rate(env: Env) -> Result<i128, ContractError> {
        Ok(storage::get_pool(&env)?.reward_rate)
    }

    pub fn get_acc_reward_per_unit(env: Env) -> Result<I256, ContractError> {
        Ok(Self::get_pool(env)?.acc_reward_per_unit)
    }

    /// Reward distributed to stakers since genesis, up to now.
    pub fn get_total_emitted(env: Env) -> Result<i128, ContractError> {
        Ok(Self::get_pool(env)?.total_emitted)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        pause::is_paused(&env, &scope)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. The new admin becomes `SuperAdmin`.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);
        admin_tiers::remove_admin_tier(&env, &old_admin);
        admin_tiers::set_admin_tier(&env, &new_admin, AdminTier::SuperAdmin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Update the emission rate.
    ///
    /// The pool is settled at the old rate first, so time already elapsed is
    /// never re-priced. An interval whose emission at the old rate does not
    /// fit an `i128` is closed without emitting. Requires at least
    /// `ContractAdmin`.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        pool.close_out(config.now(&env));

        let old_rate = pool.reward_rate;
        pool.reward_rate = new_rate;
        storage::set_pool(&env, &pool);
        storage::extend_instance_ttl(&env);

        events::publish_reward_rate_set(&env, old_rate, new_rate, pool.acc_reward_per_unit);

        Ok(())
    }

    /// Move tokens the pool does not owe anyone out of the contract.
    ///
    /// Staked principal and, for a pre-funded pool, emitted-but-unclaimed
    /// reward are never rescuable. Requires at least `ContractAdmin`.
    pub fn rescue_tokens(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let _guard = Self::lock(&env)?;

        let mut pool = storage::get_pool(&env)?;
        pool.settle(config.now(&env))?;
        storage::set_pool(&env, &pool);

        let reserved = if token == config.stake_token {
            pool.total_staked
        } else if token == config.reward_token && config.funding == RewardFunding::PreFunded {
            pool.outstanding_reward()
        } else {
            0
        };
        let balance = transfer::balance_of(&env, &token, &env.current_contract_address())?;
        if amount > balance.saturating_sub(reserved) {
            return Err(ContractError::InvalidAmount);
        }

        transfer::move_asset(&env, &token, &env.current_contract_address(), &to, amount)?;

        events::publish_tokens_rescued(&env, token, to, amount);

        Ok(())
    }

    /// Pause `scope`. Requires at least `OperatorAdmin`.
    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::pause(&env, &caller, scope)
    }

    /// Resume `scope`. Requires at least `OperatorAdmin`.
    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::resume(&env, &caller, scope)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Remove every tier from `target`. Only a `SuperAdmin` may call this.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored primary admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert unless `caller` holds at least `min_tier` or is the
    /// primary admin.
    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::require_tier(env, caller, min_tier) {
            return Ok(());
        }
        Self::require_admin(env, caller)
    }

    fn lock(env: &Env) -> Result<ReentrancyGuard, ContractError> {
        ReentrancyGuard::enter(env).ok_or(ContractError::Reentrant)
    }

    fn commit(env: &Env, owner: &Address, pool: &Pool, account: &Account) {
        storage::set_pool(env, pool);
        storage::set_account(env, owner, account);
        storage::extend_instance_ttl(env);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_pause;
