//! Fixed-point reward arithmetic.
//!
//! Token amounts are `i128`. The accumulated reward per unit carries the
//! `SCALE` factor on top of a per-unit share, which outgrows `i128` within
//! minutes at 18-decimal rates over a thin pool, so it lives in an `I256`.
//!
//! Every function here is checked: `None` means a result does not fit its
//! type, and callers surface that as `ContractError::Overflow` rather than
//! clamping, so no reward is ever silently lost or invented.

use soroban_sdk::{Env, I256};

/// Fixed-point scaling factor applied to the accumulated reward per unit.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

fn acc_max(env: &Env) -> I256 {
    I256::from_parts(env, i64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

pub fn zero(env: &Env) -> I256 {
    I256::from_i32(env, 0)
}

/// Reward emitted by the pool over `elapsed` clock units at `rate`.
pub fn emission(rate: i128, elapsed: u64) -> Option<i128> {
    rate.checked_mul(i128::from(elapsed))
}

/// Increase of the accumulated reward per staked unit when `reward` is spread
/// over `total_staked` units.
///
/// ```text
/// Δacc = reward × SCALE / total_staked
/// ```
///
/// An empty pool gets no increase; that reward is never emitted. Any `i128`
/// reward times `SCALE` fits in 256 bits, so this cannot overflow.
pub fn reward_per_unit_delta(env: &Env, reward: i128, total_staked: i128) -> I256 {
    if total_staked <= 0 || reward <= 0 {
        return zero(env);
    }
    I256::from_i128(env, reward)
        .mul(&I256::from_i128(env, SCALE))
        .div(&I256::from_i128(env, total_staked))
}

/// `acc + delta` for non-negative operands.
pub fn accumulate(acc: &I256, delta: &I256) -> Option<I256> {
    let headroom = acc_max(acc.env()).sub(acc);
    if *delta > headroom {
        return None;
    }
    Some(acc.add(delta))
}

/// Total entitlement of a position.
///
/// ```text
/// earned = staked × (acc − checkpoint) / SCALE + settled
/// ```
///
/// Only accumulation after `checkpoint` counts, so reward banked at an
/// earlier settlement is never counted twice. `checkpoint <= acc`.
pub fn earned(staked: i128, acc: &I256, checkpoint: &I256, settled: i128) -> Option<i128> {
    if staked <= 0 {
        return Some(settled);
    }
    let env = acc.env();
    let since = acc.sub(checkpoint);
    let staked = I256::from_i128(env, staked);
    if since > acc_max(env).div(&staked) {
        return None;
    }
    let fresh = since
        .mul(&staked)
        .div(&I256::from_i128(env, SCALE))
        .to_i128()?;
    settled.checked_add(fresh)
}
