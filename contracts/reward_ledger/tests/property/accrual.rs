//! Accrual arithmetic observed through the contract.

use proptest::prelude::*;
use reward_ledger::rewards::SCALE;

use crate::fixture::{fixture, minted_fixture};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A lone staker receives the full emission, minus at most one unit of
    /// truncation.
    #[test]
    fn prop_sole_staker_gets_whole_emission(
        rate in 0i128..1_000,
        amount in 1i128..1_000_000,
        elapsed in 0u64..10_000,
    ) {
        let f = fixture(rate, 1, amount);
        let a = &f.stakers[0];

        f.client.stake(a, &amount);
        f.advance(elapsed);

        let emitted = rate * i128::from(elapsed);
        let pending = f.client.pending_reward(a);
        prop_assert!(pending <= emitted);
        prop_assert!(emitted - pending <= 1);
    }

    /// Two stakers staking at the same instant split emission by stake
    /// weight, never exceeding what was emitted.
    #[test]
    fn prop_two_stakers_split_by_weight(
        rate in 1i128..1_000,
        a_amount in 1i128..100_000,
        b_amount in 1i128..100_000,
        elapsed in 1u64..5_000,
    ) {
        let f = fixture(rate, 2, 100_000);
        let (a, b) = (&f.stakers[0], &f.stakers[1]);

        f.client.stake(a, &a_amount);
        f.client.stake(b, &b_amount);
        f.advance(elapsed);

        let emitted = rate * i128::from(elapsed);
        let pa = f.client.pending_reward(a);
        let pb = f.client.pending_reward(b);

        prop_assert!(pa + pb <= emitted);
        prop_assert!(emitted - (pa + pb) <= 2);

        let exact_a = emitted * a_amount / (a_amount + b_amount);
        prop_assert!((pa - exact_a).abs() <= 1);
    }

    /// Splitting an interval with an extra settlement does not change what
    /// a staker ends up with beyond truncation.
    #[test]
    fn prop_intermediate_settlement_is_neutral(
        rate in 1i128..1_000,
        amount in 1i128..100_000,
        first in 0u64..1_000,
        second in 0u64..1_000,
    ) {
        let f = fixture(rate, 2, 100_000);
        let (a, b) = (&f.stakers[0], &f.stakers[1]);

        f.client.stake(a, &amount);
        f.client.stake(b, &amount);
        f.advance(first);
        // Settles `a` mid-way; `b` is left lazy.
        f.client.claim(a);
        f.advance(second);

        let claimed_a = f.client.get_pool().total_claimed;
        let total_a = claimed_a + f.client.pending_reward(a);
        let total_b = f.client.pending_reward(b);
        prop_assert!((total_a - total_b).abs() <= 2);
    }

    /// 18-decimal rates over stakes from a single base unit up to millions
    /// of tokens, left idle for up to eleven days, still settle and exit.
    #[test]
    fn prop_token_scale_rates_keep_settling(
        rate in SCALE / 1_000..SCALE * 1_000,
        amount in 1i128..1_000_000 * SCALE,
        idle in 0u64..1_000_000,
    ) {
        let f = minted_fixture(rate, 1, amount);
        let a = &f.stakers[0];

        f.client.stake(a, &amount);
        f.advance(idle);

        // Truncating the per-unit share loses under one unit per SCALE staked.
        let emitted = rate * i128::from(idle);
        let pending = f.client.pending_reward(a);
        prop_assert!(pending <= emitted);
        prop_assert!(emitted - pending <= amount / SCALE + 1);

        prop_assert_eq!(f.client.claim(a), pending);
        prop_assert_eq!(f.client.emergency_withdraw(a), amount);
        prop_assert_eq!(f.client.get_total_staked(), 0);
    }
}
