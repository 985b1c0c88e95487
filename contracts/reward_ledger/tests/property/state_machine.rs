//! Random operation sequences against the ledger, checking the pool
//! invariants after every step.

use proptest::prelude::*;
use soroban_sdk::{token::Client as TokenClient, I256};

use crate::fixture::{fixture, Fixture};

const STAKERS: usize = 4;
const BALANCE: i128 = 1_000_000;

#[derive(Clone, Debug)]
enum Op {
    Stake { who: usize, amount: i128 },
    Withdraw { who: usize, amount: i128 },
    Claim { who: usize },
    EmergencyWithdraw { who: usize },
    Advance { by: u64 },
    SetRate { rate: i128 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..STAKERS, 1i128..5_000).prop_map(|(who, amount)| Op::Stake { who, amount }),
        3 => (0..STAKERS, 1i128..5_000).prop_map(|(who, amount)| Op::Withdraw { who, amount }),
        2 => (0..STAKERS).prop_map(|who| Op::Claim { who }),
        1 => (0..STAKERS).prop_map(|who| Op::EmergencyWithdraw { who }),
        4 => (0u64..200).prop_map(|by| Op::Advance { by }),
        1 => (0i128..500).prop_map(|rate| Op::SetRate { rate }),
    ]
}

fn apply(f: &Fixture, op: &Op) {
    match *op {
        Op::Stake { who, amount } => {
            let _ = f.client.try_stake(&f.stakers[who], &amount);
        }
        Op::Withdraw { who, amount } => {
            let _ = f.client.try_withdraw(&f.stakers[who], &amount);
        }
        Op::Claim { who } => {
            let _ = f.client.try_claim(&f.stakers[who]);
        }
        Op::EmergencyWithdraw { who } => {
            let _ = f.client.try_emergency_withdraw(&f.stakers[who]);
        }
        Op::Advance { by } => f.advance(by),
        Op::SetRate { rate } => f.client.set_reward_rate(&f.admin, &rate),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_pool_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
        let f = fixture(10, STAKERS, BALANCE);
        let stake_token = TokenClient::new(&f.env, &f.stake_token);
        let mut last_acc = I256::from_i32(&f.env, 0);

        for op in &ops {
            apply(&f, op);

            // Σ staked equals the pool total and the custodied balance.
            let sum: i128 = f.stakers.iter().map(|s| f.client.get_staked(s)).sum();
            let total = f.client.get_total_staked();
            prop_assert_eq!(sum, total);
            prop_assert_eq!(stake_token.balance(&f.client.address), total);

            // Accumulator never decreases.
            let acc = f.client.get_acc_reward_per_unit();
            prop_assert!(acc >= last_acc, "accumulator went back: {:?} < {:?}", acc, last_acc);
            last_acc = acc;

            // No reward is fabricated.
            let pool = f.client.get_pool();
            let pending: i128 = f.stakers.iter().map(|s| f.client.pending_reward(s)).sum();
            prop_assert!(pending + pool.total_claimed <= pool.total_emitted);

            // Viewing settlement twice at one instant changes nothing.
            prop_assert_eq!(f.client.get_pool(), pool);
        }
    }

    /// A rejected withdrawal leaves every record untouched.
    #[test]
    fn prop_oversized_withdraw_is_atomic(
        staked in 1i128..10_000,
        excess in 1i128..10_000,
        elapsed in 0u64..1_000,
    ) {
        let f = fixture(10, 1, BALANCE);
        let a = &f.stakers[0];

        f.client.stake(a, &staked);
        f.advance(elapsed);

        let account = f.client.get_account(a);
        let pool = f.client.get_pool();

        prop_assert!(f.client.try_withdraw(a, &(staked + excess)).is_err());
        prop_assert_eq!(f.client.get_account(a), account);
        prop_assert_eq!(f.client.get_pool(), pool);
    }
}
