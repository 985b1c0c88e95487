#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use reward_ledger::{
    rewards::SCALE, AccrualBasis, RewardFunding, RewardLedger, RewardLedgerClient,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u32 },
    Withdraw { who: u8, amount: u32 },
    Claim { who: u8 },
    EmergencyWithdraw { who: u8 },
    Advance { secs: u16 },
    /// `token_scale` multiplies the rate up to whole 18-decimal tokens.
    SetRate { rate: u16, token_scale: bool },
}

const STAKERS: usize = 5;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(RewardLedger, ());
    let client = RewardLedgerClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &stake_token,
        &reward_token,
        &1_000i128,
        &AccrualBasis::Timestamp,
        &RewardFunding::PreFunded,
    );
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::from(i64::MAX));

    let users: Vec<Address> = (0..STAKERS)
        .map(|_| {
            let user = Address::generate(&env);
            StellarAssetClient::new(&env, &stake_token).mint(&user, &i128::from(u32::MAX));
            user
        })
        .collect();
    let user = |who: u8| &users[who as usize % STAKERS];

    // Rejections are expected; panics and broken invariants are not.
    for action in actions {
        match action {
            FuzzAction::Stake { who, amount } => {
                let _ = client.try_stake(user(who), &i128::from(amount));
            }
            FuzzAction::Withdraw { who, amount } => {
                let _ = client.try_withdraw(user(who), &i128::from(amount));
            }
            FuzzAction::Claim { who } => {
                let _ = client.try_claim(user(who));
            }
            FuzzAction::EmergencyWithdraw { who } => {
                let staked = client.get_staked(user(who));
                let result = client.try_emergency_withdraw(user(who));
                if staked > 0 {
                    assert!(matches!(result, Ok(Ok(returned)) if returned == staked));
                }
            }
            FuzzAction::Advance { secs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(secs));
            }
            FuzzAction::SetRate { rate, token_scale } => {
                let rate = if token_scale {
                    i128::from(rate) * SCALE
                } else {
                    i128::from(rate)
                };
                client.set_reward_rate(&admin, &rate);
            }
        }

        let staked: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(staked, client.get_total_staked());

        let pool = client.get_pool();
        let pending: i128 = users.iter().map(|u| client.pending_reward(u)).sum();
        assert!(pending + pool.total_claimed <= pool.total_emitted);
    }
});
