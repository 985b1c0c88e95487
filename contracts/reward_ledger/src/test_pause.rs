#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{
    pause::{OP_CLAIM, OP_STAKE, OP_WITHDRAW},
    AccrualBasis, ContractError, PauseScope, RewardFunding, RewardLedger, RewardLedgerClient,
};

fn setup() -> (Env, RewardLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(RewardLedger, ());
    let client = RewardLedgerClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &stake_token.address(),
        &reward_token.address(),
        &10,
        &AccrualBasis::Timestamp,
        &RewardFunding::PreFunded,
    );
    StellarAssetClient::new(&env, &reward_token.address()).mint(&contract_id, &1_000_000);

    (env, client, admin, stake_token.address())
}

fn staker_with(env: &Env, client: &RewardLedgerClient, stake_token: &Address, staked: i128) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&staker, &(staked * 2));
    client.stake(&staker, &staked);
    staker
}

#[test]
fn test_global_pause_blocks_ledger_operations() {
    let (env, client, admin, stake_token) = setup();
    let staker = staker_with(&env, &client, &stake_token, 100);

    client.pause(&admin, &PauseScope::Global);

    assert_eq!(client.try_stake(&staker, &10).unwrap_err().unwrap(), ContractError::PoolPaused);
    assert_eq!(client.try_withdraw(&staker, &10).unwrap_err().unwrap(), ContractError::PoolPaused);
    assert_eq!(client.try_claim(&staker).unwrap_err().unwrap(), ContractError::PoolPaused);

    client.resume(&admin, &PauseScope::Global);
    client.stake(&staker, &10);
    assert_eq!(client.get_staked(&staker), 110);
}

#[test]
fn test_granular_pause_blocks_only_that_operation() {
    let (env, client, admin, stake_token) = setup();
    let staker = staker_with(&env, &client, &stake_token, 100);

    client.pause(&admin, &PauseScope::Function(OP_STAKE));
    assert!(client.is_paused(&PauseScope::Function(OP_STAKE)));
    assert!(!client.is_paused(&PauseScope::Global));

    assert_eq!(client.try_stake(&staker, &10).unwrap_err().unwrap(), ContractError::PoolPaused);
    client.withdraw(&staker, &50);

    client.pause(&admin, &PauseScope::Function(OP_WITHDRAW));
    assert_eq!(client.try_withdraw(&staker, &10).unwrap_err().unwrap(), ContractError::PoolPaused);

    env.ledger().set_timestamp(10);
    assert_eq!(client.claim(&staker), 100);

    client.pause(&admin, &PauseScope::Function(OP_CLAIM));
    assert_eq!(client.try_claim(&staker).unwrap_err().unwrap(), ContractError::PoolPaused);
}

#[test]
fn test_accrual_continues_while_paused() {
    let (env, client, admin, stake_token) = setup();
    let staker = staker_with(&env, &client, &stake_token, 100);

    client.pause(&admin, &PauseScope::Global);
    env.ledger().set_timestamp(30);
    assert_eq!(client.pending_reward(&staker), 300);

    client.resume(&admin, &PauseScope::Global);
    assert_eq!(client.claim(&staker), 300);
}

#[test]
fn test_emergency_withdraw_ignores_pause() {
    let (env, client, admin, stake_token) = setup();
    let staker = staker_with(&env, &client, &stake_token, 100);

    client.pause(&admin, &PauseScope::Global);
    env.ledger().set_timestamp(10);

    assert_eq!(client.emergency_withdraw(&staker), 100);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), 200);
    assert_eq!(client.get_total_staked(), 0);
}

#[test]
fn test_stranger_cannot_pause() {
    let (env, client, _admin, _) = setup();
    let stranger = Address::generate(&env);

    assert_eq!(
        client.try_pause(&stranger, &PauseScope::Global).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
    assert!(!client.is_paused(&PauseScope::Global));
}
