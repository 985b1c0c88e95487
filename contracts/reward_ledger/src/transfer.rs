//! Outbound calls to token contracts.
//!
//! Every call uses the fallible `try_*` client form so that a failing or
//! misbehaving token contract surfaces as `TransferFailed` instead of
//! aborting the host. No partial amounts exist: a move either fully succeeds
//! or is treated as not having happened.

use soroban_sdk::{
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::ContractError;

/// Moves `amount` of `token` from `from` to `to`.
pub fn move_asset(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match TokenClient::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Mints `amount` of `token` to `to`. The current contract must be the
/// asset's admin.
pub fn mint_asset(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match StellarAssetClient::new(env, token).try_mint(to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Balance of `holder` in `token`.
pub fn balance_of(env: &Env, token: &Address, holder: &Address) -> Result<i128, ContractError> {
    match TokenClient::new(env, token).try_balance(holder) {
        Ok(Ok(balance)) => Ok(balance),
        _ => Err(ContractError::TransferFailed),
    }
}
