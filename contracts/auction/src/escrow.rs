//! Custody moves between bidders, sellers and the contract.
//!
//! Both helpers go through the `try_` token entry points so a rejected
//! transfer surfaces as [`Error::TransferFailed`] and aborts the whole call.

use crate::errors::Error;
use soroban_sdk::{log, token, Address, Env};

/// Pulls `amount` from `from` into the contract. `from` must have approved
/// the contract as spender beforehand.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    let token_client = token::TokenClient::new(env, token);
    let contract_address = env.current_contract_address();
    match token_client.try_transfer_from(&contract_address, from, &contract_address, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "escrow pull failed", from, amount);
            Err(Error::TransferFailed)
        }
    }
}

/// Sends `amount` held by the contract to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let token_client = token::TokenClient::new(env, token);
    match token_client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "escrow push failed", to, amount);
            Err(Error::TransferFailed)
        }
    }
}

/// Protocol fee on `amount` at `rate` percent, rounded down.
pub fn calculate_fee(amount: i128, rate: u32) -> Result<i128, Error> {
    amount
        .checked_mul(rate as i128)
        .map(|scaled| scaled / 100)
        .ok_or(Error::Overflow)
}
