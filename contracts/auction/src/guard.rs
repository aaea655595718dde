//! Mutual exclusion for entry points that move funds.
//!
//! The token collaborator runs foreign code during `transfer` and
//! `transfer_from`, and that code may call back into this contract before the
//! outer call has finished. Every fund-moving entry point holds a
//! [`ReentrancyLock`] for its whole body; a nested entry fails with
//! [`Error::Reentrant`].

use crate::errors::Error;
use crate::storage;
use soroban_sdk::{log, Env};

/// Scope guard over the contract-wide lock flag. Dropping it releases the
/// lock, so early returns through `?` cannot leave the contract locked.
pub struct ReentrancyLock {
    env: Env,
}

impl ReentrancyLock {
    pub fn acquire(env: &Env) -> Result<Self, Error> {
        if storage::is_locked(env) {
            log!(env, "rejected reentrant call");
            return Err(Error::Reentrant);
        }
        storage::set_locked(env);
        Ok(Self { env: env.clone() })
    }
}

impl Drop for ReentrancyLock {
    fn drop(&mut self) {
        storage::clear_locked(&self.env);
    }
}
