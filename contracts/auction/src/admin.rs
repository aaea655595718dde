use crate::errors::Error;
use crate::storage;
use crate::types::Config;
use soroban_sdk::{Address, Env};

/// Checks that `caller` is the stored operator and has signed the call.
/// Returns the current config so the caller can update it in place.
pub fn require_admin(env: &Env, caller: &Address) -> Result<Config, Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if config.admin != *caller {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}
