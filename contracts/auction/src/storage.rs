use crate::errors::Error;
use crate::types::{
    Auction, Bid, Config, DataKey, INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};
use soroban_sdk::{Address, Env, Vec};

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ============================================================================
// CONFIG
// ============================================================================

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// REENTRANCY FLAG
// ============================================================================

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, bool>(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env) {
    env.storage().instance().set(&DataKey::Locked, &true);
}

pub fn clear_locked(env: &Env) {
    env.storage().instance().remove(&DataKey::Locked);
}

// ============================================================================
// AUCTIONS
// ============================================================================

pub fn get_auction_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::AuctionCounter)
        .unwrap_or(0)
}

/// Allocates the next auction id. Ids start at 1 and are never reused.
pub fn next_auction_id(env: &Env) -> Result<u64, Error> {
    let id = get_auction_count(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::AuctionCounter, &id);
    Ok(id)
}

pub fn get_auction(env: &Env, auction_id: u64) -> Option<Auction> {
    let key = DataKey::Auction(auction_id);
    let auction = env.storage().persistent().get::<_, Auction>(&key);
    if auction.is_some() {
        bump(env, &key);
    }
    auction
}

pub fn save_auction(env: &Env, auction: &Auction) {
    let key = DataKey::Auction(auction.id);
    env.storage().persistent().set(&key, auction);
    bump(env, &key);
}

// ============================================================================
// BID HISTORY
// ============================================================================

fn get_count(env: &Env, key: &DataKey) -> u32 {
    env.storage().persistent().get(key).unwrap_or(0)
}

/// Bumps the counter under `key` and returns the index of the new slot.
fn next_slot(env: &Env, key: &DataKey) -> Result<u32, Error> {
    let index = get_count(env, key);
    let count = index.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().persistent().set(key, &count);
    bump(env, key);
    Ok(index)
}

pub fn get_bid_count(env: &Env, auction_id: u64) -> u32 {
    get_count(env, &DataKey::BidCount(auction_id))
}

/// Rebuilds the history from its per-bid entries, oldest first.
pub fn get_bids(env: &Env, auction_id: u64) -> Vec<Bid> {
    let mut history = Vec::new(env);
    for index in 0..get_bid_count(env, auction_id) {
        let bid: Option<Bid> = env
            .storage()
            .persistent()
            .get(&DataKey::Bid(auction_id, index));
        if let Some(bid) = bid {
            history.push_back(bid);
        }
    }
    history
}

/// Appends `bid` under its own key, so the cost of a bid does not grow
/// with the length of the history.
pub fn push_bid(env: &Env, auction_id: u64, bid: &Bid) -> Result<(), Error> {
    let index = next_slot(env, &DataKey::BidCount(auction_id))?;
    let key = DataKey::Bid(auction_id, index);
    env.storage().persistent().set(&key, bid);
    bump(env, &key);
    Ok(())
}

pub fn get_bidder_count(env: &Env, auction_id: u64) -> u32 {
    get_count(env, &DataKey::BidderCount(auction_id))
}

pub fn get_bidder(env: &Env, auction_id: u64, index: u32) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Bidder(auction_id, index))
}

/// Records `bidder` in the distinct-bidder index unless already present.
pub fn add_bidder(env: &Env, auction_id: u64, bidder: &Address) -> Result<(), Error> {
    let seen = DataKey::HasBid(auction_id, bidder.clone());
    if env.storage().persistent().has(&seen) {
        return Ok(());
    }
    env.storage().persistent().set(&seen, &true);
    bump(env, &seen);

    let index = next_slot(env, &DataKey::BidderCount(auction_id))?;
    let key = DataKey::Bidder(auction_id, index);
    env.storage().persistent().set(&key, bidder);
    bump(env, &key);
    Ok(())
}

// ============================================================================
// ESCROW LEDGER
// ============================================================================

/// Amount held for `bidder` on `auction_id`. A missing entry reads as zero.
pub fn get_escrow(env: &Env, auction_id: u64, bidder: &Address) -> i128 {
    let key = DataKey::Escrow(auction_id, bidder.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

/// Writing zero removes the entry, so "absent" and "zero" never diverge.
pub fn set_escrow(env: &Env, auction_id: u64, bidder: &Address, amount: i128) {
    let key = DataKey::Escrow(auction_id, bidder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump(env, &key);
    }
}

/// Zeroes the entry and returns what it held.
pub fn take_escrow(env: &Env, auction_id: u64, bidder: &Address) -> i128 {
    let amount = get_escrow(env, auction_id, bidder);
    if amount != 0 {
        set_escrow(env, auction_id, bidder, 0);
    }
    amount
}
