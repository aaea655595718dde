#![no_std]

mod admin;
mod errors;
mod escrow;
mod events;
mod guard;
mod storage;
mod types;

pub use errors::Error;
pub use types::{Auction, AuctionStatus, Bid, Config, MAX_FEE, MIN_DURATION};

use events::{
    AuctionCancelledEventData, AuctionCreatedEventData, AuctionWithdrawnEventData,
    BidAcceptedEventData, FeeRateUpdatedEventData, InitializedEventData, RefundClaimedEventData,
};
use guard::ReentrancyLock;
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

/// Single-token English auction with escrowed bids.
///
/// Bidders lock funds with the contract for as long as they may still win.
/// An outbid bidder reclaims their escrow through `claim_refund`; the seller
/// collects the winning bid, less the protocol fee, through `withdraw` once
/// the auction has expired.
#[contract]
pub struct AuctionEscrow;

#[contractimpl]
impl AuctionEscrow {
    // ========================================================================
    // INITIALIZATION & CONFIGURATION
    // ========================================================================

    /// Binds the contract to its operator, its token and the initial fee.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If called more than once
    /// * `Error::FeeTooHigh` - If `fee_rate` exceeds `MAX_FEE`
    pub fn initialize(env: Env, admin: Address, token: Address, fee_rate: u32) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        if fee_rate > MAX_FEE {
            return Err(Error::FeeTooHigh);
        }

        let config = Config {
            admin: admin.clone(),
            token: token.clone(),
            fee_rate,
            accrued_fees: 0,
            updated_at: env.ledger().timestamp(),
        };
        storage::set_config(&env, &config);
        storage::extend_instance_ttl(&env);

        InitializedEventData {
            admin,
            token,
            fee_rate,
        }
        .publish(&env);

        Ok(())
    }

    /// Update the protocol fee (operator only). Applies to future withdrawals.
    pub fn set_fee_rate(env: Env, admin: Address, new_rate: u32) -> Result<(), Error> {
        let mut config = admin::require_admin(&env, &admin)?;

        if new_rate > MAX_FEE {
            return Err(Error::FeeTooHigh);
        }

        config.fee_rate = new_rate;
        config.updated_at = env.ledger().timestamp();
        storage::set_config(&env, &config);
        storage::extend_instance_ttl(&env);

        FeeRateUpdatedEventData { admin, new_rate }.publish(&env);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    pub fn get_fee_rate(env: Env) -> Result<u32, Error> {
        Ok(storage::get_config(&env)?.fee_rate)
    }

    /// Fees withheld from seller proceeds and still held by the contract.
    pub fn get_accrued_fees(env: Env) -> Result<i128, Error> {
        Ok(storage::get_config(&env)?.accrued_fees)
    }

    // ========================================================================
    // AUCTION LIFECYCLE
    // ========================================================================

    /// List a new auction. No funds move.
    ///
    /// # Errors
    /// * `Error::InvalidStartingPrice` - If `starting_price` is not positive
    /// * `Error::DurationTooShort` - If `duration` is under `MIN_DURATION`
    pub fn create_auction(
        env: Env,
        seller: Address,
        name: String,
        description: String,
        starting_price: i128,
        duration: u64,
    ) -> Result<u64, Error> {
        seller.require_auth();
        storage::get_config(&env)?;

        if starting_price <= 0 {
            return Err(Error::InvalidStartingPrice);
        }

        if duration < MIN_DURATION {
            return Err(Error::DurationTooShort);
        }

        let started_at = env.ledger().timestamp();
        let id = storage::next_auction_id(&env)?;

        let auction = Auction {
            id,
            seller: seller.clone(),
            name,
            description,
            starting_price,
            current_price: 0,
            current_winner: None,
            started_at,
            duration,
            status: AuctionStatus::Open,
        };
        storage::save_auction(&env, &auction);
        storage::extend_instance_ttl(&env);

        AuctionCreatedEventData {
            id,
            seller,
            starting_price,
            duration,
            started_at,
        }
        .publish(&env);

        Ok(id)
    }

    /// Escrow `amount` from `bidder` as the new highest bid.
    ///
    /// A bidder raising their own bid gets their previous escrow back before
    /// the new amount is collected. Other outbid bidders keep their escrow
    /// until they call `claim_refund`.
    ///
    /// # Errors
    /// * `Error::NotFound`, `Error::AlreadyFinalized`, `Error::AlreadyEnded`
    /// * `Error::BidTooLow` - If `amount` does not exceed the current price
    /// * `Error::BelowStartingPrice` - If `amount` is under the starting price
    /// * `Error::TransferFailed` - If the token refuses either transfer
    pub fn place_bid(env: Env, auction_id: u64, bidder: Address, amount: i128) -> Result<(), Error> {
        bidder.require_auth();
        let _guard = ReentrancyLock::acquire(&env)?;

        let config = storage::get_config(&env)?;
        let mut auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;
        let now = env.ledger().timestamp();

        if auction.status != AuctionStatus::Open {
            return Err(Error::AlreadyFinalized);
        }

        if auction.is_ended(now) {
            return Err(Error::AlreadyEnded);
        }

        if amount <= auction.current_price {
            return Err(Error::BidTooLow);
        }

        if amount < auction.starting_price {
            return Err(Error::BelowStartingPrice);
        }

        // Return a stale balance before collecting, so the bidder is never
        // escrowed twice on the same auction.
        let stale = storage::take_escrow(&env, auction_id, &bidder);
        if stale > 0 {
            escrow::push(&env, &config.token, &bidder, stale)?;
        }

        storage::push_bid(
            &env,
            auction_id,
            &Bid {
                bidder: bidder.clone(),
                amount,
                timestamp: now,
            },
        )?;
        storage::add_bidder(&env, auction_id, &bidder)?;
        auction.current_winner = Some(bidder.clone());
        auction.current_price = amount;
        storage::save_auction(&env, &auction);

        escrow::pull(&env, &config.token, &bidder, amount)?;
        storage::set_escrow(&env, auction_id, &bidder, amount);
        storage::extend_instance_ttl(&env);

        BidAcceptedEventData {
            auction_id,
            bidder,
            amount,
            timestamp: now,
        }
        .publish(&env);

        Ok(())
    }

    /// Cancel an auction before it expires, returning every escrowed bid.
    ///
    /// # Errors
    /// * `Error::NotSeller` - If `seller` did not create the auction
    /// * `Error::AlreadyFinalized` - If already cancelled or withdrawn
    /// * `Error::AlreadyEnded` - If the auction has expired
    pub fn cancel_auction(env: Env, auction_id: u64, seller: Address) -> Result<(), Error> {
        seller.require_auth();
        let _guard = ReentrancyLock::acquire(&env)?;

        let config = storage::get_config(&env)?;
        let mut auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;
        let now = env.ledger().timestamp();

        if auction.seller != seller {
            return Err(Error::NotSeller);
        }

        // Status first: a cancelled auction stays cancelled however much
        // time has passed.
        if auction.status != AuctionStatus::Open {
            return Err(Error::AlreadyFinalized);
        }

        if auction.is_ended(now) {
            return Err(Error::AlreadyEnded);
        }

        let mut refunds: Vec<(Address, i128)> = Vec::new(&env);
        for index in 0..storage::get_bidder_count(&env, auction_id) {
            let Some(bidder) = storage::get_bidder(&env, auction_id, index) else {
                continue;
            };
            let held = storage::take_escrow(&env, auction_id, &bidder);
            if held > 0 {
                refunds.push_back((bidder, held));
            }
        }

        auction.status = AuctionStatus::Cancelled;
        storage::save_auction(&env, &auction);
        storage::extend_instance_ttl(&env);

        for (bidder, held) in refunds.iter() {
            escrow::push(&env, &config.token, &bidder, held)?;
        }

        log!(&env, "auction cancelled", auction_id, refunds.len());
        AuctionCancelledEventData {
            auction_id,
            timestamp: now,
        }
        .publish(&env);

        Ok(())
    }

    /// Return an outbid bidder's escrow.
    ///
    /// Allowed at any time, including after expiry and after the seller has
    /// withdrawn, since this is the only path by which a losing bidder
    /// recovers funds.
    ///
    /// # Errors
    /// * `Error::WinnerCannotRefund` - If `bidder` holds the winning bid
    /// * `Error::NothingToRefund` - If nothing is escrowed for `bidder`
    pub fn claim_refund(env: Env, auction_id: u64, bidder: Address) -> Result<(), Error> {
        bidder.require_auth();
        let _guard = ReentrancyLock::acquire(&env)?;

        let config = storage::get_config(&env)?;
        let auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;

        if auction.is_winner(&bidder) {
            return Err(Error::WinnerCannotRefund);
        }

        let held = storage::get_escrow(&env, auction_id, &bidder);
        if held <= 0 {
            return Err(Error::NothingToRefund);
        }

        storage::set_escrow(&env, auction_id, &bidder, 0);
        storage::extend_instance_ttl(&env);
        escrow::push(&env, &config.token, &bidder, held)?;

        log!(&env, "refund claimed", auction_id, held);
        RefundClaimedEventData {
            auction_id,
            bidder,
            amount: held,
        }
        .publish(&env);

        Ok(())
    }

    /// Pay the winning bid, minus the protocol fee, to the seller.
    ///
    /// The fee stays with the contract and is tracked in `accrued_fees`.
    /// An auction that drew no bids is finalized without a transfer.
    ///
    /// # Errors
    /// * `Error::NotSeller` - If `seller` did not create the auction
    /// * `Error::AlreadyFinalized` - If already cancelled or withdrawn
    /// * `Error::AuctionStillOpen` - If the auction has not expired yet
    pub fn withdraw(env: Env, auction_id: u64, seller: Address) -> Result<(), Error> {
        seller.require_auth();
        let _guard = ReentrancyLock::acquire(&env)?;

        let mut config = storage::get_config(&env)?;
        let mut auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;
        let now = env.ledger().timestamp();

        if auction.seller != seller {
            return Err(Error::NotSeller);
        }

        if auction.status != AuctionStatus::Open {
            return Err(Error::AlreadyFinalized);
        }

        if !auction.is_ended(now) {
            return Err(Error::AuctionStillOpen);
        }

        let fee = escrow::calculate_fee(auction.current_price, config.fee_rate)?;
        let proceeds = auction
            .current_price
            .checked_sub(fee)
            .ok_or(Error::Overflow)?;

        // The winner's escrow is consumed by the payout.
        if let Some(winner) = &auction.current_winner {
            storage::set_escrow(&env, auction_id, winner, 0);
        }

        config.accrued_fees = config.accrued_fees.checked_add(fee).ok_or(Error::Overflow)?;
        config.updated_at = now;
        storage::set_config(&env, &config);

        auction.status = AuctionStatus::Withdrawn;
        storage::save_auction(&env, &auction);
        storage::extend_instance_ttl(&env);

        if proceeds > 0 {
            escrow::push(&env, &config.token, &seller, proceeds)?;
        }

        log!(&env, "auction withdrawn", auction_id, proceeds, fee);
        AuctionWithdrawnEventData {
            auction_id,
            timestamp: now,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_auction(env: Env, auction_id: u64) -> Result<Auction, Error> {
        storage::get_auction(&env, auction_id).ok_or(Error::NotFound)
    }

    /// Every accepted bid on the auction, oldest first.
    pub fn get_bids(env: Env, auction_id: u64) -> Result<Vec<Bid>, Error> {
        if storage::get_auction(&env, auction_id).is_none() {
            return Err(Error::NotFound);
        }
        Ok(storage::get_bids(&env, auction_id))
    }

    pub fn get_highest_bid(env: Env, auction_id: u64) -> Result<(Option<Address>, i128), Error> {
        let auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;
        Ok((auction.current_winner, auction.current_price))
    }

    pub fn get_escrow_balance(env: Env, auction_id: u64, bidder: Address) -> i128 {
        storage::get_escrow(&env, auction_id, &bidder)
    }

    pub fn get_auction_count(env: Env) -> u64 {
        storage::get_auction_count(&env)
    }

    /// Whether the auction has reached its end time. Cancelled or withdrawn
    /// auctions report their time-based state too.
    pub fn is_ended(env: Env, auction_id: u64) -> Result<bool, Error> {
        let auction = storage::get_auction(&env, auction_id).ok_or(Error::NotFound)?;
        Ok(auction.is_ended(env.ledger().timestamp()))
    }
}

#[cfg(test)]
mod test;
