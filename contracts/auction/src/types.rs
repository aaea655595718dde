use soroban_sdk::{contracttype, Address, String};

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending instance storage
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for persistent storage (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;

/// TTL threshold for persistent storage
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Upper bound for the protocol fee, in whole percent.
pub const MAX_FEE: u32 = 10;

/// Shortest auction a seller may open, in seconds.
pub const MIN_DURATION: u64 = 3600;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuctionStatus {
    /// Accepting bids until expiry, then waiting for the seller to withdraw.
    Open = 0,
    /// Seller cancelled before expiry; every escrow was returned.
    Cancelled = 1,
    /// Seller collected the proceeds.
    Withdrawn = 2,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id: u64,
    pub seller: Address,
    pub name: String,
    pub description: String,
    pub starting_price: i128,
    pub current_price: i128,
    pub current_winner: Option<Address>,
    pub started_at: u64,
    pub duration: u64,
    pub status: AuctionStatus,
}

impl Auction {
    /// First timestamp at which the auction no longer accepts bids.
    pub fn ends_at(&self) -> u64 {
        self.started_at.saturating_add(self.duration)
    }

    pub fn is_ended(&self, now: u64) -> bool {
        now >= self.ends_at()
    }

    pub fn is_winner(&self, bidder: &Address) -> bool {
        self.current_winner.as_ref() == Some(bidder)
    }
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Engine-wide settings, written at initialization and by the operator.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Privileged operator allowed to change the fee rate
    pub admin: Address,
    /// The single token every auction is priced and escrowed in
    pub token: Address,
    /// Protocol fee in whole percent, at most `MAX_FEE`
    pub fee_rate: u32,
    /// Fees withheld from withdrawals and retained by the contract
    pub accrued_fees: i128,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    AuctionCounter,
    /// Set while a mutating call is in flight
    Locked,
    Auction(u64),
    /// Number of accepted bids on an auction
    BidCount(u64),
    /// One accepted bid, by auction and position in the history
    Bid(u64, u32),
    /// Number of distinct bidders on an auction
    BidderCount(u64),
    /// Distinct bidders per auction, in order of first bid
    Bidder(u64, u32),
    /// Present once an address has bid on an auction
    HasBid(u64, Address),
    Escrow(u64, Address),
}
