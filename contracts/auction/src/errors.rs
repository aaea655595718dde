use soroban_sdk::contracterror;

/// Error codes for the auction escrow contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Caller is not the privileged operator
    Unauthorized = 3,
    /// Starting price must be positive
    InvalidStartingPrice = 4,
    /// Duration is shorter than one hour
    DurationTooShort = 5,
    /// No auction with the given id
    NotFound = 6,
    /// Auction has passed its end time
    AlreadyEnded = 7,
    /// Withdrawal attempted before the end time
    AuctionStillOpen = 8,
    /// Bid does not exceed the current price
    BidTooLow = 9,
    /// Bid is below the starting price
    BelowStartingPrice = 10,
    /// The current winner's escrow is committed to the seller
    WinnerCannotRefund = 11,
    NothingToRefund = 12,
    /// Caller is not the seller of the auction
    NotSeller = 13,
    /// Auction was already cancelled or withdrawn
    AlreadyFinalized = 14,
    /// Fee rate exceeds `MAX_FEE`
    FeeTooHigh = 15,
    /// A mutating call is already in flight
    Reentrant = 16,
    /// The token contract rejected a transfer
    TransferFailed = 17,
    Overflow = 18,
}
