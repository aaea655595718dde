use soroban_sdk::{contractevent, Address};

/// Event emitted when the contract is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEventData {
    #[topic]
    pub admin: Address,
    pub token: Address,
    pub fee_rate: u32,
}

/// Event emitted when an auction is listed
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreatedEventData {
    #[topic]
    pub id: u64,
    #[topic]
    pub seller: Address,
    pub starting_price: i128,
    pub duration: u64,
    pub started_at: u64,
}

/// Event emitted when a bid is accepted and escrowed
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidAcceptedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCancelledEventData {
    #[topic]
    pub auction_id: u64,
    pub timestamp: u64,
}

/// Event emitted when the seller collects the proceeds
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionWithdrawnEventData {
    #[topic]
    pub auction_id: u64,
    pub timestamp: u64,
}

/// Event emitted when an outbid bidder takes back their escrow
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundClaimedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub bidder: Address,
    pub amount: i128,
}

/// Event emitted when fee rate is updated
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeRateUpdatedEventData {
    #[topic]
    pub admin: Address,
    pub new_rate: u32,
}
