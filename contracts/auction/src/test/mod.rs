pub mod refund_test;

use crate::{AuctionEscrow, AuctionEscrowClient};
use soroban_sdk::{
    testutils::{Address as _, IssuerFlags, Ledger},
    token, Address, Env, String,
};

pub const INITIAL_BALANCE: i128 = 10_000_000;
pub const ONE_HOUR: u64 = 3600;

pub struct TestContext {
    pub env: Env,
    pub client: AuctionEscrowClient<'static>,
    pub contract_id: Address,
    pub admin: Address,
    pub seller: Address,
    pub alice: Address,
    pub bob: Address,
    pub token_address: Address,
    pub token: token::TokenClient<'static>,
}

impl TestContext {
    /// Funds `bidder` and approves the escrow contract to pull from it.
    pub fn fund(&self, bidder: &Address) {
        let token_admin_client = token::StellarAssetClient::new(&self.env, &self.token_address);
        token_admin_client.mint(bidder, &INITIAL_BALANCE);
        self.token.approve(
            bidder,
            &self.contract_id,
            &INITIAL_BALANCE,
            &(self.env.ledger().sequence() + 10_000),
        );
    }

    pub fn create_auction(&self, starting_price: i128, duration: u64) -> u64 {
        self.client.create_auction(
            &self.seller,
            &String::from_str(&self.env, "Vintage watch"),
            &String::from_str(&self.env, "1960s automatic, serviced"),
            &starting_price,
            &duration,
        )
    }

    /// Blocks `account` from receiving the token, so payouts to it fail.
    pub fn deauthorize(&self, account: &Address) {
        token::StellarAssetClient::new(&self.env, &self.token_address)
            .set_authorized(account, &false);
    }

    /// The contract must hold exactly the outstanding escrows plus retained fees.
    pub fn assert_conserved(&self, auction_ids: &[u64], bidders: &[&Address]) {
        let mut owed: i128 = self.client.get_accrued_fees();
        for auction_id in auction_ids {
            for bidder in bidders {
                owed += self.client.get_escrow_balance(auction_id, *bidder);
            }
        }
        assert_eq!(self.token.balance(&self.contract_id), owed);
    }
}

pub fn setup_uninitialized() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(AuctionEscrow, ());
    let client = AuctionEscrowClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let seller = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let token_contract = env.register_stellar_asset_contract_v2(token_admin.clone());
    token_contract.issuer().set_flag(IssuerFlags::RevocableFlag);
    let token_address = token_contract.address();
    let token = token::TokenClient::new(&env, &token_address);

    let ctx = TestContext {
        env,
        client,
        contract_id,
        admin,
        seller,
        alice,
        bob,
        token_address,
        token,
    };
    ctx.fund(&ctx.alice);
    ctx.fund(&ctx.bob);
    ctx
}

pub fn setup_test_with_fee(fee_rate: u32) -> TestContext {
    let ctx = setup_uninitialized();
    ctx.client.initialize(&ctx.admin, &ctx.token_address, &fee_rate);
    ctx
}

pub fn setup_test() -> TestContext {
    setup_test_with_fee(5)
}

pub fn advance_ledger(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp += seconds;
    });
}
