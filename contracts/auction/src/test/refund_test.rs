use crate::test::{advance_ledger, setup_test, INITIAL_BALANCE, ONE_HOUR};
use crate::Error;
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_refund_succeeds_once() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);
    ctx.client.place_bid(&auction_id, &ctx.bob, &300);

    ctx.client.claim_refund(&auction_id, &ctx.alice);
    assert_eq!(ctx.token.balance(&ctx.alice), INITIAL_BALANCE);
    assert_eq!(ctx.client.get_escrow_balance(&auction_id, &ctx.alice), 0);

    let result = ctx.client.try_claim_refund(&auction_id, &ctx.alice);
    assert_eq!(result, Err(Ok(Error::NothingToRefund)));
    assert_eq!(ctx.token.balance(&ctx.alice), INITIAL_BALANCE);
    ctx.assert_conserved(&[auction_id], &[&ctx.alice, &ctx.bob]);
}

#[test]
fn test_winner_cannot_refund() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);

    let result = ctx.client.try_claim_refund(&auction_id, &ctx.alice);
    assert_eq!(result, Err(Ok(Error::WinnerCannotRefund)));
    assert_eq!(ctx.client.get_escrow_balance(&auction_id, &ctx.alice), 200);

    advance_ledger(&ctx.env, ONE_HOUR);
    let result = ctx.client.try_claim_refund(&auction_id, &ctx.alice);
    assert_eq!(result, Err(Ok(Error::WinnerCannotRefund)));
}

#[test]
fn test_refund_for_non_bidder() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);

    let stranger = Address::generate(&ctx.env);
    let result = ctx.client.try_claim_refund(&auction_id, &stranger);
    assert_eq!(result, Err(Ok(Error::NothingToRefund)));
}

#[test]
fn test_refund_on_missing_auction() {
    let ctx = setup_test();
    let result = ctx.client.try_claim_refund(&7, &ctx.alice);
    assert_eq!(result, Err(Ok(Error::NotFound)));
}

#[test]
fn test_refund_allowed_after_expiry() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);
    ctx.client.place_bid(&auction_id, &ctx.bob, &300);

    advance_ledger(&ctx.env, 10 * ONE_HOUR);
    ctx.client.claim_refund(&auction_id, &ctx.alice);
    assert_eq!(ctx.token.balance(&ctx.alice), INITIAL_BALANCE);
}

#[test]
fn test_refund_allowed_after_withdrawal() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);
    ctx.client.place_bid(&auction_id, &ctx.bob, &1000);

    advance_ledger(&ctx.env, ONE_HOUR);
    ctx.client.withdraw(&auction_id, &ctx.seller);
    ctx.assert_conserved(&[auction_id], &[&ctx.alice, &ctx.bob]);

    ctx.client.claim_refund(&auction_id, &ctx.alice);
    assert_eq!(ctx.token.balance(&ctx.alice), INITIAL_BALANCE);

    // Only the retained fee is left behind.
    assert_eq!(ctx.token.balance(&ctx.contract_id), 50);
    ctx.assert_conserved(&[auction_id], &[&ctx.alice, &ctx.bob]);
}

#[test]
fn test_refund_rolls_back_when_transfer_is_refused() {
    let ctx = setup_test();
    let auction_id = ctx.create_auction(100, ONE_HOUR);
    ctx.client.place_bid(&auction_id, &ctx.alice, &200);
    ctx.client.place_bid(&auction_id, &ctx.bob, &300);
    ctx.deauthorize(&ctx.alice);

    let result = ctx.client.try_claim_refund(&auction_id, &ctx.alice);
    assert_eq!(result, Err(Ok(Error::TransferFailed)));
    assert_eq!(ctx.client.get_escrow_balance(&auction_id, &ctx.alice), 200);
    assert_eq!(ctx.token.balance(&ctx.contract_id), 500);
    ctx.assert_conserved(&[auction_id], &[&ctx.alice, &ctx.bob]);
}
