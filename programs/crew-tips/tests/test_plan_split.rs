//! End-to-end scenarios for the split planner public API.
//!
//! These walk the documented operator scenarios: mixed crews, declines,
//! logistics pooling, and the degenerate everyone-declined session.

use crew_tips::{
    errors::ErrorCode,
    fees::{max_transfer_amount, plan_split, transfer_cost},
    state::{CrewChoice, LeadChoice},
};

#[test]
fn two_way_split_with_lead() {
    // pool=1000, one crew keeper, lead keeps: the fee-naive half (500)
    // does not fit once the keeper's fee is charged, so both settle at 498.
    let plan = plan_split(1000, &[CrewChoice::Keep], LeadChoice::Keep).unwrap();

    assert_eq!(plan.equal_take_home, 498);
    assert_eq!(plan.keeper_transfers[0].amount, plan.lead_share);
    assert!(plan.keeper_transfers[0].gross_cost + plan.lead_share <= 1000);
    // The naive reference share is shown alongside for comparison
    assert_eq!(plan.reference_base_share, 500);
}

#[test]
fn crew_of_three_lead_declines() {
    let plan = plan_split(10_000, &[CrewChoice::Keep; 3], LeadChoice::Decline).unwrap();
    let x = plan.equal_take_home;

    // Equal take-home across all three keepers
    assert!(plan.keeper_transfers.iter().all(|t| t.amount == x));
    // The declined lead still absorbs the rounding dust
    let gross = 3 * transfer_cost(x);
    assert_eq!(plan.lead_final_kept, 10_000 - gross);
    assert_eq!(plan.lead_share, 0);
}

#[test]
fn single_keeper_lead_declines_charges_one_fee() {
    let plan = plan_split(10_000, &[CrewChoice::Keep], LeadChoice::Decline).unwrap();
    let t = plan.keeper_transfers[0];

    assert_eq!(plan.total_fees, t.fee);
    assert_eq!(t.fee, transfer_cost(t.amount) - t.amount);
    assert_eq!(plan.total_gross_transferred, t.gross_cost);
}

#[test]
fn everyone_declines_lead_keeps_all() {
    let plan = plan_split(5000, &[CrewChoice::Decline; 4], LeadChoice::Decline).unwrap();

    assert_eq!(plan.lead_final_kept, 5000);
    assert_eq!(plan.total_fees, 0);
    assert!(plan.keeper_transfers.is_empty());
    assert!(plan.logistics.is_none());
}

#[test]
fn logistics_pool_entitlement() {
    // pool=900, 2 crew donating, lead keeps, no keepers
    let plan = plan_split(900, &[CrewChoice::Logistics; 2], LeadChoice::Keep).unwrap();
    let x = plan.equal_take_home;
    let pooled = plan.logistics.expect("pooled transfer expected");

    assert_eq!(pooled.amount, max_transfer_amount(x * 2));
    assert!(plan.lead_share + pooled.gross_cost <= 900);
    assert!(plan.keeper_transfers.is_empty());
}

#[test]
fn pooled_donations_pay_one_fee_not_many() {
    // Six donators pool into one transfer: the fee is charged once on the
    // pooled amount, not per share.
    let plan = plan_split(1_000_000, &[CrewChoice::Logistics; 6], LeadChoice::Decline).unwrap();
    let pooled = plan.logistics.unwrap();

    assert_eq!(pooled.donor_shares, 6);
    assert_eq!(plan.total_fees, pooled.fee);
    assert_eq!(pooled.fee, transfer_cost(pooled.amount) - pooled.amount);
}

#[test]
fn invalid_inputs_fail_fast() {
    assert_eq!(
        plan_split(0, &[CrewChoice::Keep], LeadChoice::Keep).unwrap_err(),
        ErrorCode::InvalidPoolAmount.into()
    );
    assert_eq!(
        plan_split(1000, &[], LeadChoice::Keep).unwrap_err(),
        ErrorCode::NoParticipants.into()
    );
}

#[test]
fn declined_shares_are_redistributed() {
    // Same pool, same crew size; with two decliners the remaining keeper
    // takes home strictly more.
    let all_keep = plan_split(9000, &[CrewChoice::Keep; 3], LeadChoice::Decline).unwrap();
    let with_declines = plan_split(
        9000,
        &[CrewChoice::Keep, CrewChoice::Decline, CrewChoice::Decline],
        LeadChoice::Decline,
    )
    .unwrap();

    assert!(with_declines.equal_take_home > all_keep.equal_take_home);
    assert_eq!(with_declines.keeper_transfers.len(), 1);
    assert_eq!(with_declines.decliner_indices, vec![1, 2]);
}

#[test]
fn lead_pays_no_fee_on_own_share() {
    let plan = plan_split(100_000, &[CrewChoice::Keep], LeadChoice::Keep).unwrap();
    let t = plan.keeper_transfers[0];

    // Crew keeper pays a fee; the lead's identical share carries none.
    assert!(t.fee > 0);
    assert_eq!(plan.lead_share, t.amount);
    assert_eq!(
        plan.total_pool,
        t.gross_cost + plan.lead_share + plan.dust
    );
}

#[test]
fn plan_handles_token_scale_pools() {
    // 5000 tokens at 9 decimals: a realistic vault balance, far beyond
    // anything a one-unit candidate walk could solve in bounded compute.
    let plan = plan_split(5_000_000_000_000, &[CrewChoice::Keep; 8], LeadChoice::Keep).unwrap();
    let x = plan.equal_take_home;

    assert!(x > 0);
    let gross: u64 = plan.keeper_transfers.iter().map(|t| t.gross_cost).sum();
    assert_eq!(gross, 8 * transfer_cost(x));
    assert_eq!(plan.total_pool, gross + plan.lead_share + plan.dust);
    // Maximality: one more unit per head would not fit
    assert!(8 * transfer_cost(x + 1) + (x + 1) > 5_000_000_000_000);
}

#[test]
fn full_accounting_balances() {
    let choices = [
        CrewChoice::Keep,
        CrewChoice::Logistics,
        CrewChoice::Decline,
        CrewChoice::Keep,
        CrewChoice::Logistics,
    ];
    for lead_choice in [LeadChoice::Keep, LeadChoice::Decline, LeadChoice::Logistics] {
        let plan = plan_split(250_000, &choices, lead_choice).unwrap();

        let keeper_gross: u64 = plan.keeper_transfers.iter().map(|t| t.gross_cost).sum();
        let pooled_gross = plan.logistics.map_or(0, |l| l.gross_cost);

        // Everything the pool pays out, plus dust, reconstructs the pool
        assert_eq!(
            plan.total_pool,
            keeper_gross + pooled_gross + plan.lead_share + plan.dust,
            "lead choice {lead_choice:?}"
        );
        assert_eq!(plan.lead_final_kept, plan.lead_share + plan.dust);
    }
}
