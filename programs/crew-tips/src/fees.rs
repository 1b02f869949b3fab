//! Fee-fair division of a tip pool.
//!
//! The transfer fee is 0.5% of the amount sent, rounded UP to the next
//! integer unit, charged on every outgoing transfer except the lead's own
//! retention. `plan_split` finds the largest equal take-home amount that
//! every keeping participant can receive while all transfer costs still fit
//! inside the pool. Everything here is pure integer arithmetic: no accounts,
//! no clock, no I/O.

use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, TRANSFER_FEE_BPS},
    errors::ErrorCode,
    state::{CrewChoice, LeadChoice},
};

/// A planned transfer to one crew member who keeps their share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeeperTransfer {
    /// Position of the recipient in the session's stored order.
    pub recipient_index: usize,
    /// Take-home amount (what the recipient receives).
    pub amount: u64,
    pub fee: u64,
    /// `amount + fee`, what the sender pays.
    pub gross_cost: u64,
}

/// The single pooled transfer covering every logistics donation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogisticsTransfer {
    pub amount: u64,
    pub fee: u64,
    pub gross_cost: u64,
    /// Number of shares pooled into this transfer (crew + lead donators).
    pub donor_shares: u64,
}

/// Full distribution plan for one tip pool.
///
/// Never persisted: each execution computes a fresh plan from the current
/// choices and vault balance, and discards it once realized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitPlan {
    pub total_pool: u64,
    /// Crew count plus the lead.
    pub total_party_size: u64,
    /// Fee-naive `pool / party_size`, for display comparison only.
    pub reference_base_share: u64,
    /// The equal take-home amount X shared by every keeper.
    pub equal_take_home: u64,
    /// One record per keeping crew member, in stored recipient order.
    /// Zero-amount records are kept so callers can distinguish "nobody is
    /// keeping" from "the pool was too small".
    pub keeper_transfers: Vec<KeeperTransfer>,
    pub logistics: Option<LogisticsTransfer>,
    /// Stored positions of crew members donating to logistics.
    pub donator_indices: Vec<usize>,
    /// Stored positions of crew members declining their share.
    pub decliner_indices: Vec<usize>,
    pub lead_choice: LeadChoice,
    /// The lead's own equal share, zero unless the lead keeps. Fee-free.
    pub lead_share: u64,
    pub total_fees: u64,
    /// Sum of all transfer gross costs. Excludes the lead's kept amount.
    pub total_gross_transferred: u64,
    /// Integer remainder left after all transfers, credited to the lead.
    pub dust: u64,
    /// `lead_share + dust`.
    pub lead_final_kept: u64,
}

/// Exact gross cost as u128, the working representation for comparisons.
fn cost_u128(amount_sent: u64) -> u128 {
    if amount_sent == 0 {
        return 0;
    }
    let fee = (amount_sent as u128 * TRANSFER_FEE_BPS as u128).div_ceil(BPS_DENOMINATOR as u128);
    amount_sent as u128 + fee
}

/// Total cost of sending `amount_sent`: the amount itself plus the 0.5%
/// fee rounded up. Returns 0 for a zero amount. Monotonically non-decreasing.
///
/// Saturates at `u64::MAX`, which is unreachable for any real token supply;
/// all comparisons inside this module use the exact u128 cost.
pub fn transfer_cost(amount_sent: u64) -> u64 {
    cost_u128(amount_sent).min(u64::MAX as u128) as u64
}

/// Largest amount that can be sent without the gross cost exceeding `budget`.
///
/// Starts from the analytic inverse `floor(budget / 1.005)` and corrects by
/// linear probing: the rounded-up fee makes the true inverse non-closed-form,
/// but the initial guess is only ever off by a few units at this fee rate.
pub fn max_transfer_amount(budget: u64) -> u64 {
    if budget == 0 {
        return 0;
    }

    let mut guess = (budget as u128 * BPS_DENOMINATOR as u128
        / (BPS_DENOMINATOR + TRANSFER_FEE_BPS) as u128) as u64;

    if cost_u128(guess) > budget as u128 {
        while cost_u128(guess) > budget as u128 {
            guess -= 1;
        }
    } else {
        while cost_u128(guess + 1) <= budget as u128 {
            guess += 1;
        }
    }
    guess
}

/// Total cost of paying candidate amount `x` to every active share: one
/// fee-charged transfer per keeper, one fee-charged pooled transfer for all
/// donated shares, and a fee-free x for a keeping lead.
fn distribution_cost(
    x: u64,
    num_keeper_transfers: u64,
    num_donator_shares: u64,
    lead_is_keeping: bool,
) -> u128 {
    let mut cost = cost_u128(x) * num_keeper_transfers as u128;

    if num_donator_shares > 0 {
        // The pooled entitlement never exceeds the pool for callers that
        // pass consistent share counts; saturate to stay total anyway.
        let entitlement = x.saturating_mul(num_donator_shares);
        cost += cost_u128(max_transfer_amount(entitlement));
    }

    if lead_is_keeping {
        cost += x as u128;
    }

    cost
}

/// Finds the maximum equal take-home amount X such that paying X to every
/// active participant fits inside `pool`:
///
/// - each keeping crew member costs `transfer_cost(X)` (own transfer, own fee)
/// - all donated shares pool into ONE transfer entitled to
///   `X * num_donator_shares`, costing one fee
/// - the lead, if keeping, costs a fee-free X
///
/// Candidates run over `0..=pool / total_active_shares`, the fee-naive
/// estimate. The cost is monotone in X, so the fitting candidates form a
/// prefix of that range and bisection finds the largest one. A one-unit
/// downward walk from the estimate would take ~0.5% of the per-head share
/// in steps, which at token-amount scale exceeds any compute budget; the
/// bisection is equivalent candidate for candidate, and the tests pin that
/// equivalence against the walk. Returns 0 when no positive X fits (or
/// when there are no active shares).
pub fn equal_take_home_amount(
    pool: u64,
    total_active_shares: u64,
    num_keeper_transfers: u64,
    num_donator_shares: u64,
    lead_is_keeping: bool,
) -> u64 {
    if total_active_shares == 0 {
        return 0;
    }

    // distribution_cost(0) == 0, so the lower bound is always feasible
    let mut lo = 0u64;
    let mut hi = pool / total_active_shares;

    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        let cost = distribution_cost(mid, num_keeper_transfers, num_donator_shares, lead_is_keeping);
        if cost <= pool as u128 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    lo
}

/// Computes the full distribution plan for one tip pool.
///
/// `choices` holds one entry per crew recipient in stored order; the lead is
/// not part of the list and carries their own choice. Fails only on an empty
/// pool or an empty crew; "everyone declined" is a valid plan in which the
/// lead keeps the entire pool with zero transfers.
pub fn plan_split(pool: u64, choices: &[CrewChoice], lead_choice: LeadChoice) -> Result<SplitPlan> {
    require!(pool > 0, ErrorCode::InvalidPoolAmount);
    require!(!choices.is_empty(), ErrorCode::NoParticipants);

    let mut keeper_indices = Vec::new();
    let mut donator_indices = Vec::new();
    let mut decliner_indices = Vec::new();
    for (i, choice) in choices.iter().enumerate() {
        match choice {
            CrewChoice::Keep => keeper_indices.push(i),
            CrewChoice::Logistics => donator_indices.push(i),
            CrewChoice::Decline => decliner_indices.push(i),
        }
    }

    let lead_is_keeping = lead_choice == LeadChoice::Keep;
    let lead_is_donating = lead_choice == LeadChoice::Logistics;
    let lead_is_declining = lead_choice == LeadChoice::Decline;

    let total_party_size = choices.len() as u64 + 1;
    let num_decliners = decliner_indices.len() as u64 + lead_is_declining as u64;
    let total_active_shares = total_party_size - num_decliners;

    if total_active_shares == 0 {
        // Everyone declined. The lead keeps the whole pool as dust; this is
        // a named branch, not an error.
        return Ok(SplitPlan {
            total_pool: pool,
            total_party_size,
            reference_base_share: 0,
            equal_take_home: 0,
            keeper_transfers: Vec::new(),
            logistics: None,
            donator_indices,
            decliner_indices,
            lead_choice,
            lead_share: 0,
            total_fees: 0,
            total_gross_transferred: 0,
            dust: pool,
            lead_final_kept: pool,
        });
    }

    let reference_base_share = pool / total_party_size;
    let num_active_donators = donator_indices.len() as u64 + lead_is_donating as u64;

    let equal_take_home = equal_take_home_amount(
        pool,
        total_active_shares,
        keeper_indices.len() as u64,
        num_active_donators,
        lead_is_keeping,
    );

    let mut keeper_transfers = Vec::with_capacity(keeper_indices.len());
    let mut total_gross_transferred: u64 = 0;
    let mut total_fees: u64 = 0;

    for &recipient_index in &keeper_indices {
        let gross_cost = transfer_cost(equal_take_home);
        let fee = gross_cost - equal_take_home;
        keeper_transfers.push(KeeperTransfer {
            recipient_index,
            amount: equal_take_home,
            fee,
            gross_cost,
        });
        total_gross_transferred = total_gross_transferred
            .checked_add(gross_cost)
            .ok_or(ErrorCode::MathOverflow)?;
        total_fees = total_fees.checked_add(fee).ok_or(ErrorCode::MathOverflow)?;
    }

    let mut logistics = None;
    if num_active_donators > 0 {
        let entitlement = equal_take_home
            .checked_mul(num_active_donators)
            .ok_or(ErrorCode::MathOverflow)?;
        let amount = max_transfer_amount(entitlement);

        // A zero pooled amount (pool too small) produces no record at all.
        if amount > 0 {
            let gross_cost = transfer_cost(amount);
            let fee = gross_cost - amount;
            logistics = Some(LogisticsTransfer {
                amount,
                fee,
                gross_cost,
                donor_shares: num_active_donators,
            });
            total_gross_transferred = total_gross_transferred
                .checked_add(gross_cost)
                .ok_or(ErrorCode::MathOverflow)?;
            total_fees = total_fees.checked_add(fee).ok_or(ErrorCode::MathOverflow)?;
        }
    }

    let lead_share = if lead_is_keeping { equal_take_home } else { 0 };
    let total_spent = total_gross_transferred
        .checked_add(lead_share)
        .ok_or(ErrorCode::MathOverflow)?;
    let dust = pool.checked_sub(total_spent).ok_or(ErrorCode::MathUnderflow)?;
    let lead_final_kept = lead_share.checked_add(dust).ok_or(ErrorCode::MathOverflow)?;

    Ok(SplitPlan {
        total_pool: pool,
        total_party_size,
        reference_base_share,
        equal_take_home,
        keeper_transfers,
        logistics,
        donator_indices,
        decliner_indices,
        lead_choice,
        lead_share,
        total_fees,
        total_gross_transferred,
        dust,
        lead_final_kept,
    })
}
