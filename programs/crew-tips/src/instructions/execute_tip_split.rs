use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    errors::ErrorCode,
    events::TipSplitExecuted,
    fees::plan_split,
    state::{CrewChoice, LeadChoice, ProtocolConfig, TipSession},
    utils::validate_and_send,
};

#[derive(Accounts)]
pub struct ExecuteTipSplit<'info> {
    #[account(
        mut,
        seeds = [
            b"tip_session",
            session.load()?.lead.as_ref(),
            session.load()?.mint.as_ref(),
            session.load()?.unique_id.as_ref()
        ],
        bump = session.load()?.bump
    )]
    pub session: AccountLoader<'info, TipSession>,

    #[account(
        mut,
        constraint = vault.key() == session.load()?.vault @ ErrorCode::InvalidVault
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        constraint = mint.key() == session.load()?.mint @ ErrorCode::TokenAccountWrongMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [b"protocol_config"],
        bump = protocol_config.load()?.bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    /// CHECK: Intentionally not a Signer - execution is permissionless (the
    /// plan only ever pays the configured destinations). Used for event
    /// attribution only.
    pub executor: AccountInfo<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Executes the tip split over the current vault balance.
///
/// The vault balance is the pool; the plan is a pure function of that
/// balance and the recorded choices, recomputed from scratch on every call.
/// Remaining accounts: one token account per crew recipient in stored order,
/// then the lead's, the logistics wallet's, and the fee treasury's token
/// accounts. The vault drains to exactly zero on success.
pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, ExecuteTipSplit<'info>>) -> Result<()> {
    let pool = ctx.accounts.vault.amount;
    let fee_treasury = ctx.accounts.protocol_config.load()?.fee_treasury;

    // Phase 1: snapshot session data and DROP the borrow before CPIs
    let (lead, mint_key, unique_id, bump, logistics_wallet, recipient_count, addresses, choices, lead_choice) = {
        let session = ctx.accounts.session.load()?;
        let count = session.recipient_count as usize;

        let addresses: Vec<Pubkey> = session.recipients[..count].iter().map(|r| r.address).collect();
        let choices: Vec<CrewChoice> = session.recipients[..count]
            .iter()
            .map(|r| CrewChoice::from_u8(r.choice))
            .collect::<Result<_>>()?;
        let lead_choice = LeadChoice::from_u8(session.lead_choice)?;

        (
            session.lead,
            session.mint,
            session.unique_id,
            session.bump,
            session.logistics_wallet,
            count,
            addresses,
            choices,
            lead_choice,
        )
    }; // ← Borrow DROPPED here

    // Recipient token accounts in stored order, then lead / logistics / treasury
    require!(
        ctx.remaining_accounts.len() >= recipient_count + 3,
        ErrorCode::InsufficientRemainingAccounts
    );
    let lead_token = &ctx.remaining_accounts[recipient_count];
    let logistics_token = &ctx.remaining_accounts[recipient_count + 1];
    let treasury_token = &ctx.remaining_accounts[recipient_count + 2];

    // The whole distribution problem is solved up front; the CPIs below only
    // realize the plan
    let plan = plan_split(pool, &choices, lead_choice)?;

    let seeds = &[
        b"tip_session".as_ref(),
        lead.as_ref(),
        mint_key.as_ref(),
        unique_id.as_ref(),
        &[bump],
    ];
    let signer_seeds = &[&seeds[..]];

    // Phase 2: all CPIs - no borrow held

    // Individual keeper payouts, each charged its own fee
    for transfer in &plan.keeper_transfers {
        if transfer.amount == 0 {
            continue; // Plan keeps zero-amount records; nothing to send
        }
        let destination = &ctx.remaining_accounts[transfer.recipient_index];
        validate_and_send(
            destination,
            &addresses[transfer.recipient_index],
            transfer.amount,
            &ctx.accounts.mint,
            &ctx.accounts.vault,
            &ctx.accounts.session.to_account_info(),
            &ctx.accounts.token_program,
            signer_seeds,
        )?;
    }

    // One pooled transfer for all donated shares, charged one fee
    let mut logistics_amount = 0u64;
    if let Some(pooled) = plan.logistics {
        validate_and_send(
            logistics_token,
            &logistics_wallet,
            pooled.amount,
            &ctx.accounts.mint,
            &ctx.accounts.vault,
            &ctx.accounts.session.to_account_info(),
            &ctx.accounts.token_program,
            signer_seeds,
        )?;
        logistics_amount = pooled.amount;
    }

    // All fees leave the vault in one aggregate payment to the treasury
    if plan.total_fees > 0 {
        require!(treasury_token.is_writable, ErrorCode::InvalidFeeTreasury);
        validate_and_send(
            treasury_token,
            &fee_treasury,
            plan.total_fees,
            &ctx.accounts.mint,
            &ctx.accounts.vault,
            &ctx.accounts.session.to_account_info(),
            &ctx.accounts.token_program,
            signer_seeds,
        )?;
    }

    // The lead's own share plus the dust, fee-free
    if plan.lead_final_kept > 0 {
        validate_and_send(
            lead_token,
            &lead,
            plan.lead_final_kept,
            &ctx.accounts.mint,
            &ctx.accounts.vault,
            &ctx.accounts.session.to_account_info(),
            &ctx.accounts.token_program,
            signer_seeds,
        )?;
    }

    #[cfg(feature = "verbose")]
    msg!(
        "split executed: pool {}, take-home {}, fees {}, dust {}",
        plan.total_pool,
        plan.equal_take_home,
        plan.total_fees,
        plan.dust
    );

    emit!(TipSplitExecuted {
        session: ctx.accounts.session.key(),
        vault: ctx.accounts.vault.key(),
        total_pool: plan.total_pool,
        total_party_size: plan.total_party_size,
        reference_base_share: plan.reference_base_share,
        equal_take_home: plan.equal_take_home,
        keeper_count: plan.keeper_transfers.len() as u8,
        logistics_amount,
        total_fees: plan.total_fees,
        total_gross_transferred: plan.total_gross_transferred,
        dust: plan.dust,
        lead_final_kept: plan.lead_final_kept,
        executor: ctx.accounts.executor.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
