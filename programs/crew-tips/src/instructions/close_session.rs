use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::{errors::ErrorCode, events::SessionClosed, state::TipSession};

#[derive(Accounts)]
pub struct CloseSession<'info> {
    #[account(
        mut,
        seeds = [
            b"tip_session",
            session.load()?.lead.as_ref(),
            session.load()?.mint.as_ref(),
            session.load()?.unique_id.as_ref()
        ],
        bump = session.load()?.bump,
        constraint = session.load()?.lead == lead.key() @ ErrorCode::Unauthorized,
        close = rent_destination
    )]
    pub session: AccountLoader<'info, TipSession>,

    #[account(
        constraint = vault.key() == session.load()?.vault @ ErrorCode::InvalidVault,
        constraint = vault.amount == 0 @ ErrorCode::VaultNotEmpty
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub lead: Signer<'info>,

    /// CHECK: Validated against the stored rent_payer in the handler
    #[account(mut)]
    pub rent_destination: AccountInfo<'info>,
}

/// Closes a finished session and recovers rent
/// Requires the vault to be empty (a split drains it to exactly zero)
pub fn handler(ctx: Context<CloseSession>) -> Result<()> {
    let session = ctx.accounts.session.load()?;

    require!(
        ctx.accounts.rent_destination.key() == session.rent_payer,
        ErrorCode::InvalidRentDestination
    );

    let session_key = ctx.accounts.session.key();
    let lead_key = ctx.accounts.lead.key();
    let rent_recovered = ctx.accounts.session.to_account_info().lamports();

    // Drop the borrow before close
    drop(session);

    emit!(SessionClosed {
        session: session_key,
        lead: lead_key,
        rent_recovered,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
