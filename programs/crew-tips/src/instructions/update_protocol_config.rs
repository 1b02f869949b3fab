use anchor_lang::prelude::*;

use crate::{errors::ErrorCode, events::ProtocolConfigUpdated, state::ProtocolConfig};

#[derive(Accounts)]
pub struct UpdateProtocolConfig<'info> {
    #[account(
        mut,
        seeds = [b"protocol_config"],
        bump = protocol_config.load()?.bump,
        constraint = protocol_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

/// Updates the fee treasury wallet
/// Only callable by the protocol authority
pub fn handler(ctx: Context<UpdateProtocolConfig>, new_fee_treasury: Pubkey) -> Result<()> {
    require!(new_fee_treasury != Pubkey::default(), ErrorCode::ZeroAddress);

    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    let old_fee_treasury = protocol_config.fee_treasury;

    protocol_config.fee_treasury = new_fee_treasury;

    emit!(ProtocolConfigUpdated {
        authority: ctx.accounts.authority.key(),
        old_fee_treasury,
        new_fee_treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
