use anchor_lang::prelude::*;

use crate::{
    constants::PROTOCOL_CONFIG_SIZE,
    errors::ErrorCode,
    events::ProtocolInitialized,
    state::ProtocolConfig,
    ID,
};

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = authority,
        space = PROTOCOL_CONFIG_SIZE,
        seeds = [b"protocol_config"],
        bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: The program's executable data account - validated in handler
    #[account(
        constraint = program_data.owner == &anchor_lang::solana_program::bpf_loader_upgradeable::id()
            @ ErrorCode::Unauthorized
    )]
    pub program_data: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

/// Initializes the protocol configuration
/// Can only be called once by the program's upgrade authority
pub fn handler(ctx: Context<InitializeProtocol>, fee_treasury: Pubkey) -> Result<()> {
    require!(fee_treasury != Pubkey::default(), ErrorCode::ZeroAddress);

    // The signer must be the program's upgrade authority. Verify program_data
    // is our ProgramData PDA and read the authority out of it.
    let (expected_program_data, _) = Pubkey::find_program_address(
        &[ID.as_ref()],
        &anchor_lang::solana_program::bpf_loader_upgradeable::id(),
    );
    require!(
        ctx.accounts.program_data.key() == expected_program_data,
        ErrorCode::Unauthorized
    );

    let data = ctx.accounts.program_data.try_borrow_data()?;

    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority
    // - 32 bytes: upgrade_authority pubkey (if Some)
    require!(data.len() >= 45, ErrorCode::Unauthorized);
    require!(data[12] == 1, ErrorCode::Unauthorized); // authority must be Some

    let upgrade_authority =
        Pubkey::try_from(&data[13..45]).map_err(|_| ErrorCode::Unauthorized)?;
    require!(
        upgrade_authority == ctx.accounts.authority.key(),
        ErrorCode::Unauthorized
    );

    let protocol_config = &mut ctx.accounts.protocol_config.load_init()?;

    protocol_config.authority = ctx.accounts.authority.key();
    protocol_config.fee_treasury = fee_treasury;
    protocol_config.bump = ctx.bumps.protocol_config;

    emit!(ProtocolInitialized {
        authority: ctx.accounts.authority.key(),
        fee_treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
