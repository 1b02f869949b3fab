use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address_with_program_id,
    token,
    token_2022::{self, spl_token_2022::state::AccountState},
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::errors::ErrorCode;

/// Validates that `destination_info` is the canonical ATA of `expected_owner`
/// for the session mint, then transfers `amount` out of the vault.
///
/// Used for every outgoing transfer of a split: keeper payouts, the pooled
/// logistics transfer, the aggregate fee payment, and the lead's final
/// amount. The session PDA signs as the vault authority.
#[allow(clippy::too_many_arguments)]
pub fn validate_and_send<'info>(
    destination_info: &'info AccountInfo<'info>,
    expected_owner: &Pubkey,
    amount: u64,
    mint: &InterfaceAccount<'info, Mint>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    session_info: &AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    // Account must exist and have data
    require!(!destination_info.data_is_empty(), ErrorCode::TokenAccountMissing);

    // A frozen destination cannot receive; fail the whole split rather than
    // leave a partially executed plan behind
    require!(!is_account_frozen(destination_info), ErrorCode::TokenAccountFrozen);

    // Derive and validate canonical ATA address
    let expected_ata = get_associated_token_address_with_program_id(
        expected_owner,
        &mint.key(),
        &token_program.key(),
    );
    require!(
        destination_info.key() == expected_ata,
        ErrorCode::TokenAccountInvalid
    );

    // Validate account is owned by token program (SPL Token or Token-2022)
    let valid_owner =
        destination_info.owner == &token::ID || destination_info.owner == &token_2022::ID;
    require!(valid_owner, ErrorCode::InvalidTokenProgram);

    // Try to deserialize as token account
    let destination = InterfaceAccount::<'info, TokenAccount>::try_from(destination_info)
        .map_err(|_| ErrorCode::TokenAccountInvalid)?;

    // Verify owner and mint match expected values
    require!(destination.owner == *expected_owner, ErrorCode::TokenAccountWrongOwner);
    require!(destination.mint == mint.key(), ErrorCode::TokenAccountWrongMint);

    // Transfer tokens
    let cpi_accounts = TransferChecked {
        from: vault.to_account_info(),
        mint: mint.to_account_info(),
        to: destination.to_account_info(),
        authority: session_info.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)?;

    Ok(())
}

/// Check if token account is frozen
pub fn is_account_frozen(account_info: &AccountInfo) -> bool {
    TokenAccount::try_deserialize(&mut &account_info.data.borrow()[..])
        .map(|acc| acc.state == AccountState::Frozen)
        .unwrap_or(false)
}
