use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    constants::{MAX_RECIPIENTS, TIP_SESSION_SIZE},
    errors::ErrorCode,
    events::SessionCreated,
    state::{encode_label, validate_roster, CrewChoice, CrewRecipient, LeadChoice, TipSession},
};

#[derive(Accounts)]
#[instruction(recipients: Vec<RecipientInput>, logistics_wallet: Pubkey)]
pub struct CreateSession<'info> {
    #[account(
        init,
        payer = payer,
        space = TIP_SESSION_SIZE,
        seeds = [
            b"tip_session",
            lead.key().as_ref(),
            mint.key().as_ref(),
            unique_id.key().as_ref()
        ],
        bump
    )]
    pub session: AccountLoader<'info, TipSession>,

    /// CHECK: Used only as PDA seed for uniqueness
    pub unique_id: AccountInfo<'info>,

    /// The session lead (operator), who will control choices and receive dust
    pub lead: Signer<'info>,

    /// Account paying rent for session and vault (can differ from the lead)
    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = session,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Input struct for crew recipients (used in instruction parameters)
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct RecipientInput {
    pub address: Pubkey,
    /// Display label; empty means "default to Recipient {n}"
    pub label: String,
}

/// Creates a new tip session with its pool vault. Every choice starts as
/// Keep (crew and lead alike); the operator adjusts them before execution.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, CreateSession<'info>>,
    recipients: Vec<RecipientInput>,
    logistics_wallet: Pubkey,
) -> Result<()> {
    let recipient_count = recipients.len();

    let addresses: Vec<Pubkey> = recipients.iter().map(|r| r.address).collect();
    validate_roster(&addresses)?;
    require!(logistics_wallet != Pubkey::default(), ErrorCode::ZeroAddress);

    let session = &mut ctx.accounts.session.load_init()?;

    session.version = 1;
    session.lead = ctx.accounts.lead.key();
    session.mint = ctx.accounts.mint.key();
    session.vault = ctx.accounts.vault.key();
    session.unique_id = ctx.accounts.unique_id.key();
    session.logistics_wallet = logistics_wallet;
    session.rent_payer = ctx.accounts.payer.key();
    session.bump = ctx.bumps.session;
    session.recipient_count = recipient_count as u8;
    session.lead_choice = LeadChoice::default().to_u8();

    for (i, recipient) in recipients.iter().enumerate() {
        session.recipients[i] = CrewRecipient {
            address: recipient.address,
            label: encode_label(&recipient.label)?,
            choice: CrewChoice::default().to_u8(),
        };
    }

    // Clear the unused tail
    for i in recipient_count..MAX_RECIPIENTS {
        session.recipients[i] = CrewRecipient::default();
    }

    // Resolved labels (defaults filled in) so clients never re-derive them
    let recipient_labels: Vec<String> = (0..recipient_count)
        .map(|i| session.recipients[i].display_label(i))
        .collect();

    emit!(SessionCreated {
        session: ctx.accounts.session.key(),
        lead: ctx.accounts.lead.key(),
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        unique_id: ctx.accounts.unique_id.key(),
        logistics_wallet,
        recipient_count: recipient_count as u8,
        recipient_labels,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
