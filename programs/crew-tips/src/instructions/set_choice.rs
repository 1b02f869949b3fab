use anchor_lang::prelude::*;

use crate::{
    errors::ErrorCode,
    events::{LeadChoiceUpdated, RecipientChoiceUpdated},
    state::{CrewChoice, LeadChoice, TipSession},
};

#[derive(Accounts)]
pub struct SetRecipientChoice<'info> {
    #[account(
        mut,
        seeds = [
            b"tip_session",
            session.load()?.lead.as_ref(),
            session.load()?.mint.as_ref(),
            session.load()?.unique_id.as_ref()
        ],
        bump = session.load()?.bump,
        constraint = session.load()?.lead == lead.key() @ ErrorCode::Unauthorized
    )]
    pub session: AccountLoader<'info, TipSession>,

    pub lead: Signer<'info>,
}

/// Records a crew recipient's choice. The lead operates the session on
/// behalf of the crew; nothing is recomputed here - the split is a single
/// full recompute at execution time.
pub fn set_recipient_choice(
    ctx: Context<SetRecipientChoice>,
    index: u8,
    choice: CrewChoice,
) -> Result<()> {
    let session_key = ctx.accounts.session.key();
    let session = &mut ctx.accounts.session.load_mut()?;

    require!(
        (index as usize) < session.recipient_count as usize,
        ErrorCode::InvalidRecipientIndex
    );

    session.recipients[index as usize].choice = choice.to_u8();

    emit!(RecipientChoiceUpdated {
        session: session_key,
        recipient: session.recipients[index as usize].address,
        index,
        choice: choice.to_u8(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetLeadChoice<'info> {
    #[account(
        mut,
        seeds = [
            b"tip_session",
            session.load()?.lead.as_ref(),
            session.load()?.mint.as_ref(),
            session.load()?.unique_id.as_ref()
        ],
        bump = session.load()?.bump,
        constraint = session.load()?.lead == lead.key() @ ErrorCode::Unauthorized
    )]
    pub session: AccountLoader<'info, TipSession>,

    pub lead: Signer<'info>,
}

/// Records the lead's own choice.
pub fn set_lead_choice(ctx: Context<SetLeadChoice>, choice: LeadChoice) -> Result<()> {
    let session_key = ctx.accounts.session.key();
    let session = &mut ctx.accounts.session.load_mut()?;

    session.lead_choice = choice.to_u8();

    emit!(LeadChoiceUpdated {
        session: session_key,
        lead: session.lead,
        choice: choice.to_u8(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
