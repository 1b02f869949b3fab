use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod state;
mod utils;

use instructions::*;
use state::{CrewChoice, LeadChoice};

declare_id!("GBKuaM7SHCGZ7pkK1LMWTKnvMLRUoTkXRu2SLsnR3bxc");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Crew Tips",
    project_url: "https://github.com/crew-tips/program",
    contacts: "link:https://github.com/crew-tips/program/security",
    policy: "https://github.com/crew-tips/program/blob/main/SECURITY.md",
    source_code: "https://github.com/crew-tips/program",
    source_release: "v0.1.0"
}

#[program]
pub mod crew_tips {
    use super::*;

    /// Initializes the protocol configuration with the fee treasury
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_protocol(ctx: Context<InitializeProtocol>, fee_treasury: Pubkey) -> Result<()> {
        instructions::initialize_protocol::handler(ctx, fee_treasury)
    }

    /// Updates the fee treasury wallet
    /// Only callable by the protocol authority
    pub fn update_protocol_config(
        ctx: Context<UpdateProtocolConfig>,
        new_fee_treasury: Pubkey,
    ) -> Result<()> {
        instructions::update_protocol_config::handler(ctx, new_fee_treasury)
    }

    /// Creates a tip session with its crew roster and pool vault
    /// All choices start as Keep
    pub fn create_session<'info>(
        ctx: Context<'_, '_, 'info, 'info, CreateSession<'info>>,
        recipients: Vec<RecipientInput>,
        logistics_wallet: Pubkey,
    ) -> Result<()> {
        instructions::create_session::handler(ctx, recipients, logistics_wallet)
    }

    /// Records one crew recipient's choice (keep / decline / logistics)
    /// Only callable by the session lead
    pub fn set_recipient_choice(
        ctx: Context<SetRecipientChoice>,
        index: u8,
        choice: CrewChoice,
    ) -> Result<()> {
        instructions::set_choice::set_recipient_choice(ctx, index, choice)
    }

    /// Records the lead's own choice
    /// Only callable by the session lead
    pub fn set_lead_choice(ctx: Context<SetLeadChoice>, choice: LeadChoice) -> Result<()> {
        instructions::set_choice::set_lead_choice(ctx, choice)
    }

    /// Executes the fee-fair split of the vault balance
    /// Permissionless - the plan only pays the configured destinations
    pub fn execute_tip_split<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExecuteTipSplit<'info>>,
    ) -> Result<()> {
        instructions::execute_tip_split::handler(ctx)
    }

    /// Closes a finished session and recovers rent
    /// Requires the vault to be empty
    pub fn close_session(ctx: Context<CloseSession>) -> Result<()> {
        instructions::close_session::handler(ctx)
    }
}
