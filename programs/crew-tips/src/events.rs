use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub fee_treasury: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolConfigUpdated {
    pub authority: Pubkey,
    pub old_fee_treasury: Pubkey,
    pub new_fee_treasury: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct SessionCreated {
    pub session: Pubkey,
    pub lead: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub unique_id: Pubkey,
    pub logistics_wallet: Pubkey,
    pub recipient_count: u8,
    /// Display labels in stored order, defaults already resolved
    pub recipient_labels: Vec<String>,
    pub timestamp: i64,
}

#[event]
pub struct RecipientChoiceUpdated {
    pub session: Pubkey,
    pub recipient: Pubkey,
    pub index: u8,
    pub choice: u8,
    pub timestamp: i64,
}

#[event]
pub struct LeadChoiceUpdated {
    pub session: Pubkey,
    pub lead: Pubkey,
    pub choice: u8,
    pub timestamp: i64,
}

#[event]
pub struct TipSplitExecuted {
    pub session: Pubkey,
    pub vault: Pubkey,
    pub total_pool: u64,
    pub total_party_size: u64,
    /// Fee-naive per-head share, for display comparison only
    pub reference_base_share: u64,
    /// The equal take-home amount every keeper received
    pub equal_take_home: u64,
    pub keeper_count: u8,
    pub logistics_amount: u64,
    pub total_fees: u64,
    pub total_gross_transferred: u64,
    pub dust: u64,
    pub lead_final_kept: u64,
    pub executor: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct SessionClosed {
    pub session: Pubkey,
    pub lead: Pubkey,
    pub rent_recovered: u64,
    pub timestamp: i64,
}
