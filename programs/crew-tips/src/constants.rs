// Fee configuration
pub const TRANSFER_FEE_BPS: u64 = 50; // 0.5% per transfer, rounded up
pub const BPS_DENOMINATOR: u64 = 10_000;

// Crew limits
pub const MIN_RECIPIENTS: usize = 1;
pub const MAX_RECIPIENTS: usize = 16;
pub const MAX_LABEL_LEN: usize = 24;

// Account sizes for zero-copy structs
// ProtocolConfig: discriminator (8) + authority (32) + fee_treasury (32) + bump (1)
pub const PROTOCOL_CONFIG_SIZE: usize = 8 + 32 + 32 + 1; // 73 bytes

// TipSession size calculation:
// - discriminator: 8
// - version: 1
// - lead: 32
// - mint: 32
// - vault: 32
// - unique_id: 32
// - logistics_wallet: 32
// - rent_payer: 32
// - bump: 1
// - recipient_count: 1
// - lead_choice: 1
// - recipients: [CrewRecipient; 16] = (32 + 24 + 1) * 16 = 912
// Total: 8 + 1 + 32*6 + 1 + 1 + 1 + 912 = 1116
// NOTE: every field has alignment 1, so #[repr(C)] adds no padding
pub const TIP_SESSION_SIZE: usize = 1116;
