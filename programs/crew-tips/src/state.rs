use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_LABEL_LEN, MAX_RECIPIENTS, MIN_RECIPIENTS},
    errors::ErrorCode,
};

/// What a crew recipient wants done with their share.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrewChoice {
    /// Receive the equal take-home amount via an individual transfer.
    #[default]
    Keep,
    /// Forfeit the share; it is redistributed among the active participants.
    Decline,
    /// Route the share into the single pooled logistics transfer.
    Logistics,
}

/// What the lead wants done with their own share. Kept as a separate type:
/// the lead's retention is fee-free and their donation pools with the crew's,
/// so lead and crew states are never interchangeable.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeadChoice {
    #[default]
    Keep,
    Decline,
    Logistics,
}

impl CrewChoice {
    pub fn to_u8(self) -> u8 {
        match self {
            CrewChoice::Keep => 0,
            CrewChoice::Decline => 1,
            CrewChoice::Logistics => 2,
        }
    }

    pub fn from_u8(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(CrewChoice::Keep),
            1 => Ok(CrewChoice::Decline),
            2 => Ok(CrewChoice::Logistics),
            _ => err!(ErrorCode::InvalidChoice),
        }
    }
}

impl LeadChoice {
    pub fn to_u8(self) -> u8 {
        match self {
            LeadChoice::Keep => 0,
            LeadChoice::Decline => 1,
            LeadChoice::Logistics => 2,
        }
    }

    pub fn from_u8(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(LeadChoice::Keep),
            1 => Ok(LeadChoice::Decline),
            2 => Ok(LeadChoice::Logistics),
            _ => err!(ErrorCode::InvalidChoice),
        }
    }
}

/// Global protocol configuration (single instance)
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct ProtocolConfig {
    /// Authority that can update config (initially program upgrade authority)
    pub authority: Pubkey,
    /// Wallet that receives all transfer fees (the money sink)
    pub fee_treasury: Pubkey,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
}

/// One tip-splitting session: lead, crew roster with choices, and the vault
/// holding the pool. A session is created per tip, choices are recorded, and
/// the split executes as one full recompute over the vault balance.
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct TipSession {
    /// Schema version for future upgrades
    pub version: u8,
    /// The session lead (operator); signs session mutations, receives dust
    pub lead: Pubkey,
    /// Token mint the tip is denominated in
    pub mint: Pubkey,
    /// Vault address (PDA-owned ATA) holding the tip pool
    pub vault: Pubkey,
    /// Unique identifier enabling multiple sessions per lead/mint
    pub unique_id: Pubkey,
    /// Wallet receiving the pooled logistics transfer
    pub logistics_wallet: Pubkey,
    /// Account that paid rent, refunded on close
    pub rent_payer: Pubkey,
    /// Bump seed for PDA derivation
    pub bump: u8,
    /// Number of active crew recipients (1-16)
    pub recipient_count: u8,
    /// Lead's choice, encoded via `LeadChoice::to_u8`
    pub lead_choice: u8,
    /// Fixed array of recipients (use recipient_count for active entries)
    pub recipients: [CrewRecipient; MAX_RECIPIENTS],
}

/// Crew recipient stored in a session
#[zero_copy(unsafe)]
#[repr(C)]
#[derive(Default)]
pub struct CrewRecipient {
    /// Recipient's wallet address
    pub address: Pubkey,
    /// Display label, NUL-padded UTF-8; all zeroes means "use the default"
    pub label: [u8; MAX_LABEL_LEN],
    /// Choice encoded via `CrewChoice::to_u8`
    pub choice: u8,
}

impl CrewRecipient {
    /// Display label, falling back to `Recipient {n}` (1-based position)
    /// when none was provided.
    pub fn display_label(&self, position: usize) -> String {
        let end = self.label.iter().position(|&b| b == 0).unwrap_or(MAX_LABEL_LEN);
        match core::str::from_utf8(&self.label[..end]) {
            Ok(s) if !s.is_empty() => s.to_string(),
            _ => format!("Recipient {}", position + 1),
        }
    }
}

/// Validates a crew roster before it is stored: count bounds, no zero
/// addresses, no duplicates.
pub fn validate_roster(addresses: &[Pubkey]) -> Result<()> {
    require!(addresses.len() >= MIN_RECIPIENTS, ErrorCode::NoParticipants);
    require!(addresses.len() <= MAX_RECIPIENTS, ErrorCode::InvalidRecipientCount);

    for (i, address) in addresses.iter().enumerate() {
        require!(*address != Pubkey::default(), ErrorCode::ZeroAddress);
        for other in &addresses[i + 1..] {
            require!(address != other, ErrorCode::DuplicateRecipient);
        }
    }

    Ok(())
}

/// Encodes a label into its fixed NUL-padded storage form.
pub fn encode_label(label: &str) -> Result<[u8; MAX_LABEL_LEN]> {
    let bytes = label.as_bytes();
    require!(bytes.len() <= MAX_LABEL_LEN, ErrorCode::LabelTooLong);
    let mut out = [0u8; MAX_LABEL_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

// Compile-time size assertions to catch accidental struct changes
// ProtocolConfig: authority (32) + fee_treasury (32) + bump (1) = 65
const _: () = assert!(std::mem::size_of::<ProtocolConfig>() == 65);

// CrewRecipient: address (32) + label (24) + choice (1) = 57, all align 1
const _: () = assert!(std::mem::size_of::<CrewRecipient>() == 57);

// TipSession: see constants.rs for the full breakdown
const _: () = assert!(std::mem::size_of::<TipSession>() == 1108);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crew_choice_round_trips() {
        for choice in [CrewChoice::Keep, CrewChoice::Decline, CrewChoice::Logistics] {
            assert_eq!(CrewChoice::from_u8(choice.to_u8()).unwrap(), choice);
        }
    }

    #[test]
    fn lead_choice_round_trips() {
        for choice in [LeadChoice::Keep, LeadChoice::Decline, LeadChoice::Logistics] {
            assert_eq!(LeadChoice::from_u8(choice.to_u8()).unwrap(), choice);
        }
    }

    #[test]
    fn invalid_choice_encoding_rejected() {
        assert_eq!(
            CrewChoice::from_u8(3).unwrap_err(),
            ErrorCode::InvalidChoice.into()
        );
        assert_eq!(
            LeadChoice::from_u8(255).unwrap_err(),
            ErrorCode::InvalidChoice.into()
        );
    }

    #[test]
    fn default_choices_are_keep() {
        assert_eq!(CrewChoice::default(), CrewChoice::Keep);
        assert_eq!(LeadChoice::default(), LeadChoice::Keep);
        assert_eq!(CrewRecipient::default().choice, CrewChoice::Keep.to_u8());
    }

    #[test]
    fn label_encodes_and_displays() {
        let recipient = CrewRecipient {
            address: Pubkey::new_unique(),
            label: encode_label("Door Gunner").unwrap(),
            choice: 0,
        };
        assert_eq!(recipient.display_label(0), "Door Gunner");
    }

    #[test]
    fn blank_label_falls_back_to_position() {
        let recipient = CrewRecipient::default();
        assert_eq!(recipient.display_label(0), "Recipient 1");
        assert_eq!(recipient.display_label(4), "Recipient 5");
    }

    #[test]
    fn roster_accepts_valid_sizes() {
        assert!(validate_roster(&[Pubkey::new_unique()]).is_ok());
        let full: Vec<Pubkey> = (0..MAX_RECIPIENTS).map(|_| Pubkey::new_unique()).collect();
        assert!(validate_roster(&full).is_ok());
    }

    #[test]
    fn empty_roster_rejected() {
        assert_eq!(
            validate_roster(&[]).unwrap_err(),
            ErrorCode::NoParticipants.into()
        );
    }

    #[test]
    fn oversized_roster_rejected() {
        let crowd: Vec<Pubkey> = (0..MAX_RECIPIENTS + 1)
            .map(|_| Pubkey::new_unique())
            .collect();
        assert_eq!(
            validate_roster(&crowd).unwrap_err(),
            ErrorCode::InvalidRecipientCount.into()
        );
    }

    #[test]
    fn zero_address_rejected() {
        let roster = [Pubkey::new_unique(), Pubkey::default()];
        assert_eq!(
            validate_roster(&roster).unwrap_err(),
            ErrorCode::ZeroAddress.into()
        );
    }

    #[test]
    fn duplicate_address_rejected() {
        let twice = Pubkey::new_unique();
        let roster = [twice, Pubkey::new_unique(), twice];
        assert_eq!(
            validate_roster(&roster).unwrap_err(),
            ErrorCode::DuplicateRecipient.into()
        );
    }

    #[test]
    fn oversized_label_rejected() {
        let too_long = "x".repeat(MAX_LABEL_LEN + 1);
        assert_eq!(
            encode_label(&too_long).unwrap_err(),
            ErrorCode::LabelTooLong.into()
        );
        // Exactly at the limit is fine
        let at_limit = "y".repeat(MAX_LABEL_LEN);
        assert!(encode_label(&at_limit).is_ok());
    }
}
