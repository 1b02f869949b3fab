use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Tip pool must be greater than zero")]
    InvalidPoolAmount,

    #[msg("Session has no crew recipients")]
    NoParticipants,

    #[msg("Recipient count must be between 1 and 16")]
    InvalidRecipientCount,

    #[msg("Duplicate recipient address")]
    DuplicateRecipient,

    #[msg("Address cannot be zero")]
    ZeroAddress,

    #[msg("Recipient label exceeds 24 bytes")]
    LabelTooLong,

    #[msg("Unknown choice encoding")]
    InvalidChoice,

    #[msg("Recipient index out of range")]
    InvalidRecipientIndex,

    #[msg("Token account does not exist")]
    TokenAccountMissing,

    #[msg("Token account is invalid")]
    TokenAccountInvalid,

    #[msg("Token account has wrong owner")]
    TokenAccountWrongOwner,

    #[msg("Token account has wrong mint")]
    TokenAccountWrongMint,

    #[msg("Token account is frozen")]
    TokenAccountFrozen,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Vault must be empty for this operation")]
    VaultNotEmpty,

    #[msg("Not enough accounts provided in remaining_accounts")]
    InsufficientRemainingAccounts,

    #[msg("Invalid fee treasury account")]
    InvalidFeeTreasury,

    #[msg("Invalid token program")]
    InvalidTokenProgram,

    #[msg("Invalid rent destination")]
    InvalidRentDestination,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Unauthorized")]
    Unauthorized,
}
