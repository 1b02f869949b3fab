#![allow(ambiguous_glob_reexports)]

pub mod close_session;
pub mod create_session;
pub mod execute_tip_split;
pub mod initialize_protocol;
pub mod set_choice;
pub mod update_protocol_config;

pub use close_session::*;
pub use create_session::*;
pub use execute_tip_split::*;
pub use initialize_protocol::*;
pub use set_choice::*;
pub use update_protocol_config::*;
