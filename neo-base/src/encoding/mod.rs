// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

mod base58;
pub mod bin;
mod hex;
mod wif;

pub use base58::*;
pub use bin::*;
pub use self::hex::*;
pub use wif::*;
