//! Wire and domain types shared by the mural client crates.

pub mod domain;
pub mod protocol;
