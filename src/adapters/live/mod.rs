//! Live adapters that talk to the real services.

pub mod sanity;
pub mod x;
