//! Adapters between the gateway's wire formats and the domain types.

pub mod callback;
pub mod csv;
pub mod html;
