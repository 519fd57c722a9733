//! Gateway data model and the signing contract.

pub mod config;
pub mod money;
pub mod outcome;
pub mod ports;
pub mod request;
pub mod response;
pub mod signature;
