//! Hosted payment page integration: signed authorize requests going out,
//! verified notifications coming back.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::processor::NotificationProcessor;
pub use application::transaction::WebTransaction;
pub use domain::config::{Environment, SignKey, SigningConfig};
pub use domain::request::AuthorizeParams;
pub use domain::response::TransactionResponse;
pub use error::{GatewayError, Result};
