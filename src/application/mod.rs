//! Application layer orchestrating one payment attempt end to end.
//!
//! `WebTransaction` covers the checkout side: it builds the signed authorize
//! request and checks the response for that single attempt. `NotificationProcessor`
//! covers the server-to-server side: it verifies every incoming notification and
//! records the outcome through an `OutcomeStore` port.

pub mod processor;
pub mod transaction;
