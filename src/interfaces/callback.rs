//! Decoding of the notification the gateway POSTs back after a payment attempt.

use crate::domain::response::TransactionResponse;
use crate::error::Result;
use std::collections::BTreeMap;
use std::io::Read;

/// Decodes an `application/x-www-form-urlencoded` callback body.
///
/// Repeated keys keep their last value.
pub fn parse_body(body: &[u8]) -> Result<TransactionResponse> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
    let fields: BTreeMap<String, String> = pairs.into_iter().collect();
    tracing::debug!(
        field_count = fields.len(),
        transaction_id = fields
            .get(TransactionResponse::TRANSACTION_ID)
            .map(String::as_str)
            .unwrap_or_default(),
        "Decoded notification body"
    );
    Ok(TransactionResponse::new(fields))
}

/// Reads a whole callback body from `source` and decodes it.
pub fn read_body<R: Read>(mut source: R) -> Result<TransactionResponse> {
    let mut body = Vec::new();
    source.read_to_end(&mut body)?;
    // Bodies saved from a terminal usually end with a newline.
    let trimmed = body.trim_ascii_end();
    parse_body(trimmed)
}
