use crate::domain::response::TransactionResponse;
use crate::error::{GatewayError, Result};
use std::collections::BTreeMap;
use std::io::Read;

/// Reads notifications from a CSV export.
///
/// The header row names the gateway fields (`status`, `amount`, `sign2`, ...);
/// every following row is one notification. Columns may differ between exports,
/// so records are read as plain field maps and empty cells count as absent.
/// Only header names are trimmed; values reach signature verification exactly
/// as exported.
pub struct NotificationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> NotificationReader<R> {
    /// Creates a new `NotificationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads one notification per record.
    pub fn notifications(self) -> impl Iterator<Item = Result<TransactionResponse>> {
        self.reader
            .into_deserialize::<BTreeMap<String, String>>()
            .map(|result| result.map(TransactionResponse::new).map_err(GatewayError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "status, amount, currency, uppTransactionId, sign2\n\
                    success,1000,CHF,110808173520119430,a9571428be4d9d37b88988656984bfbf\n\
                    cancel,2500,EUR,42,";
        let reader = NotificationReader::new(data.as_bytes());
        let results: Vec<Result<TransactionResponse>> = reader.notifications().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.amount(), Some("1000"));
        assert_eq!(first.transaction_id(), Some("110808173520119430"));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.secondary_signature(), None);
    }

    #[test]
    fn test_reader_ignores_unnamed_trailing_cells() {
        let data = "status, amount\nsuccess,1000,extra";
        let reader = NotificationReader::new(data.as_bytes());
        let results: Vec<Result<TransactionResponse>> = reader.notifications().collect();

        let response = results[0].as_ref().unwrap();
        assert_eq!(response.amount(), Some("1000"));
        assert_eq!(response.get("extra"), None);
    }

    #[test]
    fn test_reader_keeps_values_verbatim() {
        let data = "amount , errorDetail\n 1000,Card  declined ";
        let reader = NotificationReader::new(data.as_bytes());
        let results: Vec<Result<TransactionResponse>> = reader.notifications().collect();

        let response = results[0].as_ref().unwrap();
        assert_eq!(response.amount(), Some(" 1000"));
        assert_eq!(response.get("errorDetail"), Some("Card  declined "));
    }
}
