use crate::domain::outcome::{Outcome, RecordedOutcome};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Flat CSV shape of a [`RecordedOutcome`].
#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    transaction_id: &'a str,
    refno: &'a str,
    amount: u64,
    currency: &'a str,
    status: &'static str,
    authorization_code: &'a str,
    error_code: &'a str,
    error_message: &'a str,
}

impl<'a> From<&'a RecordedOutcome> for OutcomeRow<'a> {
    fn from(record: &'a RecordedOutcome) -> Self {
        let (authorization_code, error_code, error_message) = match &record.outcome {
            Outcome::Authorized(auth) => {
                (auth.authorization_code.as_deref().unwrap_or(""), "", "")
            }
            Outcome::Declined(decline) => (
                "",
                decline.error_code.as_str(),
                decline.error_message.as_str(),
            ),
            Outcome::Cancelled => ("", "", ""),
        };
        Self {
            transaction_id: &record.transaction_id,
            refno: record.refno.as_deref().unwrap_or(""),
            amount: record.amount.minor_units(),
            currency: record.currency.as_str(),
            status: record.outcome.status(),
            authorization_code,
            error_code,
            error_message,
        }
    }
}

/// Writes recorded outcomes as CSV, one row per transaction.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcomes(&mut self, records: &[RecordedOutcome]) -> Result<()> {
        for record in records {
            self.writer.serialize(OutcomeRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
