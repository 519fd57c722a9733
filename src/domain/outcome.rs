use crate::domain::money::{Amount, Currency};
use crate::domain::response::{ResponseStatus, TransactionResponse};
use crate::error::{GatewayError, Result};
use serde::Serialize;

/// Details the gateway returns for an authorized payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Authorization {
    pub authorization_code: Option<String>,
    pub acquirer_authorization_code: Option<String>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    pub payment_method: Option<String>,
    pub masked_cc: Option<String>,
}

/// Why the gateway declined a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decline {
    pub error_code: String,
    pub error_message: String,
    pub error_detail: String,
}

/// Result of a payment attempt, read from an authentic response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Authorized(Authorization),
    Declined(Decline),
    Cancelled,
}

impl Outcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Outcome::Authorized(_))
    }

    pub fn decline(&self) -> Option<&Decline> {
        match self {
            Outcome::Declined(decline) => Some(decline),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Authorized(_) => "authorized",
            Outcome::Declined(_) => "declined",
            Outcome::Cancelled => "cancelled",
        }
    }
}

/// An outcome together with the transaction it belongs to, as kept by an
/// [`OutcomeStore`](crate::domain::ports::OutcomeStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedOutcome {
    pub transaction_id: String,
    pub refno: Option<String>,
    pub amount: Amount,
    pub currency: Currency,
    pub outcome: Outcome,
}

impl RecordedOutcome {
    /// Builds the record for an authentic response.
    pub fn from_response(response: &TransactionResponse, outcome: Outcome) -> Result<Self> {
        Ok(Self {
            transaction_id: response
                .require(TransactionResponse::TRANSACTION_ID)?
                .to_string(),
            refno: response.reference_number().map(str::to_string),
            amount: response.require(TransactionResponse::AMOUNT)?.parse()?,
            currency: Currency::new(response.require(TransactionResponse::CURRENCY)?).map_err(
                |e| GatewayError::Malformed {
                    field: "currency",
                    reason: e.to_string(),
                },
            )?,
            outcome,
        })
    }
}

/// Maps the `status` of a response whose signature was already checked.
pub struct TransactionOutcomeMapper;

impl TransactionOutcomeMapper {
    pub fn map(response: &TransactionResponse) -> Result<Outcome> {
        let owned = |value: Option<&str>| value.map(str::to_string);

        match response.status()? {
            ResponseStatus::Success => Ok(Outcome::Authorized(Authorization {
                authorization_code: owned(response.authorization_code()),
                acquirer_authorization_code: owned(response.acquirer_authorization_code()),
                response_code: owned(response.response_code()),
                response_message: owned(response.response_message()),
                payment_method: owned(response.payment_method()),
                masked_cc: owned(response.masked_cc()),
            })),
            ResponseStatus::Error => Ok(Outcome::Declined(Decline {
                error_code: response.require(TransactionResponse::ERROR_CODE)?.to_string(),
                error_message: response
                    .require(TransactionResponse::ERROR_MESSAGE)?
                    .to_string(),
                error_detail: response.require(TransactionResponse::ERROR_DETAIL)?.to_string(),
            })),
            ResponseStatus::Cancel => Ok(Outcome::Cancelled),
        }
    }
}
