use crate::error::{GatewayError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Value of the `status` field of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    Error,
    /// The customer left the payment page.
    Cancel,
}

impl FromStr for ResponseStatus {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "success" => Ok(ResponseStatus::Success),
            "error" => Ok(ResponseStatus::Error),
            "cancel" => Ok(ResponseStatus::Cancel),
            other => Err(GatewayError::Malformed {
                field: "status",
                reason: format!("unknown status '{other}'"),
            }),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Success => f.write_str("success"),
            ResponseStatus::Error => f.write_str("error"),
            ResponseStatus::Cancel => f.write_str("cancel"),
        }
    }
}

/// The flat field set the gateway posts back once per payment attempt.
///
/// Nothing read from here is trustworthy until the secondary signature has been
/// checked, see [`crate::domain::signature::SignatureVerifier`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionResponse {
    fields: BTreeMap<String, String>,
}

impl TransactionResponse {
    /// Field names as documented by the gateway.
    pub const STATUS: &'static str = "status";
    pub const MERCHANT_ID: &'static str = "merchantId";
    pub const AMOUNT: &'static str = "amount";
    pub const CURRENCY: &'static str = "currency";
    pub const REFNO: &'static str = "refno";
    pub const TRANSACTION_ID: &'static str = "uppTransactionId";
    pub const SIGN: &'static str = "sign";
    pub const SIGN2: &'static str = "sign2";
    pub const RESPONSE_CODE: &'static str = "responseCode";
    pub const RESPONSE_MESSAGE: &'static str = "responseMessage";
    pub const AUTHORIZATION_CODE: &'static str = "authorizationCode";
    pub const ACQ_AUTHORIZATION_CODE: &'static str = "acqAuthorizationCode";
    pub const PAYMENT_METHOD: &'static str = "pmethod";
    pub const MASKED_CC: &'static str = "maskedCC";
    pub const ALIAS_CC: &'static str = "aliasCC";
    pub const EXP_MONTH: &'static str = "expm";
    pub const EXP_YEAR: &'static str = "expy";
    pub const TEST_ONLY: &'static str = "testOnly";
    pub const ERROR_CODE: &'static str = "errorCode";
    pub const ERROR_MESSAGE: &'static str = "errorMessage";
    pub const ERROR_DETAIL: &'static str = "errorDetail";

    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Raw field lookup. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, name: &'static str) -> Result<&str> {
        self.get(name).ok_or(GatewayError::MissingField(name))
    }

    pub fn status(&self) -> Result<ResponseStatus> {
        self.require(Self::STATUS)?.parse()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.get(Self::TRANSACTION_ID)
    }

    pub fn reference_number(&self) -> Option<&str> {
        self.get(Self::REFNO)
    }

    pub fn amount(&self) -> Option<&str> {
        self.get(Self::AMOUNT)
    }

    pub fn currency(&self) -> Option<&str> {
        self.get(Self::CURRENCY)
    }

    pub fn secondary_signature(&self) -> Option<&str> {
        self.get(Self::SIGN2)
    }

    pub fn response_code(&self) -> Option<&str> {
        self.get(Self::RESPONSE_CODE)
    }

    pub fn response_message(&self) -> Option<&str> {
        self.get(Self::RESPONSE_MESSAGE)
    }

    pub fn authorization_code(&self) -> Option<&str> {
        self.get(Self::AUTHORIZATION_CODE)
    }

    pub fn acquirer_authorization_code(&self) -> Option<&str> {
        self.get(Self::ACQ_AUTHORIZATION_CODE)
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.get(Self::PAYMENT_METHOD)
    }

    pub fn masked_cc(&self) -> Option<&str> {
        self.get(Self::MASKED_CC)
    }

    pub fn creditcard_alias(&self) -> Option<&str> {
        self.get(Self::ALIAS_CC)
    }

    pub fn exp_month(&self) -> Option<&str> {
        self.get(Self::EXP_MONTH)
    }

    pub fn exp_year(&self) -> Option<&str> {
        self.get(Self::EXP_YEAR)
    }

    pub fn is_test_only(&self) -> bool {
        self.get(Self::TEST_ONLY) == Some("yes")
    }
}

impl From<BTreeMap<String, String>> for TransactionResponse {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::new(fields)
    }
}

impl<K, V> FromIterator<(K, V)> for TransactionResponse
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_absent() {
        let response: TransactionResponse =
            [("uppCustomerName", ""), ("refno", "1")].into_iter().collect();

        assert_eq!(response.get("uppCustomerName"), None);
        assert_eq!(response.reference_number(), Some("1"));
    }

    #[test]
    fn test_status_parsing() {
        let response: TransactionResponse = [("status", "success")].into_iter().collect();
        assert_eq!(response.status().unwrap(), ResponseStatus::Success);

        let response: TransactionResponse = [("status", "pending")].into_iter().collect();
        assert!(matches!(
            response.status(),
            Err(GatewayError::Malformed { field: "status", .. })
        ));

        let response = TransactionResponse::default();
        assert!(matches!(
            response.status(),
            Err(GatewayError::MissingField("status"))
        ));
    }

    #[test]
    fn test_card_accessors() {
        let response: TransactionResponse = [
            ("maskedCC", "520000xxxxxx0007"),
            ("expm", "12"),
            ("expy", "15"),
            ("testOnly", "yes"),
        ]
        .into_iter()
        .collect();

        assert_eq!(response.masked_cc(), Some("520000xxxxxx0007"));
        assert_eq!(response.exp_month(), Some("12"));
        assert_eq!(response.exp_year(), Some("15"));
        assert!(response.is_test_only());
    }
}
