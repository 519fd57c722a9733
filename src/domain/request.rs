use crate::domain::config::SigningConfig;
use crate::domain::money::{Amount, Currency};
use crate::domain::signature::SignatureVerifier;
use crate::error::{GatewayError, Result};
use std::fmt;
use std::str::FromStr;

/// The `reqtype` of an authorize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestType {
    /// Authorization only; settlement happens later.
    #[default]
    AuthorizeOnly,
    /// Authorization with immediate settlement.
    AuthorizeAndCapture,
}

impl RequestType {
    pub fn code(&self) -> &'static str {
        match self {
            RequestType::AuthorizeOnly => "NOA",
            RequestType::AuthorizeAndCapture => "CAA",
        }
    }
}

impl FromStr for RequestType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NOA" => Ok(RequestType::AuthorizeOnly),
            "CAA" => Ok(RequestType::AuthorizeAndCapture),
            other => Err(GatewayError::ValidationError(format!(
                "Unknown request type '{other}'"
            ))),
        }
    }
}

/// Caller-supplied part of an authorize request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizeParams {
    pub refno: String,
    pub amount: u64,
    pub currency: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    /// Ask the payment page to collect the customer's address details.
    pub customer_details: bool,
    pub request_type: RequestType,
}

/// One `<input type="hidden">` of the outbound form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: &'static str,
    pub value: Option<String>,
}

impl HiddenField {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }
}

/// A signed authorize request, ready to be rendered as a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    merchant_id: String,
    refno: String,
    amount: Amount,
    currency: Currency,
    customer_email: Option<String>,
    customer_name: Option<String>,
    customer_details: bool,
    request_type: RequestType,
    signature: String,
}

impl TransactionRequest {
    pub fn new(config: &SigningConfig, params: AuthorizeParams) -> Result<Self> {
        let refno = params.refno.trim().to_string();
        if refno.is_empty() {
            return Err(GatewayError::ValidationError(
                "Reference number must not be empty".to_string(),
            ));
        }
        let amount = Amount::new(params.amount)?;
        let currency = Currency::new(&params.currency)?;
        let signature =
            SignatureVerifier::new(config).request_signature(amount, &currency, &refno)?;

        Ok(Self {
            merchant_id: config.merchant_id().to_string(),
            refno,
            amount,
            currency,
            customer_email: params.customer_email.filter(|v| !v.trim().is_empty()),
            customer_name: params.customer_name.filter(|v| !v.trim().is_empty()),
            customer_details: params.customer_details,
            request_type: params.request_type,
            signature,
        })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn refno(&self) -> &str {
        &self.refno
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The hidden inputs the payment page expects, in the order it documents them.
    ///
    /// `uppCustomerDetails` is always sent but only carries a value when
    /// address collection was requested. Customer name and email are left
    /// out entirely when not known.
    pub fn hidden_fields(&self) -> Vec<HiddenField> {
        let mut fields = vec![
            HiddenField::new("merchantId", self.merchant_id.as_str()),
            HiddenField::new("hiddenMode", "yes"),
            HiddenField::new("reqtype", self.request_type.code()),
            HiddenField::new("amount", self.amount.to_string()),
            HiddenField::new("currency", self.currency.as_str()),
            HiddenField::new("useAlias", "yes"),
            HiddenField::new("sign", self.signature.as_str()),
            HiddenField::new("refno", self.refno.as_str()),
            HiddenField {
                name: "uppCustomerDetails",
                value: self.customer_details.then(|| "yes".to_string()),
            },
        ];
        if let Some(name) = &self.customer_name {
            fields.push(HiddenField::new("uppCustomerName", name.as_str()));
        }
        if let Some(email) = &self.customer_email {
            fields.push(HiddenField::new("uppCustomerEmail", email.as_str()));
        }
        fields
    }
}

impl fmt::Display for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.refno,
            self.amount,
            self.currency,
            self.request_type.code()
        )
    }
}
