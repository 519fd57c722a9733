use crate::error::{GatewayError, Result};
use std::fmt;
use std::str::FromStr;

pub const ENV_MERCHANT_ID: &str = "UPP_MERCHANT_ID";
pub const ENV_SIGN_KEY: &str = "UPP_SIGN_KEY";
pub const ENV_SIGN_KEY_2: &str = "UPP_SIGN_KEY_2";
pub const ENV_ENVIRONMENT: &str = "UPP_ENVIRONMENT";

/// Gateway environment the merchant account talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// The pilot system. Cards are never charged.
    #[default]
    Test,
    Live,
}

impl Environment {
    /// URL of the hosted payment page the authorize form is POSTed to.
    pub fn web_authorize_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://pilot.datatrans.biz/upp/jsp/upStart.jsp",
            Environment::Live => "https://payment.datatrans.biz/upp/jsp/upStart.jsp",
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" | "development" | "pilot" => Ok(Environment::Test),
            "live" | "production" => Ok(Environment::Live),
            other => Err(GatewayError::Config(format!(
                "Unknown environment '{other}'. Available: test, live"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => f.write_str("test"),
            Environment::Live => f.write_str("live"),
        }
    }
}

/// HMAC key material, decoded from the hex string shown in the merchant backoffice.
#[derive(Clone, PartialEq, Eq)]
pub struct SignKey(Vec<u8>);

impl SignKey {
    pub fn from_hex(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(GatewayError::Config("Sign key must not be empty".to_string()));
        }
        let bytes = hex::decode(value)
            .map_err(|e| GatewayError::Config(format!("Sign key is not valid hex: {e}")))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignKey(***)")
    }
}

/// Merchant-wide signing configuration.
///
/// Loaded once at startup and shared read-only (usually behind an `Arc`).
/// The primary key signs outbound requests; inbound responses are accepted
/// when they verify against either key, which allows rotating keys without
/// rejecting notifications that are still in flight.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    merchant_id: String,
    sign_key: SignKey,
    sign_key_2: Option<SignKey>,
    environment: Environment,
}

impl SigningConfig {
    pub fn new(
        merchant_id: impl Into<String>,
        sign_key: SignKey,
        sign_key_2: Option<SignKey>,
        environment: Environment,
    ) -> Result<Self> {
        let merchant_id = merchant_id.into();
        if merchant_id.trim().is_empty() {
            return Err(GatewayError::Config("Merchant id is required".to_string()));
        }
        Ok(Self {
            merchant_id,
            sign_key,
            sign_key_2,
            environment,
        })
    }

    /// Builds the configuration from `UPP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let merchant_id = present(ENV_MERCHANT_ID)
            .ok_or_else(|| GatewayError::Config(format!("{ENV_MERCHANT_ID} is not set")))?;
        let sign_key = present(ENV_SIGN_KEY)
            .ok_or_else(|| GatewayError::Config(format!("{ENV_SIGN_KEY} is not set")))
            .and_then(|v| SignKey::from_hex(&v))?;
        let sign_key_2 = present(ENV_SIGN_KEY_2)
            .map(|v| SignKey::from_hex(&v))
            .transpose()?;
        let environment = match present(ENV_ENVIRONMENT) {
            Some(v) => v.parse::<Environment>()?,
            None => Environment::default(),
        };

        tracing::debug!(
            merchant_id = %merchant_id,
            environment = %environment,
            rotation = sign_key_2.is_some(),
            "Loaded signing configuration"
        );

        Self::new(merchant_id, sign_key, sign_key_2, environment)
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Key used for every outbound signature.
    pub fn primary_key(&self) -> &SignKey {
        &self.sign_key
    }

    /// All keys an inbound signature may have been produced with, primary first.
    pub fn keys(&self) -> impl Iterator<Item = &SignKey> {
        std::iter::once(&self.sign_key).chain(self.sign_key_2.as_ref())
    }
}
