#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::process::Command;
use std::sync::Arc;
use upp_gateway::{AuthorizeParams, Environment, SignKey, SigningConfig, TransactionResponse};

pub const MERCHANT_ID: &str = "1100000000";
pub const SIGN_KEY: &str = "d777c17ba2010282c2d2350a68b441ca07a799d294bfaa630b7c8442207c0b69703cc55775b0ca5a4e455b818a9bb10a43669c0c20ce31f4a43f10e0cabb9525";
/// A newer key the merchant is rotating to.
pub const ROTATED_SIGN_KEY: &str =
    "5e1f0a3c9b7d24e68f0c1a2b3d4e5f60718293a4b5c6d7e8f9a0b1c2d3e4f5a6";

/// The `upp` binary configured with the test merchant.
pub fn upp() -> Command {
    let mut cmd = Command::new(cargo_bin!("upp"));
    cmd.env("UPP_MERCHANT_ID", MERCHANT_ID)
        .env("UPP_SIGN_KEY", SIGN_KEY)
        .env_remove("UPP_SIGN_KEY_2")
        .env("UPP_ENVIRONMENT", "test");
    cmd
}

pub fn config() -> Arc<SigningConfig> {
    Arc::new(
        SigningConfig::new(
            MERCHANT_ID,
            SignKey::from_hex(SIGN_KEY).unwrap(),
            None,
            Environment::Test,
        )
        .unwrap(),
    )
}

/// Primary key is the new one, the old key is still accepted.
pub fn rotating_config() -> Arc<SigningConfig> {
    Arc::new(
        SigningConfig::new(
            MERCHANT_ID,
            SignKey::from_hex(ROTATED_SIGN_KEY).unwrap(),
            Some(SignKey::from_hex(SIGN_KEY).unwrap()),
            Environment::Test,
        )
        .unwrap(),
    )
}

pub fn valid_params() -> AuthorizeParams {
    AuthorizeParams {
        refno: "ABCDEF".to_string(),
        amount: 1000,
        currency: "CHF".to_string(),
        customer_email: Some("customer@email.com".to_string()),
        ..Default::default()
    }
}

pub fn successful_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("status", "success"),
        ("returnCustomerCountry", "CHE"),
        ("sign", "174b7758e3b4342be827531a1d9c290f"),
        ("aliasCC", "70323122544311173"),
        ("maskedCC", "520000xxxxxx0007"),
        ("responseMessage", "Authorized"),
        ("useAlias", "yes"),
        ("expm", "12"),
        ("responseCode", "01"),
        ("sign2", "a9571428be4d9d37b88988656984bfbf"),
        ("testOnly", "yes"),
        ("currency", "CHF"),
        ("amount", "1000"),
        ("hiddenMode", "yes"),
        ("expy", "15"),
        ("merchantId", "1100000000"),
        ("authorizationCode", "521029462"),
        ("uppTransactionId", "110808173520119430"),
        ("refno", "1"),
        ("uppMsgType", "web"),
        ("uppCustomerName", ""),
        ("pmethod", "ECA"),
        ("reqtype", "NOA"),
        ("uppCustomerEmail", "customer@email.com"),
        ("acqAuthorizationCode", "173520"),
    ]
}

pub fn failed_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("status", "error"),
        ("returnCustomerCountry", "CHE"),
        ("sign", "174b7758e3b4342be827531a1d9c290f"),
        ("sign2", "0966153d4099745f9bc11a0cdef5f24e"),
        ("aliasCC", "70323122544311173"),
        ("maskedCC", "520000xxxxxx0007"),
        ("errorMessage", "declined"),
        ("useAlias", "yes"),
        ("expm", "12"),
        ("errorCode", "1403"),
        ("testOnly", "yes"),
        ("currency", "CHF"),
        ("amount", "1000"),
        ("hiddenMode", "yes"),
        ("expy", "14"),
        ("merchantId", "1100000000"),
        ("errorDetail", "Declined"),
        ("uppTransactionId", "110808173951050102"),
        ("refno", "1"),
        ("uppMsgType", "web"),
        ("uppCustomerName", ""),
        ("pmethod", "ECA"),
        ("reqtype", "NOA"),
        ("uppCustomerEmail", "customer@email.com"),
    ]
}

pub fn response(fields: Vec<(&'static str, &'static str)>) -> TransactionResponse {
    fields.into_iter().collect()
}

/// Replaces (or adds) one field.
pub fn with_field(
    mut fields: Vec<(&'static str, &'static str)>,
    name: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    fields.retain(|(k, _)| *k != name);
    fields.push((name, value));
    fields
}

/// Encodes fields the way the gateway posts them.
pub fn urlencoded(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}
