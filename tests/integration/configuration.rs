//! Configuration loading from environment maps.

use crate::assert_error_message_contains;
use crate::common::{env, required_env};
use okta_mcp_server::config::{
    API_TOKEN_VAR, CONCURRENT_LIMIT_VAR, MAX_RETRIES_VAR, ORG_URL_VAR, OktaConfig,
    REQUEST_TIMEOUT_VAR,
};
use okta_mcp_server::error::{ConfigurationError, ErrorKind, OktaMcpError};
use proptest::prelude::*;

#[test]
fn test_required_only_yields_defaults() {
    let config = OktaConfig::parse(&required_env()).unwrap();

    assert_eq!(config.org_url, "https://example.okta.com");
    assert_eq!(config.api_token.expose(), "tok123");
    assert_eq!(config.concurrent_limit, 15);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.max_retries, 1);
}

#[test]
fn test_empty_environment_names_both_variables() {
    let err = OktaConfig::parse(&env(&[])).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::MissingRequired {
            variables: vec![ORG_URL_VAR, API_TOKEN_VAR]
        }
    );
    assert_eq!(
        err.to_string(),
        "Okta configuration required. Set OKTA_CLIENT_ORGURL and OKTA_API_TOKEN environment variables."
    );
}

#[test]
fn test_blank_required_value_counts_as_missing() {
    let result = OktaConfig::parse(&env(&[
        (ORG_URL_VAR, "https://example.okta.com"),
        (API_TOKEN_VAR, "   "),
    ]));
    assert_error_message_contains!(result, API_TOKEN_VAR);
}

#[test]
fn test_overrides_are_trimmed_and_applied() {
    let mut vars = required_env();
    vars.insert(CONCURRENT_LIMIT_VAR.to_string(), " 4 ".to_string());
    vars.insert(REQUEST_TIMEOUT_VAR.to_string(), "90".to_string());
    vars.insert(MAX_RETRIES_VAR.to_string(), "0".to_string());

    let config = OktaConfig::parse(&vars).unwrap();
    assert_eq!(config.concurrent_limit, 4);
    assert_eq!(config.request_timeout, 90);
    assert_eq!(config.max_retries, 0);
    assert_eq!(config.timeout(), std::time::Duration::from_secs(90));
}

#[test]
fn test_non_numeric_optional_is_rejected() {
    let mut vars = required_env();
    vars.insert(REQUEST_TIMEOUT_VAR.to_string(), "thirty".to_string());

    let err = OktaConfig::parse(&vars).unwrap_err();
    assert!(matches!(
        &err,
        ConfigurationError::InvalidNumeric { variable, value, .. }
            if *variable == REQUEST_TIMEOUT_VAR && value == "thirty"
    ));

    let wrapped = OktaMcpError::from(err);
    assert_eq!(wrapped.kind(), ErrorKind::InvalidNumeric);
}

#[test]
fn test_zero_concurrency_is_rejected() {
    let mut vars = required_env();
    vars.insert(CONCURRENT_LIMIT_VAR.to_string(), "0".to_string());
    assert_error_message_contains!(OktaConfig::parse(&vars), "greater than zero");
}

#[test]
fn test_token_never_printed() {
    let mut vars = required_env();
    vars.insert(API_TOKEN_VAR.to_string(), "00s3cr3t-token".to_string());
    let config = OktaConfig::parse(&vars).unwrap();

    let debug = format!("{config:?}");
    assert!(!debug.contains("00s3cr3t-token"));
    assert_eq!(config.api_token.fingerprint().len(), 8);
}

proptest! {
    #[test]
    fn prop_missing_required_always_fails(
        has_url in any::<bool>(),
        has_token in any::<bool>(),
    ) {
        prop_assume!(!(has_url && has_token));
        let mut vars = env(&[]);
        if has_url {
            vars.insert(ORG_URL_VAR.to_string(), "https://example.okta.com".to_string());
        }
        if has_token {
            vars.insert(API_TOKEN_VAR.to_string(), "tok123".to_string());
        }

        match OktaConfig::parse(&vars) {
            Err(ConfigurationError::MissingRequired { variables }) => {
                prop_assert_eq!(variables.contains(&ORG_URL_VAR), !has_url);
                prop_assert_eq!(variables.contains(&API_TOKEN_VAR), !has_token);
            }
            other => prop_assert!(false, "expected MissingRequired, got {:?}", other),
        }
    }

    #[test]
    fn prop_positive_limits_round_trip(limit in 1u32..10_000, timeout in 1u64..86_400) {
        let mut vars = required_env();
        vars.insert(CONCURRENT_LIMIT_VAR.to_string(), limit.to_string());
        vars.insert(REQUEST_TIMEOUT_VAR.to_string(), timeout.to_string());

        let config = OktaConfig::parse(&vars).unwrap();
        prop_assert_eq!(config.concurrent_limit, limit);
        prop_assert_eq!(config.request_timeout, timeout);
    }

    #[test]
    fn prop_non_numeric_retries_fail(value in "[a-zA-Z_\\-]{1,12}") {
        let mut vars = required_env();
        vars.insert(MAX_RETRIES_VAR.to_string(), value);

        let is_invalid_numeric = matches!(
            OktaConfig::parse(&vars),
            Err(ConfigurationError::InvalidNumeric { .. })
        );
        prop_assert!(is_invalid_numeric);
    }
}
