// crates/edge-deploy-core/src/tests/env.rs
// ============================================================================
// Module: Environment Parsing Tests
// Description: Unit coverage for strict environment lookups.
// Purpose: Ensure blank values read as unset and UTF-8 is enforced.
// Dependencies: edge-deploy-core env module
// ============================================================================

//! ## Overview
//! Exercises [`read_trimmed`] against in-memory sources and the process
//! environment reader.

use std::collections::BTreeMap;

use crate::env::EnvError;
use crate::env::EnvSource;
use crate::env::ProcessEnv;
use crate::env::read_trimmed;

fn source(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

#[test]
fn read_trimmed_returns_trimmed_value() {
    let env = source(&[("EDGE_TEST_VALUE", "  acme  ")]);
    assert_eq!(read_trimmed(&env, "EDGE_TEST_VALUE").unwrap(), Some("acme".to_string()));
}

#[test]
fn read_trimmed_treats_blank_as_unset() {
    let env = source(&[("EDGE_TEST_BLANK", "   "), ("EDGE_TEST_EMPTY", "")]);
    assert_eq!(read_trimmed(&env, "EDGE_TEST_BLANK").unwrap(), None);
    assert_eq!(read_trimmed(&env, "EDGE_TEST_EMPTY").unwrap(), None);
    assert_eq!(read_trimmed(&env, "EDGE_TEST_MISSING").unwrap(), None);
}

#[test]
fn process_env_reports_unset_variable() {
    let value = ProcessEnv.lookup("EDGE_DEPLOY_TEST_SURELY_UNSET_VARIABLE").unwrap();
    assert!(value.is_none());
}

#[test]
fn env_error_messages_name_the_variable() {
    let err = EnvError::InvalidUtf8 {
        name: "F5XC_TENANT".to_string(),
    };
    assert_eq!(err.to_string(), "F5XC_TENANT must be valid UTF-8");

    let err = EnvError::Invalid {
        name: "F5XC_WORKLOAD_PORT".to_string(),
        reason: "must be a port".to_string(),
    };
    assert_eq!(err.to_string(), "F5XC_WORKLOAD_PORT must be a port");
}
