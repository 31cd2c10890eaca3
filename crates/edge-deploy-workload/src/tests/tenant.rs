// crates/edge-deploy-workload/src/tests/tenant.rs
// ============================================================================
// Module: Tenant Rule Tests
// Description: Unit coverage for tenant identifier resolution.
// Purpose: Pin the enterprise tenant suffix and first-match semantics.
// Dependencies: edge-deploy-workload tenant module
// ============================================================================

use crate::tenant::ENTERPRISE_AMERICAS_RULE;
use crate::tenant::TENANT_RULES;
use crate::tenant::TenantRule;
use crate::tenant::resolve_tenant;

#[test]
fn enterprise_tenant_gets_suffix() {
    assert_eq!(resolve_tenant("f5-amer-ent", TENANT_RULES), "f5-amer-ent-qyyfhhfj");
}

#[test]
fn marker_matches_as_substring() {
    assert_eq!(
        resolve_tenant("team-f5-amer-ent-lab", TENANT_RULES),
        "team-f5-amer-ent-lab-qyyfhhfj"
    );
}

#[test]
fn other_tenants_are_unchanged() {
    assert_eq!(resolve_tenant("test-tenant", TENANT_RULES), "test-tenant");
    assert_eq!(resolve_tenant("f5-amer", TENANT_RULES), "f5-amer");
}

#[test]
fn first_matching_rule_wins() {
    let rules = [
        TenantRule {
            marker: "lab",
            suffix: "-one",
        },
        TenantRule {
            marker: "lab",
            suffix: "-two",
        },
    ];
    assert_eq!(resolve_tenant("lab", &rules), "lab-one");
}

#[test]
fn empty_rule_table_is_identity() {
    assert_eq!(resolve_tenant("f5-amer-ent", &[]), "f5-amer-ent");
}

#[test]
fn rule_apply_reports_non_match() {
    assert_eq!(ENTERPRISE_AMERICAS_RULE.apply("acme"), None);
}
