// crates/edge-deploy-workload/src/tenant.rs
// ============================================================================
// Module: Tenant Rules
// Description: Named tenant identifier adjustments for object references.
// Purpose: Keep deployment-environment naming quirks auditable in one table.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Object references in the workload payload carry a tenant identifier. Some
//! deployment environments expose a tenant whose reference name differs from
//! the console name by a fixed suffix. Those cases are listed in
//! [`TENANT_RULES`] instead of being embedded in payload construction.

// ============================================================================
// SECTION: Types
// ============================================================================

/// Appends `suffix` to any tenant whose name contains `marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantRule {
    /// Substring that selects the rule.
    pub marker: &'static str,
    /// Suffix appended to the tenant identifier.
    pub suffix: &'static str,
}

impl TenantRule {
    /// Returns the adjusted tenant when this rule applies.
    #[must_use]
    pub fn apply(&self, tenant: &str) -> Option<String> {
        tenant.contains(self.marker).then(|| format!("{tenant}{}", self.suffix))
    }
}

// ============================================================================
// SECTION: Rule Table
// ============================================================================

/// Enterprise Americas tenant: object references use the suffixed identifier.
pub const ENTERPRISE_AMERICAS_RULE: TenantRule = TenantRule {
    marker: "f5-amer-ent",
    suffix: "-qyyfhhfj",
};

/// Built-in tenant rules, evaluated in order.
pub const TENANT_RULES: &[TenantRule] = &[ENTERPRISE_AMERICAS_RULE];

/// Resolves the tenant used in object references. The first matching rule
/// wins; with no match the tenant is returned unchanged.
#[must_use]
pub fn resolve_tenant(tenant: &str, rules: &[TenantRule]) -> String {
    rules.iter().find_map(|rule| rule.apply(tenant)).unwrap_or_else(|| tenant.to_string())
}
