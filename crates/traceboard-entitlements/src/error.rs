//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors raised when an identifier outside the closed sets reaches an
/// ingress point.
///
/// Every variant signals a programming or configuration defect in the caller.
/// None of them is transient: the registry is immutable data, so the same
/// input always produces the same outcome and nothing may be retried or
/// defaulted. Swallowing these and answering "not entitled" (or worse,
/// "entitled") for a typo'd identifier is explicitly forbidden.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntitlementError {
    /// Plan identifier is not a member of the closed plan set.
    #[error("unknown plan identifier: {0}")]
    UnknownPlan(String),

    /// Entitlement tag is not a member of the closed entitlement set.
    #[error("unknown entitlement identifier: {0}")]
    UnknownEntitlement(String),

    /// Limit tag is not a member of the closed entitlement limit set.
    #[error("unknown entitlement limit identifier: {0}")]
    UnknownLimit(String),
}
