//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};
use tracing::{info, warn};

use crate::features::Entitlement;
use crate::plan::Plan;

static ENTITLEMENT_DENIALS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "entitlement_denials_total",
        "Total number of entitlement checks that ended in a denial"
    )
    .expect("metric registration to succeed")
});

static UNKNOWN_IDENTIFIER_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "entitlement_unknown_identifier_total",
        "Total number of identifiers rejected at an ingress point"
    )
    .expect("metric registration to succeed")
});

/// Record an enforcement decision that denied a tenant access to a feature.
///
/// The registry itself never denies anything; the enforcement layer calls
/// this when it turns a negative membership answer into a denial.
pub fn record_entitlement_denied(plan: Plan, entitlement: Entitlement) {
    ENTITLEMENT_DENIALS_TOTAL.inc();
    info!(plan = %plan, entitlement = %entitlement, "entitlement denied");
}

/// Record an identifier outside the closed sets reaching an ingress point.
pub(crate) fn record_unknown_identifier(kind: &str, raw: &str) {
    UNKNOWN_IDENTIFIER_TOTAL.inc();
    warn!(kind = kind, identifier = raw, "unknown identifier rejected");
}

/// Record construction of the process-wide registry.
pub(crate) fn record_registry_init(plan_count: usize) {
    info!(plans = plan_count, "entitlement registry initialised");
}
