//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Traceboard entitlement crate encapsulating the closed plan, entitlement,
//! and limit identifier sets together with the immutable plan-to-definition
//! lookup consumed by authorization layers across the platform.

pub mod error;
pub mod features;
pub mod limits;
pub mod logging;
pub mod plan;
pub mod registry;

pub use error::EntitlementError;
pub use features::Entitlement;
pub use limits::{EntitlementLimit, LimitValue};
pub use logging::record_entitlement_denied;
pub use plan::{Plan, PlanFamily};
pub use registry::{
    definition_for, has_entitlement, is_within_limit, limit_for, EntitlementRegistry,
    PlanDefinition,
};
