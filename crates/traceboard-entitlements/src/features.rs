//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::error::EntitlementError;
use crate::logging::record_unknown_identifier;

/// Binary feature-access tag.
///
/// A plan either grants a tag or it does not; there is no partial grant.
/// The set is closed at build time, so adding a tag forces every plan
/// definition in [`crate::registry`] through review.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum Entitlement {
    /// Interactive prompt playground.
    Playground,
    /// Model-based evaluation runs.
    ModelBasedEvaluations,
    /// Project-scoped RBAC roles.
    RbacProjectRoles,
    /// Billing management surface for cloud tenants.
    CloudBilling,
    /// Multi-tenant SSO for cloud organizations.
    CloudMultiTenantSso,
    /// PostHog analytics integration.
    IntegrationPosthog,
    /// Blob storage export integration.
    IntegrationBlobstorage,
    /// Human annotation queues.
    AnnotationQueues,
    /// UI branding customization on self-hosted deployments.
    SelfHostUiCustomization,
    /// Restricting which users may create organizations on self-hosted
    /// deployments.
    SelfHostAllowedOrganizationCreators,
    /// Prompt experiment runs.
    PromptExperiments,
    /// Retired tag. No feature checks it anymore, but it stays in the closed
    /// set so callers that still reference the identifier keep parsing.
    TraceDeletion,
    /// Organization audit log access.
    AuditLogs,
    /// Configurable data retention policies.
    DataRetention,
    /// Protected prompt labels.
    PromptProtectedLabels,
    /// Custom dashboard authoring.
    CustomDashboards,
    /// Administrative API access.
    AdminApi,
}

/// Entitlements granted to every cloud plan regardless of tier.
pub(crate) const CLOUD_BASE: [Entitlement; 8] = [
    Entitlement::Playground,
    Entitlement::ModelBasedEvaluations,
    Entitlement::CloudBilling,
    Entitlement::IntegrationPosthog,
    Entitlement::AnnotationQueues,
    Entitlement::PromptExperiments,
    Entitlement::TraceDeletion,
    Entitlement::CustomDashboards,
];

/// Entitlements granted to every self-hosted plan, including unlicensed ones.
pub(crate) const SELF_HOSTED_BASE: [Entitlement; 2] =
    [Entitlement::TraceDeletion, Entitlement::CustomDashboards];

impl Entitlement {
    /// Stable identifier string for API serialisation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Entitlement::Playground => "playground",
            Entitlement::ModelBasedEvaluations => "model-based-evaluations",
            Entitlement::RbacProjectRoles => "rbac-project-roles",
            Entitlement::CloudBilling => "cloud-billing",
            Entitlement::CloudMultiTenantSso => "cloud-multi-tenant-sso",
            Entitlement::IntegrationPosthog => "integration-posthog",
            Entitlement::IntegrationBlobstorage => "integration-blobstorage",
            Entitlement::AnnotationQueues => "annotation-queues",
            Entitlement::SelfHostUiCustomization => "self-host-ui-customization",
            Entitlement::SelfHostAllowedOrganizationCreators => {
                "self-host-allowed-organization-creators"
            }
            Entitlement::PromptExperiments => "prompt-experiments",
            Entitlement::TraceDeletion => "trace-deletion",
            Entitlement::AuditLogs => "audit-logs",
            Entitlement::DataRetention => "data-retention",
            Entitlement::PromptProtectedLabels => "prompt-protected-labels",
            Entitlement::CustomDashboards => "custom-dashboards",
            Entitlement::AdminApi => "admin-api",
        }
    }
}

impl fmt::Display for Entitlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entitlement {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use strum::IntoEnumIterator;

        Entitlement::iter()
            .find(|entitlement| entitlement.as_str() == s)
            .ok_or_else(|| {
                record_unknown_identifier("entitlement", s);
                EntitlementError::UnknownEntitlement(s.to_owned())
            })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn identifier_strings_round_trip() {
        for entitlement in Entitlement::iter() {
            let parsed: Entitlement = entitlement
                .as_str()
                .parse()
                .expect("identifier should parse");
            assert_eq!(parsed, entitlement);
        }
    }

    #[test]
    fn unknown_entitlement_is_rejected() {
        let err = "super-admin".parse::<Entitlement>().expect_err("must reject");
        assert_eq!(
            err,
            EntitlementError::UnknownEntitlement("super-admin".to_owned())
        );
    }

    #[test]
    fn family_bases_are_disjoint_from_tier_exclusives() {
        // Base sets may only carry tags shared by every plan of the family.
        assert!(!CLOUD_BASE.contains(&Entitlement::RbacProjectRoles));
        assert!(!SELF_HOSTED_BASE.contains(&Entitlement::Playground));
    }
}
