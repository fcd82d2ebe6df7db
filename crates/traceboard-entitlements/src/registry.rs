//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::features::{Entitlement, CLOUD_BASE, SELF_HOSTED_BASE};
use crate::limits::{EntitlementLimit, LimitValue};
use crate::logging::record_registry_init;
use crate::plan::Plan;

/// Tags added on top of the cloud base for the team and enterprise tiers.
const CLOUD_TEAM_DELTA: [Entitlement; 7] = [
    Entitlement::RbacProjectRoles,
    Entitlement::AuditLogs,
    Entitlement::DataRetention,
    Entitlement::CloudMultiTenantSso,
    Entitlement::IntegrationBlobstorage,
    Entitlement::PromptProtectedLabels,
    Entitlement::AdminApi,
];

/// Tags added on top of the self-hosted base for the licensed pro tier.
const SELF_HOSTED_PRO_DELTA: [Entitlement; 6] = [
    Entitlement::AnnotationQueues,
    Entitlement::ModelBasedEvaluations,
    Entitlement::Playground,
    Entitlement::PromptExperiments,
    Entitlement::IntegrationPosthog,
    Entitlement::IntegrationBlobstorage,
];

/// Tags added on top of the self-hosted base for the enterprise tier.
/// Superset of the pro delta so the monotonic upgrade property holds.
const SELF_HOSTED_ENTERPRISE_DELTA: [Entitlement; 13] = [
    Entitlement::AnnotationQueues,
    Entitlement::ModelBasedEvaluations,
    Entitlement::Playground,
    Entitlement::PromptExperiments,
    Entitlement::IntegrationPosthog,
    Entitlement::IntegrationBlobstorage,
    Entitlement::RbacProjectRoles,
    Entitlement::SelfHostAllowedOrganizationCreators,
    Entitlement::SelfHostUiCustomization,
    Entitlement::AuditLogs,
    Entitlement::DataRetention,
    Entitlement::PromptProtectedLabels,
    Entitlement::AdminApi,
];

/// Explicit per-plan limit assignment.
///
/// One field per limit keeps the table total by construction: adding a limit
/// identifier forces every plan definition through a compile error until it
/// states a value. Limits are never inherited from the family base because
/// they do not follow the same superset pattern as entitlements.
struct LimitTable {
    annotation_queue_count: LimitValue,
    organization_member_count: LimitValue,
    data_access_days: LimitValue,
    model_based_evaluations_count_evaluators: LimitValue,
    prompt_management_count_prompts: LimitValue,
}

impl LimitTable {
    fn unlimited() -> Self {
        Self {
            annotation_queue_count: LimitValue::Unlimited,
            organization_member_count: LimitValue::Unlimited,
            data_access_days: LimitValue::Unlimited,
            model_based_evaluations_count_evaluators: LimitValue::Unlimited,
            prompt_management_count_prompts: LimitValue::Unlimited,
        }
    }

    fn into_map(self) -> BTreeMap<EntitlementLimit, LimitValue> {
        BTreeMap::from([
            (
                EntitlementLimit::AnnotationQueueCount,
                self.annotation_queue_count,
            ),
            (
                EntitlementLimit::OrganizationMemberCount,
                self.organization_member_count,
            ),
            (EntitlementLimit::DataAccessDays, self.data_access_days),
            (
                EntitlementLimit::ModelBasedEvaluationsCountEvaluators,
                self.model_based_evaluations_count_evaluators,
            ),
            (
                EntitlementLimit::PromptManagementCountPrompts,
                self.prompt_management_count_prompts,
            ),
        ])
    }
}

/// Full entitlement grant attached to a single plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
    entitlements: BTreeSet<Entitlement>,
    limits: BTreeMap<EntitlementLimit, LimitValue>,
}

impl PlanDefinition {
    fn new(family_base: &[Entitlement], tier_delta: &[Entitlement], limits: LimitTable) -> Self {
        let entitlements = family_base
            .iter()
            .chain(tier_delta.iter())
            .copied()
            .collect();
        Self {
            entitlements,
            limits: limits.into_map(),
        }
    }

    /// The set of binary entitlements this plan grants.
    #[must_use]
    pub fn entitlements(&self) -> &BTreeSet<Entitlement> {
        &self.entitlements
    }

    /// The full limit assignment, total over the closed limit set.
    #[must_use]
    pub fn limits(&self) -> &BTreeMap<EntitlementLimit, LimitValue> {
        &self.limits
    }

    /// Membership test; false, never an error, for a tag the plan lacks.
    #[must_use]
    pub fn has_entitlement(&self, entitlement: Entitlement) -> bool {
        self.entitlements.contains(&entitlement)
    }

    /// Ceiling assigned to the given metered resource.
    #[must_use]
    pub fn limit_for(&self, limit: EntitlementLimit) -> LimitValue {
        // Totality over the closed limit set is structural: every definition
        // is built through `LimitTable`, which has one field per variant.
        self.limits
            .get(&limit)
            .copied()
            .expect("limit table is total over the closed limit set")
    }
}

static REGISTRY: Lazy<EntitlementRegistry> = Lazy::new(|| {
    let registry = EntitlementRegistry::build();
    record_registry_init(registry.plans.len());
    registry
});

/// Immutable plan-to-definition table, built once per process.
///
/// All lookups are pure, non-blocking reads over data that never mutates
/// after construction, so the registry is freely shared across threads.
#[derive(Debug)]
pub struct EntitlementRegistry {
    plans: BTreeMap<Plan, PlanDefinition>,
}

impl EntitlementRegistry {
    /// The process-wide registry instance.
    #[must_use]
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    fn build() -> Self {
        let plans = Plan::iter()
            .map(|plan| (plan, Self::definition(plan)))
            .collect();
        Self { plans }
    }

    /// Each plan's entitlement set is the union of its family base with an
    /// explicit per-tier delta; limits are stated per plan, never inherited.
    fn definition(plan: Plan) -> PlanDefinition {
        match plan {
            Plan::CloudHobby => PlanDefinition::new(
                &CLOUD_BASE,
                &[],
                LimitTable {
                    annotation_queue_count: LimitValue::Limited(1),
                    organization_member_count: LimitValue::Limited(2),
                    data_access_days: LimitValue::Limited(30),
                    model_based_evaluations_count_evaluators: LimitValue::Limited(1),
                    prompt_management_count_prompts: LimitValue::Unlimited,
                },
            ),
            Plan::CloudCore => PlanDefinition::new(
                &CLOUD_BASE,
                &[],
                LimitTable {
                    annotation_queue_count: LimitValue::Limited(3),
                    organization_member_count: LimitValue::Unlimited,
                    data_access_days: LimitValue::Limited(90),
                    model_based_evaluations_count_evaluators: LimitValue::Unlimited,
                    prompt_management_count_prompts: LimitValue::Unlimited,
                },
            ),
            Plan::CloudPro => PlanDefinition::new(&CLOUD_BASE, &[], LimitTable::unlimited()),
            Plan::CloudTeam | Plan::CloudEnterprise => {
                PlanDefinition::new(&CLOUD_BASE, &CLOUD_TEAM_DELTA, LimitTable::unlimited())
            }
            Plan::Oss => PlanDefinition::new(
                &SELF_HOSTED_BASE,
                &[],
                LimitTable {
                    annotation_queue_count: LimitValue::Limited(0),
                    organization_member_count: LimitValue::Unlimited,
                    data_access_days: LimitValue::Unlimited,
                    model_based_evaluations_count_evaluators: LimitValue::Unlimited,
                    prompt_management_count_prompts: LimitValue::Unlimited,
                },
            ),
            Plan::SelfHostedPro => PlanDefinition::new(
                &SELF_HOSTED_BASE,
                &SELF_HOSTED_PRO_DELTA,
                LimitTable::unlimited(),
            ),
            Plan::SelfHostedEnterprise => PlanDefinition::new(
                &SELF_HOSTED_BASE,
                &SELF_HOSTED_ENTERPRISE_DELTA,
                LimitTable::unlimited(),
            ),
        }
    }

    /// Full definition for the plan; total over the closed plan set.
    #[must_use]
    pub fn definition_for(&self, plan: Plan) -> &PlanDefinition {
        // The table is built by iterating every `Plan` variant through an
        // exhaustive match, so the lookup cannot miss.
        self.plans
            .get(&plan)
            .expect("plan table is total over the closed plan set")
    }

    /// Whether the plan grants the given binary entitlement.
    #[must_use]
    pub fn has_entitlement(&self, plan: Plan, entitlement: Entitlement) -> bool {
        self.definition_for(plan).has_entitlement(entitlement)
    }

    /// Ceiling the plan assigns to the given metered resource.
    #[must_use]
    pub fn limit_for(&self, plan: Plan, limit: EntitlementLimit) -> LimitValue {
        self.definition_for(plan).limit_for(limit)
    }

    /// Whether a tenant on `plan` holding `current_count` units of the
    /// resource may acquire one more. The caller owns fetching the count.
    #[must_use]
    pub fn is_within_limit(
        &self,
        plan: Plan,
        limit: EntitlementLimit,
        current_count: u64,
    ) -> bool {
        self.limit_for(plan, limit).permits(current_count)
    }
}

/// Full definition for the plan, resolved against the process-wide registry.
#[must_use]
pub fn definition_for(plan: Plan) -> &'static PlanDefinition {
    EntitlementRegistry::global().definition_for(plan)
}

/// Whether the plan grants the given binary entitlement.
#[must_use]
pub fn has_entitlement(plan: Plan, entitlement: Entitlement) -> bool {
    EntitlementRegistry::global().has_entitlement(plan, entitlement)
}

/// Ceiling the plan assigns to the given metered resource.
#[must_use]
pub fn limit_for(plan: Plan, limit: EntitlementLimit) -> LimitValue {
    EntitlementRegistry::global().limit_for(plan, limit)
}

/// Whether a tenant on `plan` holding `current_count` units of the resource
/// may acquire one more.
#[must_use]
pub fn is_within_limit(plan: Plan, limit: EntitlementLimit, current_count: u64) -> bool {
    EntitlementRegistry::global().is_within_limit(plan, limit, current_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_base_is_present_in_every_cloud_plan() {
        for plan in [
            Plan::CloudHobby,
            Plan::CloudCore,
            Plan::CloudPro,
            Plan::CloudTeam,
            Plan::CloudEnterprise,
        ] {
            for entitlement in CLOUD_BASE {
                assert!(
                    has_entitlement(plan, entitlement),
                    "{plan} should grant base tag {entitlement}"
                );
            }
        }
    }

    #[test]
    fn team_and_enterprise_are_entitlement_equivalent() {
        assert_eq!(
            definition_for(Plan::CloudTeam),
            definition_for(Plan::CloudEnterprise)
        );
    }

    #[test]
    fn oss_grants_no_annotation_queues() {
        assert!(!has_entitlement(Plan::Oss, Entitlement::AnnotationQueues));
        assert_eq!(
            limit_for(Plan::Oss, EntitlementLimit::AnnotationQueueCount),
            LimitValue::Limited(0)
        );
    }

    #[test]
    fn enterprise_delta_covers_pro_delta() {
        for entitlement in SELF_HOSTED_PRO_DELTA {
            assert!(SELF_HOSTED_ENTERPRISE_DELTA.contains(&entitlement));
        }
    }
}
