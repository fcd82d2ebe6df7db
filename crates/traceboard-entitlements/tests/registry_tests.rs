//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "module"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Static plan entitlement registry and limit resolution."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use serde_json::json;
use strum::IntoEnumIterator;
use traceboard_entitlements::registry;
use traceboard_entitlements::{
    Entitlement, EntitlementError, EntitlementLimit, LimitValue, Plan, PlanFamily,
};

/// Cloud tiers in ascending commercial order; team and enterprise are
/// entitlement-equivalent, so either order of the final pair is valid.
const CLOUD_ORDER: [Plan; 5] = [
    Plan::CloudHobby,
    Plan::CloudCore,
    Plan::CloudPro,
    Plan::CloudTeam,
    Plan::CloudEnterprise,
];

/// Self-hosted tiers in ascending commercial order.
const SELF_HOSTED_ORDER: [Plan; 3] = [Plan::Oss, Plan::SelfHostedPro, Plan::SelfHostedEnterprise];

fn assert_monotonic(order: &[Plan]) {
    for pair in order.windows(2) {
        let lower = registry::definition_for(pair[0]);
        let higher = registry::definition_for(pair[1]);
        assert!(
            lower.entitlements().is_subset(higher.entitlements()),
            "{} entitlements should be a subset of {}",
            pair[0],
            pair[1]
        );
        for limit in EntitlementLimit::iter() {
            assert!(
                higher
                    .limit_for(limit)
                    .at_least_as_loose_as(&lower.limit_for(limit)),
                "{limit} must not tighten moving from {} to {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn limit_table_is_total_for_every_plan() {
    for plan in Plan::iter() {
        let definition = registry::definition_for(plan);
        for limit in EntitlementLimit::iter() {
            // `limit_for` panics on a missing assignment, so reaching the
            // assertion below for all pairs proves totality.
            let value = definition.limit_for(limit);
            assert_eq!(definition.limits().get(&limit), Some(&value));
        }
    }
}

#[test]
fn upgrades_are_monotonic_within_each_family() {
    assert_monotonic(&CLOUD_ORDER);
    assert_monotonic(&SELF_HOSTED_ORDER);
}

#[test]
fn families_never_share_base_entitlements() {
    for plan in Plan::iter() {
        match plan.family() {
            PlanFamily::Cloud => {
                assert!(
                    registry::has_entitlement(plan, Entitlement::CloudBilling),
                    "{plan} is cloud and should carry the cloud base"
                );
            }
            PlanFamily::SelfHosted => {
                assert!(
                    !registry::has_entitlement(plan, Entitlement::CloudBilling),
                    "{plan} is self-hosted and must not inherit cloud base tags"
                );
            }
        }
    }
    // And no cloud plan picks up self-hosted exclusives.
    for plan in CLOUD_ORDER {
        assert!(!registry::has_entitlement(
            plan,
            Entitlement::SelfHostUiCustomization
        ));
    }
}

#[test]
fn repeated_lookups_are_idempotent() {
    for plan in Plan::iter() {
        assert_eq!(
            registry::definition_for(plan),
            registry::definition_for(plan)
        );
        for limit in EntitlementLimit::iter() {
            assert_eq!(
                registry::limit_for(plan, limit),
                registry::limit_for(plan, limit)
            );
        }
    }
}

#[test]
fn rbac_project_roles_start_at_the_team_tier() {
    let hobby: Plan = "cloud:hobby".parse().expect("known plan");
    let team: Plan = "cloud:team".parse().expect("known plan");
    assert!(!registry::has_entitlement(
        hobby,
        Entitlement::RbacProjectRoles
    ));
    assert!(registry::has_entitlement(
        team,
        Entitlement::RbacProjectRoles
    ));
}

#[test]
fn organization_member_ceiling_lifts_at_core() {
    assert_eq!(
        registry::limit_for(Plan::CloudHobby, EntitlementLimit::OrganizationMemberCount),
        LimitValue::Limited(2)
    );
    assert_eq!(
        registry::limit_for(Plan::CloudCore, EntitlementLimit::OrganizationMemberCount),
        LimitValue::Unlimited
    );
}

#[test]
fn hobby_annotation_queue_ceiling_is_one() {
    assert!(registry::is_within_limit(
        Plan::CloudHobby,
        EntitlementLimit::AnnotationQueueCount,
        0
    ));
    assert!(!registry::is_within_limit(
        Plan::CloudHobby,
        EntitlementLimit::AnnotationQueueCount,
        1
    ));
}

#[test]
fn playground_requires_a_self_hosted_license() {
    assert!(!registry::has_entitlement(Plan::Oss, Entitlement::Playground));
    assert!(registry::has_entitlement(
        Plan::SelfHostedPro,
        Entitlement::Playground
    ));
}

#[test]
fn unknown_identifiers_error_instead_of_defaulting() {
    assert_eq!(
        "cloud:platinum".parse::<Plan>(),
        Err(EntitlementError::UnknownPlan("cloud:platinum".to_owned()))
    );
    assert_eq!(
        "super-admin".parse::<Entitlement>(),
        Err(EntitlementError::UnknownEntitlement("super-admin".to_owned()))
    );
    assert_eq!(
        "gpu-count".parse::<EntitlementLimit>(),
        Err(EntitlementError::UnknownLimit("gpu-count".to_owned()))
    );
}

#[test]
fn limit_values_keep_the_legacy_wire_shape() {
    assert_eq!(
        serde_json::to_value(LimitValue::Limited(2)).expect("serializes"),
        json!(2)
    );
    assert_eq!(
        serde_json::to_value(LimitValue::Unlimited).expect("serializes"),
        json!(false)
    );

    let limited: LimitValue = serde_json::from_value(json!(30)).expect("deserializes");
    assert_eq!(limited, LimitValue::Limited(30));
    let unlimited: LimitValue = serde_json::from_value(json!(false)).expect("deserializes");
    assert_eq!(unlimited, LimitValue::Unlimited);

    assert!(serde_json::from_value::<LimitValue>(json!(true)).is_err());
    assert!(serde_json::from_value::<LimitValue>(json!(-3)).is_err());
}

#[test]
fn plan_identifiers_keep_the_legacy_wire_shape() {
    assert_eq!(
        serde_json::to_value(Plan::CloudHobby).expect("serializes"),
        json!("cloud:hobby")
    );
    assert_eq!(
        serde_json::to_value(Plan::Oss).expect("serializes"),
        json!("oss")
    );
    let plan: Plan = serde_json::from_value(json!("self-hosted:enterprise")).expect("deserializes");
    assert_eq!(plan, Plan::SelfHostedEnterprise);
    let tag: Entitlement =
        serde_json::from_value(json!("model-based-evaluations")).expect("deserializes");
    assert_eq!(tag, Entitlement::ModelBasedEvaluations);
}

#[test]
fn definitions_serialize_with_identifier_strings() {
    let value =
        serde_json::to_value(registry::definition_for(Plan::CloudHobby)).expect("serializes");
    let entitlements = value["entitlements"].as_array().expect("array");
    assert!(entitlements.iter().any(|tag| tag == "playground"));
    assert_eq!(value["limits"]["organization-member-count"], json!(2));
    assert_eq!(value["limits"]["prompt-management-count-prompts"], json!(false));
}
