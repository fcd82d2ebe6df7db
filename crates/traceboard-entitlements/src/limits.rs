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

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;

use crate::error::EntitlementError;
use crate::logging::record_unknown_identifier;

/// Identifier for a metered resource with a numeric ceiling.
///
/// Like [`crate::Entitlement`] this set is closed: every plan definition must
/// assign a [`LimitValue`] to every variant, with no implicit default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntitlementLimit {
    /// Number of annotation queues an organization may create.
    AnnotationQueueCount,
    /// Number of members an organization may have.
    OrganizationMemberCount,
    /// How far back ingested data remains queryable, in days.
    DataAccessDays,
    /// Number of configured model-based evaluators.
    ModelBasedEvaluationsCountEvaluators,
    /// Number of managed prompts.
    PromptManagementCountPrompts,
}

impl EntitlementLimit {
    /// Stable identifier string for API serialisation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementLimit::AnnotationQueueCount => "annotation-queue-count",
            EntitlementLimit::OrganizationMemberCount => "organization-member-count",
            EntitlementLimit::DataAccessDays => "data-access-days",
            EntitlementLimit::ModelBasedEvaluationsCountEvaluators => {
                "model-based-evaluations-count-evaluators"
            }
            EntitlementLimit::PromptManagementCountPrompts => "prompt-management-count-prompts",
        }
    }
}

impl fmt::Display for EntitlementLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntitlementLimit {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use strum::IntoEnumIterator;

        EntitlementLimit::iter()
            .find(|limit| limit.as_str() == s)
            .ok_or_else(|| {
                record_unknown_identifier("entitlement-limit", s);
                EntitlementError::UnknownLimit(s.to_owned())
            })
    }
}

/// Ceiling applied to a metered resource.
///
/// A tagged value rather than a number-or-boolean union so that "unlimited"
/// can never be confused with a literal ceiling. `Limited(0)` is a valid,
/// meaningful ceiling: the resource may not be created at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitValue {
    /// Hard ceiling on the resource count.
    Limited(u64),
    /// No ceiling applies.
    Unlimited,
}

impl LimitValue {
    /// Returns true when a tenant currently holding `current` units of the
    /// resource may acquire one more.
    #[must_use]
    pub fn permits(&self, current: u64) -> bool {
        match self {
            LimitValue::Unlimited => true,
            LimitValue::Limited(ceiling) => current < *ceiling,
        }
    }

    /// Returns true when no ceiling applies.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, LimitValue::Unlimited)
    }

    /// Returns true when `self` permits at least everything `other` permits.
    ///
    /// This is the ordering behind the monotonic upgrade property: moving up
    /// tiers within a family, every limit must stay equal or become looser.
    #[must_use]
    pub fn at_least_as_loose_as(&self, other: &LimitValue) -> bool {
        match (self, other) {
            (LimitValue::Unlimited, _) => true,
            (LimitValue::Limited(_), LimitValue::Unlimited) => false,
            (LimitValue::Limited(own), LimitValue::Limited(theirs)) => own >= theirs,
        }
    }
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitValue::Limited(ceiling) => write!(f, "{ceiling}"),
            LimitValue::Unlimited => f.write_str("unlimited"),
        }
    }
}

// The wire shape predates the tagged representation: a plain non-negative
// integer for a ceiling, the boolean `false` for unlimited.
impl Serialize for LimitValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LimitValue::Limited(ceiling) => serializer.serialize_u64(*ceiling),
            LimitValue::Unlimited => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for LimitValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LimitValueVisitor;

        impl Visitor<'_> for LimitValueVisitor {
            type Value = LimitValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer ceiling or the boolean false")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LimitValue::Limited(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(LimitValue::Limited)
                    .map_err(|_| E::custom("limit ceiling must be non-negative"))
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value {
                    Err(E::custom("true is not a valid limit value"))
                } else {
                    Ok(LimitValue::Unlimited)
                }
            }
        }

        deserializer.deserialize_any(LimitValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permits_below_ceiling_only() {
        let limit = LimitValue::Limited(3);
        assert!(limit.permits(0));
        assert!(limit.permits(2));
        assert!(!limit.permits(3));
        assert!(!limit.permits(4));
    }

    #[test]
    fn zero_ceiling_permits_nothing() {
        assert!(!LimitValue::Limited(0).permits(0));
    }

    #[test]
    fn unlimited_permits_everything() {
        assert!(LimitValue::Unlimited.permits(u64::MAX));
    }

    #[test]
    fn looseness_ordering() {
        let two = LimitValue::Limited(2);
        let five = LimitValue::Limited(5);
        assert!(five.at_least_as_loose_as(&two));
        assert!(!two.at_least_as_loose_as(&five));
        assert!(LimitValue::Unlimited.at_least_as_loose_as(&five));
        assert!(!five.at_least_as_loose_as(&LimitValue::Unlimited));
        assert!(two.at_least_as_loose_as(&two));
    }

    #[test]
    fn unknown_limit_is_rejected() {
        let err = "gpu-count".parse::<EntitlementLimit>().expect_err("must reject");
        assert_eq!(
            err,
            crate::error::EntitlementError::UnknownLimit("gpu-count".to_owned())
        );
    }
}
