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

/// Commercial family a plan belongs to.
///
/// The two families never share a baseline entitlement set; changes to one
/// family's base can never leak into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanFamily {
    /// Managed cloud deployments billed through the platform.
    Cloud,
    /// Customer-operated deployments, licensed or unlicensed.
    SelfHosted,
}

impl PlanFamily {
    /// Stable identifier string for API serialisation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanFamily::Cloud => "cloud",
            PlanFamily::SelfHosted => "self-hosted",
        }
    }
}

impl fmt::Display for PlanFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription or deployment tier governing a tenant's entitlements.
///
/// The set is closed: the calling system maps authenticated tenant state to
/// one of these variants at its boundary, and every lookup downstream is
/// total over them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum Plan {
    /// Free cloud tier.
    #[serde(rename = "cloud:hobby")]
    CloudHobby,
    /// Entry-level paid cloud tier.
    #[serde(rename = "cloud:core")]
    CloudCore,
    /// Mid-level paid cloud tier.
    #[serde(rename = "cloud:pro")]
    CloudPro,
    /// Team cloud tier; entitlement-equivalent to enterprise.
    #[serde(rename = "cloud:team")]
    CloudTeam,
    /// Enterprise cloud tier.
    #[serde(rename = "cloud:enterprise")]
    CloudEnterprise,
    /// Unlicensed self-hosted deployment.
    #[serde(rename = "oss")]
    Oss,
    /// Licensed self-hosted pro tier.
    #[serde(rename = "self-hosted:pro")]
    SelfHostedPro,
    /// Licensed self-hosted enterprise tier.
    #[serde(rename = "self-hosted:enterprise")]
    SelfHostedEnterprise,
}

impl Plan {
    /// Stable identifier string for API serialisation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::CloudHobby => "cloud:hobby",
            Plan::CloudCore => "cloud:core",
            Plan::CloudPro => "cloud:pro",
            Plan::CloudTeam => "cloud:team",
            Plan::CloudEnterprise => "cloud:enterprise",
            Plan::Oss => "oss",
            Plan::SelfHostedPro => "self-hosted:pro",
            Plan::SelfHostedEnterprise => "self-hosted:enterprise",
        }
    }

    /// Family partition of the plan.
    #[must_use]
    pub fn family(&self) -> PlanFamily {
        match self {
            Plan::CloudHobby
            | Plan::CloudCore
            | Plan::CloudPro
            | Plan::CloudTeam
            | Plan::CloudEnterprise => PlanFamily::Cloud,
            Plan::Oss | Plan::SelfHostedPro | Plan::SelfHostedEnterprise => PlanFamily::SelfHosted,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloud:hobby" => Ok(Plan::CloudHobby),
            "cloud:core" => Ok(Plan::CloudCore),
            "cloud:pro" => Ok(Plan::CloudPro),
            "cloud:team" => Ok(Plan::CloudTeam),
            "cloud:enterprise" => Ok(Plan::CloudEnterprise),
            "oss" => Ok(Plan::Oss),
            "self-hosted:pro" => Ok(Plan::SelfHostedPro),
            "self-hosted:enterprise" => Ok(Plan::SelfHostedEnterprise),
            other => {
                record_unknown_identifier("plan", other);
                Err(EntitlementError::UnknownPlan(other.to_owned()))
            }
        }
    }
}
