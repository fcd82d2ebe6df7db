//! ---
//! tb_section: "02-plan-entitlements"
//! tb_subsection: "example"
//! tb_type: "source"
//! tb_scope: "code"
//! tb_description: "Example resolving a plan's entitlements and limits."
//! tb_version: "v0.1.0"
//! tb_owner: "tbd"
//! ---
use std::env;

use anyhow::Result;
use strum::IntoEnumIterator;
use traceboard_entitlements::{registry, EntitlementLimit, Plan};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let raw = env::args()
        .nth(1)
        .unwrap_or_else(|| "cloud:hobby".to_owned());
    let plan: Plan = raw.parse()?;
    let definition = registry::definition_for(plan);

    println!("Plan {} ({} family)", plan, plan.family());
    println!("Entitlements:");
    for entitlement in definition.entitlements() {
        println!("  {entitlement}");
    }
    println!("Limits:");
    for limit in EntitlementLimit::iter() {
        println!("  {:<42} {}", limit.as_str(), definition.limit_for(limit));
    }
    Ok(())
}
