//! Per-rule behavior, each rule in isolation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use esub_core::protocol::{JobRequest, Resources};
use esub_hook::policy::{
    ConstraintInjectionRule, LicenseRoutingRule, MemoryCapRule, PolicyRule, RuleVerdict,
};

fn job(queue: &str, resources: Resources) -> JobRequest {
    JobRequest::new("alice").with_queue(queue).with_resources(resources)
}

fn mem(raw: &str) -> Resources {
    Resources::default().with_mem(raw)
}

fn map<V: Clone>(entries: &[(&str, V)]) -> BTreeMap<String, V> {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn memory_cap() -> MemoryCapRule {
    MemoryCapRule::new(map(&[("normal", 64u32)]))
}

#[test]
fn memory_cap_rewrites_oversized_request() {
    let mut j = job("normal", mem("100GB"));
    assert_eq!(memory_cap().apply(&mut j).unwrap(), RuleVerdict::Pass);
    assert_eq!(j.resources.mem(), Some("64GB"));
}

#[test]
fn memory_cap_keeps_input_format_at_or_below_cap() {
    for raw in ["64G", " 64gb ", "10", "1g", "0GB", "-4G"] {
        let mut j = job("normal", mem(raw));
        memory_cap().apply(&mut j).unwrap();
        assert_eq!(j.resources.mem(), Some(raw), "raw={raw:?}");
    }
}

#[test]
fn memory_cap_uses_canonical_form_for_any_input_unit_spelling() {
    for raw in ["65", "65g", "65G", "65gb", " 1000 GB "] {
        let mut j = job("normal", mem(raw));
        memory_cap().apply(&mut j).unwrap();
        assert_eq!(j.resources.mem(), Some("64GB"), "raw={raw:?}");
    }
}

#[test]
fn memory_cap_ignores_uncapped_queues() {
    let mut j = job("long", mem("abc"));
    assert_eq!(memory_cap().apply(&mut j).unwrap(), RuleVerdict::Pass);
    assert_eq!(j.resources.mem(), Some("abc"));

    let mut j = job("long", mem("512GB"));
    memory_cap().apply(&mut j).unwrap();
    assert_eq!(j.resources.mem(), Some("512GB"));
}

#[test]
fn memory_cap_absent_mem_stays_absent() {
    let mut j = job("normal", Resources::default());
    assert_eq!(memory_cap().apply(&mut j).unwrap(), RuleVerdict::Pass);
    assert!(j.resources.mem.is_none());
}

#[test]
fn memory_cap_malformed_quantity_is_an_error() {
    let mut j = job("normal", mem("512MB"));
    let err = memory_cap().apply(&mut j).expect_err("MB is not supported");
    assert_eq!(err.code().as_str(), "MALFORMED_QUANTITY");
}

#[test]
fn memory_cap_per_queue_values() {
    let rule = MemoryCapRule::new(map(&[("normal", 64u32), ("short", 8)]));
    let mut j = job("short", mem("16G"));
    rule.apply(&mut j).unwrap();
    assert_eq!(j.resources.mem(), Some("8GB"));
}

fn license_routing() -> LicenseRoutingRule {
    LicenseRoutingRule::new(map(&[("nastran", "nastran".to_string())]))
}

fn licensed(license: &str) -> Resources {
    Resources::default().with_license(license)
}

#[test]
fn license_outside_required_queue_is_rejected() {
    let mut j = job("normal", licensed("nastran"));
    assert_eq!(
        license_routing().apply(&mut j).unwrap(),
        RuleVerdict::Reject {
            reason: "Nastran license jobs must use queue 'nastran'".into()
        }
    );
}

#[test]
fn license_in_required_queue_passes() {
    let mut j = job("nastran", licensed("nastran"));
    assert_eq!(license_routing().apply(&mut j).unwrap(), RuleVerdict::Pass);
}

#[test]
fn unknown_or_absent_license_passes() {
    let mut j = job("normal", licensed("abaqus"));
    assert_eq!(license_routing().apply(&mut j).unwrap(), RuleVerdict::Pass);

    let mut j = job("normal", Resources::default());
    assert_eq!(license_routing().apply(&mut j).unwrap(), RuleVerdict::Pass);
}

#[test]
fn license_reason_uses_configured_names() {
    let rule = LicenseRoutingRule::new(map(&[("abaqus", "fea".to_string())]));
    let mut j = job("debug", licensed("abaqus"));
    assert_eq!(
        rule.apply(&mut j).unwrap(),
        RuleVerdict::Reject {
            reason: "Abaqus license jobs must use queue 'fea'".into()
        }
    );
}

fn injection() -> ConstraintInjectionRule {
    ConstraintInjectionRule::new(map(&[("debug", "rack1".to_string())]))
}

fn constrained(list: &[&str]) -> Resources {
    Resources::default().with_constraints(list.iter().copied())
}

fn constraints(j: &JobRequest) -> Option<Vec<String>> {
    j.resources.constraints().map(<[String]>::to_vec)
}

#[test]
fn injection_creates_list_when_absent() {
    let mut j = job("debug", Resources::default());
    injection().apply(&mut j).unwrap();
    assert_eq!(constraints(&j), Some(vec!["rack1".to_string()]));
}

#[test]
fn injection_appends_after_existing_entries() {
    let mut j = job("debug", constrained(&["ssd", "ib"]));
    injection().apply(&mut j).unwrap();
    assert_eq!(
        constraints(&j),
        Some(vec!["ssd".to_string(), "ib".to_string(), "rack1".to_string()])
    );
}

#[test]
fn injection_appends_duplicates_by_default() {
    let mut j = job("debug", constrained(&["rack1"]));
    injection().apply(&mut j).unwrap();
    assert_eq!(
        constraints(&j),
        Some(vec!["rack1".to_string(), "rack1".to_string()])
    );
}

#[test]
fn injection_dedupe_is_idempotent() {
    let rule = injection().with_dedupe(true);
    let mut j = job("debug", constrained(&["ssd"]));
    rule.apply(&mut j).unwrap();
    rule.apply(&mut j).unwrap();
    assert_eq!(
        constraints(&j),
        Some(vec!["ssd".to_string(), "rack1".to_string()])
    );
}

#[test]
fn injection_leaves_other_queues_alone() {
    let mut j = job("normal", Resources::default());
    injection().apply(&mut j).unwrap();
    assert!(j.resources.constraints.is_none());
}

#[test]
fn rule_names_are_stable() {
    assert_eq!(memory_cap().name(), "memory_cap");
    assert_eq!(license_routing().name(), "license_routing");
    assert_eq!(injection().name(), "constraint_injection");
}

#[test]
fn null_mem_on_capped_queue_is_kept_as_null() {
    let mut j = job("normal", Resources { mem: Some(None), ..Default::default() });
    assert_eq!(memory_cap().apply(&mut j).unwrap(), RuleVerdict::Pass);
    assert_eq!(j.resources.mem, Some(None));
}

#[test]
fn null_constraints_are_replaced_by_a_fresh_list() {
    let mut j = job("debug", Resources { constraints: Some(None), ..Default::default() });
    injection().apply(&mut j).unwrap();
    assert_eq!(constraints(&j), Some(vec!["rack1".to_string()]));
}
