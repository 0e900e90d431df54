//! End-to-end precedence scenarios across several providers.
//!
//! Providers A (priority 10) and B (priority 5) both override `system.site`
//! for French; provider C targets a configuration object nobody asked for.

mod common;

use std::sync::Arc;

use anyhow::{Result, ensure};
use common::providers::ScriptedProvider;
use common::tree;
use config_overrides::{DroppedOverride, OverrideCollector, OverrideProvider, ProviderChain};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::recorder::Recorder;
use unic_langid::langid;

const NAMES: [&str; 2] = ["system.site", "user.settings"];

#[fixture]
fn provider_a() -> ScriptedProvider {
    ScriptedProvider::new("a", 10).sets("system.site", tree(json!({"name": "Site FR"})))
}

#[fixture]
fn provider_b() -> ScriptedProvider {
    ScriptedProvider::new("b", 5).sets(
        "system.site",
        tree(json!({"name": "Site FR Fallback", "slogan": "Bienvenue"})),
    )
}

#[fixture]
fn provider_c() -> ScriptedProvider {
    ScriptedProvider::new("c", 1).sets("unrelated.config", tree(json!({"x": 1})))
}

fn expected() -> serde_json::Value {
    json!({"system.site": {"name": "Site FR", "slogan": "Bienvenue"}})
}

#[rstest]
fn manual_dispatch_in_priority_order(
    provider_a: ScriptedProvider,
    provider_b: ScriptedProvider,
    provider_c: ScriptedProvider,
) -> Result<()> {
    let mut collector = OverrideCollector::new(NAMES, Some(langid!("fr")));
    provider_a.provide(&mut collector)?;
    provider_b.provide(&mut collector)?;
    provider_c.provide(&mut collector)?;

    let resolved = collector.finish();
    ensure!(resolved.to_json() == expected(), "unexpected overrides: {resolved:?}");
    ensure!(resolved.language() == Some(&langid!("fr")), "language must be preserved");
    Ok(())
}

#[rstest]
fn chain_orders_providers_added_out_of_order(
    provider_a: ScriptedProvider,
    provider_b: ScriptedProvider,
    provider_c: ScriptedProvider,
) -> Result<()> {
    let chain = ProviderChain::new()
        .with(provider_c)
        .with(provider_b)
        .with(provider_a);
    let resolved = chain.resolve(NAMES, Some(langid!("fr")))?;
    ensure!(resolved.to_json() == expected(), "unexpected overrides: {resolved:?}");
    Ok(())
}

#[rstest]
fn reversed_dispatch_changes_the_winner(
    provider_a: ScriptedProvider,
    provider_b: ScriptedProvider,
) -> Result<()> {
    let mut collector = OverrideCollector::new(NAMES, Some(langid!("fr")));
    provider_b.provide(&mut collector)?;
    provider_a.provide(&mut collector)?;
    let resolved = collector.finish();
    ensure!(
        resolved.to_json()
            == json!({"system.site": {"name": "Site FR Fallback", "slogan": "Bienvenue"}}),
        "the first writer must win: {resolved:?}"
    );
    Ok(())
}

#[rstest]
fn dropped_contributions_are_observable(
    provider_a: ScriptedProvider,
    provider_c: ScriptedProvider,
) -> Result<()> {
    let recorder = Recorder::default();
    let sink = recorder.clone();
    let mut collector = OverrideCollector::new(NAMES, Some(langid!("fr"))).with_drop_reporter(
        Arc::new(move |dropped: &DroppedOverride| sink.push(dropped.clone())),
    );
    let chain = ProviderChain::new().with(provider_a).with(provider_c);
    chain.apply(&mut collector)?;

    let dropped = recorder.take();
    ensure!(
        dropped
            == vec![DroppedOverride {
                name: "unrelated.config".to_owned(),
                language: Some(langid!("fr")),
            }],
        "unexpected drops: {dropped:?}"
    );
    ensure!(collector.overrides().len() == 1, "only system.site is eligible");
    Ok(())
}

#[rstest]
fn serialises_as_name_keyed_mapping(
    provider_a: ScriptedProvider,
    provider_b: ScriptedProvider,
) -> Result<()> {
    let resolved = ProviderChain::new()
        .with(provider_a)
        .with(provider_b)
        .resolve(NAMES, None)?;
    let rendered = serde_json::to_value(&resolved)?;
    ensure!(rendered == expected(), "unexpected serialisation: {rendered}");
    Ok(())
}
