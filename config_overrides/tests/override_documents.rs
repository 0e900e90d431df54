//! Loading override documents from TOML and JSON files.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use config_overrides::{
    OverrideCollector, OverrideError, OverrideProvider, ProviderChain, ValueTree,
    load_override_document,
};
use rstest::rstest;
use serde_json::json;
use test_helpers::figment::{figment_error, with_jail};
use unic_langid::langid;

const SITE_TOML: &str = r#"
priority = 10

[overrides."system.site"]
name = "Site"
slogan = "Welcome"

[overrides."system.site".page]
front = "/node"

[languages.fr."system.site"]
name = "Site FR"
"#;

const SITE_JSON: &str = r#"{
    "priority": 5,
    "overrides": {"system.site": {"mail": "admin@example.com", "name": "Json Site"}},
    "languages": {"fr": {"system.site": {"slogan": "Bienvenue"}}}
}"#;

#[rstest]
fn loads_toml_documents() -> Result<()> {
    let provider = with_jail(|jail| {
        jail.create_file("site.toml", SITE_TOML)?;
        load_override_document(Utf8Path::new("site.toml")).map_err(figment_error)
    })?;

    ensure!(provider.id() == "site.toml", "unexpected id {}", provider.id());
    ensure!(provider.priority() == 10, "priority must come from the document");
    let front = provider
        .global()
        .get("system.site")
        .and_then(|site| site.get("page"))
        .and_then(|page| page.pointer("front"));
    ensure!(front == Some(&ValueTree::from("/node")), "nested table lost: {front:?}");
    ensure!(
        provider.translated().get(&langid!("fr"), "system.site").is_some(),
        "French overrides must be parsed"
    );
    Ok(())
}

#[rstest]
fn translation_wins_within_one_document() -> Result<()> {
    let resolved = with_jail(|jail| {
        jail.create_file("site.toml", SITE_TOML)?;
        let chain = ProviderChain::from_files(["site.toml"]).map_err(figment_error)?;
        chain
            .resolve(["system.site"], Some(langid!("fr")))
            .map_err(figment_error)
    })?;

    ensure!(
        resolved.lookup("system.site", "name") == Some(&ValueTree::from("Site FR")),
        "language entry must take precedence: {resolved:?}"
    );
    ensure!(
        resolved.lookup("system.site", "slogan") == Some(&ValueTree::from("Welcome")),
        "global entry must fill the gaps: {resolved:?}"
    );
    Ok(())
}

#[rstest]
fn documents_merge_by_their_priority() -> Result<()> {
    let resolved = with_jail(|jail| {
        jail.create_file("low.json", SITE_JSON)?;
        jail.create_file("high.toml", SITE_TOML)?;
        let chain = ProviderChain::from_files(["low.json", "high.toml"]).map_err(figment_error)?;
        chain
            .resolve(["system.site"], Some(langid!("fr")))
            .map_err(figment_error)
    })?;

    let expected = json!({"system.site": {
        "name": "Site FR",
        "slogan": "Welcome",
        "page": {"front": "/node"},
        "mail": "admin@example.com",
    }});
    ensure!(resolved.to_json() == expected, "unexpected merge: {}", resolved.to_json());
    Ok(())
}

#[rstest]
fn toml_datetimes_load_as_strings() -> Result<()> {
    let provider = with_jail(|jail| {
        jail.create_file(
            "cron.toml",
            "[overrides.\"system.cron\"]\nlast_run = 1979-05-27T07:32:00Z\nholidays = [1979-12-25]\n",
        )?;
        load_override_document(Utf8Path::new("cron.toml")).map_err(figment_error)
    })?;
    let cron = provider
        .global()
        .get("system.cron")
        .cloned()
        .ok_or_else(|| anyhow!("system.cron overrides missing"))?;
    ensure!(
        cron.get("last_run") == Some(&ValueTree::from("1979-05-27T07:32:00Z")),
        "datetime must load as a string: {cron:?}"
    );

    let mut collector = OverrideCollector::new(["system.cron"], None);
    collector.set_override_json("system.cron", json!({"last_run": "never"}))?;
    collector.try_set_override("system.cron", cron)?;
    let expected = json!({"system.cron": {"last_run": "never", "holidays": ["1979-12-25"]}});
    let resolved = collector.finish().to_json();
    ensure!(resolved == expected, "unexpected merge: {resolved}");
    Ok(())
}

#[rstest]
fn missing_tables_default_to_empty() -> Result<()> {
    let provider = with_jail(|jail| {
        jail.create_file("empty.toml", "")?;
        load_override_document(Utf8Path::new("empty.toml")).map_err(figment_error)
    })?;
    ensure!(provider.priority() == 0, "priority defaults to zero");
    ensure!(provider.global().is_empty(), "no overrides expected");
    Ok(())
}

#[rstest]
#[case::yaml("site.yaml")]
#[case::no_extension("site")]
fn rejects_unknown_extensions(#[case] path: &str) {
    let err = load_override_document(Utf8Path::new(path)).expect_err("format is unsupported");
    assert!(
        matches!(err, OverrideError::UnsupportedFormat { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn reports_unreadable_documents() {
    let err = load_override_document(Utf8Path::new("does/not/exist.toml"))
        .expect_err("missing file must fail");
    assert!(matches!(err, OverrideError::Read { .. }), "unexpected error: {err:?}");
}

#[rstest]
#[case::bad_toml("broken.toml", "priority = ")]
#[case::unknown_key("extra.toml", "colour = \"blue\"")]
#[case::non_table_override("flat.toml", "[overrides]\n\"system.site\" = 3")]
fn reports_malformed_documents(#[case] name: &str, #[case] contents: &str) -> Result<()> {
    let err = with_jail(|jail| {
        jail.create_file(name, contents)?;
        Ok(load_override_document(Utf8Path::new(name)).err())
    })?
    .ok_or_else(|| anyhow!("malformed document must fail to load"))?;
    ensure!(
        matches!(err, OverrideError::File { .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn reports_invalid_language_tags() -> Result<()> {
    let err = with_jail(|jail| {
        jail.create_file("lang.toml", "[languages.\"not a tag!\".\"system.site\"]\nname = \"x\"")?;
        Ok(load_override_document(Utf8Path::new("lang.toml")).err())
    })?
    .ok_or_else(|| anyhow!("invalid tag must fail to load"))?;
    match err {
        OverrideError::InvalidLanguage { tag, .. } => {
            ensure!(tag == "not a tag!", "unexpected tag {tag}");
            Ok(())
        }
        other => Err(anyhow!("unexpected error: {other:?}")),
    }
}

#[rstest]
fn from_files_aggregates_every_failure() -> Result<()> {
    let err = with_jail(|jail| {
        jail.create_file("good.toml", SITE_TOML)?;
        jail.create_file("bad.toml", "priority = ")?;
        Ok(ProviderChain::from_files(["good.toml", "bad.toml", "other.ini", "gone.json"]).err())
    })?
    .ok_or_else(|| anyhow!("failures must be reported"))?;
    match err {
        OverrideError::Aggregate(aggregate) => {
            let kinds: Vec<&str> = aggregate
                .iter()
                .map(|e| match e {
                    OverrideError::File { .. } => "file",
                    OverrideError::UnsupportedFormat { .. } => "format",
                    OverrideError::Read { .. } => "read",
                    _ => "other",
                })
                .collect();
            ensure!(kinds == vec!["file", "format", "read"], "unexpected errors: {kinds:?}");
            Ok(())
        }
        other => Err(anyhow!("expected an aggregate, got {other:?}")),
    }
}
