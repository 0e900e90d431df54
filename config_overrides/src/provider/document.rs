//! Override documents loaded from TOML or JSON files.
//!
//! A document carries a priority, language-independent overrides, and
//! per-language overrides:
//!
//! ```toml
//! priority = 10
//!
//! [overrides."system.site"]
//! name = "Site"
//!
//! [languages.fr."system.site"]
//! name = "Site FR"
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Format, Json, Toml},
};
use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use super::{LanguageOverrides, OverrideProvider, StaticOverrides};
use crate::value::{Scalar, ValueMap, ValueTree};
use crate::{OverrideCollector, OverrideError, OverrideResult};

/// Key under which figment's TOML provider nests datetime values.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OverrideDocument {
    priority: i32,
    overrides: BTreeMap<String, ValueMap>,
    languages: BTreeMap<String, BTreeMap<String, ValueMap>>,
}

impl OverrideDocument {
    /// Replaces figment's datetime wrappers with their string form.
    fn restore_datetimes(&mut self) {
        let translated = self.languages.values_mut().flat_map(BTreeMap::values_mut);
        for map in self.overrides.values_mut().chain(translated) {
            map.values_mut().for_each(restore_datetime);
        }
    }
}

/// Provider backed by a single override document.
///
/// Language-specific entries are contributed before language-independent
/// ones, so within one document the translation wins.
#[derive(Clone, Debug, PartialEq)]
pub struct FileOverrides {
    path: Utf8PathBuf,
    global: StaticOverrides,
    translated: LanguageOverrides,
}

impl FileOverrides {
    /// Path the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Language-independent part of the document.
    #[must_use]
    pub const fn global(&self) -> &StaticOverrides {
        &self.global
    }

    /// Per-language part of the document.
    #[must_use]
    pub const fn translated(&self) -> &LanguageOverrides {
        &self.translated
    }

    fn from_document(path: &Utf8Path, document: OverrideDocument) -> OverrideResult<Self> {
        let id = path.as_str();
        let mut global = StaticOverrides::new(id).with_priority(document.priority);
        for (name, values) in document.overrides {
            global.insert(name, values);
        }
        let mut translated = LanguageOverrides::new(id).with_priority(document.priority);
        for (tag, entries) in document.languages {
            let language = parse_language(&tag)?;
            for (name, values) in entries {
                translated.insert(language.clone(), name, values);
            }
        }
        Ok(Self {
            path: path.to_owned(),
            global,
            translated,
        })
    }
}

impl OverrideProvider for FileOverrides {
    fn id(&self) -> &str {
        self.path.as_str()
    }

    fn priority(&self) -> i32 {
        self.global.priority()
    }

    fn provide(&self, collector: &mut OverrideCollector) -> OverrideResult<()> {
        self.translated.contribute_to(collector);
        self.global.contribute_to(collector);
        Ok(())
    }
}

/// Load an override document, selecting the parser by file extension.
///
/// `.toml` and `.json` are understood; the extension is matched
/// case-insensitively.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use config_overrides::{OverrideProvider, load_override_document};
///
/// let provider = load_override_document(Utf8Path::new("overrides/fr.toml"))?;
/// assert_eq!(provider.id(), "overrides/fr.toml");
/// # Ok::<_, config_overrides::OverrideError>(())
/// ```
///
/// # Errors
///
/// Returns [`OverrideError::UnsupportedFormat`] for other extensions,
/// [`OverrideError::Read`] when the file cannot be read,
/// [`OverrideError::File`] when it cannot be parsed into a document, and
/// [`OverrideError::InvalidLanguage`] for malformed language tags.
pub fn load_override_document(path: &Utf8Path) -> OverrideResult<FileOverrides> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    let data = match ext.as_deref() {
        Some("toml" | "json") => {
            std::fs::read_to_string(path).map_err(|source| OverrideError::Read {
                path: path.to_owned(),
                source,
            })?
        }
        _ => {
            return Err(OverrideError::UnsupportedFormat {
                path: path.to_owned(),
            });
        }
    };
    let is_json = ext.as_deref() == Some("json");
    let figment = if is_json {
        Figment::from(Json::string(&data))
    } else {
        Figment::from(Toml::string(&data))
    };
    let mut document: OverrideDocument = figment
        .extract()
        .map_err(|err| OverrideError::file(path, err))?;
    if !is_json {
        document.restore_datetimes();
    }
    tracing::debug!(
        path = path.as_str(),
        priority = document.priority,
        "loaded override document"
    );
    FileOverrides::from_document(path, document)
}

fn parse_language(tag: &str) -> OverrideResult<LanguageIdentifier> {
    tag.parse()
        .map_err(|source| OverrideError::InvalidLanguage {
            tag: tag.to_owned(),
            source,
        })
}

fn restore_datetime(tree: &mut ValueTree) {
    if let Some(stamp) = datetime_stamp(tree) {
        *tree = ValueTree::from(stamp);
        return;
    }
    match tree {
        ValueTree::Node(map) => map.values_mut().for_each(restore_datetime),
        ValueTree::Sequence(items) => items.iter_mut().for_each(restore_datetime),
        ValueTree::Scalar(_) => {}
    }
}

fn datetime_stamp(tree: &ValueTree) -> Option<String> {
    let map = tree.as_map().filter(|map| map.len() == 1)?;
    match map.get(TOML_DATETIME_KEY)? {
        ValueTree::Scalar(Scalar::String(stamp)) => Some(stamp.clone()),
        _ => None,
    }
}
