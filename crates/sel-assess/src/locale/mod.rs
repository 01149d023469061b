//! Embedded locale catalogs for questionnaire labels and option sets.
//!
//! Option keys double as stable wire identifiers: every locale renders its
//! own label for a key, but the key itself is what forms and payloads carry.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static EN: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../locales/en.json")).expect("bundled en catalog parses")
});

static AR: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../locales/ar.json")).expect("bundled ar catalog parses")
});

/// Supported questionnaire languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Ar,
}

impl Lang {
    /// Resolves a `lang` query tag, falling back to English for anything else.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("ar") => Self::Ar,
            _ => Self::En,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }
}

impl Default for Lang {
    fn default() -> Self {
        Self::En
    }
}

/// Full catalog for a language, for callers that relay it wholesale.
pub fn catalog(lang: Lang) -> &'static Value {
    match lang {
        Lang::En => &EN,
        Lang::Ar => &AR,
    }
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, segment| node.get(segment))
}

/// Label lookup by dotted key. Missing keys fall back to English, then to the
/// key itself so gaps stay visible rather than blank.
pub fn text(lang: Lang, key: &str) -> String {
    lookup(catalog(lang), key)
        .or_else(|| lookup(&EN, key))
        .and_then(Value::as_str)
        .unwrap_or(key)
        .to_string()
}

/// Option-set lookup by dotted key, preserving key order deterministically.
pub fn options(lang: Lang, key: &str) -> BTreeMap<String, String> {
    let object = lookup(catalog(lang), key)
        .or_else(|| lookup(&EN, key))
        .and_then(Value::as_object);

    match object {
        Some(map) => map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|label| (k.clone(), label.to_string())))
            .collect(),
        None => BTreeMap::new(),
    }
}

/// Stable option keys for a set, taken from the English catalog.
pub fn option_keys(key: &str) -> Vec<String> {
    options(Lang::En, key).into_keys().collect()
}
