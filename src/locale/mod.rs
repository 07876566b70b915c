//! Locale resolution: picks the token table used for relative phrases.
//!
//! Tags coming from the host are normalized into catalog keys (`en-US`,
//! `en_US.UTF-8` and `en-us` all become `enUS`). The region-qualified key is
//! tried first, then the bare language. When nothing matches, a single
//! warning is logged and the `enUS` table is used.

pub mod catalog;
pub mod tokens;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::util::host::HostEnvironment;

pub use catalog::{CustomLocale, DEFAULT_LOCALE, LocaleCatalog};
pub use tokens::{Direction, DistanceToken, DurationFormatter, LocaleTable, TokenTable, Unit};

/// Where the locale tag comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    /// The OS-resolved locale.
    #[default]
    OsLocale,
    /// The user's ordered list of preferred languages.
    LanguagePreference,
}

impl LocaleSource {
    pub fn from_language_reference(use_language_reference: bool) -> Self {
        if use_language_reference {
            LocaleSource::LanguagePreference
        } else {
            LocaleSource::OsLocale
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedLocale {
    table: Arc<LocaleTable>,
    fallback: bool,
}

impl ResolvedLocale {
    pub fn new(table: Arc<LocaleTable>) -> Self {
        Self {
            table,
            fallback: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.table.key
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// True when no requested tag matched and the default table was used.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl DurationFormatter for ResolvedLocale {
    fn format(&self, token: DistanceToken, count: i64, direction: Direction) -> String {
        self.table.format(token, count, direction)
    }
}

/// Turns a host locale tag into a catalog key.
pub fn normalize_tag(tag: &str) -> String {
    // POSIX locales carry an encoding and modifier: en_US.UTF-8@euro
    let base = tag.split(['.', '@']).next().unwrap_or_default().trim();
    let mut parts = base.split(['-', '_']).filter(|p| !p.is_empty());

    let mut key = String::new();
    if let Some(language) = parts.next() {
        key.push_str(&language.to_ascii_lowercase());
    }
    for part in parts {
        if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
            key.push_str(&part.to_ascii_uppercase());
        } else {
            key.push_str(part);
        }
    }
    key
}

fn language_key(tag: &str) -> String {
    let base = tag.split(['.', '@']).next().unwrap_or_default().trim();
    base.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_posix_default(tag: &str) -> bool {
    let base = tag.split(['.', '@']).next().unwrap_or_default().trim();
    base == "C" || base == "POSIX"
}

/// Looks a single tag up in the catalog without logging.
pub fn lookup(catalog: &LocaleCatalog, tag: &str) -> Option<Arc<LocaleTable>> {
    if is_posix_default(tag) {
        return Some(catalog.default_table());
    }
    let key = normalize_tag(tag);
    if key.is_empty() {
        return None;
    }
    catalog
        .get(&key)
        .or_else(|| catalog.get(&language_key(tag)))
}

pub fn resolve(
    source: LocaleSource,
    host: &dyn HostEnvironment,
    catalog: &LocaleCatalog,
) -> ResolvedLocale {
    let tags = match source {
        LocaleSource::LanguagePreference => host.preferred_languages(),
        LocaleSource::OsLocale => vec![host.host_locale()],
    };

    for tag in &tags {
        if let Some(table) = lookup(catalog, tag) {
            debug!(tag = %tag, locale = %table.key, ?source, "Resolved locale");
            return ResolvedLocale::new(table);
        }
    }

    let requested = if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.join(", ")
    };
    warn!(
        ?source,
        "Unsupported locale: {}. Falling back to {}.", requested, DEFAULT_LOCALE
    );

    ResolvedLocale {
        table: catalog.default_table(),
        fallback: true,
    }
}
