use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::locale::normalize_tag;
use crate::locale::tokens::{LocaleTable, TokenTable, UnitTemplates};

pub const DEFAULT_LOCALE: &str = "enUS";

struct Builtin {
    key: &'static str,
    // second, minute, hour, day, week, month, year
    units: [&'static str; 7],
    half_minute: Option<&'static str>,
    future: &'static str,
    past: &'static str,
}

const EN_UNITS: [&str; 7] = [
    "{{count}}s",
    "{{count}}m",
    "{{count}}h",
    "{{count}}d",
    "{{count}}w",
    "{{count}}mo",
    "{{count}}y",
];

const BUILTINS: &[Builtin] = &[
    Builtin {
        key: "enUS",
        units: EN_UNITS,
        half_minute: Some("30s"),
        future: "in {x}",
        past: "{x} ago",
    },
    Builtin {
        key: "enGB",
        units: EN_UNITS,
        half_minute: Some("30s"),
        future: "in {x}",
        past: "{x} ago",
    },
    Builtin {
        key: "enAU",
        units: EN_UNITS,
        half_minute: Some("30s"),
        future: "in {x}",
        past: "{x} ago",
    },
    Builtin {
        key: "enCA",
        units: EN_UNITS,
        half_minute: Some("30s"),
        future: "in {x}",
        past: "{x} ago",
    },
    Builtin {
        key: "de",
        units: [
            "{{count}} Sek.",
            "{{count}} Min.",
            "{{count}} Std.",
            "{{count}} T.",
            "{{count}} Wo.",
            "{{count}} Mon.",
            "{{count}} J.",
        ],
        half_minute: None,
        future: "in {x}",
        past: "vor {x}",
    },
    Builtin {
        key: "fr",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} h",
            "{{count}} j",
            "{{count}} sem.",
            "{{count}} mois",
            "{{count}} a",
        ],
        half_minute: None,
        future: "dans {x}",
        past: "il y a {x}",
    },
    Builtin {
        key: "es",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} h",
            "{{count}} d",
            "{{count}} sem.",
            "{{count}} mes.",
            "{{count}} a",
        ],
        half_minute: None,
        future: "en {x}",
        past: "hace {x}",
    },
    Builtin {
        key: "it",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} h",
            "{{count}} g",
            "{{count}} sett.",
            "{{count}} mesi",
            "{{count}} a",
        ],
        half_minute: None,
        future: "tra {x}",
        past: "{x} fa",
    },
    Builtin {
        key: "nl",
        units: [
            "{{count}} sec",
            "{{count}} min",
            "{{count}} u",
            "{{count}} d",
            "{{count}} w",
            "{{count}} mnd",
            "{{count}} j",
        ],
        half_minute: None,
        future: "over {x}",
        past: "{x} geleden",
    },
    Builtin {
        key: "pt",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} h",
            "{{count}} d",
            "{{count}} sem.",
            "{{count}} m.",
            "{{count}} a",
        ],
        half_minute: None,
        future: "em {x}",
        past: "há {x}",
    },
    Builtin {
        key: "ptBR",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} h",
            "{{count}} d",
            "{{count}} sem.",
            "{{count}} m.",
            "{{count}} a",
        ],
        half_minute: None,
        future: "em {x}",
        past: "há {x}",
    },
    Builtin {
        key: "sv",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} tim",
            "{{count}} d",
            "{{count}} v",
            "{{count}} mån",
            "{{count}} år",
        ],
        half_minute: None,
        future: "om {x}",
        past: "för {x} sedan",
    },
    Builtin {
        key: "pl",
        units: [
            "{{count}} s",
            "{{count}} min",
            "{{count}} godz.",
            "{{count}} dn.",
            "{{count}} tyg.",
            "{{count}} mies.",
            "{{count}} l.",
        ],
        half_minute: None,
        future: "za {x}",
        past: "{x} temu",
    },
    Builtin {
        key: "ja",
        units: [
            "{{count}}秒",
            "{{count}}分",
            "{{count}}時間",
            "{{count}}日",
            "{{count}}週間",
            "{{count}}か月",
            "{{count}}年",
        ],
        half_minute: None,
        future: "{x}後",
        past: "{x}前",
    },
];

impl Builtin {
    fn table(&self) -> LocaleTable {
        let [second, minute, hour, day, week, month, year] = self.units.map(str::to_string);
        let units = UnitTemplates {
            second,
            minute,
            hour,
            day,
            week,
            month,
            year,
            half_minute: self.half_minute.map(str::to_string),
        };
        LocaleTable::new(
            self.key,
            TokenTable::from_units(&units),
            self.future,
            self.past,
        )
    }
}

/// A locale declared in the config file under `[locales.<key>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomLocale {
    #[serde(flatten)]
    pub units: UnitTemplates,
    #[serde(default = "default_future")]
    pub future: String,
    #[serde(default = "default_past")]
    pub past: String,
}

fn default_future() -> String {
    "in {x}".to_string()
}
fn default_past() -> String {
    "{x} ago".to_string()
}

/// Normalized locale key → token table.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    tables: HashMap<String, Arc<LocaleTable>>,
    default: Arc<LocaleTable>,
}

impl LocaleCatalog {
    pub fn builtin() -> Self {
        let tables: HashMap<String, Arc<LocaleTable>> = BUILTINS
            .iter()
            .map(|b| (b.key.to_string(), Arc::new(b.table())))
            .collect();
        let default = tables
            .get(DEFAULT_LOCALE)
            .cloned()
            .unwrap_or_else(|| Arc::new(BUILTINS[0].table()));
        Self { tables, default }
    }

    /// Built-in tables plus configured ones. Configured keys are normalized
    /// like host tags (`fr-CA` becomes `frCA`) and shadow a built-in table
    /// of the same key.
    pub fn with_custom(custom: &BTreeMap<String, CustomLocale>) -> Result<Self> {
        let mut catalog = Self::builtin();
        let mut declared: HashMap<String, &str> = HashMap::new();
        for (raw, locale) in custom {
            let key = normalize_tag(raw);
            if key.is_empty() {
                return Err(Error::InvalidLocaleTable {
                    locale: raw.clone(),
                    reason: "key is not a locale tag".to_string(),
                });
            }
            if let Some(previous) = declared.insert(key.clone(), raw) {
                return Err(Error::InvalidLocaleTable {
                    locale: raw.clone(),
                    reason: format!("same locale as {previous:?}"),
                });
            }
            let table = LocaleTable::new(
                key,
                TokenTable::from_units(&locale.units),
                locale.future.clone(),
                locale.past.clone(),
            );
            catalog.insert(table)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, table: LocaleTable) -> Result<()> {
        table.validate()?;
        debug!(locale = %table.key, "Registered locale table");
        let table = Arc::new(table);
        if table.key == DEFAULT_LOCALE {
            self.default = table.clone();
        }
        self.tables.insert(table.key.clone(), table);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Arc<LocaleTable>> {
        self.tables.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    pub fn default_table(&self) -> Arc<LocaleTable> {
        self.default.clone()
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
