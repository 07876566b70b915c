use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

/// Source of "now" for every evaluation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Locale and timezone facts about the viewer.
pub trait HostEnvironment: Send + Sync {
    /// UTC offset of the viewer's timezone at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset;

    /// Preferred languages, highest priority first.
    fn preferred_languages(&self) -> Vec<String>;

    /// The single locale the OS resolved for this process.
    fn host_locale(&self) -> String;
}

const LOCALE_VARS: [&str; 5] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LC_TIME", "LANG"];

/// Reads the viewer's timezone from `chrono::Local` and locales from the
/// usual POSIX environment variables.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    vars: HashMap<String, String>,
}

impl SystemEnvironment {
    pub fn capture() -> Self {
        let vars = LOCALE_VARS
            .iter()
            .filter_map(|&name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();
        Self { vars }
    }

    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl HostEnvironment for SystemEnvironment {
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        Local.offset_from_utc_datetime(&instant.naive_utc()).fix()
    }

    fn preferred_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();

        // GNU gettext priority list: LANGUAGE=de_AT:de:en
        if let Some(list) = self.var("LANGUAGE") {
            languages.extend(
                list.split(':')
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            );
        }
        for name in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Some(value) = self.var(name)
                && !languages.iter().any(|l| l == value)
            {
                languages.push(value.to_string());
            }
        }
        languages
    }

    fn host_locale(&self) -> String {
        ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .find_map(|name| self.var(name))
            .unwrap_or("en-US")
            .to_string()
    }
}

/// A host with everything pinned, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub offset: FixedOffset,
    pub languages: Vec<String>,
    pub locale: String,
}

impl StaticEnvironment {
    pub fn new(offset: FixedOffset, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            offset,
            languages: vec![locale.clone()],
            locale,
        }
    }

    pub fn utc(locale: impl Into<String>) -> Self {
        Self::new(Utc.fix(), locale)
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn offset_at(&self, _instant: DateTime<Utc>) -> FixedOffset {
        self.offset
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn host_locale(&self) -> String {
        self.locale.clone()
    }
}
