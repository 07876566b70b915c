use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const COUNT_PLACEHOLDER: &str = "{{count}}";
pub const PHRASE_PLACEHOLDER: &str = "{x}";

/// Distance categories the classifier can select.
///
/// The `About`/`Over`/`Almost`/`LessThan` variants are only produced by the
/// approximate distance style; the strict style sticks to the `X*` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceToken {
    LessThanXSeconds,
    XSeconds,
    HalfAMinute,
    LessThanXMinutes,
    XMinutes,
    AboutXHours,
    XHours,
    XDays,
    AboutXWeeks,
    XWeeks,
    AboutXMonths,
    XMonths,
    AboutXYears,
    XYears,
    OverXYears,
    AlmostXYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DistanceToken {
    pub const ALL: [DistanceToken; 16] = [
        DistanceToken::LessThanXSeconds,
        DistanceToken::XSeconds,
        DistanceToken::HalfAMinute,
        DistanceToken::LessThanXMinutes,
        DistanceToken::XMinutes,
        DistanceToken::AboutXHours,
        DistanceToken::XHours,
        DistanceToken::XDays,
        DistanceToken::AboutXWeeks,
        DistanceToken::XWeeks,
        DistanceToken::AboutXMonths,
        DistanceToken::XMonths,
        DistanceToken::AboutXYears,
        DistanceToken::XYears,
        DistanceToken::OverXYears,
        DistanceToken::AlmostXYears,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistanceToken::LessThanXSeconds => "lessThanXSeconds",
            DistanceToken::XSeconds => "xSeconds",
            DistanceToken::HalfAMinute => "halfAMinute",
            DistanceToken::LessThanXMinutes => "lessThanXMinutes",
            DistanceToken::XMinutes => "xMinutes",
            DistanceToken::AboutXHours => "aboutXHours",
            DistanceToken::XHours => "xHours",
            DistanceToken::XDays => "xDays",
            DistanceToken::AboutXWeeks => "aboutXWeeks",
            DistanceToken::XWeeks => "xWeeks",
            DistanceToken::AboutXMonths => "aboutXMonths",
            DistanceToken::XMonths => "xMonths",
            DistanceToken::AboutXYears => "aboutXYears",
            DistanceToken::XYears => "xYears",
            DistanceToken::OverXYears => "overXYears",
            DistanceToken::AlmostXYears => "almostXYears",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            DistanceToken::LessThanXSeconds
            | DistanceToken::XSeconds
            | DistanceToken::HalfAMinute => Unit::Second,
            DistanceToken::LessThanXMinutes | DistanceToken::XMinutes => Unit::Minute,
            DistanceToken::AboutXHours | DistanceToken::XHours => Unit::Hour,
            DistanceToken::XDays => Unit::Day,
            DistanceToken::AboutXWeeks | DistanceToken::XWeeks => Unit::Week,
            DistanceToken::AboutXMonths | DistanceToken::XMonths => Unit::Month,
            DistanceToken::AboutXYears
            | DistanceToken::XYears
            | DistanceToken::OverXYears
            | DistanceToken::AlmostXYears => Unit::Year,
        }
    }
}

impl fmt::Display for DistanceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Future,
    Past,
}

/// Renders one distance phrase, already wrapped for its direction.
pub trait DurationFormatter {
    fn format(&self, token: DistanceToken, count: i64, direction: Direction) -> String;
}

/// Short per-unit templates, the shape both built-in and configured locales
/// are declared in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitTemplates {
    pub second: String,
    pub minute: String,
    pub hour: String,
    pub day: String,
    pub week: String,
    pub month: String,
    pub year: String,
    #[serde(default)]
    pub half_minute: Option<String>,
}

impl UnitTemplates {
    fn for_unit(&self, unit: Unit) -> &str {
        match unit {
            Unit::Second => &self.second,
            Unit::Minute => &self.minute,
            Unit::Hour => &self.hour,
            Unit::Day => &self.day,
            Unit::Week => &self.week,
            Unit::Month => &self.month,
            Unit::Year => &self.year,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    templates: HashMap<DistanceToken, String>,
}

impl TokenTable {
    /// Every token shares the template of its unit. Half a minute has no
    /// count of its own, so it gets a fixed phrase.
    pub fn from_units(units: &UnitTemplates) -> Self {
        let templates = DistanceToken::ALL
            .iter()
            .map(|&token| {
                let template = match token {
                    DistanceToken::HalfAMinute => units
                        .half_minute
                        .clone()
                        .unwrap_or_else(|| units.second.replace(COUNT_PLACEHOLDER, "30")),
                    _ => units.for_unit(token.unit()).to_string(),
                };
                (token, template)
            })
            .collect();
        Self { templates }
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (DistanceToken, S)>,
        S: Into<String>,
    {
        Self {
            templates: entries
                .into_iter()
                .map(|(token, template)| (token, template.into()))
                .collect(),
        }
    }

    pub fn template(&self, token: DistanceToken) -> Option<&str> {
        self.templates.get(&token).map(String::as_str)
    }

    pub fn missing(&self) -> Vec<DistanceToken> {
        DistanceToken::ALL
            .iter()
            .copied()
            .filter(|token| !self.templates.contains_key(token))
            .collect()
    }
}

/// A catalog entry: token templates plus the future / past wrappers.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    pub key: String,
    pub tokens: TokenTable,
    pub future: String,
    pub past: String,
}

impl LocaleTable {
    pub fn new(
        key: impl Into<String>,
        tokens: TokenTable,
        future: impl Into<String>,
        past: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            tokens,
            future: future.into(),
            past: past.into(),
        }
    }

    /// Checks the table is usable by the classifier. Built-in tables always
    /// pass; configured ones are checked when the catalog is assembled.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidLocaleTable {
            locale: self.key.clone(),
            reason,
        };

        let missing = self.tokens.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|t| t.name()).collect();
            return Err(invalid(format!("missing tokens: {}", names.join(", "))));
        }

        for token in DistanceToken::ALL {
            if token == DistanceToken::HalfAMinute {
                continue;
            }
            if let Some(template) = self.tokens.template(token)
                && !template.contains(COUNT_PLACEHOLDER)
            {
                return Err(invalid(format!(
                    "template for {token} lacks {COUNT_PLACEHOLDER}"
                )));
            }
        }

        for (name, wrapper) in [("future", &self.future), ("past", &self.past)] {
            if !wrapper.contains(PHRASE_PLACEHOLDER) {
                return Err(invalid(format!(
                    "{name} wrapper lacks {PHRASE_PLACEHOLDER}"
                )));
            }
        }

        Ok(())
    }
}

impl DurationFormatter for LocaleTable {
    fn format(&self, token: DistanceToken, count: i64, direction: Direction) -> String {
        // A hole in the table is a bug in whoever built it, not a runtime condition.
        let template = self
            .tokens
            .template(token)
            .unwrap_or_else(|| panic!("locale {} has no template for {}", self.key, token));

        let phrase = template.replace(COUNT_PLACEHOLDER, &count.to_string());
        let wrapper = match direction {
            Direction::Future => &self.future,
            Direction::Past => &self.past,
        };
        wrapper.replace(PHRASE_PLACEHOLDER, &phrase)
    }
}
