use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::pattern::DatePattern;
use crate::error::{Error, Result};
use crate::locale::LocaleSource;

/// How the relative distance is banded into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceStyle {
    /// Exact unit with a rounded count: `44m`, `3h`, `5d`.
    #[default]
    Strict,
    /// Qualified bands: about / over / almost, half a minute.
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMethod {
    #[default]
    Round,
    Floor,
    Ceil,
    Trunc,
}

impl RoundingMethod {
    pub fn apply(self, value: f64) -> i64 {
        let rounded = match self {
            RoundingMethod::Round => value.round(),
            RoundingMethod::Floor => value.floor(),
            RoundingMethod::Ceil => value.ceil(),
            RoundingMethod::Trunc => value.trunc(),
        };
        rounded as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DistanceOptions {
    pub style: DistanceStyle,
    pub rounding: RoundingMethod,
    /// Strict style only: render 7 to 30 days as weeks.
    pub use_weeks: bool,
    /// Approximate style only: split the first minute into second bands.
    pub include_seconds: bool,
}

/// Everything about a display except the target instant, as it appears in
/// the `[display]` section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default = "default_threshold")]
    pub days_passed_threshold: f64,
    #[serde(default = "default_threshold")]
    pub days_future_threshold: f64,
    #[serde(default = "default_format_date")]
    pub format_date: String,
    #[serde(default = "default_format_time")]
    pub format_time: String,
    #[serde(default = "default_true")]
    pub use_time_updates: bool,
    #[serde(default = "default_interval_ms")]
    pub time_update_interval_ms: u64,
    #[serde(default)]
    pub use_language_reference: bool,
    #[serde(default)]
    pub style: DistanceStyle,
    #[serde(default)]
    pub rounding: RoundingMethod,
    #[serde(default)]
    pub use_weeks: bool,
    #[serde(default)]
    pub include_seconds: bool,
}

fn default_threshold() -> f64 {
    6.0
}
fn default_format_date() -> String {
    "MM/dd/yy".to_string()
}
fn default_format_time() -> String {
    "h:mm a".to_string()
}
fn default_true() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    60_000
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            days_passed_threshold: default_threshold(),
            days_future_threshold: default_threshold(),
            format_date: default_format_date(),
            format_time: default_format_time(),
            use_time_updates: true,
            time_update_interval_ms: default_interval_ms(),
            use_language_reference: false,
            style: DistanceStyle::default(),
            rounding: RoundingMethod::default(),
            use_weeks: false,
            include_seconds: false,
        }
    }
}

/// Validated, immutable input of one mounted display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub date: DateTime<Utc>,
    pub days_passed_threshold: f64,
    pub days_future_threshold: f64,
    pub format_date: DatePattern,
    pub format_time: DatePattern,
    pub use_time_updates: bool,
    pub time_update_interval: Duration,
    pub locale_source: LocaleSource,
    pub distance: DistanceOptions,
}

impl DisplayConfig {
    pub fn builder(date: DateTime<Utc>) -> DisplayConfigBuilder {
        DisplayConfigBuilder {
            date,
            options: DisplayOptions::default(),
        }
    }

    pub fn from_options(date: DateTime<Utc>, options: &DisplayOptions) -> Result<Self> {
        if options.use_time_updates && options.time_update_interval_ms == 0 {
            return Err(Error::ZeroInterval);
        }
        check_threshold("past", options.days_passed_threshold)?;
        check_threshold("future", options.days_future_threshold)?;

        Ok(Self {
            date,
            days_passed_threshold: options.days_passed_threshold,
            days_future_threshold: options.days_future_threshold,
            format_date: DatePattern::compile(&options.format_date)?,
            format_time: DatePattern::compile(&options.format_time)?,
            use_time_updates: options.use_time_updates,
            time_update_interval: Duration::from_millis(options.time_update_interval_ms),
            locale_source: LocaleSource::from_language_reference(options.use_language_reference),
            distance: DistanceOptions {
                style: options.style,
                rounding: options.rounding,
                use_weeks: options.use_weeks,
                include_seconds: options.include_seconds,
            },
        })
    }

    /// Whether `other` describes the same rendering, i.e. swapping it in
    /// does not require cancelling the timer and resolving again.
    pub fn same_identity(&self, other: &DisplayConfig) -> bool {
        self.date == other.date
            && self.days_passed_threshold == other.days_passed_threshold
            && self.days_future_threshold == other.days_future_threshold
            && self.format_date == other.format_date
            && self.format_time == other.format_time
    }
}

// NaN would make every comparison false: nothing turns absolute and no two
// configs share an identity.
fn check_threshold(which: &'static str, days: f64) -> Result<()> {
    if days.is_finite() && days >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidThreshold { which, days })
    }
}

pub struct DisplayConfigBuilder {
    date: DateTime<Utc>,
    options: DisplayOptions,
}

impl DisplayConfigBuilder {
    pub fn options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn days_passed_threshold(mut self, days: f64) -> Self {
        self.options.days_passed_threshold = days;
        self
    }

    pub fn days_future_threshold(mut self, days: f64) -> Self {
        self.options.days_future_threshold = days;
        self
    }

    pub fn format_date(mut self, pattern: impl Into<String>) -> Self {
        self.options.format_date = pattern.into();
        self
    }

    pub fn format_time(mut self, pattern: impl Into<String>) -> Self {
        self.options.format_time = pattern.into();
        self
    }

    pub fn use_time_updates(mut self, enabled: bool) -> Self {
        self.options.use_time_updates = enabled;
        self
    }

    pub fn time_update_interval_ms(mut self, ms: u64) -> Self {
        self.options.time_update_interval_ms = ms;
        self
    }

    pub fn use_language_reference(mut self, enabled: bool) -> Self {
        self.options.use_language_reference = enabled;
        self
    }

    pub fn style(mut self, style: DistanceStyle) -> Self {
        self.options.style = style;
        self
    }

    pub fn rounding(mut self, rounding: RoundingMethod) -> Self {
        self.options.rounding = rounding;
        self
    }

    pub fn use_weeks(mut self, enabled: bool) -> Self {
        self.options.use_weeks = enabled;
        self
    }

    pub fn include_seconds(mut self, enabled: bool) -> Self {
        self.options.include_seconds = enabled;
        self
    }

    pub fn build(self) -> Result<DisplayConfig> {
        DisplayConfig::from_options(self.date, &self.options)
    }
}
