pub mod classify;
pub mod config;
pub mod distance;
pub mod pattern;

use chrono::{DateTime, Utc};

use crate::locale::{self, LocaleCatalog};
use crate::util::host::{Clock, HostEnvironment, SystemClock, SystemEnvironment};

pub use classify::{RenderKind, Rendered, classify};
pub use config::{
    DisplayConfig, DisplayConfigBuilder, DisplayOptions, DistanceOptions, DistanceStyle,
    RoundingMethod,
};
pub use pattern::DatePattern;

/// Resolve the locale and render once, without arming any timer.
pub fn render_once(
    config: &DisplayConfig,
    host: &dyn HostEnvironment,
    clock: &dyn Clock,
    catalog: &LocaleCatalog,
) -> Rendered {
    let resolved = locale::resolve(config.locale_source, host, catalog);
    classify(config, &resolved, host, clock.now())
}

/// `3m ago` / `in 2h` / `03/14/24 5:00 PM` for `date`, using default
/// options, the built-in catalog and the process environment.
pub fn time_ago(date: DateTime<Utc>) -> crate::Result<String> {
    let config = DisplayConfig::builder(date).build()?;
    let rendered = render_once(
        &config,
        &SystemEnvironment::capture(),
        &SystemClock,
        &LocaleCatalog::builtin(),
    );
    Ok(rendered.text)
}
