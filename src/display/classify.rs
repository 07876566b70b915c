use chrono::{DateTime, Utc};

use crate::display::config::DisplayConfig;
use crate::display::distance;
use crate::locale::{Direction, DurationFormatter};
use crate::util::host::HostEnvironment;
use crate::util::time::MS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Relative(Direction),
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub kind: RenderKind,
}

/// Render the target of `config` as seen at `now`.
///
/// Future targets more than `days_future_threshold` days away, and past
/// targets more than `days_passed_threshold` days back, get the absolute
/// `format_date format_time` rendering. Everything else is relative. Both
/// comparisons are strict, so a target exactly at a threshold stays relative.
pub fn classify<F>(
    config: &DisplayConfig,
    formatter: &F,
    host: &dyn HostEnvironment,
    now: DateTime<Utc>,
) -> Rendered
where
    F: DurationFormatter + ?Sized,
{
    let target = config.date.with_timezone(&host.offset_at(config.date));
    let now_local = now.with_timezone(&host.offset_at(now));

    let delta_ms = (config.date - now).num_milliseconds();
    let delta_days = delta_ms as f64 / MS_PER_DAY as f64;

    // Zero elapsed time counts as past: "0s ago".
    let (direction, threshold) = if delta_ms > 0 {
        (Direction::Future, config.days_future_threshold)
    } else {
        (Direction::Past, config.days_passed_threshold)
    };
    if delta_days.abs() > threshold {
        return absolute(config, &target);
    }

    let picked = distance::select(&target, &now_local, &config.distance);
    Rendered {
        text: formatter.format(picked.token, picked.count, direction),
        kind: RenderKind::Relative(direction),
    }
}

fn absolute(config: &DisplayConfig, target: &DateTime<chrono::FixedOffset>) -> Rendered {
    Rendered {
        text: format!(
            "{} {}",
            config.format_date.format(target),
            config.format_time.format(target)
        ),
        kind: RenderKind::Absolute,
    }
}
