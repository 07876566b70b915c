use std::time::Duration;

use crate::display::{DisplayConfig, Rendered};
use crate::locale::ResolvedLocale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Scheduled { interval: Duration },
}

#[derive(Debug)]
pub struct DisplayState {
    pub config: Option<DisplayConfig>,
    pub locale: Option<ResolvedLocale>,
    pub rendered: Option<Rendered>,
    pub scheduler: SchedulerState,
    /// Classifier runs since the state was created.
    pub evaluations: u64,
    pub torn_down: bool,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            config: None,
            locale: None,
            rendered: None,
            scheduler: SchedulerState::Idle,
            evaluations: 0,
            torn_down: false,
        }
    }

    pub fn text(&self) -> &str {
        self.rendered.as_ref().map(|r| r.text.as_str()).unwrap_or_default()
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.scheduler, SchedulerState::Scheduled { .. })
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
