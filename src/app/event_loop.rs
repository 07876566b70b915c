use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::app::Capabilities;
use crate::app::actions::{Action, SideEffect};
use crate::app::state::DisplayState;
use crate::app::update::update;
use crate::display::{DisplayConfig, Rendered};

/// Owner of one mounted display.
///
/// The initial text is computed before `mount` returns. Dropping the handle
/// tears the display down.
pub struct TimeAgoHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    text_rx: watch::Receiver<Option<Rendered>>,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

/// Mount a display on the current tokio runtime.
pub fn mount(config: DisplayConfig, caps: Capabilities) -> TimeAgoHandle {
    let mut state = DisplayState::new();
    let initial = update(&mut state, Action::Mount(config), &caps);

    let (text_tx, text_rx) = watch::channel(state.rendered.clone());
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let cancelled = Arc::new(AtomicBool::new(false));

    let task = tokio::spawn(run_loop(
        state,
        caps,
        initial,
        action_rx,
        text_tx,
        cancelled.clone(),
    ));

    TimeAgoHandle {
        action_tx,
        text_rx,
        cancelled,
        task: Some(task),
    }
}

impl TimeAgoHandle {
    pub fn text(&self) -> String {
        self.text_rx
            .borrow()
            .as_ref()
            .map(|r| r.text.clone())
            .unwrap_or_default()
    }

    pub fn rendered(&self) -> Option<Rendered> {
        self.text_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Rendered>> {
        self.text_rx.clone()
    }

    /// Swap in a new config. Changing the target, a threshold or a pattern
    /// cancels the timer and resolves again.
    pub fn reconfigure(&self, config: DisplayConfig) {
        if self.is_disposed() {
            return;
        }
        let _ = self.action_tx.send(Action::Reconfigure(config));
    }

    pub fn is_disposed(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Stop refreshing. Safe to call any number of times.
    pub fn dispose(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.action_tx.send(Action::Teardown);
    }

    /// Dispose and wait for the refresh task to finish.
    pub async fn shutdown(mut self) {
        self.dispose();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Display task ended abnormally");
        }
    }
}

impl Drop for TimeAgoHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_loop(
    mut state: DisplayState,
    caps: Capabilities,
    initial: Vec<SideEffect>,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    text_tx: watch::Sender<Option<Rendered>>,
    cancelled: Arc<AtomicBool>,
) {
    let mut timer: Option<Interval> = None;
    apply_effects(initial, &mut timer, &text_tx);

    while !state.torn_down {
        tokio::select! {
            // Actions first: a teardown already sent beats a pending tick.
            biased;

            maybe_action = action_rx.recv() => {
                let action = maybe_action.unwrap_or(Action::Teardown);
                let effects = update(&mut state, action, &caps);
                apply_effects(effects, &mut timer, &text_tx);
            }
            _ = next_tick(&mut timer) => {
                if cancelled.load(Ordering::SeqCst) {
                    continue;
                }
                let effects = update(&mut state, Action::Tick, &caps);
                apply_effects(effects, &mut timer, &text_tx);
            }
        }
    }

    debug!("Display loop finished");
}

fn apply_effects(
    effects: Vec<SideEffect>,
    timer: &mut Option<Interval>,
    text_tx: &watch::Sender<Option<Rendered>>,
) {
    for effect in effects {
        match effect {
            SideEffect::ArmTimer(period) => {
                *timer = Some(arm(period));
            }
            SideEffect::CancelTimer => {
                *timer = None;
            }
            SideEffect::Publish(rendered) => {
                text_tx.send_replace(Some(rendered));
            }
        }
    }
}

fn arm(period: Duration) -> Interval {
    // The initial evaluation already happened, so the first tick is one
    // period out.
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
