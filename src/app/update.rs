use tracing::debug;

use crate::app::Capabilities;
use crate::app::actions::{Action, SideEffect};
use crate::app::state::{DisplayState, SchedulerState};
use crate::display::{DisplayConfig, Rendered, classify};
use crate::locale;

pub fn update(state: &mut DisplayState, action: Action, caps: &Capabilities) -> Vec<SideEffect> {
    match action {
        Action::Mount(config) => start(state, config, caps),
        Action::Reconfigure(config) => {
            match state.config {
                Some(ref current) if current.same_identity(&config) => {
                    // Refresh flag, interval and locale source are picked up
                    // on the next identity change, not here.
                    state.config = Some(config);
                    vec![]
                }
                _ => start(state, config, caps),
            }
        }
        Action::Tick => {
            if state.torn_down || !state.is_scheduled() {
                debug!("Tick ignored, scheduler idle");
                return vec![];
            }
            match evaluate(state, caps) {
                Some(rendered) => vec![SideEffect::Publish(rendered)],
                None => vec![],
            }
        }
        Action::Teardown => {
            let effects = cancel(state);
            if !state.torn_down {
                debug!(evaluations = state.evaluations, "Display torn down");
            }
            state.torn_down = true;
            effects
        }
    }
}

fn start(state: &mut DisplayState, config: DisplayConfig, caps: &Capabilities) -> Vec<SideEffect> {
    // The old timer goes before anything is resolved for the new config.
    let mut effects = cancel(state);
    state.torn_down = false;

    state.locale = Some(locale::resolve(
        config.locale_source,
        caps.host.as_ref(),
        &caps.catalog,
    ));
    let use_time_updates = config.use_time_updates;
    let interval = config.time_update_interval;
    state.config = Some(config);

    if let Some(rendered) = evaluate(state, caps) {
        effects.push(SideEffect::Publish(rendered));
    }

    if use_time_updates {
        state.scheduler = SchedulerState::Scheduled { interval };
        debug!(interval_ms = interval.as_millis() as u64, "Refresh scheduled");
        effects.push(SideEffect::ArmTimer(interval));
    }

    effects
}

fn cancel(state: &mut DisplayState) -> Vec<SideEffect> {
    if state.is_scheduled() {
        state.scheduler = SchedulerState::Idle;
        debug!("Refresh cancelled");
        vec![SideEffect::CancelTimer]
    } else {
        vec![]
    }
}

fn evaluate(state: &mut DisplayState, caps: &Capabilities) -> Option<Rendered> {
    let (Some(config), Some(resolved)) = (&state.config, &state.locale) else {
        return None;
    };

    let rendered = classify(config, resolved, caps.host.as_ref(), caps.clock.now());
    state.evaluations += 1;
    state.rendered = Some(rendered.clone());
    Some(rendered)
}
