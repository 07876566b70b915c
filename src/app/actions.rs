use std::time::Duration;

use crate::display::{DisplayConfig, Rendered};

#[derive(Debug)]
pub enum Action {
    Mount(DisplayConfig),
    Reconfigure(DisplayConfig),
    Tick,
    Teardown,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SideEffect {
    ArmTimer(Duration),
    CancelTimer,
    Publish(Rendered),
}
