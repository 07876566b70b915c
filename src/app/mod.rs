pub mod actions;
pub mod event_loop;
pub mod state;
pub mod update;

use std::sync::Arc;

use crate::locale::LocaleCatalog;
use crate::util::host::{Clock, HostEnvironment, SystemClock, SystemEnvironment};

/// The host capabilities a mounted display evaluates against.
#[derive(Clone)]
pub struct Capabilities {
    pub host: Arc<dyn HostEnvironment>,
    pub clock: Arc<dyn Clock>,
    pub catalog: Arc<LocaleCatalog>,
}

impl Capabilities {
    pub fn new(
        host: impl HostEnvironment + 'static,
        clock: impl Clock + 'static,
        catalog: LocaleCatalog,
    ) -> Self {
        Self {
            host: Arc::new(host),
            clock: Arc::new(clock),
            catalog: Arc::new(catalog),
        }
    }

    pub fn system(catalog: LocaleCatalog) -> Self {
        Self::new(SystemEnvironment::capture(), SystemClock, catalog)
    }
}
