//! Mission use cases.

mod action;
mod error;
mod start;

pub use action::{ActionResult, PerformAction};
pub use error::MissionError;
pub use start::{StartMission, StartedMission};

use std::sync::Arc;

use crate::infrastructure::catalog::MissionCatalog;

/// Container for mission use cases.
pub struct MissionUseCases {
    pub catalog: Arc<MissionCatalog>,
    pub start: Arc<StartMission>,
    pub action: Arc<PerformAction>,
}

impl MissionUseCases {
    pub fn new(
        catalog: Arc<MissionCatalog>,
        start: Arc<StartMission>,
        action: Arc<PerformAction>,
    ) -> Self {
        Self {
            catalog,
            start,
            action,
        }
    }
}
