/*
[INPUT]:  Level names and instance ids
[OUTPUT]: Level instances and their status
[POS]:    HTTP layer - level orchestration endpoints (gamemaster API)
[UPDATE]: When level lifecycle endpoints change
*/

use tracing::info;

use crate::http::endpoint::endpoints;
use crate::http::{Result, StockfighterClient};
use crate::types::{Acknowledgement, LevelInstance, LevelStatus, Outcome};

impl StockfighterClient {
    /// Start a level
    ///
    /// POST /levels/:level
    pub async fn start_level(&self, level: &str) -> Result<Outcome<LevelInstance>> {
        let outcome: Outcome<LevelInstance> = self
            .call(&endpoints::START_LEVEL, &[("level", level)], &[], None)
            .await?;
        if let Outcome::Success(instance) = &outcome {
            info!(
                level_name = level,
                instance_id = instance.instance_id,
                account = %instance.account,
                "level started"
            );
        }
        Ok(outcome)
    }

    /// Status of a level instance
    ///
    /// GET /instances/:id
    pub async fn level_status(&self, instance_id: u64) -> Result<Outcome<LevelStatus>> {
        let id = instance_id.to_string();
        self.call(&endpoints::LEVEL_STATUS, &[("id", id.as_str())], &[], None)
            .await
    }

    /// Restart a level instance from scratch
    ///
    /// POST /instances/:id/restart
    pub async fn restart_level(&self, instance_id: u64) -> Result<Outcome<LevelInstance>> {
        let id = instance_id.to_string();
        self.call(&endpoints::RESTART_LEVEL, &[("id", id.as_str())], &[], None)
            .await
    }

    /// Resume a level instance
    ///
    /// POST /instances/:id/resume
    pub async fn resume_level(&self, instance_id: u64) -> Result<Outcome<LevelInstance>> {
        let id = instance_id.to_string();
        self.call(&endpoints::RESUME_LEVEL, &[("id", id.as_str())], &[], None)
            .await
    }

    /// Stop a level instance
    ///
    /// POST /instances/:id/stop
    pub async fn stop_level(&self, instance_id: u64) -> Result<Outcome<Acknowledgement>> {
        let id = instance_id.to_string();
        self.call(&endpoints::STOP_LEVEL, &[("id", id.as_str())], &[], None)
            .await
    }
}
