//! Driving port for the generation history ledger.

use async_trait::async_trait;

use crate::domain::{ClientUserId, Error, GenerationRecord, SlotSelection};

/// Request to append a history record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGenerationRequest {
    pub user_id: ClientUserId,
    pub selection: SlotSelection,
    pub scale: Option<f64>,
    pub drag_x: Option<f64>,
    pub drag_y: Option<f64>,
    pub image_url: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryLedger: Send + Sync {
    /// The owner's most recent records, newest first.
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<GenerationRecord>, Error>;

    async fn record(&self, request: RecordGenerationRequest) -> Result<GenerationRecord, Error>;

    /// Delete a record owned by `user_id`; `false` when nothing matched.
    async fn delete(&self, user_id: &ClientUserId, id: i32) -> Result<bool, Error>;
}
