//! Port for the generation history ledger.

use async_trait::async_trait;

use crate::domain::{ClientUserId, GenerationRecord, NewGenerationRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by history repository adapters.
    pub enum HistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "history repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "history repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Up to `limit` records owned by `user_id`, newest first.
    async fn list_recent(
        &self,
        user_id: &ClientUserId,
        limit: i64,
    ) -> Result<Vec<GenerationRecord>, HistoryRepositoryError>;

    async fn insert(
        &self,
        record: &NewGenerationRecord,
    ) -> Result<GenerationRecord, HistoryRepositoryError>;

    /// Delete a record only when `user_id` owns it; `false` otherwise.
    async fn delete_owned(
        &self,
        id: i32,
        user_id: &ClientUserId,
    ) -> Result<bool, HistoryRepositoryError>;
}
