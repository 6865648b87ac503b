//! Port for the game master roster.

use async_trait::async_trait;

use crate::domain::{Email, GameMaster, NewGameMaster};

use super::define_port_error;

define_port_error! {
    /// Errors raised by game master repository adapters.
    pub enum GameMasterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "game master repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "game master repository query failed: {message}",
        /// The email is already on the roster.
        Duplicate { email: String } => "game master already exists: {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameMasterRepository: Send + Sync {
    /// Every game master, newest first.
    async fn list(&self) -> Result<Vec<GameMaster>, GameMasterRepositoryError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, GameMasterRepositoryError>;

    async fn insert(
        &self,
        game_master: &NewGameMaster,
    ) -> Result<GameMaster, GameMasterRepositoryError>;

    /// Remove a game master; `false` when the id is unknown.
    async fn delete(&self, id: i32) -> Result<bool, GameMasterRepositoryError>;
}
