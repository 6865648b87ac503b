//! Driving port for system-admin management of game masters.

use async_trait::async_trait;

use crate::domain::{Caller, Error, GameMaster};

/// Request to add a game master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGameMasterRequest {
    pub email: String,
    pub name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameMasterAdmin: Send + Sync {
    async fn list(&self, caller: &Caller) -> Result<Vec<GameMaster>, Error>;

    async fn add(&self, caller: &Caller, request: AddGameMasterRequest)
    -> Result<GameMaster, Error>;

    async fn remove(&self, caller: &Caller, id: i32) -> Result<(), Error>;
}
