//! System-admin management of the game master roster.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AddGameMasterRequest, GameMasterAdmin, GameMasterRepository, GameMasterRepositoryError,
};
use crate::domain::{
    Caller, Email, Error, GAME_MASTER_NAME_MAX, GameMaster, NewGameMaster, RoleRequirement,
    field_error,
};

/// Service implementing [`GameMasterAdmin`].
#[derive(Clone)]
pub struct GameMasterService<G> {
    repository: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<G> GameMasterService<G> {
    pub fn new(repository: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: GameMasterRepositoryError) -> Error {
    match error {
        GameMasterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("game master repository unavailable: {message}"))
        }
        GameMasterRepositoryError::Query { message } => {
            Error::internal(format!("game master repository error: {message}"))
        }
        GameMasterRepositoryError::Duplicate { email } => {
            Error::conflict(format!("{email} is already a game master"))
                .with_details(json!({ "field": "email", "code": "duplicate" }))
        }
    }
}

fn normalise_name(name: Option<String>) -> Result<Option<String>, Error> {
    let Some(name) = name.map(|raw| raw.trim().to_owned()) else {
        return Ok(None);
    };
    if name.is_empty() {
        return Ok(None);
    }
    if name.chars().count() > GAME_MASTER_NAME_MAX {
        return Err(field_error(
            format!("name must be at most {GAME_MASTER_NAME_MAX} characters"),
            "name",
            "name_too_long",
        ));
    }
    Ok(Some(name))
}

#[async_trait]
impl<G> GameMasterAdmin for GameMasterService<G>
where
    G: GameMasterRepository,
{
    async fn list(&self, caller: &Caller) -> Result<Vec<GameMaster>, Error> {
        caller.require(RoleRequirement::SystemAdmin)?;
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn add(
        &self,
        caller: &Caller,
        request: AddGameMasterRequest,
    ) -> Result<GameMaster, Error> {
        caller.require(RoleRequirement::SystemAdmin)?;

        let email = Email::new(&request.email)
            .map_err(|err| field_error(err.to_string(), "email", "invalid_email"))?;
        let name = normalise_name(request.name)?;

        if self
            .repository
            .exists_by_email(&email)
            .await
            .map_err(map_repository_error)?
        {
            return Err(map_repository_error(GameMasterRepositoryError::duplicate(
                email.to_string(),
            )));
        }

        let draft = NewGameMaster {
            email,
            name,
            created_by: Some(caller.email().clone()),
            created_at: self.clock.utc(),
        };
        let created = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(email = %created.email, added_by = %caller.email(), "game master added");
        Ok(created)
    }

    async fn remove(&self, caller: &Caller, id: i32) -> Result<(), Error> {
        caller.require(RoleRequirement::SystemAdmin)?;
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("game master {id} not found")));
        }
        info!(id, removed_by = %caller.email(), "game master removed");
        Ok(())
    }
}
