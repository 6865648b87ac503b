//! Generation history ledger service.
//!
//! Users are created lazily on first read or write. Deleting another user's
//! record matches nothing and reports `false` rather than an error.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    HistoryLedger, HistoryRepository, HistoryRepositoryError, RecordGenerationRequest,
    UserRepositoryError, UserRepository,
};
use crate::domain::{
    ClientUserId, CompositionTransform, Error, GenerationRecord, HISTORY_LIMIT,
    NewGenerationRecord, field_error,
};

/// Service implementing [`HistoryLedger`].
#[derive(Clone)]
pub struct HistoryService<H, U> {
    history: Arc<H>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<H, U> HistoryService<H, U> {
    pub fn new(history: Arc<H>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            history,
            users,
            clock,
        }
    }
}

fn map_history_error(error: HistoryRepositoryError) -> Error {
    match error {
        HistoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("history repository unavailable: {message}"))
        }
        HistoryRepositoryError::Query { message } => {
            Error::internal(format!("history repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn normalise_image_url(raw: Option<String>) -> Option<String> {
    raw.map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
}

impl<H, U> HistoryService<H, U>
where
    U: UserRepository,
{
    async fn ensure_user(&self, user_id: &ClientUserId) -> Result<(), Error> {
        self.users
            .ensure(user_id, self.clock.utc())
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<H, U> HistoryLedger for HistoryService<H, U>
where
    H: HistoryRepository,
    U: UserRepository,
{
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<GenerationRecord>, Error> {
        self.ensure_user(user_id).await?;
        self.history
            .list_recent(user_id, HISTORY_LIMIT)
            .await
            .map_err(map_history_error)
    }

    async fn record(&self, request: RecordGenerationRequest) -> Result<GenerationRecord, Error> {
        let transform = CompositionTransform::new(request.scale, request.drag_x, request.drag_y)
            .map_err(|err| {
                let field = err.field();
                field_error(err.to_string(), field, "invalid_number")
            })?;

        self.ensure_user(&request.user_id).await?;
        let draft = NewGenerationRecord {
            user_id: request.user_id,
            selection: request.selection,
            transform,
            image_url: normalise_image_url(request.image_url),
            created_at: self.clock.utc(),
        };
        let record = self
            .history
            .insert(&draft)
            .await
            .map_err(map_history_error)?;
        debug!(id = record.id, user_id = %record.user_id, "generation recorded");
        Ok(record)
    }

    async fn delete(&self, user_id: &ClientUserId, id: i32) -> Result<bool, Error> {
        let deleted = self
            .history
            .delete_owned(id, user_id)
            .await
            .map_err(map_history_error)?;
        if !deleted {
            debug!(id, user_id = %user_id, "history delete matched no owned record");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockHistoryRepository, MockUserRepository};
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};
    use crate::domain::{AssetId, ErrorCode, SlotSelection};
    use rstest::rstest;

    fn user(raw: &str) -> ClientUserId {
        ClientUserId::new(raw).expect("valid user id")
    }

    fn ensuring_users() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_ensure().returning(|_, _| Ok(()));
        users
    }

    fn service(
        history: MockHistoryRepository,
        users: MockUserRepository,
    ) -> HistoryService<MockHistoryRepository, MockUserRepository> {
        HistoryService::new(Arc::new(history), Arc::new(users), fixture_clock())
    }

    fn request() -> RecordGenerationRequest {
        RecordGenerationRequest {
            user_id: user("client-a"),
            selection: SlotSelection {
                face_id: Some(AssetId::new(1)),
                costume_id: Some(AssetId::new(4)),
                ..SlotSelection::default()
            },
            scale: Some(1.25),
            drag_x: Some(-12.0),
            drag_y: None,
            image_url: Some("  ".to_owned()),
        }
    }

    #[tokio::test]
    async fn list_caps_at_history_limit() {
        let mut history = MockHistoryRepository::new();
        history
            .expect_list_recent()
            .withf(|who, limit| who.as_str() == "client-a" && *limit == HISTORY_LIMIT)
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        service(history, ensuring_users())
            .list(&user("client-a"))
            .await
            .expect("list succeeds");
    }

    #[tokio::test]
    async fn record_creates_user_then_appends() {
        let mut users = MockUserRepository::new();
        users
            .expect_ensure()
            .withf(|who, at| who.as_str() == "client-a" && *at == fixture_timestamp())
            .times(1)
            .returning(|_, _| Ok(()));
        let mut history = MockHistoryRepository::new();
        history
            .expect_insert()
            .withf(|draft| {
                draft.transform.scale == 1.25
                    && draft.transform.drag_x == -12.0
                    && draft.transform.drag_y == 0.0
                    && draft.image_url.is_none()
            })
            .times(1)
            .returning(|draft| {
                Ok(GenerationRecord {
                    id: 10,
                    user_id: draft.user_id.clone(),
                    selection: draft.selection,
                    transform: draft.transform,
                    image_url: draft.image_url.clone(),
                    created_at: draft.created_at,
                })
            });

        let record = service(history, users)
            .record(request())
            .await
            .expect("record succeeds");

        assert_eq!(record.id, 10);
        assert_eq!(record.selection.costume_id, Some(AssetId::new(4)));
    }

    #[rstest]
    #[case(Some(0.0), None, "scale")]
    #[case(None, Some(f64::NAN), "dragX")]
    #[tokio::test]
    async fn record_rejects_invalid_transform(
        #[case] scale: Option<f64>,
        #[case] drag_x: Option<f64>,
        #[case] field: &str,
    ) {
        let request = RecordGenerationRequest {
            scale,
            drag_x,
            ..request()
        };
        let err = service(MockHistoryRepository::new(), MockUserRepository::new())
            .record(request)
            .await
            .expect_err("invalid transform");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details()
                .and_then(|d| d.get("field"))
                .and_then(|f| f.as_str()),
            Some(field)
        );
    }

    #[tokio::test]
    async fn cross_user_delete_reports_false() {
        let mut history = MockHistoryRepository::new();
        history
            .expect_delete_owned()
            .withf(|id, who| *id == 3 && who.as_str() == "client-b")
            .return_once(|_, _| Ok(false));

        let deleted = service(history, MockUserRepository::new())
            .delete(&user("client-b"), 3)
            .await
            .expect("delete succeeds");

        assert!(!deleted);
    }

    #[tokio::test]
    async fn user_store_outage_is_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_ensure()
            .return_once(|_, _| Err(UserRepositoryError::connection("refused")));

        let err = service(MockHistoryRepository::new(), users)
            .list(&user("client-a"))
            .await
            .expect_err("user store down");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
