//! Bearer token authentication and role resolution.
//!
//! Every request re-verifies its token; no session state is kept. Roles are
//! resolved in priority order: allow-list, then game master roster, then
//! plain user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CallerResolver, GameMasterRepository, GameMasterRepositoryError, IdTokenError, IdTokenVerifier,
};
use crate::domain::{AdminAllowList, Caller, Email, Error, Role};

/// Service implementing [`CallerResolver`].
#[derive(Clone)]
pub struct AccessService<V, G> {
    verifier: Arc<V>,
    game_masters: Arc<G>,
    allow_list: Arc<AdminAllowList>,
}

impl<V, G> AccessService<V, G> {
    pub fn new(verifier: Arc<V>, game_masters: Arc<G>, allow_list: Arc<AdminAllowList>) -> Self {
        Self {
            verifier,
            game_masters,
            allow_list,
        }
    }

    /// Allow-list membership; performs no I/O.
    pub fn is_system_admin(&self, email: &Email) -> bool {
        self.allow_list.contains(email)
    }
}

fn map_game_master_error(error: GameMasterRepositoryError) -> Error {
    match error {
        GameMasterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("game master repository unavailable: {message}"))
        }
        other => Error::internal(format!("game master lookup failed: {other}")),
    }
}

fn map_verifier_error(error: IdTokenError) -> Error {
    match &error {
        IdTokenError::Invalid { .. } => debug!(%error, "bearer token rejected"),
        IdTokenError::Unavailable { .. } | IdTokenError::NotConfigured => {
            warn!(%error, "bearer token could not be verified");
        }
    }
    Error::unauthorized("invalid or expired token")
}

impl<V, G> AccessService<V, G>
where
    G: GameMasterRepository,
{
    /// Roster lookup for a verified email.
    pub async fn is_game_master(&self, email: &Email) -> Result<bool, Error> {
        self.game_masters
            .exists_by_email(email)
            .await
            .map_err(map_game_master_error)
    }

    /// Classify a verified email.
    pub async fn role_for(&self, email: &Email) -> Result<Role, Error> {
        if self.is_system_admin(email) {
            return Ok(Role::SystemAdmin);
        }
        if self.is_game_master(email).await? {
            return Ok(Role::GameMaster);
        }
        Ok(Role::User)
    }
}

#[async_trait]
impl<V, G> CallerResolver for AccessService<V, G>
where
    V: IdTokenVerifier,
    G: GameMasterRepository,
{
    async fn resolve(&self, token: &str) -> Result<Caller, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::unauthorized("missing bearer token"));
        }
        let identity = self
            .verifier
            .verify(token)
            .await
            .map_err(map_verifier_error)?;
        let role = self.role_for(&identity.email).await?;
        Ok(Caller { identity, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::VerifiedIdentity;
    use crate::domain::ports::{MockGameMasterRepository, MockIdTokenVerifier};
    use rstest::rstest;

    const ROOT: &str = "root@example.com";
    const GM: &str = "gm@example.com";

    fn email(raw: &str) -> Email {
        Email::new(raw).expect("valid email")
    }

    fn verifier_for(raw: &'static str) -> MockIdTokenVerifier {
        let mut verifier = MockIdTokenVerifier::new();
        verifier.expect_verify().returning(move |_| {
            Ok(VerifiedIdentity {
                email: Email::new(raw).expect("valid email"),
                name: Some("Tester".to_owned()),
                picture: None,
            })
        });
        verifier
    }

    fn roster_with(raw: &'static str) -> MockGameMasterRepository {
        let mut roster = MockGameMasterRepository::new();
        roster
            .expect_exists_by_email()
            .returning(move |candidate| Ok(candidate.as_str() == raw));
        roster
    }

    fn service(
        verifier: MockIdTokenVerifier,
        roster: MockGameMasterRepository,
    ) -> AccessService<MockIdTokenVerifier, MockGameMasterRepository> {
        AccessService::new(
            Arc::new(verifier),
            Arc::new(roster),
            Arc::new(AdminAllowList::from_emails([email(ROOT)])),
        )
    }

    #[rstest]
    #[case(ROOT, Role::SystemAdmin)]
    #[case(GM, Role::GameMaster)]
    #[case("player@example.com", Role::User)]
    #[tokio::test]
    async fn resolves_role_by_priority(#[case] who: &'static str, #[case] expected: Role) {
        let service = service(verifier_for(who), roster_with(GM));
        let caller = service.resolve("token").await.expect("token accepted");
        assert_eq!(caller.role, expected);
        assert_eq!(caller.email().as_str(), who);
    }

    #[tokio::test]
    async fn allow_list_wins_without_roster_lookup() {
        // No expectation on the roster: a lookup would panic.
        let service = service(verifier_for(ROOT), MockGameMasterRepository::new());
        let caller = service.resolve("token").await.expect("token accepted");
        assert!(caller.is_system_admin());
    }

    #[rstest]
    #[case(IdTokenError::invalid("bad signature"))]
    #[case(IdTokenError::unavailable("jwks timeout"))]
    #[case(IdTokenError::not_configured())]
    #[tokio::test]
    async fn verification_failures_are_unauthorised(#[case] failure: IdTokenError) {
        let mut verifier = MockIdTokenVerifier::new();
        verifier
            .expect_verify()
            .return_once(move |_| Err(failure));
        let service = service(verifier, MockGameMasterRepository::new());

        let err = service.resolve("token").await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn blank_token_is_rejected_without_verifying() {
        let service = service(MockIdTokenVerifier::new(), MockGameMasterRepository::new());
        let err = service.resolve("   ").await.expect_err("blank token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn roster_outage_is_service_unavailable() {
        let mut roster = MockGameMasterRepository::new();
        roster
            .expect_exists_by_email()
            .return_once(|_| Err(GameMasterRepositoryError::connection("refused")));
        let service = service(verifier_for(GM), roster);

        let err = service.resolve("token").await.expect_err("lookup failed");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
