//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    AssetId, AssetItem, AssetKind, Caller, Email, Placement, Role, VerifiedIdentity,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn caller(role: Role) -> Caller {
    let email = match role {
        Role::User => "player@example.com",
        Role::GameMaster => "gm@example.com",
        Role::SystemAdmin => "root@example.com",
    };
    Caller {
        identity: VerifiedIdentity {
            email: Email::new(email).expect("valid fixture email"),
            name: None,
            picture: None,
        },
        role,
    }
}

pub(crate) fn asset_item(kind: AssetKind, id: i32, sort_order: i32) -> AssetItem {
    AssetItem {
        id: AssetId::new(id),
        kind,
        name: format!("{kind}-{id}"),
        asset_path: format!("/uploads/{}/{id}.png", kind.slug()),
        deleted: false,
        deleted_at: None,
        sort_order,
        placement: Placement::DEFAULT,
        created_at: fixture_timestamp(),
    }
}
