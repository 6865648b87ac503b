//! In-memory implementations of every driven port.
//!
//! Each adapter keeps its rows behind a `Mutex` and hands out ids from 1,
//! mirroring the PostgreSQL identity columns. Failure injection is limited to
//! what the integration suites need.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AssetRepository, AssetRepositoryError, AssetStorage, AssetStorageError, FavoriteRepository,
    FavoriteRepositoryError, GameMasterRepository, GameMasterRepositoryError, HistoryRepository,
    HistoryRepositoryError, IdTokenError, IdTokenVerifier, NavigationButtonRepository,
    NavigationButtonRepositoryError, StickerRepository, StickerRepositoryError,
    UserRepositoryError, UserRepository,
};
use crate::domain::{
    AssetId, AssetItem, AssetKind, ClientUserId, Email, Favorite, GameMaster, GenerationRecord,
    NavigationButton, NavigationButtonType, NewAsset, NewGameMaster, NewGenerationRecord,
    NewSticker, RankChange, Sticker, VerifiedIdentity,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Slot catalogue rows for all five kinds.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    rows: Mutex<Vec<AssetItem>>,
    offline: AtomicBool,
}

impl InMemoryAssetRepository {
    /// Make every call fail with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// All rows including soft-deleted ones.
    pub fn snapshot(&self) -> Vec<AssetItem> {
        lock(&self.rows).clone()
    }

    fn check(&self) -> Result<(), AssetRepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AssetRepositoryError::connection("database offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn list_visible(&self, kind: AssetKind) -> Result<Vec<AssetItem>, AssetRepositoryError> {
        self.check()?;
        let mut items: Vec<AssetItem> = lock(&self.rows)
            .iter()
            .filter(|row| row.kind == kind && !row.deleted)
            .cloned()
            .collect();
        items.sort_by_key(|row| (row.sort_order, row.id.get()));
        Ok(items)
    }

    async fn find_visible(
        &self,
        kind: AssetKind,
        id: AssetId,
    ) -> Result<Option<AssetItem>, AssetRepositoryError> {
        self.check()?;
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.kind == kind && row.id == id && !row.deleted)
            .cloned())
    }

    async fn max_sort_order(&self, kind: AssetKind) -> Result<Option<i32>, AssetRepositoryError> {
        self.check()?;
        Ok(lock(&self.rows)
            .iter()
            .filter(|row| row.kind == kind)
            .map(|row| row.sort_order)
            .max())
    }

    async fn insert(&self, asset: &NewAsset) -> Result<AssetItem, AssetRepositoryError> {
        self.check()?;
        let mut rows = lock(&self.rows);
        let next_id = rows
            .iter()
            .filter(|row| row.kind == asset.kind)
            .map(|row| row.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let item = AssetItem {
            id: AssetId::new(next_id),
            kind: asset.kind,
            name: asset.name.as_str().to_owned(),
            asset_path: asset.asset_path.clone(),
            deleted: false,
            deleted_at: None,
            sort_order: asset.sort_order,
            placement: asset.placement,
            created_at: asset.created_at,
        };
        rows.push(item.clone());
        Ok(item)
    }

    async fn mark_deleted(
        &self,
        kind: AssetKind,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, AssetRepositoryError> {
        self.check()?;
        let mut rows = lock(&self.rows);
        match rows
            .iter_mut()
            .find(|row| row.kind == kind && row.id == id && !row.deleted)
        {
            Some(row) => {
                row.deleted = true;
                row.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn apply_ranks(
        &self,
        kind: AssetKind,
        changes: Vec<RankChange>,
    ) -> Result<(), AssetRepositoryError> {
        self.check()?;
        let mut rows = lock(&self.rows);
        let stale = changes.iter().find(|change| {
            !rows.iter().any(|row| {
                row.kind == kind
                    && row.id == change.observed.id
                    && !row.deleted
                    && row.sort_order == change.observed.sort_order
            })
        });
        if let Some(change) = stale {
            return Err(AssetRepositoryError::rank_conflict(change.observed.id.get()));
        }
        for change in &changes {
            if let Some(row) = rows
                .iter_mut()
                .find(|row| row.kind == kind && row.id == change.observed.id)
            {
                row.sort_order = change.new_rank;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStickerRepository {
    rows: Mutex<Vec<Sticker>>,
}

#[async_trait]
impl StickerRepository for InMemoryStickerRepository {
    async fn list_visible(&self) -> Result<Vec<Sticker>, StickerRepositoryError> {
        let mut stickers: Vec<Sticker> = lock(&self.rows)
            .iter()
            .filter(|row| !row.deleted)
            .cloned()
            .collect();
        stickers.sort_by_key(|row| row.id);
        Ok(stickers)
    }

    async fn find_visible(&self, id: AssetId) -> Result<Option<Sticker>, StickerRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.id == id && !row.deleted)
            .cloned())
    }

    async fn insert(&self, sticker: &NewSticker) -> Result<Sticker, StickerRepositoryError> {
        let mut rows = lock(&self.rows);
        let id = i32::try_from(rows.len())
            .map_err(|err| StickerRepositoryError::query(err.to_string()))?
            + 1;
        let row = Sticker {
            id: AssetId::new(id),
            name: sticker.name.as_str().to_owned(),
            asset_path: sticker.asset_path.clone(),
            deleted: false,
            deleted_at: None,
            created_at: sticker.created_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn mark_deleted(
        &self,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, StickerRepositoryError> {
        let mut rows = lock(&self.rows);
        match rows.iter_mut().find(|row| row.id == id && !row.deleted) {
            Some(row) => {
                row.deleted = true;
                row.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Both buttons seeded with no image, as the migration does.
pub struct InMemoryNavigationButtonRepository {
    rows: Mutex<BTreeMap<&'static str, NavigationButton>>,
}

impl InMemoryNavigationButtonRepository {
    pub fn seeded(at: DateTime<Utc>) -> Self {
        let rows = NavigationButtonType::ALL
            .into_iter()
            .map(|button_type| {
                (
                    button_type.as_str(),
                    NavigationButton {
                        button_type,
                        image_path: None,
                        updated_at: at,
                    },
                )
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl Default for InMemoryNavigationButtonRepository {
    fn default() -> Self {
        Self::seeded(DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[async_trait]
impl NavigationButtonRepository for InMemoryNavigationButtonRepository {
    async fn list(&self) -> Result<Vec<NavigationButton>, NavigationButtonRepositoryError> {
        let rows = lock(&self.rows);
        Ok(NavigationButtonType::ALL
            .into_iter()
            .filter_map(|button_type| rows.get(button_type.as_str()).cloned())
            .collect())
    }

    async fn find(
        &self,
        button_type: NavigationButtonType,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError> {
        lock(&self.rows)
            .get(button_type.as_str())
            .cloned()
            .ok_or_else(|| NavigationButtonRepositoryError::missing(button_type.as_str()))
    }

    async fn set_image(
        &self,
        button_type: NavigationButtonType,
        image_path: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError> {
        let mut rows = lock(&self.rows);
        let row = rows
            .get_mut(button_type.as_str())
            .ok_or_else(|| NavigationButtonRepositoryError::missing(button_type.as_str()))?;
        row.image_path = image_path;
        row.updated_at = at;
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct InMemoryGameMasterRepository {
    rows: Mutex<Vec<GameMaster>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl GameMasterRepository for InMemoryGameMasterRepository {
    async fn list(&self) -> Result<Vec<GameMaster>, GameMasterRepositoryError> {
        let mut rows = lock(&self.rows).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, GameMasterRepositoryError> {
        Ok(lock(&self.rows).iter().any(|row| &row.email == email))
    }

    async fn insert(
        &self,
        game_master: &NewGameMaster,
    ) -> Result<GameMaster, GameMasterRepositoryError> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.email == game_master.email) {
            return Err(GameMasterRepositoryError::duplicate(
                game_master.email.to_string(),
            ));
        }
        let mut next_id = lock(&self.next_id);
        *next_id += 1;
        let row = GameMaster {
            id: *next_id,
            email: game_master.email.clone(),
            name: game_master.name.clone(),
            created_at: game_master.created_at,
            created_by: game_master.created_by.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, GameMasterRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}

/// Records lazily created users.
#[derive(Default)]
pub struct InMemoryUserRepository {
    ids: Mutex<HashSet<ClientUserId>>,
}

impl InMemoryUserRepository {
    pub fn contains(&self, id: &ClientUserId) -> bool {
        lock(&self.ids).contains(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn ensure(
        &self,
        id: &ClientUserId,
        _at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        lock(&self.ids).insert(id.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    rows: Mutex<Vec<GenerationRecord>>,
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn list_recent(
        &self,
        user_id: &ClientUserId,
        limit: i64,
    ) -> Result<Vec<GenerationRecord>, HistoryRepositoryError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let mut records: Vec<GenerationRecord> = lock(&self.rows)
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }

    async fn insert(
        &self,
        record: &NewGenerationRecord,
    ) -> Result<GenerationRecord, HistoryRepositoryError> {
        let mut rows = lock(&self.rows);
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let row = GenerationRecord {
            id,
            user_id: record.user_id.clone(),
            selection: record.selection.clone(),
            transform: record.transform,
            image_url: record.image_url.clone(),
            created_at: record.created_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete_owned(
        &self,
        id: i32,
        user_id: &ClientUserId,
    ) -> Result<bool, HistoryRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| !(row.id == id && &row.user_id == user_id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    rows: Mutex<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut favorites: Vec<Favorite> = lock(&self.rows)
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(favorites)
    }

    async fn insert_if_absent(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let mut rows = lock(&self.rows);
        if let Some(existing) = rows
            .iter()
            .find(|row| &row.user_id == user_id && row.costume_id == costume_id)
        {
            return Ok(existing.clone());
        }
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let row = Favorite {
            id,
            user_id: user_id.clone(),
            costume_id,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| !(&row.user_id == user_id && row.costume_id == costume_id));
        Ok(rows.len() != before)
    }
}

/// Storage that keeps file bytes keyed by public path.
#[derive(Default)]
pub struct InMemoryAssetStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryAssetStorage {
    pub fn contains(&self, public_path: &str) -> bool {
        lock(&self.files).contains_key(public_path)
    }

    pub fn len(&self) -> usize {
        lock(&self.files).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AssetStorage for InMemoryAssetStorage {
    async fn store(
        &self,
        directory: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AssetStorageError> {
        let public_path = format!("/uploads/{directory}/{file_name}");
        lock(&self.files).insert(public_path.clone(), bytes.to_vec());
        Ok(public_path)
    }

    async fn remove(&self, public_path: &str) -> Result<(), AssetStorageError> {
        lock(&self.files).remove(public_path);
        Ok(())
    }
}

/// Verifier that accepts a fixed table of `token -> identity`.
#[derive(Default)]
pub struct StaticTokenVerifier {
    identities: Mutex<HashMap<String, VerifiedIdentity>>,
}

impl StaticTokenVerifier {
    /// Register `token` as belonging to `email`.
    ///
    /// # Panics
    ///
    /// Panics when `email` is not a valid address.
    pub fn with_identity(self, token: &str, email: &str) -> Self {
        let identity = VerifiedIdentity {
            email: match Email::new(email) {
                Ok(email) => email,
                Err(err) => panic!("fixture email {email}: {err}"),
            },
            name: Some(email.split('@').next().unwrap_or(email).to_owned()),
            picture: None,
        };
        lock(&self.identities).insert(token.to_owned(), identity);
        self
    }
}

#[async_trait]
impl IdTokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdTokenError> {
        lock(&self.identities)
            .get(token)
            .cloned()
            .ok_or_else(|| IdTokenError::invalid("unknown token"))
    }
}
