//! PostgreSQL-backed `NavigationButtonRepository` over the two seeded rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NavigationButtonRepository, NavigationButtonRepositoryError};
use crate::domain::{NavigationButton, NavigationButtonType};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NavigationButtonRow;
use super::pool::DbPool;
use super::schema::navigation_buttons;

#[derive(Clone)]
pub struct DieselNavigationButtonRepository {
    pool: DbPool,
}

impl DieselNavigationButtonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_button(
    row: NavigationButtonRow,
) -> Result<NavigationButton, NavigationButtonRepositoryError> {
    let button_type = row
        .button_type
        .parse::<NavigationButtonType>()
        .map_err(|err| NavigationButtonRepositoryError::query(err.to_string()))?;
    Ok(NavigationButton {
        button_type,
        image_path: row.image_path,
        updated_at: row.updated_at,
    })
}

fn missing(button_type: NavigationButtonType) -> NavigationButtonRepositoryError {
    NavigationButtonRepositoryError::missing(button_type.as_str())
}

#[async_trait]
impl NavigationButtonRepository for DieselNavigationButtonRepository {
    async fn list(&self) -> Result<Vec<NavigationButton>, NavigationButtonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NavigationButtonRow> = navigation_buttons::table
            .select(NavigationButtonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut buttons = rows
            .into_iter()
            .map(row_to_button)
            .collect::<Result<Vec<_>, _>>()?;
        // `prev` before `next`, matching the on-screen order.
        buttons.sort_by_key(|button| button.button_type != NavigationButtonType::Prev);
        Ok(buttons)
    }

    async fn find(
        &self,
        button_type: NavigationButtonType,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NavigationButtonRow> = navigation_buttons::table
            .filter(navigation_buttons::button_type.eq(button_type.as_str()))
            .select(NavigationButtonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map_or_else(|| Err(missing(button_type)), row_to_button)
    }

    async fn set_image(
        &self,
        button_type: NavigationButtonType,
        image_path: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NavigationButtonRow> = diesel::update(
            navigation_buttons::table
                .filter(navigation_buttons::button_type.eq(button_type.as_str())),
        )
        .set((
            navigation_buttons::image_path.eq(image_path),
            navigation_buttons::updated_at.eq(at),
        ))
        .returning(NavigationButtonRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map_or_else(|| Err(missing(button_type)), row_to_button)
    }
}
