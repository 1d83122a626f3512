//! City repository with bounded-timeout statements.
//!
//! Every call gets its own deadline. Update conflicts and delete misses are
//! read from the matched-row count, and list pages carry their total through
//! a window function instead of a second `COUNT(*)` query.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ActiveValue::Unchanged,
    DatabaseConnection, DbErr, EntityTrait, Order, QueryOrder, QuerySelect, Select,
};
use validator::Validate;

use super::entities::city::{ActiveModel, Column, CountedRow, Entity as CityEntity, TOTAL_RECORDS_ALIAS};
use crate::domain::{City, NewCity};
use crate::errors::{AppError, AppResult};
use crate::types::{calculate_metadata, Filters, Metadata, SortDirection};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// City repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Store a new city and return it with its assigned id
    async fn insert(&self, city: NewCity) -> AppResult<City>;

    /// Replace name and state of an existing city.
    ///
    /// Returns [`AppError::EditConflict`] when no row matches `city.id`.
    async fn update(&self, city: &City) -> AppResult<()>;

    /// Delete a city by id.
    ///
    /// Returns [`AppError::RecordNotFound`] for ids below 1 or when no row
    /// was removed.
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// List one page of cities together with its metadata
    async fn list(&self, filters: &Filters) -> AppResult<(Vec<City>, Metadata)>;
}

/// Concrete implementation of CityRepository
pub struct CityStore {
    db: Arc<DatabaseConnection>,
    timeout: Duration,
}

impl CityStore {
    /// Create new repository instance.
    ///
    /// `timeout` bounds each statement individually.
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, timeout: Duration) -> Self {
        Self {
            db: db.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CityRepository for CityStore {
    async fn insert(&self, city: NewCity) -> AppResult<City> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(city.name.clone()),
            state: Set(city.state.clone()),
        };

        let stored = with_deadline("insert city", self.timeout, async {
            model.insert(self.db.as_ref()).await.map_err(AppError::from)
        })
        .await?;

        tracing::debug!(id = stored.id, "city inserted");
        Ok(city.with_id(stored.id))
    }

    async fn update(&self, city: &City) -> AppResult<()> {
        let model = ActiveModel {
            id: Unchanged(city.id),
            name: Set(city.name.clone()),
            state: Set(city.state.clone()),
        };

        with_deadline("update city", self.timeout, async {
            model.update(self.db.as_ref()).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::EditConflict,
                other => AppError::from(other),
            })
        })
        .await?;

        tracing::debug!(id = city.id, "city updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if id < 1 {
            return Err(AppError::RecordNotFound);
        }

        let result = with_deadline("delete city", self.timeout, async {
            CityEntity::delete_by_id(id)
                .exec(self.db.as_ref())
                .await
                .map_err(AppError::from)
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(AppError::RecordNotFound);
        }

        tracing::debug!(id, "city deleted");
        Ok(())
    }

    async fn list(&self, filters: &Filters) -> AppResult<(Vec<City>, Metadata)> {
        let query = list_query(filters)?;

        let rows = with_deadline("list cities", self.timeout, async {
            query
                .into_model::<CountedRow>()
                .all(self.db.as_ref())
                .await
                .map_err(AppError::from)
        })
        .await?;

        // Window total is identical on every row of the page.
        let total_records = rows
            .first()
            .map(|row| row.total_records)
            .unwrap_or(0);
        let cities: Vec<City> = rows.into_iter().map(City::from).collect();
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);

        tracing::debug!(
            returned = cities.len(),
            total_records,
            page = filters.page,
            "cities listed"
        );
        Ok((cities, metadata))
    }
}

/// Build the windowed page query. Filters are validated first, so only
/// safelisted columns are ever turned into an `ORDER BY` term.
pub(crate) fn list_query(filters: &Filters) -> AppResult<Select<CityEntity>> {
    filters.validate()?;

    let sort_column = Column::from_str(filters.sort_column()).map_err(|_| {
        AppError::internal(format!(
            "safelisted sort column `{}` is not a cities column",
            filters.sort_column()
        ))
    })?;
    let order = match filters.sort_direction() {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    Ok(CityEntity::find()
        .select_only()
        .column_as(Expr::cust("COUNT(*) OVER()"), TOTAL_RECORDS_ALIAS)
        .columns([Column::Id, Column::Name, Column::State])
        .order_by(sort_column, order)
        .order_by_asc(Column::Id)
        .limit(filters.limit())
        .offset(filters.offset()))
}

/// Run `fut` under `limit`. Dropping the future on expiry cancels the
/// in-flight statement.
pub async fn with_deadline<T, F>(operation: &'static str, limit: Duration, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or_else(|_| {
            Err(AppError::Timeout {
                operation,
                after: limit,
            })
        })
}
