use async_trait::async_trait;
use migration::Migrator;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement,
    sea_query::{Expr, Order, SimpleExpr},
};
use sea_orm_migration::MigratorTrait;

use crate::{
    entities::{movie, section, section_movie},
    error::{CatalogError, CatalogResult},
    models::{Movie, MovieId, MovieOrder, PageWindow, Section, SectionId},
    store::{MovieStore, PinnedLinkStore, SectionStore},
};

const PRAGMAS: &[&str] =
    &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA foreign_keys=ON"];

pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> CatalogResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("catalog schema up to date");
    Ok(db)
}

/// SQLite binds LIMIT/OFFSET as i64. An offset beyond that can only be past
/// the end, so it yields `None`; the limit saturates.
fn sql_window(window: PageWindow) -> Option<(u64, u64)> {
    let max = i64::MAX as u64;
    (window.offset <= max).then(|| (window.limit.min(max), window.offset))
}

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SectionStore for SeaOrmStore {
    async fn list_sections(&self, include_inactive: bool) -> CatalogResult<Vec<Section>> {
        let mut query = section::Entity::find();
        if !include_inactive {
            query = query.filter(section::Column::IsActive.eq(true));
        }

        let rows = query
            .order_by_asc(section::Column::DisplayOrder)
            .order_by_asc(section::Column::Title)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Section::from).collect())
    }

    async fn get_section(&self, id: SectionId) -> CatalogResult<Section> {
        section::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Section::from)
            .ok_or(CatalogError::NotFound(id))
    }
}

#[async_trait]
impl PinnedLinkStore for SeaOrmStore {
    async fn list_pinned(&self, section_id: SectionId, window: PageWindow) -> CatalogResult<Vec<Movie>> {
        let Some((limit, offset)) = sql_window(window) else {
            return Ok(Vec::new());
        };

        let rows = section_movie::Entity::find()
            .find_also_related(movie::Entity)
            .filter(section_movie::Column::SectionId.eq(section_id))
            .order_by_asc(section_movie::Column::DisplayOrder)
            .order_by_asc(section_movie::Column::MovieId)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, movie)| movie).map(Movie::from).collect())
    }

    async fn pinned_movie_ids(&self, section_id: SectionId) -> CatalogResult<Vec<MovieId>> {
        let ids = section_movie::Entity::find()
            .select_only()
            .column(section_movie::Column::MovieId)
            .filter(section_movie::Column::SectionId.eq(section_id))
            .order_by_asc(section_movie::Column::DisplayOrder)
            .order_by_asc(section_movie::Column::MovieId)
            .into_tuple::<MovieId>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }
}

#[async_trait]
impl MovieStore for SeaOrmStore {
    async fn list_ordered(
        &self,
        order: MovieOrder,
        window: PageWindow,
        exclude: &[MovieId],
    ) -> CatalogResult<Vec<Movie>> {
        let mut query = movie::Entity::find();
        if !exclude.is_empty() {
            query = query.filter(movie::Column::Id.is_not_in(exclude.iter().copied()));
        }

        let Some((limit, offset)) = sql_window(window) else {
            return Ok(Vec::new());
        };

        // date() is NULL for text that is not a date, matching the projection.
        let key: SimpleExpr = match order {
            MovieOrder::ReleaseDateDesc => Expr::cust(r#"date("movies"."release_date")"#),
            MovieOrder::RatingDesc => Expr::col((movie::Entity, movie::Column::Rating)).into(),
        };

        // `key IS NULL` ascending keeps missing values behind every real one.
        let rows = query
            .order_by_asc(Expr::expr(key.clone()).is_null())
            .order_by_desc(key)
            .order_by_asc(movie::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn list_random(&self, limit: u64) -> CatalogResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(limit.min(i64::MAX as u64))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }
}
