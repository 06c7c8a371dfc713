use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::AppResult,
    models::{MoviePatch, NewMovie, Pagination},
};

/// Owns the `Movies` table. Every method is a single round trip (or a
/// read followed by a write) against the shared connection pool.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let now = now_ms();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            kind: Set(new.kind),
            director: Set(new.director),
            budget: Set(new.budget),
            location: Set(new.location),
            duration: Set(new.duration),
            year: Set(new.year),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await?;
        debug!(id = created.id, "inserted movie");
        Ok(created)
    }

    pub async fn get(&self, id: u32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Newest first; `id` breaks ties between rows created in the same millisecond.
    pub async fn list(&self, pagination: Pagination) -> AppResult<(Vec<movie::Model>, u64)> {
        let paginator = movie::Entity::find()
            .order_by_desc(movie::Column::CreatedAt)
            .order_by_desc(movie::Column::Id)
            .paginate(&self.db, pagination.limit);

        let total = paginator.num_items().await?;

        // Windows past the last row are empty; skipping the fetch also keeps
        // huge page numbers from overflowing the offset.
        let rows = match pagination.offset() {
            Some(offset) if offset < total => paginator.fetch_page(pagination.page - 1).await?,
            _ => Vec::new(),
        };

        debug!(
            page = pagination.page,
            limit = pagination.limit,
            total = total,
            returned = rows.len(),
            "listed movies"
        );
        Ok((rows, total))
    }

    /// Returns `false` when no row has this id.
    pub async fn update(&self, id: u32, patch: MoviePatch) -> AppResult<bool> {
        let Some(existing) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut active: movie::ActiveModel = existing.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(kind) = patch.kind {
            active.kind = Set(kind);
        }
        if let Some(director) = patch.director {
            active.director = Set(director);
        }
        if let Some(budget) = patch.budget {
            active.budget = Set(budget);
        }
        if let Some(location) = patch.location {
            active.location = Set(location);
        }
        if let Some(duration) = patch.duration {
            active.duration = Set(duration);
        }
        if let Some(year) = patch.year {
            active.year = Set(year);
        }
        active.updated_at = Set(now_ms());

        match active.update(&self.db).await {
            Ok(_) => {
                debug!(id = id, "updated movie");
                Ok(true)
            }
            // Deleted between the read and the write.
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns `false` when no row has this id.
    pub async fn delete(&self, id: u32) -> AppResult<bool> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(id = id, rows = result.rows_affected, "deleted movie");
        Ok(result.rows_affected > 0)
    }
}

fn now_ms() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}

#[cfg(test)]
pub(crate) mod tests {
    use rust_decimal::Decimal;
    use sea_orm::DatabaseConnection;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::entities::movie::MovieType;

    /// Keeps the temporary SQLite file alive for the lifetime of the connection.
    pub(crate) struct TestDb {
        connection: DatabaseConnection,
        _temp_file: NamedTempFile,
    }

    impl TestDb {
        pub(crate) async fn new() -> Self {
            let temp_file = NamedTempFile::new().expect("Failed to create temp file");
            let db_path = temp_file.path().to_str().expect("Invalid temp file path");
            let db_url = format!("sqlite://{}?mode=rwc", db_path);

            let connection = crate::db::connect_and_migrate(&db_url)
                .await
                .expect("Failed to prepare test database");

            Self { connection, _temp_file: temp_file }
        }

        pub(crate) fn connection(&self) -> &DatabaseConnection {
            &self.connection
        }

        pub(crate) fn store(&self) -> MovieStore {
            MovieStore::new(self.connection.clone())
        }
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            kind: MovieType::Movies,
            director: "Director".to_string(),
            budget: Decimal::new(150_000, 2),
            location: "Chennai".to_string(),
            duration: "2h 10m".to_string(),
            year: "2021".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let test_db = TestDb::new().await;
        let store = test_db.store();

        let created = store.create(new_movie("First")).await.expect("create");
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(created.id).await.expect("get").expect("present");
        assert_eq!(fetched.title, "First");
        assert_eq!(fetched.kind, MovieType::Movies);
        assert_eq!(fetched.budget, Decimal::new(1500, 0));
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let test_db = TestDb::new().await;
        assert!(test_db.store().get(42).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let test_db = TestDb::new().await;
        let store = test_db.store();

        let a = store.create(new_movie("A")).await.expect("create");
        assert!(store.delete(a.id).await.expect("delete"));
        let b = store.create(new_movie("B")).await.expect("create");
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_windows() {
        let test_db = TestDb::new().await;
        let store = test_db.store();

        for i in 0..5 {
            store.create(new_movie(&format!("Movie {i}"))).await.expect("create");
        }

        let (rows, total) = store.list(Pagination { page: 1, limit: 2 }).await.expect("list");
        assert_eq!(total, 5);
        assert_eq!(
            rows.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            ["Movie 4", "Movie 3"]
        );

        let (rows, _) = store.list(Pagination { page: 3, limit: 2 }).await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Movie 0");

        let (rows, total) = store.list(Pagination { page: 9, limit: 2 }).await.expect("list");
        assert!(rows.is_empty());
        assert_eq!(total, 5);

        let huge = Pagination { page: i64::MAX as u64, limit: 100 };
        let (rows, total) = store.list(huge).await.expect("list");
        assert!(rows.is_empty());
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn list_is_stable_across_calls() {
        let test_db = TestDb::new().await;
        let store = test_db.store();
        for i in 0..4 {
            store.create(new_movie(&format!("Movie {i}"))).await.expect("create");
        }

        let page = Pagination { page: 1, limit: 3 };
        let (first, _) = store.list(page).await.expect("list");
        let (second, _) = store.list(page).await.expect("list");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let test_db = TestDb::new().await;
        let store = test_db.store();
        let created = store.create(new_movie("Before")).await.expect("create");

        let patch = MoviePatch { title: Some("After".to_string()), ..Default::default() };
        assert!(store.update(created.id, patch).await.expect("update"));

        let updated = store.get(created.id).await.expect("get").expect("present");
        assert_eq!(updated.title, "After");
        assert_eq!(updated.director, created.director);
        assert_eq!(updated.budget, created.budget);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_reports_false_and_changes_nothing() {
        let test_db = TestDb::new().await;
        let store = test_db.store();
        let created = store.create(new_movie("Keep")).await.expect("create");

        let patch = MoviePatch { year: Some("1999".to_string()), ..Default::default() };
        assert!(!store.update(created.id + 100, patch).await.expect("update"));

        let untouched = store.get(created.id).await.expect("get").expect("present");
        assert_eq!(untouched, created);
    }

    #[tokio::test]
    async fn delete_missing_leaves_other_rows() {
        let test_db = TestDb::new().await;
        let store = test_db.store();
        let created = store.create(new_movie("Stay")).await.expect("create");

        assert!(!store.delete(created.id + 1).await.expect("delete"));
        let (_, total) = store.list(Pagination { page: 1, limit: 10 }).await.expect("list");
        assert_eq!(total, 1);

        assert!(store.delete(created.id).await.expect("delete"));
        assert!(store.get(created.id).await.expect("get").is_none());
    }
}
