use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tasks_api::v1::Task;

const SELECT_TASKS: &str =
    "SELECT id, title, description, status, create_time, complete_time FROM tasks";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    status: bool,
    create_time: DateTime<Utc>,
    complete_time: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            create_time: row.create_time,
            complete_time: row.complete_time,
        }
    }
}

/// Reads and writes rows of the `tasks` table.
///
/// Every operation is a single autocommit statement against the pool.
#[derive(Clone, Debug)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts an incomplete task and returns its generated id.
    pub async fn create(&self, title: &str, description: &str) -> StoreResult<i64> {
        let result =
            sqlx::query("INSERT INTO tasks (title, description, create_time) VALUES (?, ?, ?)")
                .bind(title)
                .bind(description)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> StoreResult<Vec<Task>> {
        self.fetch(sqlx::query_as(SELECT_TASKS)).await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Task> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{SELECT_TASKS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Task::from).ok_or(StoreError::NotFound(id))
    }

    /// Replaces every mutable field of the task.
    ///
    /// `complete_time` becomes now when `status` is true and is cleared otherwise.
    /// Returns the number of rows affected; an unknown id affects none.
    pub async fn update(
        &self,
        id: i64,
        status: bool,
        title: &str,
        description: &str,
    ) -> StoreResult<u64> {
        let complete_time = status.then(Utc::now);

        let result = sqlx::query(
            "UPDATE tasks SET status = ?, title = ?, description = ?, complete_time = ? WHERE id = ?",
        )
        .bind(status)
        .bind(title)
        .bind(description)
        .bind(complete_time)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn get_by_status(&self, status: bool) -> StoreResult<Vec<Task>> {
        let sql = format!("{SELECT_TASKS} WHERE status = ?");
        self.fetch(sqlx::query_as(&sql).bind(status)).await
    }

    /// Tasks created on `date`, compared in UTC.
    pub async fn get_by_create_date(&self, date: NaiveDate) -> StoreResult<Vec<Task>> {
        let sql = format!("{SELECT_TASKS} WHERE date(create_time) = ?");
        self.fetch(sqlx::query_as(&sql).bind(date)).await
    }

    /// Tasks whose title or description contains `keyword`, ignoring case.
    ///
    /// SQLite only folds ASCII in `LIKE`, so the match runs over the decoded rows.
    pub async fn get_by_keyword(&self, keyword: &str) -> StoreResult<Vec<Task>> {
        let keyword = keyword.to_lowercase();

        let mut tasks = self.get_all().await?;
        tasks.retain(|task| {
            task.title.to_lowercase().contains(&keyword)
                || task.description.to_lowercase().contains(&keyword)
        });

        Ok(tasks)
    }

    async fn fetch<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Sqlite, TaskRow, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> StoreResult<Vec<Task>> {
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }
}
