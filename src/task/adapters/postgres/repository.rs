//! `PostgreSQL` repository implementation for task collections.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::adapters::integrity::find_inconsistency;
use crate::task::{
    domain::{PersistedTaskData, Quadrant, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            find_inconsistency(&tasks)
                .map_or(Ok(tasks), |problem| Err(TaskRepositoryError::Corrupt(problem)))
        })
        .await
    }

    async fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let rows = to_new_rows(tasks)?;
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(tasks::table).execute(tx)?;
                    if !rows.is_empty() {
                        diesel::insert_into(tasks::table)
                            .values(&rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn clear(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::delete(tasks::table)
                .execute(connection)
                .map(|_| ())
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_rows(tasks: &[Task]) -> TaskRepositoryResult<Vec<NewTaskRow>> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let position = i64::try_from(index).map_err(TaskRepositoryError::persistence)?;
            Ok(to_new_row(task, position))
        })
        .collect()
}

fn to_new_row(task: &Task, position: i64) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        position,
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        urgent: task.urgent(),
        important: task.important(),
        quadrant: task.quadrant().as_str().to_owned(),
        completed: task.completed(),
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        due_date,
        urgent,
        important,
        quadrant: persisted_quadrant,
        completed,
        completed_at,
        created_at,
        updated_at,
        ..
    } = row;

    let quadrant = Quadrant::try_from(persisted_quadrant.as_str())
        .map_err(|err| TaskRepositoryError::Corrupt(format!("task {id}: {err}")))?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        due_date,
        urgent,
        important,
        quadrant,
        completed,
        completed_at,
        created_at,
        updated_at,
    }))
}
