use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tasks_api::v1::{Task, TaskInput, TaskQuery};
use tracing::info;

use crate::{error::ApiError, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_tasks).post(add_task))
        .route(
            "/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

async fn get_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(query) = query?;
    let store = &state.store;

    let tasks = match query {
        TaskQuery {
            status: None,
            date: None,
            keyword: None,
        } => store.get_all().await?,
        TaskQuery {
            status: Some(status),
            date: None,
            keyword: None,
        } => store.get_by_status(status).await?,
        TaskQuery {
            status: None,
            date: Some(date),
            keyword: None,
        } => store.get_by_create_date(date).await?,
        TaskQuery {
            status: None,
            date: None,
            keyword: Some(keyword),
        } => store.get_by_keyword(&keyword).await?,
        _ => {
            return Err(ApiError::Validation(String::from(
                "at most one filter may be given",
            )))
        }
    };

    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

async fn add_task(
    State(state): State<Arc<AppState>>,
    input: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(input) = input?;

    let id = state.store.create(&input.title, &input.description).await?;
    let task = state.store.get(id).await?;

    info!(
        id = task.id,
        title = %task.title,
        "created task"
    );

    Ok(Json(task))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<TaskInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(input) = input?;

    let rows = state
        .store
        .update(id, input.status, &input.title, &input.description)
        .await?;

    info!(
        id,
        status = input.status,
        title = %input.title,
        rows,
        "updated task"
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let rows = state.store.delete(id).await?;

    info!(id, rows, "deleted task");

    Ok(StatusCode::NO_CONTENT)
}
