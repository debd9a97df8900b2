//! REST adapter exposing the tracker over HTTP.
//!
//! The endpoints mirror the repository surface: collection reads and blind
//! full-replace writes, plus the daily-reminder sweep and its scheduled
//! trigger. Capacity enforcement is the lifecycle engine's job and happens
//! in the client driving these endpoints, not here.

#![expect(
    clippy::needless_pass_by_value,
    reason = "axum extractors are consumed by value"
)]

use crate::task::adapters::TaskRecord;
use crate::task::adapters::record::parse_drop_dead;
use crate::task::domain::{Category, Priority, Task, TaskDomainError, TaskDraft, TaskId, Workspace};
use crate::task::ports::TaskRepository;
use crate::task::services::DailyResetService;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared state behind every handler.
pub struct ApiState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    reset: DailyResetService<R, C>,
    clock: Arc<C>,
    cron_secret: Option<String>,
}

impl<R, C> ApiState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler state.
    ///
    /// When `cron_secret` is set, the scheduled trigger endpoint requires a
    /// matching bearer token; when unset the check is disabled.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>, cron_secret: Option<String>) -> Self {
        Self {
            reset: DailyResetService::new(Arc::clone(&repository), Arc::clone(&clock)),
            repository,
            clock,
            cron_secret,
        }
    }
}

/// Builds the REST router over the given state.
#[must_use]
pub fn router<R, C>(state: Arc<ApiState<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api/tasks", get(list_tasks::<R, C>).post(create_task::<R, C>))
        .route("/api/tasks/reset-daily", post(reset_daily::<R, C>))
        .route(
            "/api/tasks/{id}",
            put(update_task::<R, C>).delete(delete_task::<R, C>),
        )
        .route("/api/cron/daily-reset", get(cron_daily_reset::<R, C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Errors mapped onto HTTP status categories.
///
/// Storage failures are reported generically; details go to the log, not
/// the wire.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input: unknown enum value, empty text, bad date.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Missing or wrong cron shared secret.
    #[error("unauthorized")]
    Unauthorized,
    /// Storage-backend failure.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn internal(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "request failed");
        Self::Internal
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkspaceQuery {
    #[serde(default)]
    workspace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    task: TaskPayload,
}

/// Incoming task fields. The record identifier always comes from the
/// route, never from the payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskPayload {
    text: String,
    priority: String,
    #[serde(default)]
    drop_dead: String,
    category: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    is_daily_reminder: bool,
    #[serde(default)]
    workspace: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct CreatedBody {
    id: String,
}

#[derive(Debug, Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Debug, Serialize)]
struct ResetBody {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize)]
struct CronBody {
    success: bool,
    message: String,
    result: ResetBody,
}

fn parse_workspace(value: Option<&str>) -> Result<Workspace, ApiError> {
    value.map_or(Ok(Workspace::default()), |raw| {
        Workspace::try_from(raw).map_err(ApiError::from)
    })
}

async fn list_tasks<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<BTreeMap<String, TaskRecord>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let workspace = parse_workspace(query.workspace.as_deref())?;
    let tasks = state
        .repository
        .list(workspace)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(
        tasks
            .iter()
            .map(|task| (task.id().to_string(), TaskRecord::from_domain(task)))
            .collect(),
    ))
}

async fn create_task<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
    Json(body): Json<TaskEnvelope>,
) -> Result<Json<CreatedBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = body.task;
    let workspace = parse_workspace(payload.workspace.as_deref())?;
    let (priority, implies_reminder) = Priority::from_stored(&payload.priority)?;
    let category = Category::try_from(payload.category.as_str())?;
    let drop_dead = parse_drop_dead(&payload.drop_dead)?;

    // Creation defaults apply regardless of what the payload carries:
    // notes start empty and the task starts incomplete.
    let draft = TaskDraft::new(payload.text, priority, category)?
        .with_workspace(workspace)
        .with_drop_dead(drop_dead)
        .with_daily_reminder(payload.is_daily_reminder || implies_reminder);
    let task = Task::new(draft, &*state.clock);
    state
        .repository
        .store(&task)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(CreatedBody {
        id: task.id().to_string(),
    }))
}

async fn update_task<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
    Path(id): Path<String>,
    Json(body): Json<TaskEnvelope>,
) -> Result<Json<SuccessBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = TaskId::parse(&id)?;
    let payload = body.task;
    let record = TaskRecord {
        id: task_id.into_inner(),
        text: payload.text,
        priority: payload.priority,
        drop_dead: payload.drop_dead,
        category: payload.category,
        notes: payload.notes,
        completed: payload.completed,
        is_daily_reminder: payload.is_daily_reminder,
        workspace: payload
            .workspace
            .unwrap_or_else(|| Workspace::default().as_str().to_owned()),
        created_at: payload.created_at,
        updated_at: Some(state.clock.utc()),
    };
    let task = record.into_domain()?;
    state
        .repository
        .store(&task)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(SuccessBody { success: true }))
}

async fn delete_task<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
    Path(id): Path<String>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<SuccessBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let workspace = parse_workspace(query.workspace.as_deref())?;
    let task_id = TaskId::parse(&id)?;
    state
        .repository
        .delete(workspace, &task_id)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(SuccessBody { success: true }))
}

async fn run_reset<R, C>(state: &ApiState<R, C>) -> Result<ResetBody, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let summary = state.reset.run().await.map_err(ApiError::internal)?;
    Ok(ResetBody {
        success: true,
        message: format!(
            "Daily reminders reset successfully ({} re-armed)",
            summary.total_reset()
        ),
    })
}

async fn reset_daily<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
) -> Result<Json<ResetBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(run_reset(state.as_ref()).await?))
}

async fn cron_daily_reset<R, C>(
    State(state): State<Arc<ApiState<R, C>>>,
    headers: HeaderMap,
) -> Result<Json<CronBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    if let Some(secret) = &state.cron_secret {
        let expected = format!("Bearer {secret}");
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == expected);
        if !authorized {
            return Err(ApiError::Unauthorized);
        }
    }
    let result = run_reset(state.as_ref()).await?;
    Ok(Json(CronBody {
        success: true,
        message: "Daily reminder cron job executed successfully".to_owned(),
        result,
    }))
}
