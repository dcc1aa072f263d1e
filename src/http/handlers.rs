use super::ServerState;
use crate::core::registry::{GroupRegistry, parse_group_id};
use crate::core::status::{self, GroupOverview, StatsView, StatusContext};
use crate::core::RoundLifecycle;
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::models::WorkingGroup;
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct GroupQuery {
    pub group_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupForm {
    pub group_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NameForm {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Read paths ignore a missing or malformed id and fall back to the first
/// group.
fn lenient_id(raw: Option<&str>) -> Option<i64> {
    raw.filter(|s| !s.trim().is_empty())
        .and_then(|s| parse_group_id(s).ok())
}

fn required_id(raw: Option<&str>) -> AppResult<i64> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_group_id(s),
        _ => Err(AppError::InvalidGroupId(String::new())),
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn status(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<Json<StatusContext>> {
    let mut pool = state.db.lock().await;
    let ctx = status::build_status_context(
        &mut pool,
        lenient_id(query.group_id.as_deref()),
        &Local::now(),
    )?;
    Ok(Json(ctx))
}

pub async fn stats(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<Json<StatsView>> {
    let mut pool = state.db.lock().await;
    let view = status::build_stats_view(
        &mut pool,
        lenient_id(query.group_id.as_deref()),
        &Local::now(),
    )?;
    Ok(Json(view))
}

pub async fn start(
    State(state): State<ServerState>,
    Form(form): Form<GroupForm>,
) -> AppResult<Json<StatusContext>> {
    let id = required_id(form.group_id.as_deref())?;
    let mut pool = state.db.lock().await;
    RoundLifecycle::start(&mut pool, id)?;
    Ok(Json(status::build_status_context(
        &mut pool,
        Some(id),
        &Local::now(),
    )?))
}

pub async fn stop(
    State(state): State<ServerState>,
    Form(form): Form<GroupForm>,
) -> AppResult<Json<StatusContext>> {
    let id = required_id(form.group_id.as_deref())?;
    let mut pool = state.db.lock().await;
    RoundLifecycle::stop(&mut pool, id)?;
    Ok(Json(status::build_status_context(
        &mut pool,
        Some(id),
        &Local::now(),
    )?))
}

pub async fn reset_group(
    State(state): State<ServerState>,
    Form(form): Form<GroupForm>,
) -> AppResult<Json<StatusContext>> {
    let id = required_id(form.group_id.as_deref())?;
    let mut pool = state.db.lock().await;
    RoundLifecycle::reset(&mut pool, id)?;
    Ok(Json(status::build_status_context(
        &mut pool,
        Some(id),
        &Local::now(),
    )?))
}

pub async fn list_groups(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<GroupOverview>>> {
    let mut pool = state.db.lock().await;
    Ok(Json(status::group_overviews(&mut pool, &Local::now())?))
}

pub async fn create_group(
    State(state): State<ServerState>,
    Form(form): Form<NameForm>,
) -> AppResult<(StatusCode, Json<WorkingGroup>)> {
    let mut pool = state.db.lock().await;
    let group = GroupRegistry::create_group(&mut pool, form.name.as_deref().unwrap_or(""))?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn update_group(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Form(form): Form<NameForm>,
) -> AppResult<Json<WorkingGroup>> {
    let id = parse_group_id(&id)?;
    let mut pool = state.db.lock().await;
    let group = GroupRegistry::rename_group(&mut pool, id, form.name.as_deref().unwrap_or(""))?;
    Ok(Json(group))
}

pub async fn delete_group(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_group_id(&id)?;
    let mut pool = state.db.lock().await;
    GroupRegistry::delete_group(&mut pool, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_csv(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<impl IntoResponse> {
    let requested = lenient_id(query.group_id.as_deref());
    let pool = state.db.lock().await;

    // An unknown id exports every group rather than failing.
    let group = match requested {
        Some(id) => GroupRegistry::get_group(&pool, id).ok(),
        None => None,
    };
    let label = group.as_ref().map(|g| {
        if g.name.is_empty() {
            format!("Group-{}", g.id)
        } else {
            g.name.clone()
        }
    });

    let rows = export::build_rows(&pool, group.as_ref().map(|g| g.id), Utc::now())?;
    drop(pool);

    let body = export::csv::to_csv_bytes(&rows)?;
    let file_name = export::export_file_name(label.as_deref(), ExportFormat::Csv, &Local::now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}
