//! Dashboard handler

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::app::DashboardStats;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: User,
    pub stats: DashboardStats,
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(DashboardResponse { user, stats }))
}
