use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analytics::{self, SetupStats};
use crate::db::{profile_repo, trade_repo};
use crate::errors::AppError;
use crate::models::{JournalProfile, BUILTIN_SETUPS, MOODS};
use crate::AppState;

use super::trades::{broadcast_snapshot, ApiResponse};

/// Journal profile plus the fixed lists the trade form renders from.
#[derive(Serialize)]
pub struct ProfileView {
    pub profile: JournalProfile,
    pub all_setups: Vec<String>,
    pub builtin_setups: Vec<String>,
    pub moods: Vec<String>,
}

#[derive(Deserialize)]
pub struct LabelRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct RenameSetupRequest {
    pub old_name: String,
    pub new_name: String,
}

/// GET /api/profile
pub async fn get(State(state): State<AppState>) -> Result<Json<ProfileView>, AppError> {
    let profile = profile_repo::get_profile(&state.db).await?;
    Ok(Json(view(profile)))
}

/// GET /api/profile/setup-stats — per-setup performance for the manager view
pub async fn setup_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<SetupStats>>, AppError> {
    let profile = profile_repo::get_profile(&state.db).await?;
    let trades = trade_repo::get_all_trades(&state.db).await?;
    let stats = analytics::setup_stats(&trades, &profile.all_setups(), &profile.custom_setups);
    Ok(Json(stats))
}

/// POST /api/profile/setups — add a custom setup label
pub async fn add_setup(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("setup name must not be empty".into()));
    }

    let profile = profile_repo::get_profile(&state.db).await?;
    if JournalProfile::is_builtin_setup(&name) || profile.custom_setups.contains(&name) {
        return Err(AppError::BadRequest(format!("setup '{name}' already exists")));
    }

    let mut setups = profile.custom_setups;
    setups.push(name);
    let profile = profile_repo::set_custom_setups(&state.db, &setups).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// DELETE /api/profile/setups — remove a custom setup label (idempotent;
/// existing trades keep the label and fall back to its raw text)
pub async fn remove_setup(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let profile = profile_repo::get_profile(&state.db).await?;
    let setups: Vec<String> = profile
        .custom_setups
        .into_iter()
        .filter(|s| *s != body.name)
        .collect();
    let profile = profile_repo::set_custom_setups(&state.db, &setups).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// PUT /api/profile/setups — rename a custom setup and rewrite the label on
/// every trade that used it
pub async fn rename_setup(
    State(state): State<AppState>,
    Json(body): Json<RenameSetupRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let new_name = body.new_name.trim().to_string();
    if new_name.is_empty() {
        return Err(AppError::BadRequest("setup name must not be empty".into()));
    }

    let profile = profile_repo::get_profile(&state.db).await?;
    if !profile.custom_setups.contains(&body.old_name) {
        return Err(AppError::NotFound(format!(
            "custom setup '{}' not found",
            body.old_name
        )));
    }
    if JournalProfile::is_builtin_setup(&new_name) || profile.custom_setups.contains(&new_name) {
        return Err(AppError::BadRequest(format!("setup '{new_name}' already exists")));
    }

    let setups: Vec<String> = profile
        .custom_setups
        .into_iter()
        .map(|s| if s == body.old_name { new_name.clone() } else { s })
        .collect();
    let profile = profile_repo::set_custom_setups(&state.db, &setups).await?;

    let rewritten = trade_repo::rename_setup(&state.db, &body.old_name, &new_name).await?;
    tracing::info!(old = %body.old_name, new = %new_name, trades = rewritten, "setup renamed");
    if rewritten > 0 {
        broadcast_snapshot(&state).await;
    }

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// POST /api/profile/rules — add a trading rule
pub async fn add_rule(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("rule must not be empty".into()));
    }

    let profile = profile_repo::get_profile(&state.db).await?;
    if profile.rules.contains(&name) {
        return Err(AppError::BadRequest(format!("rule '{name}' already exists")));
    }

    let mut rules = profile.rules;
    rules.push(name);
    let profile = profile_repo::set_rules(&state.db, &rules).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// DELETE /api/profile/rules — remove a trading rule (idempotent)
pub async fn remove_rule(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let profile = profile_repo::get_profile(&state.db).await?;
    let rules: Vec<String> = profile
        .rules
        .into_iter()
        .filter(|r| *r != body.name)
        .collect();
    let profile = profile_repo::set_rules(&state.db, &rules).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// POST /api/profile/mistakes — add a mistake tag
pub async fn add_mistake(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("mistake label must not be empty".into()));
    }

    let profile = profile_repo::get_profile(&state.db).await?;
    if profile.mistake_labels.contains(&name) {
        return Err(AppError::BadRequest(format!(
            "mistake label '{name}' already exists"
        )));
    }

    let mut labels = profile.mistake_labels;
    labels.push(name);
    let profile = profile_repo::set_mistake_labels(&state.db, &labels).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

/// DELETE /api/profile/mistakes — remove a mistake tag (idempotent)
pub async fn remove_mistake(
    State(state): State<AppState>,
    Json(body): Json<LabelRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let profile = profile_repo::get_profile(&state.db).await?;
    let labels: Vec<String> = profile
        .mistake_labels
        .into_iter()
        .filter(|m| *m != body.name)
        .collect();
    let profile = profile_repo::set_mistake_labels(&state.db, &labels).await?;

    Ok(Json(ApiResponse::ok(view(profile))))
}

fn view(profile: JournalProfile) -> ProfileView {
    ProfileView {
        all_setups: profile.all_setups(),
        builtin_setups: BUILTIN_SETUPS.iter().map(|s| s.to_string()).collect(),
        moods: MOODS.iter().map(|s| s.to_string()).collect(),
        profile,
    }
}
