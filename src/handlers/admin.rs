use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::AuthUser,
    extractors::{AuthGuard, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::admin as admin_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(admin_page))
        .route(names::ADMIN_USERS_URL, get(users_page))
        .route("/admin/users/{user_id}/role", post(set_role_post))
        .route("/admin/users/{user_id}/toggle-active", post(toggle_active_post))
        .route(names::MODERATION_URL, get(moderation_page))
        .route(
            "/admin/moderation/course/{public_id}/status",
            post(moderate_course_post),
        )
        .route(
            "/admin/moderation/rating/{rating_id}/toggle",
            post(toggle_rating_post),
        )
        .route(names::AUDIT_LOG_URL, get(audit_page))
}

// ----- overview -----

async fn admin_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    if !user.can_author() {
        return Err(AppError::Forbidden);
    }

    let stats = state
        .db
        .platform_stats()
        .await
        .reject("could not load platform stats")?;
    let monthly = state
        .db
        .monthly_enrollments()
        .await
        .reject("could not load enrollment history")?;

    Ok(views::render(
        is_htmx,
        "Admin",
        admin_views::admin_page(&stats, &monthly, &locale),
        &locale,
        Some(&user),
    ))
}

// ----- user management -----

fn require_user_manager(user: &AuthUser) -> Result<(), AppError> {
    if !user.can_manage_users() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn compose_users(
    state: &AppState,
    current_user_id: i32,
    locale: &str,
) -> Result<maud::Markup, AppError> {
    let users = state
        .db
        .users_with_enrollments()
        .await
        .reject("could not load users")?;
    Ok(admin_views::users_page(&users, current_user_id, locale))
}

async fn users_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_user_manager(&user)?;
    let body = compose_users(&state, user.id, &locale).await?;
    Ok(views::render(is_htmx, "Users", body, &locale, Some(&user)))
}

#[derive(Deserialize)]
struct RolePost {
    role: String,
}

async fn set_role_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(user_id): Path<i32>,
    Json(body): Json<RolePost>,
) -> Result<maud::Markup, AppError> {
    require_user_manager(&user)?;

    if user_id == user.id {
        return Err(AppError::Input("you cannot change your own role"));
    }
    if !names::ROLES.contains(&body.role.as_str()) {
        return Err(AppError::Input("unknown role"));
    }

    let updated = state
        .db
        .set_user_role(user_id, &body.role)
        .await
        .reject("could not change role")?;
    if !updated {
        return Err(AppError::NotFound);
    }
    tracing::info!("user {user_id} role set to {} by user {}", body.role, user.id);

    let body = compose_users(&state, user.id, &locale).await?;
    Ok(views::titled("Users", body))
}

async fn toggle_active_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(user_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    require_user_manager(&user)?;

    if user_id == user.id {
        return Err(AppError::Input("you cannot deactivate your own account"));
    }

    let now_active = state
        .db
        .toggle_user_active(user_id)
        .await
        .reject("could not toggle account")?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        "user {user_id} {} by user {}",
        if now_active { "activated" } else { "deactivated" },
        user.id
    );

    let body = compose_users(&state, user.id, &locale).await?;
    Ok(views::titled("Users", body))
}

// ----- moderation -----

fn require_moderator(user: &AuthUser) -> Result<(), AppError> {
    if !user.can_moderate() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn compose_moderation(state: &AppState, locale: &str) -> Result<maud::Markup, AppError> {
    let courses = state
        .db
        .moderation_courses()
        .await
        .reject("could not load courses")?;
    let ratings = state
        .db
        .ratings_for_moderation()
        .await
        .reject("could not load ratings")?;
    Ok(admin_views::moderation_page(&courses, &ratings, locale))
}

async fn moderation_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_moderator(&user)?;
    let body = compose_moderation(&state, &locale).await?;
    Ok(views::render(is_htmx, "Moderation", body, &locale, Some(&user)))
}

#[derive(Deserialize)]
struct ModeratePost {
    status: String,
}

async fn moderate_course_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<ModeratePost>,
) -> Result<maud::Markup, AppError> {
    require_moderator(&user)?;

    // Moderators switch courses between live and hidden; drafts stay with
    // their author.
    if body.status != "active" && body.status != "inactive" {
        return Err(AppError::Input("unknown course status"));
    }

    let (course_id, title) = state
        .db
        .set_course_status(&public_id, &body.status)
        .await
        .reject("could not change course status")?
        .ok_or(AppError::NotFound)?;

    let action = if body.status == "active" {
        "activated"
    } else {
        "deactivated"
    };
    state
        .db
        .record_course_action(
            Some(course_id),
            &title,
            action,
            user.id,
            &user.display_name,
            &["status".to_string()],
        )
        .await
        .reject("could not record audit entry")?;

    let body = compose_moderation(&state, &locale).await?;
    Ok(views::titled("Moderation", body))
}

async fn toggle_rating_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(rating_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    require_moderator(&user)?;

    let status = state
        .db
        .toggle_rating_status(rating_id)
        .await
        .reject("could not toggle rating")?
        .ok_or(AppError::NotFound)?;
    tracing::info!("rating {rating_id} set to {status} by user {}", user.id);

    let body = compose_moderation(&state, &locale).await?;
    Ok(views::titled("Moderation", body))
}

// ----- audit log -----

#[derive(Deserialize)]
struct AuditQuery {
    #[serde(default)]
    action: String,
    #[serde(default)]
    page: i64,
}

async fn audit_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<AuditQuery>,
) -> Result<maud::Markup, AppError> {
    if !user.can_author() {
        return Err(AppError::Forbidden);
    }

    let page = query.page.max(0);
    let rows = state
        .db
        .audit_page(&query.action, page)
        .await
        .reject("could not load audit log")?;
    let total = state
        .db
        .audit_count(&query.action)
        .await
        .reject("could not count audit log")?;
    let actions = state
        .db
        .audit_actions()
        .await
        .reject("could not load audit actions")?;

    Ok(views::render(
        is_htmx,
        "Audit Log",
        admin_views::audit_page(&rows, &actions, &query.action, page, total, &locale),
        &locale,
        Some(&user),
    ))
}
