use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, Locale},
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use super::{compose_editor, record_audit, require_author, studio_course, CoursePost};
use crate::views::studio as studio_views;

pub(crate) async fn edit_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<CoursePost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    if body.title.trim().is_empty() || body.description.trim().is_empty() {
        return Err(AppError::Input("title and description are required"));
    }
    body.validate()?;

    let changed = state
        .db
        .update_course(
            &public_id,
            body.title.trim(),
            body.description.trim(),
            &body.category,
            &body.price_type,
            body.price_cents,
            body.image_url(),
        )
        .await
        .reject("could not update course")?
        .ok_or(AppError::NotFound)?;

    // A save that changed nothing leaves no audit trace.
    if !changed.is_empty() {
        let course = studio_course(&state, &public_id).await?;
        record_audit(
            &state,
            &user,
            Some(course.id),
            &course.title,
            "updated",
            &changed,
        )
        .await?;
    }

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

#[derive(Deserialize)]
pub(crate) struct StatusPost {
    status: String,
}

pub(crate) async fn status_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<StatusPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    if !names::COURSE_STATUSES.contains(&body.status.as_str()) {
        return Err(AppError::Input("unknown course status"));
    }

    let (course_id, title) = state
        .db
        .set_course_status(&public_id, &body.status)
        .await
        .reject("could not change course status")?
        .ok_or(AppError::NotFound)?;

    let action = match body.status.as_str() {
        "active" => "activated",
        "inactive" => "deactivated",
        _ => "updated",
    };
    record_audit(
        &state,
        &user,
        Some(course_id),
        &title,
        action,
        &["status".to_string()],
    )
    .await?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

pub(crate) async fn delete_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    let course = studio_course(&state, &public_id).await?;
    if course.status != "draft" {
        return Err(AppError::Input("only draft courses can be deleted"));
    }

    let deleted = state
        .db
        .delete_draft_course(&public_id)
        .await
        .reject("could not delete course")?;
    let Some((_, title)) = deleted else {
        // The status flipped between the check and the delete.
        return Err(AppError::Input("only draft courses can be deleted"));
    };

    // The course row is gone, so the entry keeps the title only.
    record_audit(&state, &user, None, &title, "deleted", &[]).await?;

    let courses = state
        .db
        .studio_courses()
        .await
        .reject("could not load courses")?;
    Ok(views::titled(
        "Studio",
        studio_views::studio_page(&courses, &locale),
    ))
}
