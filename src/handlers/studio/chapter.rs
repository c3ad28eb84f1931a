use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx, Locale},
    rejections::{AppError, ResultExt},
    views, AppState,
};

use super::{compose_editor, require_author, studio_course};
use crate::views::studio as studio_views;

#[derive(Deserialize)]
pub(crate) struct ChapterPost {
    title: String,
    #[serde(default)]
    content: String,
}

pub(crate) async fn add_chapter_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<ChapterPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let course = studio_course(&state, &public_id).await?;

    if body.title.trim().is_empty() {
        return Err(AppError::Input("chapter title is required"));
    }

    state
        .db
        .add_chapter(course.id, body.title.trim(), body.content.trim())
        .await
        .reject("could not add chapter")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

async fn course_chapter(
    state: &AppState,
    public_id: &str,
    chapter_id: i32,
) -> Result<i32, AppError> {
    let course = studio_course(state, public_id).await?;
    let belongs = state
        .db
        .chapter_belongs_to_course(chapter_id, course.id)
        .await
        .reject("could not check chapter")?;
    if !belongs {
        return Err(AppError::NotFound);
    }
    Ok(course.id)
}

pub(crate) async fn edit_chapter_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
    Json(body): Json<ChapterPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_chapter(&state, &public_id, chapter_id).await?;

    if body.title.trim().is_empty() {
        return Err(AppError::Input("chapter title is required"));
    }

    state
        .db
        .update_chapter(chapter_id, body.title.trim(), body.content.trim())
        .await
        .reject("could not update chapter")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

pub(crate) async fn delete_chapter_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_chapter(&state, &public_id, chapter_id).await?;

    state
        .db
        .delete_chapter(chapter_id)
        .await
        .reject("could not delete chapter")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

#[derive(Deserialize)]
pub(crate) struct MoveChapterPost {
    up: bool,
}

pub(crate) async fn move_chapter_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
    Json(body): Json<MoveChapterPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_chapter(&state, &public_id, chapter_id).await?;

    // Moving past either end is a no-op rather than an error.
    state
        .db
        .move_chapter(chapter_id, body.up)
        .await
        .reject("could not move chapter")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

// ----- lessons -----

#[derive(Deserialize)]
pub(crate) struct LessonPost {
    title: String,
    content: String,
    #[serde(default, deserialize_with = "crate::handlers::deserialize_string_or_i32")]
    duration_minutes: i32,
    #[serde(default)]
    resources: String,
}

/// Parse the one-resource-per-line textarea: a kind word followed by a URL.
fn parse_resources(text: &str) -> Result<Vec<(String, String)>, AppError> {
    let mut resources = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((kind, url)) = line.split_once(char::is_whitespace) else {
            return Err(AppError::Input("each resource line needs a kind and a URL"));
        };
        let kind = kind.to_lowercase();
        if !["image", "video"].contains(&kind.as_str()) {
            return Err(AppError::Input("resource kind must be image or video"));
        }
        resources.push((kind, url.trim().to_string()));
    }
    Ok(resources)
}

impl LessonPost {
    fn validated(&self) -> Result<(&str, &str, i32, Vec<(String, String)>), AppError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::Input("lesson title and content are required"));
        }
        let resources = parse_resources(&self.resources)?;
        Ok((
            self.title.trim(),
            self.content.trim(),
            self.duration_minutes.max(1),
            resources,
        ))
    }
}

pub(crate) async fn add_lesson_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_chapter(&state, &public_id, chapter_id).await?;

    Ok(views::render(
        is_htmx,
        "New Lesson",
        studio_views::lesson_form(
            &public_id,
            studio_views::LessonFormState::Add { chapter_id },
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn add_lesson_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
    Json(body): Json<LessonPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_chapter(&state, &public_id, chapter_id).await?;

    let (title, content, duration, resources) = match body.validated() {
        Ok(parts) => parts,
        Err(AppError::Input(message)) => {
            return Ok(views::titled(
                "New Lesson",
                studio_views::lesson_form(
                    &public_id,
                    studio_views::LessonFormState::Add { chapter_id },
                    Some(message),
                    &locale,
                ),
            ));
        }
        Err(other) => return Err(other),
    };

    state
        .db
        .add_lesson(chapter_id, title, content, duration, &resources)
        .await
        .reject("could not add lesson")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

async fn course_lesson(
    state: &AppState,
    public_id: &str,
    lesson_id: i32,
) -> Result<crate::db::models::Lesson, AppError> {
    let course = studio_course(state, public_id).await?;
    let belongs = state
        .db
        .lesson_belongs_to_course(lesson_id, course.id)
        .await
        .reject("could not check lesson")?;
    if !belongs {
        return Err(AppError::NotFound);
    }
    state
        .db
        .find_lesson(lesson_id)
        .await
        .reject("could not load lesson")?
        .ok_or(AppError::NotFound)
}

pub(crate) async fn edit_lesson_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, lesson_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let lesson = course_lesson(&state, &public_id, lesson_id).await?;
    let resources = state
        .db
        .lesson_resources(lesson_id)
        .await
        .reject("could not load resources")?;

    Ok(views::render(
        is_htmx,
        "Edit Lesson",
        studio_views::lesson_form(
            &public_id,
            studio_views::LessonFormState::Edit {
                lesson: &lesson,
                resources: &resources,
            },
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn edit_lesson_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, lesson_id)): Path<(String, i32)>,
    Json(body): Json<LessonPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let lesson = course_lesson(&state, &public_id, lesson_id).await?;

    let (title, content, duration, resources) = match body.validated() {
        Ok(parts) => parts,
        Err(AppError::Input(message)) => {
            let saved = state
                .db
                .lesson_resources(lesson_id)
                .await
                .reject("could not load resources")?;
            return Ok(views::titled(
                "Edit Lesson",
                studio_views::lesson_form(
                    &public_id,
                    studio_views::LessonFormState::Edit {
                        lesson: &lesson,
                        resources: &saved,
                    },
                    Some(message),
                    &locale,
                ),
            ));
        }
        Err(other) => return Err(other),
    };

    state
        .db
        .update_lesson(lesson_id, title, content, duration, &resources)
        .await
        .reject("could not update lesson")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

pub(crate) async fn delete_lesson_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, lesson_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_lesson(&state, &public_id, lesson_id).await?;

    state
        .db
        .delete_lesson(lesson_id)
        .await
        .reject("could not delete lesson")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}
