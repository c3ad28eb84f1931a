mod chapter;
mod course;
mod question;

use axum::{
    extract::{Path, State},
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

use crate::views::studio as studio_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::STUDIO_URL, get(studio_page))
        .route(
            names::CREATE_COURSE_URL,
            get(create_course_page).post(create_course_post),
        )
        .route("/studio/course/{public_id}", get(editor_page))
        .route("/studio/course/{public_id}/edit", post(course::edit_post))
        .route("/studio/course/{public_id}/status", post(course::status_post))
        .route("/studio/course/{public_id}/delete", post(course::delete_post))
        .route(
            "/studio/course/{public_id}/add-chapter",
            post(chapter::add_chapter_post),
        )
        .route(
            "/studio/course/{public_id}/chapter/{chapter_id}/edit",
            post(chapter::edit_chapter_post),
        )
        .route(
            "/studio/course/{public_id}/chapter/{chapter_id}/delete",
            post(chapter::delete_chapter_post),
        )
        .route(
            "/studio/course/{public_id}/chapter/{chapter_id}/move",
            post(chapter::move_chapter_post),
        )
        .route(
            "/studio/course/{public_id}/chapter/{chapter_id}/add-lesson",
            get(chapter::add_lesson_page).post(chapter::add_lesson_post),
        )
        .route(
            "/studio/course/{public_id}/lesson/{lesson_id}/edit",
            get(chapter::edit_lesson_page).post(chapter::edit_lesson_post),
        )
        .route(
            "/studio/course/{public_id}/lesson/{lesson_id}/delete",
            post(chapter::delete_lesson_post),
        )
        .route(
            "/studio/course/{public_id}/chapter/{chapter_id}/add-mcq",
            get(question::add_mcq_page).post(question::add_mcq_post),
        )
        .route(
            "/studio/course/{public_id}/mcq/{mcq_id}/edit",
            get(question::edit_mcq_page).post(question::edit_mcq_post),
        )
        .route(
            "/studio/course/{public_id}/mcq/{mcq_id}/delete",
            post(question::delete_mcq_post),
        )
        .route(
            "/studio/course/{public_id}/import-mcqs",
            post(question::import_mcqs_post),
        )
        .route(
            "/studio/course/{public_id}/add-coding-question",
            get(question::add_coding_page).post(question::add_coding_post),
        )
        .route(
            "/studio/course/{public_id}/coding/{question_id}/edit",
            get(question::edit_coding_page).post(question::edit_coding_post),
        )
        .route(
            "/studio/course/{public_id}/coding/{question_id}/delete",
            post(question::delete_coding_post),
        )
}

fn require_author(user: &AuthUser) -> Result<(), AppError> {
    if user.can_author() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

async fn studio_course(
    state: &AppState,
    public_id: &str,
) -> Result<crate::db::models::Course, AppError> {
    state
        .db
        .find_course_by_public_id(public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)
}

/// Full course editor: details, chapters with their lessons and questions,
/// and the coding question list. Every studio mutation ends back here.
async fn compose_editor(
    state: &AppState,
    public_id: &str,
    locale: &str,
) -> Result<maud::Markup, AppError> {
    let course = studio_course(state, public_id).await?;

    let chapters = state
        .db
        .chapters(course.id)
        .await
        .reject("could not load chapters")?;
    let mut editor_chapters = Vec::with_capacity(chapters.len());
    for chapter in chapters {
        let lessons = state
            .db
            .lessons(chapter.id)
            .await
            .reject("could not load lessons")?;
        let mcqs = state
            .db
            .mcqs_for_chapter(chapter.id)
            .await
            .reject("could not load questions")?;
        editor_chapters.push(studio_views::EditorChapter {
            chapter,
            lessons,
            mcqs,
        });
    }

    let coding_questions = state
        .db
        .coding_questions(course.id)
        .await
        .reject("could not load coding questions")?;

    let data = studio_views::EditorData {
        course,
        chapters: editor_chapters,
        coding_questions,
    };
    Ok(studio_views::course_editor(&data, locale))
}

async fn record_audit(
    state: &AppState,
    user: &AuthUser,
    course_id: Option<i32>,
    course_title: &str,
    action: &str,
    changed_fields: &[String],
) -> Result<(), AppError> {
    state
        .db
        .record_course_action(
            course_id,
            course_title,
            action,
            user.id,
            &user.display_name,
            changed_fields,
        )
        .await
        .reject("could not record audit entry")
}

async fn studio_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    let courses = state
        .db
        .studio_courses()
        .await
        .reject("could not load courses")?;

    Ok(views::render(
        is_htmx,
        "Studio",
        studio_views::studio_page(&courses, &locale),
        &locale,
        Some(&user),
    ))
}

async fn create_course_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    Ok(views::render(
        is_htmx,
        "New Course",
        studio_views::create_course_page(studio_views::CreateCourseState::NoError, &locale),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize)]
struct CoursePost {
    title: String,
    description: String,
    category: String,
    price_type: String,
    #[serde(default, deserialize_with = "super::deserialize_string_or_i32")]
    price_cents: i32,
    #[serde(default)]
    image_url: String,
}

impl CoursePost {
    fn validate(&self) -> Result<(), AppError> {
        if !names::COURSE_CATEGORIES.contains(&self.category.as_str()) {
            return Err(AppError::Input("unknown category"));
        }
        if !names::PRICE_TYPES.contains(&self.price_type.as_str()) {
            return Err(AppError::Input("unknown price type"));
        }
        if self.price_cents < 0 {
            return Err(AppError::Input("price cannot be negative"));
        }
        Ok(())
    }

    fn image_url(&self) -> Option<&str> {
        let url = self.image_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

async fn create_course_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<CoursePost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    if body.title.trim().is_empty() || body.description.trim().is_empty() {
        return Ok(views::titled(
            "New Course",
            studio_views::create_course_page(studio_views::CreateCourseState::EmptyFields, &locale),
        ));
    }
    body.validate()?;

    let public_id = state
        .db
        .create_course(
            body.title.trim(),
            body.description.trim(),
            &body.category,
            &body.price_type,
            body.price_cents,
            body.image_url(),
            user.id,
        )
        .await
        .reject("could not create course")?;

    let course = studio_course(&state, &public_id).await?;
    record_audit(&state, &user, Some(course.id), &course.title, "created", &[]).await?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

async fn editor_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::render(is_htmx, "Studio", body, &locale, Some(&user)))
}
