use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::{AuthUser, Course},
    extractors::{AuthGuard, CurrentUser, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::learn as learn_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/learn/{public_id}", get(learn_page))
        .route("/learn/{public_id}/lesson/{lesson_id}", get(lesson_page))
        .route(
            "/learn/{public_id}/lesson/{lesson_id}/complete",
            post(complete_lesson_post),
        )
        .route("/learn/{public_id}/practice/{chapter_id}", get(practice_page))
        .route("/learn/{public_id}/mcq/{mcq_id}/check", post(check_mcq_post))
        .route("/learn/{public_id}/coding/{question_id}", get(coding_page))
        .route(
            "/learn/{public_id}/coding/{question_id}/submit",
            post(submit_code_post),
        )
        .route("/learn/{public_id}/certificate", post(claim_certificate_post))
        .route("/certificate/{code}", get(certificate_page))
        .route(names::VERIFY_CERTIFICATE_URL, get(verify_certificate_page))
}

/// Learning pages require an enrollment. Enrollments outlive course
/// deactivation, so status is deliberately not checked here.
async fn enrolled_course(
    state: &AppState,
    user: &AuthUser,
    public_id: &str,
) -> Result<Course, AppError> {
    let course = state
        .db
        .find_course_by_public_id(public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    let enrolled = state
        .db
        .is_enrolled(user.id, course.id)
        .await
        .reject("could not check enrollment")?;
    if !enrolled {
        return Err(AppError::Forbidden);
    }

    Ok(course)
}

async fn compose_learn_page(
    state: &AppState,
    user: &AuthUser,
    public_id: &str,
    locale: &str,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(state, user, public_id).await?;

    let progress = state
        .db
        .chapters_with_progress(course.id, user.id)
        .await
        .reject("could not load chapters")?;

    let mut chapters = Vec::with_capacity(progress.len());
    for info in progress {
        // Locked chapters render as a stub, so their lessons stay unloaded.
        let lessons = if info.locked {
            Vec::new()
        } else {
            state
                .db
                .lessons_with_completion(info.id, user.id)
                .await
                .reject("could not load lessons")?
        };
        chapters.push(learn_views::LearnChapter { info, lessons });
    }

    let coding_questions = state
        .db
        .coding_questions(course.id)
        .await
        .reject("could not load coding questions")?;
    let (completed_lessons, total_lessons) = state
        .db
        .course_progress(user.id, course.id)
        .await
        .reject("could not load progress")?;
    let certificate_code = state
        .db
        .certificate_code_for(user.id, course.id)
        .await
        .reject("could not load certificate")?;

    let data = learn_views::LearnPageData {
        course_title: course.title,
        public_id: course.public_id,
        chapters,
        coding_questions,
        completed_lessons,
        total_lessons,
        certificate_code,
    };

    Ok(learn_views::learn_page(data, locale))
}

async fn learn_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    let body = compose_learn_page(&state, &user, &public_id, &locale).await?;
    Ok(views::render(is_htmx, "Learn", body, &locale, Some(&user)))
}

/// Look up a lesson and reject access while its chapter is still locked.
async fn accessible_lesson(
    state: &AppState,
    user: &AuthUser,
    course_id: i32,
    lesson_id: i32,
) -> Result<crate::db::models::Lesson, AppError> {
    let lesson = state
        .db
        .find_lesson(lesson_id)
        .await
        .reject("could not load lesson")?
        .ok_or(AppError::NotFound)?;

    let belongs = state
        .db
        .lesson_belongs_to_course(lesson_id, course_id)
        .await
        .reject("could not check lesson")?;
    if !belongs {
        return Err(AppError::NotFound);
    }

    let chapters = state
        .db
        .chapters_with_progress(course_id, user.id)
        .await
        .reject("could not load chapters")?;
    let locked = chapters
        .iter()
        .find(|ch| ch.id == lesson.chapter_id)
        .is_some_and(|ch| ch.locked);
    if locked {
        return Err(AppError::Input("finish the earlier chapters first"));
    }

    Ok(lesson)
}

async fn lesson_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, lesson_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;
    let lesson = accessible_lesson(&state, &user, course.id, lesson_id).await?;

    let resources = state
        .db
        .lesson_resources(lesson.id)
        .await
        .reject("could not load resources")?;
    let completed = state
        .db
        .lessons_with_completion(lesson.chapter_id, user.id)
        .await
        .reject("could not load lessons")?
        .iter()
        .any(|l| l.id == lesson.id && l.completed);

    Ok(views::render(
        is_htmx,
        &lesson.title,
        learn_views::lesson_page(&course.title, &public_id, &lesson, &resources, completed, &locale),
        &locale,
        Some(&user),
    ))
}

async fn complete_lesson_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, lesson_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;
    accessible_lesson(&state, &user, course.id, lesson_id).await?;

    state
        .db
        .complete_lesson(user.id, lesson_id)
        .await
        .reject("could not record progress")?;

    // Back to the course outline, where the next chapter may now be open.
    let body = compose_learn_page(&state, &user, &public_id, &locale).await?;
    Ok(views::titled("Learn", body))
}

async fn practice_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;

    let chapter = state
        .db
        .find_chapter(chapter_id)
        .await
        .reject("could not load chapter")?
        .ok_or(AppError::NotFound)?;
    if chapter.course_id != course.id {
        return Err(AppError::NotFound);
    }

    let mcqs = state
        .db
        .mcqs_for_chapter(chapter_id)
        .await
        .reject("could not load questions")?;

    Ok(views::render(
        is_htmx,
        "Practice",
        learn_views::practice_page(&course.title, &public_id, &chapter.title, &mcqs, &locale),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize)]
struct CheckMcqPost {
    #[serde(deserialize_with = "super::deserialize_string_or_i32")]
    answer: i32,
}

/// Grades locally against the stored correct index; no attempt is recorded.
async fn check_mcq_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, mcq_id)): Path<(String, i32)>,
    Json(body): Json<CheckMcqPost>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;

    let mcq = state
        .db
        .find_mcq(mcq_id)
        .await
        .reject("could not load question")?
        .ok_or(AppError::NotFound)?;
    if mcq.course_id != course.id {
        return Err(AppError::NotFound);
    }

    Ok(learn_views::mcq_feedback(&mcq, body.answer, &locale))
}

#[derive(Deserialize, Default)]
struct CodingQuery {
    language: Option<String>,
}

async fn coding_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, question_id)): Path<(String, i32)>,
    Query(query): Query<CodingQuery>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;

    let question = state
        .db
        .find_coding_question(question_id)
        .await
        .reject("could not load question")?
        .ok_or(AppError::NotFound)?;
    if question.course_id != course.id {
        return Err(AppError::NotFound);
    }

    // Unknown languages fall back to the first allowed one.
    let language = query
        .language
        .filter(|l| question.allowed_languages.iter().any(|a| a == l))
        .or_else(|| question.allowed_languages.first().cloned())
        .unwrap_or_default();

    Ok(views::render(
        is_htmx,
        &question.title,
        learn_views::coding_page(
            &public_id,
            &question,
            &language,
            state.judge.is_enabled(),
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize)]
struct SubmitCodePost {
    language: String,
    source_code: String,
}

async fn submit_code_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, question_id)): Path<(String, i32)>,
    Json(body): Json<SubmitCodePost>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;

    let question = state
        .db
        .find_coding_question(question_id)
        .await
        .reject("could not load question")?
        .ok_or(AppError::NotFound)?;
    if question.course_id != course.id {
        return Err(AppError::NotFound);
    }

    if !state.judge.is_enabled() {
        return Err(AppError::Input("code judge is not configured"));
    }
    if !question.allowed_languages.iter().any(|l| *l == body.language) {
        return Err(AppError::Input("language is not allowed for this question"));
    }
    if body.source_code.trim().is_empty() {
        return Err(AppError::Input("source code must not be empty"));
    }

    let verdict = state
        .judge
        .submit(&question, &body.language, &body.source_code)
        .await
        .reject("could not reach the code judge")?;

    Ok(learn_views::verdict_fragment(&verdict, &locale))
}

async fn claim_certificate_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    let course = enrolled_course(&state, &user, &public_id).await?;

    let issued = state
        .db
        .issue_certificate(user.id, course.id)
        .await
        .reject("could not issue certificate")?;
    if issued.is_none() {
        return Err(AppError::Input("complete every lesson first"));
    }

    let body = compose_learn_page(&state, &user, &public_id, &locale).await?;
    Ok(views::titled("Learn", body))
}

async fn certificate_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(code): Path<String>,
) -> Result<maud::Markup, AppError> {
    let certificate = state
        .db
        .open_certificate(&code, user.id)
        .await
        .reject("could not load certificate")?
        .ok_or(AppError::NotFound)?;

    Ok(views::render(
        is_htmx,
        "Certificate",
        learn_views::certificate_page(&certificate, &locale),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize, Default)]
struct VerifyQuery {
    code: Option<String>,
}

async fn verify_certificate_page(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<VerifyQuery>,
) -> Result<maud::Markup, AppError> {
    let lookup = match query.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Some(
            state
                .db
                .find_certificate_by_code(code)
                .await
                .reject("could not look up certificate")?,
        ),
        _ => None,
    };

    let state_view = match &lookup {
        None => learn_views::VerifyState::Form,
        Some(None) => learn_views::VerifyState::NotFound,
        Some(Some(certificate)) => learn_views::VerifyState::Found(certificate),
    };

    Ok(views::render(
        is_htmx,
        "Verify Certificate",
        learn_views::verify_certificate_page(state_view, &locale),
        &locale,
        user.as_ref(),
    ))
}
