use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx, Locale},
    models::McqImports,
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use super::{compose_editor, require_author, studio_course};
use crate::views::studio as studio_views;

// ----- mcqs -----

#[derive(Deserialize)]
pub(crate) struct McqPost {
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    #[serde(deserialize_with = "crate::handlers::deserialize_string_or_i32")]
    correct_index: i32,
}

impl McqPost {
    fn options(&self) -> Vec<String> {
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
            .iter()
            .map(|o| o.trim().to_string())
            .collect()
    }

    fn validate(&self, options: &[String]) -> Option<&'static str> {
        if self.question.trim().is_empty() || options.iter().any(String::is_empty) {
            return Some("the question and all four options are required");
        }
        if crate::db::has_duplicate_options(options) {
            return Some("options must be distinct");
        }
        if !(0..names::MCQ_OPTION_COUNT as i32).contains(&self.correct_index) {
            return Some("pick which option is correct");
        }
        None
    }
}

pub(crate) async fn add_mcq_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let course = studio_course(&state, &public_id).await?;
    let belongs = state
        .db
        .chapter_belongs_to_course(chapter_id, course.id)
        .await
        .reject("could not check chapter")?;
    if !belongs {
        return Err(AppError::NotFound);
    }

    Ok(views::render(
        is_htmx,
        "New Question",
        studio_views::mcq_form(
            &public_id,
            studio_views::McqFormState::Add { chapter_id },
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn add_mcq_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, chapter_id)): Path<(String, i32)>,
    Json(body): Json<McqPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let course = studio_course(&state, &public_id).await?;
    let belongs = state
        .db
        .chapter_belongs_to_course(chapter_id, course.id)
        .await
        .reject("could not check chapter")?;
    if !belongs {
        return Err(AppError::NotFound);
    }

    let options = body.options();
    if let Some(message) = body.validate(&options) {
        return Ok(views::titled(
            "New Question",
            studio_views::mcq_form(
                &public_id,
                studio_views::McqFormState::Add { chapter_id },
                Some(message),
                &locale,
            ),
        ));
    }

    state
        .db
        .add_mcq(
            course.id,
            chapter_id,
            body.question.trim(),
            &options,
            body.correct_index,
        )
        .await
        .reject("could not add question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

async fn course_mcq(
    state: &AppState,
    public_id: &str,
    mcq_id: i32,
) -> Result<crate::db::models::Mcq, AppError> {
    let course = studio_course(state, public_id).await?;
    let mcq = state
        .db
        .find_mcq(mcq_id)
        .await
        .reject("could not load question")?
        .ok_or(AppError::NotFound)?;
    if mcq.course_id != course.id {
        return Err(AppError::NotFound);
    }
    Ok(mcq)
}

pub(crate) async fn edit_mcq_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, mcq_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let mcq = course_mcq(&state, &public_id, mcq_id).await?;

    Ok(views::render(
        is_htmx,
        "Edit Question",
        studio_views::mcq_form(
            &public_id,
            studio_views::McqFormState::Edit { mcq: &mcq },
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn edit_mcq_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, mcq_id)): Path<(String, i32)>,
    Json(body): Json<McqPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let mcq = course_mcq(&state, &public_id, mcq_id).await?;

    let options = body.options();
    if let Some(message) = body.validate(&options) {
        return Ok(views::titled(
            "Edit Question",
            studio_views::mcq_form(
                &public_id,
                studio_views::McqFormState::Edit { mcq: &mcq },
                Some(message),
                &locale,
            ),
        ));
    }

    state
        .db
        .update_mcq(mcq_id, body.question.trim(), &options, body.correct_index)
        .await
        .reject("could not update question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

pub(crate) async fn delete_mcq_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, mcq_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_mcq(&state, &public_id, mcq_id).await?;

    state
        .db
        .delete_mcq(mcq_id)
        .await
        .reject("could not delete question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

/// Bulk import from an uploaded JSON file. The whole file is validated and
/// inserted in one transaction, so a bad entry imports nothing.
pub(crate) async fn import_mcqs_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    mut multipart: Multipart,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let course = studio_course(&state, &public_id).await?;

    let mut payload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("invalid multipart upload: {e}");
        AppError::Input("invalid upload")
    })? {
        if field.name() == Some("file") {
            payload = Some(field.bytes().await.map_err(|e| {
                tracing::error!("could not read upload: {e}");
                AppError::Input("could not read the uploaded file")
            })?);
        }
    }
    let payload = payload.ok_or(AppError::Input("no file was uploaded"))?;

    let items: McqImports = serde_json::from_slice(&payload).map_err(|e| {
        tracing::error!("mcq import parse failed: {e}");
        AppError::Input("the file must be a JSON array of questions")
    })?;
    if items.is_empty() {
        return Err(AppError::Input("the file contains no questions"));
    }

    let imported = state
        .db
        .import_mcqs(course.id, &items)
        .await
        .reject_input("the import file failed validation")?;
    tracing::info!("imported {imported} questions into course {}", course.id);

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

// ----- coding questions -----

#[derive(Deserialize)]
pub(crate) struct CodingPost {
    title: String,
    description: String,
    difficulty: String,
    allowed_languages: String,
    #[serde(default, deserialize_with = "crate::handlers::deserialize_string_or_i32")]
    time_limit_ms: i32,
    #[serde(default, deserialize_with = "crate::handlers::deserialize_string_or_i32")]
    memory_limit_mb: i32,
    test_cases: String,
    starter_code: String,
}

struct ParsedCoding {
    languages: Vec<String>,
    test_cases: serde_json::Value,
    starter_code: serde_json::Value,
    time_limit_ms: i32,
    memory_limit_mb: i32,
}

impl CodingPost {
    fn parsed(&self) -> Result<ParsedCoding, &'static str> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err("title and description are required");
        }
        if !names::DIFFICULTIES.contains(&self.difficulty.as_str()) {
            return Err("unknown difficulty");
        }

        let languages: Vec<String> = self
            .allowed_languages
            .split(',')
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        if languages.is_empty() {
            return Err("at least one allowed language is required");
        }

        let test_cases: serde_json::Value =
            serde_json::from_str(&self.test_cases).map_err(|_| "test cases must be valid JSON")?;
        if !test_cases.is_array() {
            return Err("test cases must be a JSON array");
        }
        let starter_code: serde_json::Value = serde_json::from_str(&self.starter_code)
            .map_err(|_| "starter code must be valid JSON")?;
        if !starter_code.is_object() {
            return Err("starter code must be a JSON object keyed by language");
        }

        Ok(ParsedCoding {
            languages,
            test_cases,
            starter_code,
            time_limit_ms: self.time_limit_ms.max(100),
            memory_limit_mb: self.memory_limit_mb.max(16),
        })
    }
}

pub(crate) async fn add_coding_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    studio_course(&state, &public_id).await?;

    Ok(views::render(
        is_htmx,
        "New Coding Question",
        studio_views::coding_question_form(
            &public_id,
            studio_views::CodingFormState::Add,
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn add_coding_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<CodingPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let course = studio_course(&state, &public_id).await?;

    let parsed = match body.parsed() {
        Ok(parsed) => parsed,
        Err(message) => {
            return Ok(views::titled(
                "New Coding Question",
                studio_views::coding_question_form(
                    &public_id,
                    studio_views::CodingFormState::Add,
                    Some(message),
                    &locale,
                ),
            ));
        }
    };

    state
        .db
        .add_coding_question(
            course.id,
            body.title.trim(),
            body.description.trim(),
            &body.difficulty,
            &parsed.test_cases,
            &parsed.starter_code,
            &parsed.languages,
            parsed.time_limit_ms,
            parsed.memory_limit_mb,
        )
        .await
        .reject("could not add coding question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

async fn course_coding_question(
    state: &AppState,
    public_id: &str,
    question_id: i32,
) -> Result<crate::db::models::CodingQuestion, AppError> {
    let course = studio_course(state, public_id).await?;
    let question = state
        .db
        .find_coding_question(question_id)
        .await
        .reject("could not load coding question")?
        .ok_or(AppError::NotFound)?;
    if question.course_id != course.id {
        return Err(AppError::NotFound);
    }
    Ok(question)
}

pub(crate) async fn edit_coding_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path((public_id, question_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let question = course_coding_question(&state, &public_id, question_id).await?;

    Ok(views::render(
        is_htmx,
        "Edit Coding Question",
        studio_views::coding_question_form(
            &public_id,
            studio_views::CodingFormState::Edit {
                question: &question,
            },
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

pub(crate) async fn edit_coding_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, question_id)): Path<(String, i32)>,
    Json(body): Json<CodingPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let question = course_coding_question(&state, &public_id, question_id).await?;

    let parsed = match body.parsed() {
        Ok(parsed) => parsed,
        Err(message) => {
            return Ok(views::titled(
                "Edit Coding Question",
                studio_views::coding_question_form(
                    &public_id,
                    studio_views::CodingFormState::Edit {
                        question: &question,
                    },
                    Some(message),
                    &locale,
                ),
            ));
        }
    };

    state
        .db
        .update_coding_question(
            question_id,
            body.title.trim(),
            body.description.trim(),
            &body.difficulty,
            &parsed.test_cases,
            &parsed.starter_code,
            &parsed.languages,
            parsed.time_limit_ms,
            parsed.memory_limit_mb,
        )
        .await
        .reject("could not update coding question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}

pub(crate) async fn delete_coding_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path((public_id, question_id)): Path<(String, i32)>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    course_coding_question(&state, &public_id, question_id).await?;

    state
        .db
        .delete_coding_question(question_id)
        .await
        .reject("could not delete coding question")?;

    let body = compose_editor(&state, &public_id, &locale).await?;
    Ok(views::titled("Studio", body))
}
