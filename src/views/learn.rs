use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{
    CertificateVerification, ChapterProgress, CodingQuestion, CodingQuestionSummary, Lesson,
    LessonListItem, LessonResource, Mcq,
};
use crate::models::JudgeVerdict;
use crate::{names, views::components};

pub struct LearnChapter {
    pub info: ChapterProgress,
    pub lessons: Vec<LessonListItem>,
}

pub struct LearnPageData {
    pub course_title: String,
    pub public_id: String,
    pub chapters: Vec<LearnChapter>,
    pub coding_questions: Vec<CodingQuestionSummary>,
    pub completed_lessons: i64,
    pub total_lessons: i64,
    pub certificate_code: Option<String>,
}

pub fn learn_page(data: LearnPageData, locale: &str) -> Markup {
    let all_done = data.total_lessons > 0 && data.completed_lessons == data.total_lessons;

    html! {
        h1 { (data.course_title) }
        p {
            (components::progress_bar(data.completed_lessons, data.total_lessons))
            small {
                (t!("learn.progress", locale = locale,
                    completed = data.completed_lessons, total = data.total_lessons))
            }
        }

        @for chapter in &data.chapters {
            @if chapter.info.locked {
                article class="chapter locked" {
                    header {
                        "🔒 " (chapter.info.title)
                    }
                    p { small { (t!("learn.locked_hint", locale = locale)) } }
                }
            } @else {
                article class="chapter" {
                    details open[chapter.info.completed_lessons < chapter.info.lesson_count] {
                        summary {
                            (chapter.info.title)
                            " "
                            small {
                                (chapter.info.completed_lessons) " / " (chapter.info.lesson_count)
                            }
                        }
                        ul {
                            @for lesson in &chapter.lessons {
                                li {
                                    (components::nav_link(
                                        &names::lesson_url(&data.public_id, lesson.id),
                                        html! { (lesson.title) },
                                    ))
                                    " "
                                    small { (lesson.duration_minutes) (t!("learn.minutes_suffix", locale = locale)) }
                                    @if lesson.completed {
                                        " ✓"
                                    }
                                }
                            }
                        }
                        @if chapter.info.mcq_count > 0 {
                            p {
                                (components::nav_link(
                                    &names::chapter_practice_url(&data.public_id, chapter.info.id),
                                    html! {
                                        (t!("learn.practice_link", locale = locale,
                                            count = chapter.info.mcq_count))
                                    },
                                ))
                            }
                        }
                    }
                }
            }
        }

        @if !data.coding_questions.is_empty() {
            section {
                h2 { (t!("learn.coding_title", locale = locale)) }
                ul {
                    @for question in &data.coding_questions {
                        li {
                            (components::nav_link(
                                &names::coding_question_url(&data.public_id, question.id),
                                html! { (question.title) },
                            ))
                            " "
                            small { (question.difficulty) }
                        }
                    }
                }
            }
        }

        section {
            h2 { (t!("learn.certificate_title", locale = locale)) }
            @if let Some(ref code) = data.certificate_code {
                p {
                    a href=(names::certificate_url(code)) {
                        (t!("learn.view_certificate", locale = locale))
                    }
                }
            } @else if all_done {
                form hx-post=(names::claim_certificate_url(&data.public_id))
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    button type="submit" { (t!("learn.claim_certificate", locale = locale)) }
                }
            } @else {
                p { small { (t!("learn.certificate_hint", locale = locale)) } }
            }
        }
    }
}

pub fn lesson_page(
    course_title: &str,
    public_id: &str,
    lesson: &Lesson,
    resources: &[LessonResource],
    completed: bool,
    locale: &str,
) -> Markup {
    html! {
        p {
            (components::nav_link(
                &names::learn_url(public_id),
                html! { "← " (course_title) },
            ))
        }
        h1 { (lesson.title) }
        p {
            small { (lesson.duration_minutes) (t!("learn.minutes_suffix", locale = locale)) }
        }

        @for resource in resources {
            @match resource.kind.as_str() {
                "image" => {
                    img src=(resource.url) alt=(lesson.title) class="lesson-resource";
                }
                "video" => {
                    video controls src=(resource.url) class="lesson-resource" {}
                }
                _ => {
                    p {
                        a href=(resource.url) target="_blank" rel="noopener" {
                            (t!("learn.open_resource", locale = locale))
                        }
                    }
                }
            }
        }

        article { p { (lesson.content) } }

        @if completed {
            p { "✓ " (t!("learn.lesson_done", locale = locale)) }
        } @else {
            form hx-post=(names::complete_lesson_url(public_id, lesson.id))
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                button type="submit" { (t!("learn.complete_btn", locale = locale)) }
            }
        }
    }
}

pub fn practice_page(
    course_title: &str,
    public_id: &str,
    chapter_title: &str,
    mcqs: &[Mcq],
    locale: &str,
) -> Markup {
    html! {
        p {
            (components::nav_link(
                &names::learn_url(public_id),
                html! { "← " (course_title) },
            ))
        }
        h1 { (t!("learn.practice_title", locale = locale, chapter = chapter_title)) }
        @if mcqs.is_empty() {
            p { (t!("learn.practice_empty", locale = locale)) }
        }
        @for mcq in mcqs {
            article class="mcq" {
                p { strong { (mcq.question) } }
                form hx-post=(names::check_mcq_url(public_id, mcq.id))
                     hx-ext="json-enc"
                     hx-target="this"
                     hx-swap="outerHTML" {
                    @for (index, option) in mcq.options.iter().enumerate() {
                        label {
                            input type="radio" name="answer" value=(index) required="true";
                            (option)
                        }
                    }
                    button type="submit" class="outline" style="width: fit-content;" {
                        (t!("learn.check_btn", locale = locale))
                    }
                }
            }
        }
    }
}

/// Replaces the answer form of a single practice question.
pub fn mcq_feedback(mcq: &Mcq, selected: i32, locale: &str) -> Markup {
    let correct = selected == mcq.correct_index;
    let correct_option = mcq
        .options
        .get(mcq.correct_index as usize)
        .map(String::as_str)
        .unwrap_or_default();

    html! {
        @if correct {
            p class="mcq-feedback correct" { "✓ " (t!("learn.correct", locale = locale)) }
        } @else {
            p class="mcq-feedback incorrect" {
                "✗ " (t!("learn.incorrect", locale = locale, answer = correct_option))
            }
        }
    }
}

pub fn coding_page(
    public_id: &str,
    question: &CodingQuestion,
    language: &str,
    judge_enabled: bool,
    locale: &str,
) -> Markup {
    let starter = question
        .starter_code
        .get(language)
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    html! {
        p {
            (components::nav_link(
                &names::learn_url(public_id),
                html! { "← " (t!("learn.back_to_course", locale = locale)) },
            ))
        }
        h1 { (question.title) }
        p {
            small {
                (question.difficulty)
                " · "
                (t!("learn.limits", locale = locale,
                    time = question.time_limit_ms, memory = question.memory_limit_mb))
            }
        }
        article { p { (question.description) } }

        @if judge_enabled {
            form hx-post=(names::submit_code_url(public_id, question.id))
                 hx-ext="json-enc"
                 hx-target="#verdict"
                 hx-swap="innerHTML" {
                label {
                    (t!("learn.language", locale = locale))
                    // Changing the language reloads the page so the starter
                    // code for that language is filled in.
                    select name="language"
                           hx-get=(names::coding_question_url(public_id, question.id))
                           hx-trigger="change"
                           hx-target="main"
                           hx-swap="innerHTML"
                           hx-include="this" {
                        @for allowed in &question.allowed_languages {
                            option value=(allowed) selected[allowed == language] { (allowed) }
                        }
                    }
                }
                label {
                    (t!("learn.source_code", locale = locale))
                    textarea name="source_code" rows="16" spellcheck="false" class="code-editor" {
                        (starter)
                    }
                }
                button type="submit" { (t!("learn.submit_btn", locale = locale)) }
            }
            div id="verdict" {}
        } @else {
            p { (t!("learn.judge_disabled", locale = locale)) }
        }
    }
}

pub fn verdict_fragment(verdict: &JudgeVerdict, locale: &str) -> Markup {
    html! {
        article class="verdict" {
            @if verdict.passed {
                h3 { "✓ " (t!("learn.verdict_passed", locale = locale)) }
            } @else {
                h3 { "✗ " (t!("learn.verdict_failed", locale = locale)) }
            }
            @if let Some(score) = verdict.score {
                p { (t!("learn.verdict_score", locale = locale, score = format!("{score:.0}"))) }
            }
            @if !verdict.test_results.is_empty() {
                table {
                    tbody {
                        @for (index, result) in verdict.test_results.iter().enumerate() {
                            tr {
                                td {
                                    @match result.name {
                                        Some(ref name) => { (name) }
                                        None => { (t!("learn.test_n", locale = locale, n = index + 1)) }
                                    }
                                }
                                td {
                                    @if result.passed { "✓" } @else { "✗" }
                                }
                                td {
                                    @if let Some(ref message) = result.message {
                                        small { (message) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn certificate_page(cert: &CertificateVerification, locale: &str) -> Markup {
    html! {
        article class="certificate" {
            header { h1 { (t!("learn.certificate_heading", locale = locale)) } }
            p { (t!("learn.certificate_awarded_to", locale = locale)) }
            h2 { (cert.user_name) }
            p { (t!("learn.certificate_for", locale = locale)) }
            h3 { (cert.course_title) }
            p { small { (t!("learn.certificate_issued", locale = locale, date = &cert.issued_date)) } }
            @if cert.status == "revoked" {
                p { mark { (t!("learn.certificate_revoked", locale = locale)) } }
            }
            footer {
                small {
                    (t!("learn.certificate_code", locale = locale)) ": " code { (cert.certificate_code) }
                }
            }
        }
    }
}

pub enum VerifyState<'a> {
    Form,
    NotFound,
    Found(&'a CertificateVerification),
}

pub fn verify_certificate_page(state: VerifyState, locale: &str) -> Markup {
    html! {
        h1 { (t!("learn.verify_title", locale = locale)) }
        p { (t!("learn.verify_desc", locale = locale)) }
        article style="width: fit-content;" {
            form action=(names::VERIFY_CERTIFICATE_URL) method="get" {
                label {
                    (t!("learn.certificate_code", locale = locale))
                    input name="code"
                          type="text"
                          required="true"
                          placeholder="01JAF3E8S0V9Q2M5X7C4T6B1KD"
                          aria-label=(t!("learn.certificate_code", locale = locale));
                }
                button type="submit" { (t!("learn.verify_btn", locale = locale)) }
            }
        }
        @match state {
            VerifyState::Form => {}
            VerifyState::NotFound => {
                p { mark { (t!("learn.verify_not_found", locale = locale)) } }
            }
            VerifyState::Found(cert) => {
                (certificate_page(cert, locale))
            }
        }
    }
}
