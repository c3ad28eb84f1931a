use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{CodingQuestion, Lesson, LessonResource, Mcq};
use crate::{names, views::components};

fn back_link(public_id: &str, locale: &str) -> Markup {
    html! {
        p {
            (components::nav_link(
                &names::studio_course_url(public_id),
                html! { "← " (t!("studio.back_to_course", locale = locale)) },
            ))
        }
    }
}

pub enum LessonFormState<'a> {
    Add { chapter_id: i32 },
    Edit {
        lesson: &'a Lesson,
        resources: &'a [LessonResource],
    },
}

pub fn lesson_form(
    public_id: &str,
    state: LessonFormState,
    error: Option<&str>,
    locale: &str,
) -> Markup {
    let (post_url, title, content, duration, resources_text, heading) = match state {
        LessonFormState::Add { chapter_id } => (
            names::add_lesson_url(public_id, chapter_id),
            String::new(),
            String::new(),
            10,
            String::new(),
            t!("studio.add_lesson_btn", locale = locale),
        ),
        LessonFormState::Edit { lesson, resources } => {
            let lines: Vec<String> = resources
                .iter()
                .map(|r| format!("{} {}", r.kind, r.url))
                .collect();
            (
                names::edit_lesson_url(public_id, lesson.id),
                lesson.title.clone(),
                lesson.content.clone(),
                lesson.duration_minutes,
                lines.join("\n"),
                t!("studio.edit_lesson_title", locale = locale),
            )
        }
    };

    html! {
        (back_link(public_id, locale))
        h1 { (heading) }
        @if let Some(error) = error {
            p { mark { (error) } }
        }
        article style="max-width: 48rem;" {
            form hx-post=(post_url)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("studio.lesson_title_label", locale = locale))
                    input name="title" type="text" required="true" value=(title)
                          aria-label=(t!("studio.lesson_title_label", locale = locale));
                }
                label {
                    (t!("studio.duration_label", locale = locale))
                    input name="duration_minutes" type="number" min="1" value=(duration)
                          aria-label=(t!("studio.duration_label", locale = locale));
                }
                label {
                    (t!("studio.lesson_content_label", locale = locale))
                    textarea name="content" rows="10" required="true" { (content) }
                }
                label {
                    (t!("studio.resources_label", locale = locale))
                    textarea name="resources"
                             rows="3"
                             placeholder="video https://example.com/intro.mp4" {
                        (resources_text)
                    }
                    small { (t!("studio.resources_hint", locale = locale)) }
                }
                button type="submit" { (t!("studio.save_btn", locale = locale)) }
            }
        }
    }
}

pub enum McqFormState<'a> {
    Add { chapter_id: i32 },
    Edit { mcq: &'a Mcq },
}

pub fn mcq_form(public_id: &str, state: McqFormState, error: Option<&str>, locale: &str) -> Markup {
    let (post_url, question, options, correct_index, heading) = match state {
        McqFormState::Add { chapter_id } => (
            names::add_mcq_url(public_id, chapter_id),
            String::new(),
            Vec::new(),
            0,
            t!("studio.add_mcq_btn", locale = locale),
        ),
        McqFormState::Edit { mcq } => (
            names::edit_mcq_url(public_id, mcq.id),
            mcq.question.clone(),
            mcq.options.clone(),
            mcq.correct_index,
            t!("studio.edit_mcq_title", locale = locale),
        ),
    };
    let option_at = |i: usize| options.get(i).map(String::as_str).unwrap_or("");

    html! {
        (back_link(public_id, locale))
        h1 { (heading) }
        @if let Some(error) = error {
            p { mark { (error) } }
        }
        article style="max-width: 48rem;" {
            form hx-post=(post_url)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("studio.mcq_question_label", locale = locale))
                    input name="question" type="text" required="true" value=(question)
                          aria-label=(t!("studio.mcq_question_label", locale = locale));
                }
                label {
                    "A"
                    input name="option_a" type="text" required="true" value=(option_at(0))
                          aria-label="A";
                }
                label {
                    "B"
                    input name="option_b" type="text" required="true" value=(option_at(1))
                          aria-label="B";
                }
                label {
                    "C"
                    input name="option_c" type="text" required="true" value=(option_at(2))
                          aria-label="C";
                }
                label {
                    "D"
                    input name="option_d" type="text" required="true" value=(option_at(3))
                          aria-label="D";
                }
                label {
                    (t!("studio.mcq_correct_label", locale = locale))
                    select name="correct_index" {
                        option value="0" selected[correct_index == 0] { "A" }
                        option value="1" selected[correct_index == 1] { "B" }
                        option value="2" selected[correct_index == 2] { "C" }
                        option value="3" selected[correct_index == 3] { "D" }
                    }
                }
                button type="submit" { (t!("studio.save_btn", locale = locale)) }
            }
        }
    }
}

pub enum CodingFormState<'a> {
    Add,
    Edit { question: &'a CodingQuestion },
}

pub fn coding_question_form(
    public_id: &str,
    state: CodingFormState,
    error: Option<&str>,
    locale: &str,
) -> Markup {
    let (post_url, question) = match state {
        CodingFormState::Add => (names::add_coding_question_url(public_id), None),
        CodingFormState::Edit { question } => (
            names::edit_coding_question_url(public_id, question.id),
            Some(question),
        ),
    };
    let heading = match question {
        Some(_) => t!("studio.edit_coding_title", locale = locale),
        None => t!("studio.add_coding_btn", locale = locale),
    };
    let title = question.map(|q| q.title.as_str()).unwrap_or("");
    let description = question.map(|q| q.description.as_str()).unwrap_or("");
    let difficulty = question.map(|q| q.difficulty.as_str()).unwrap_or("easy");
    let languages = question
        .map(|q| q.allowed_languages.join(", "))
        .unwrap_or_default();
    let time_limit = question.map(|q| q.time_limit_ms).unwrap_or(2000);
    let memory_limit = question.map(|q| q.memory_limit_mb).unwrap_or(256);
    let test_cases = question
        .map(|q| serde_json::to_string_pretty(&q.test_cases).unwrap_or_default())
        .unwrap_or_else(|| "[]".to_string());
    let starter_code = question
        .map(|q| serde_json::to_string_pretty(&q.starter_code).unwrap_or_default())
        .unwrap_or_else(|| "{}".to_string());

    html! {
        (back_link(public_id, locale))
        h1 { (heading) }
        @if let Some(error) = error {
            p { mark { (error) } }
        }
        article style="max-width: 48rem;" {
            form hx-post=(post_url)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("studio.coding_title_label", locale = locale))
                    input name="title" type="text" required="true" value=(title)
                          aria-label=(t!("studio.coding_title_label", locale = locale));
                }
                label {
                    (t!("studio.description_label", locale = locale))
                    textarea name="description" rows="6" required="true" { (description) }
                }
                fieldset role="group" {
                    label {
                        (t!("studio.difficulty_label", locale = locale))
                        select name="difficulty" {
                            @for level in names::DIFFICULTIES {
                                option value=(level) selected[*level == difficulty] { (level) }
                            }
                        }
                    }
                    label {
                        (t!("studio.time_limit_label", locale = locale))
                        input name="time_limit_ms" type="number" min="100" value=(time_limit)
                              aria-label=(t!("studio.time_limit_label", locale = locale));
                    }
                    label {
                        (t!("studio.memory_limit_label", locale = locale))
                        input name="memory_limit_mb" type="number" min="16" value=(memory_limit)
                              aria-label=(t!("studio.memory_limit_label", locale = locale));
                    }
                }
                label {
                    (t!("studio.languages_label", locale = locale))
                    input name="allowed_languages" type="text" required="true" value=(languages)
                          placeholder="python, rust, javascript"
                          aria-label=(t!("studio.languages_label", locale = locale));
                    small { (t!("studio.languages_hint", locale = locale)) }
                }
                label {
                    (t!("studio.test_cases_label", locale = locale))
                    textarea name="test_cases" rows="8" spellcheck="false" class="code-editor" {
                        (test_cases)
                    }
                    small { (t!("studio.test_cases_hint", locale = locale)) }
                }
                label {
                    (t!("studio.starter_code_label", locale = locale))
                    textarea name="starter_code" rows="8" spellcheck="false" class="code-editor" {
                        (starter_code)
                    }
                    small { (t!("studio.starter_code_hint", locale = locale)) }
                }
                button type="submit" { (t!("studio.save_btn", locale = locale)) }
            }
        }
    }
}
