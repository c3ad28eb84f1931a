use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{Chapter, CodingQuestionSummary, Course, Lesson, Mcq};
use crate::{names, views::components};

pub struct EditorChapter {
    pub chapter: Chapter,
    pub lessons: Vec<Lesson>,
    pub mcqs: Vec<Mcq>,
}

pub struct EditorData {
    pub course: Course,
    pub chapters: Vec<EditorChapter>,
    pub coding_questions: Vec<CodingQuestionSummary>,
}

pub fn course_editor(data: &EditorData, locale: &str) -> Markup {
    let course = &data.course;
    html! {
        p {
            (components::nav_link(
                names::STUDIO_URL,
                html! { "← " (t!("studio.back_to_studio", locale = locale)) },
            ))
        }
        h1 { (course.title) }

        (status_bar(course, locale))
        (course_details_form(course, locale))

        section {
            h2 { (t!("studio.chapters_title", locale = locale)) }
            @if data.chapters.is_empty() {
                p { (t!("studio.no_chapters", locale = locale)) }
            }
            @for (index, editor_chapter) in data.chapters.iter().enumerate() {
                (chapter_block(
                    course,
                    editor_chapter,
                    index > 0,
                    index + 1 < data.chapters.len(),
                    locale,
                ))
            }
            (add_chapter_form(&course.public_id, locale))
        }

        section {
            h2 { (t!("studio.import_title", locale = locale)) }
            p { small { (t!("studio.import_hint", locale = locale)) } }
            form hx-post=(names::import_mcqs_url(&course.public_id))
                 hx-encoding="multipart/form-data"
                 hx-target="main"
                 hx-swap="innerHTML" {
                fieldset role="group" {
                    input type="file" name="file" accept="application/json" required="true"
                          aria-label=(t!("studio.import_file_label", locale = locale));
                    button type="submit" { (t!("studio.import_btn", locale = locale)) }
                }
            }
        }

        section {
            h2 { (t!("studio.coding_title", locale = locale)) }
            @if data.coding_questions.is_empty() {
                p { (t!("studio.no_coding", locale = locale)) }
            } @else {
                ul {
                    @for question in &data.coding_questions {
                        li {
                            (components::nav_link(
                                &names::edit_coding_question_url(&course.public_id, question.id),
                                html! { (question.title) },
                            ))
                            " "
                            small { (question.difficulty) }
                            " "
                            button class="outline secondary inline-action"
                                   style="width: fit-content;"
                                   hx-post=(names::delete_coding_question_url(&course.public_id, question.id))
                                   hx-ext="json-enc"
                                   hx-target="main"
                                   hx-swap="innerHTML"
                                   hx-confirm=(t!("studio.delete_coding_confirm", locale = locale)) {
                                "✕"
                            }
                        }
                    }
                }
            }
            p {
                (components::nav_link(
                    &names::add_coding_question_url(&course.public_id),
                    html! { (t!("studio.add_coding_btn", locale = locale)) },
                ))
            }
        }
    }
}

fn status_bar(course: &Course, locale: &str) -> Markup {
    html! {
        article {
            fieldset role="group" style="margin-bottom: 0;" {
                label {
                    (t!("studio.status", locale = locale))
                    select name="status"
                           hx-post=(names::course_status_url(&course.public_id))
                           hx-ext="json-enc"
                           hx-trigger="change"
                           hx-target="main"
                           hx-swap="innerHTML"
                           aria-label=(t!("studio.status", locale = locale)) {
                        @for status in names::COURSE_STATUSES {
                            option value=(status) selected[*status == course.status] { (status) }
                        }
                    }
                }
                @if course.status == "draft" {
                    button class="outline secondary"
                           style="width: fit-content; align-self: end;"
                           hx-post=(names::delete_course_url(&course.public_id))
                           hx-ext="json-enc"
                           hx-target="main"
                           hx-swap="innerHTML"
                           hx-confirm=(t!("studio.delete_course_confirm", locale = locale)) {
                        (t!("studio.delete_course_btn", locale = locale))
                    }
                }
            }
            @if course.status != "draft" {
                p { small { (t!("studio.delete_hint", locale = locale)) } }
            }
        }
    }
}

fn course_details_form(course: &Course, locale: &str) -> Markup {
    html! {
        details {
            summary { (t!("studio.edit_details", locale = locale)) }
            article {
                form hx-post=(names::edit_course_url(&course.public_id))
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    label {
                        (t!("studio.course_title_label", locale = locale))
                        input name="title" type="text" required="true" value=(course.title)
                              aria-label=(t!("studio.course_title_label", locale = locale));
                    }
                    label {
                        (t!("studio.description_label", locale = locale))
                        textarea name="description" rows="5" required="true" { (course.description) }
                    }
                    fieldset role="group" {
                        label {
                            (t!("studio.category", locale = locale))
                            select name="category" {
                                @for category in names::COURSE_CATEGORIES {
                                    option value=(category) selected[*category == course.category] {
                                        (category)
                                    }
                                }
                            }
                        }
                        label {
                            (t!("studio.price_type_label", locale = locale))
                            select name="price_type" {
                                option value="free" selected[course.price_type == "free"] {
                                    (t!("catalog.free", locale = locale))
                                }
                                option value="paid" selected[course.price_type == "paid"] {
                                    (t!("catalog.paid", locale = locale))
                                }
                            }
                        }
                        label {
                            (t!("studio.price_cents_label", locale = locale))
                            input name="price_cents" type="number" min="0" value=(course.price_cents)
                                  aria-label=(t!("studio.price_cents_label", locale = locale));
                        }
                    }
                    label {
                        (t!("studio.image_url_label", locale = locale))
                        input name="image_url" type="url"
                              value=(course.image_url.as_deref().unwrap_or(""))
                              aria-label=(t!("studio.image_url_label", locale = locale));
                    }
                    button type="submit" { (t!("studio.save_btn", locale = locale)) }
                }
            }
        }
    }
}

fn chapter_block(
    course: &Course,
    editor_chapter: &EditorChapter,
    can_move_up: bool,
    can_move_down: bool,
    locale: &str,
) -> Markup {
    let chapter = &editor_chapter.chapter;
    let public_id = &course.public_id;

    html! {
        article class="chapter-block" {
            header {
                strong { (chapter.position) ". " (chapter.title) }
                " "
                span style="white-space: nowrap;" {
                    @if can_move_up {
                        button class="outline move-btn"
                               hx-post=(names::move_chapter_url(public_id, chapter.id))
                               hx-ext="json-enc"
                               hx-target="main"
                               hx-swap="innerHTML"
                               hx-vals=(r#"{"up": true}"#)
                               title=(t!("studio.move_up", locale = locale)) {
                            "↑"
                        }
                    }
                    @if can_move_down {
                        button class="outline move-btn"
                               hx-post=(names::move_chapter_url(public_id, chapter.id))
                               hx-ext="json-enc"
                               hx-target="main"
                               hx-swap="innerHTML"
                               hx-vals=(r#"{"up": false}"#)
                               title=(t!("studio.move_down", locale = locale)) {
                            "↓"
                        }
                    }
                    button class="outline secondary move-btn"
                           hx-post=(names::delete_chapter_url(public_id, chapter.id))
                           hx-ext="json-enc"
                           hx-target="main"
                           hx-swap="innerHTML"
                           hx-confirm=(t!("studio.delete_chapter_confirm", locale = locale))
                           title=(t!("studio.delete_chapter_btn", locale = locale)) {
                        "✕"
                    }
                }
            }

            details {
                summary { (t!("studio.edit_chapter", locale = locale)) }
                form hx-post=(names::edit_chapter_url(public_id, chapter.id))
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    label {
                        (t!("studio.chapter_title_label", locale = locale))
                        input name="title" type="text" required="true" value=(chapter.title)
                              aria-label=(t!("studio.chapter_title_label", locale = locale));
                    }
                    label {
                        (t!("studio.chapter_content_label", locale = locale))
                        textarea name="content" rows="3" { (chapter.content) }
                    }
                    button type="submit" { (t!("studio.save_btn", locale = locale)) }
                }
            }

            h4 { (t!("studio.lessons_title", locale = locale)) }
            @if editor_chapter.lessons.is_empty() {
                p { small { (t!("studio.no_lessons", locale = locale)) } }
            } @else {
                ul {
                    @for lesson in &editor_chapter.lessons {
                        li {
                            (components::nav_link(
                                &names::edit_lesson_url(public_id, lesson.id),
                                html! { (lesson.title) },
                            ))
                            " "
                            small {
                                (lesson.duration_minutes)
                                (t!("learn.minutes_suffix", locale = locale))
                            }
                            " "
                            button class="outline secondary inline-action"
                                   style="width: fit-content;"
                                   hx-post=(names::delete_lesson_url(public_id, lesson.id))
                                   hx-ext="json-enc"
                                   hx-target="main"
                                   hx-swap="innerHTML"
                                   hx-confirm=(t!("studio.delete_lesson_confirm", locale = locale)) {
                                "✕"
                            }
                        }
                    }
                }
            }
            p {
                (components::nav_link(
                    &names::add_lesson_url(public_id, chapter.id),
                    html! { (t!("studio.add_lesson_btn", locale = locale)) },
                ))
            }

            h4 { (t!("studio.mcqs_title", locale = locale)) }
            @if editor_chapter.mcqs.is_empty() {
                p { small { (t!("studio.no_mcqs", locale = locale)) } }
            } @else {
                ul {
                    @for mcq in &editor_chapter.mcqs {
                        li {
                            (components::nav_link(
                                &names::edit_mcq_url(public_id, mcq.id),
                                html! { (mcq.question) },
                            ))
                            " "
                            button class="outline secondary inline-action"
                                   style="width: fit-content;"
                                   hx-post=(names::delete_mcq_url(public_id, mcq.id))
                                   hx-ext="json-enc"
                                   hx-target="main"
                                   hx-swap="innerHTML"
                                   hx-confirm=(t!("studio.delete_mcq_confirm", locale = locale)) {
                                "✕"
                            }
                        }
                    }
                }
            }
            p {
                (components::nav_link(
                    &names::add_mcq_url(public_id, chapter.id),
                    html! { (t!("studio.add_mcq_btn", locale = locale)) },
                ))
            }
        }
    }
}

fn add_chapter_form(public_id: &str, locale: &str) -> Markup {
    html! {
        details {
            summary { (t!("studio.add_chapter_btn", locale = locale)) }
            article {
                form hx-post=(names::add_chapter_url(public_id))
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    label {
                        (t!("studio.chapter_title_label", locale = locale))
                        input name="title" type="text" required="true"
                              aria-label=(t!("studio.chapter_title_label", locale = locale));
                    }
                    label {
                        (t!("studio.chapter_content_label", locale = locale))
                        textarea name="content" rows="3" {}
                    }
                    button type="submit" { (t!("studio.add_btn", locale = locale)) }
                }
            }
        }
    }
}
