mod course;
mod forms;

pub use course::{course_editor, EditorChapter, EditorData};
pub use forms::{coding_question_form, lesson_form, mcq_form, CodingFormState, LessonFormState, McqFormState};

use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::CourseCard;
use crate::{names, views::components};

pub fn studio_page(courses: &[CourseCard], locale: &str) -> Markup {
    html! {
        h1 { (t!("studio.title", locale = locale)) }
        p {
            (components::nav_link(
                names::CREATE_COURSE_URL,
                html! { (t!("studio.new_course_btn", locale = locale)) },
            ))
        }

        @if courses.is_empty() {
            p { (t!("studio.empty", locale = locale)) }
        } @else {
            table {
                thead {
                    tr {
                        th { (t!("studio.course", locale = locale)) }
                        th { (t!("studio.category", locale = locale)) }
                        th { (t!("studio.status", locale = locale)) }
                        th { (t!("studio.price", locale = locale)) }
                        th { (t!("studio.enrollments", locale = locale)) }
                        th { (t!("studio.rating", locale = locale)) }
                        th {}
                    }
                }
                tbody {
                    @for course in courses {
                        tr {
                            td { (course.title) }
                            td { (course.category) }
                            td {
                                @if course.status == "active" {
                                    (course.status)
                                } @else {
                                    mark { (course.status) }
                                }
                            }
                            td { (components::price_badge(&course.price_type, course.price_cents, locale)) }
                            td { (course.enrollment_count) }
                            td { (components::stars(course.rating_avg, course.rating_count)) }
                            td {
                                (components::nav_link(
                                    &names::studio_course_url(&course.public_id),
                                    html! { (t!("studio.edit_link", locale = locale)) },
                                ))
                            }
                        }
                    }
                }
            }
        }
    }
}

pub enum CreateCourseState {
    NoError,
    EmptyFields,
}

pub fn create_course_page(state: CreateCourseState, locale: &str) -> Markup {
    let error_msg = match state {
        CreateCourseState::NoError => None,
        CreateCourseState::EmptyFields => Some(t!("studio.empty_fields", locale = locale)),
    };

    html! {
        h1 { (t!("studio.create_title", locale = locale)) }
        article style="max-width: 48rem;" {
            form hx-post=(names::CREATE_COURSE_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("studio.course_title_label", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="title"
                              type="text"
                              required="true"
                              aria-invalid="true"
                              aria-label=(t!("studio.course_title_label", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="title"
                              type="text"
                              required="true"
                              aria-label=(t!("studio.course_title_label", locale = locale));
                    }
                }
                label {
                    (t!("studio.description_label", locale = locale))
                    textarea name="description" rows="5" required="true" {}
                }
                fieldset role="group" {
                    label {
                        (t!("studio.category", locale = locale))
                        select name="category" {
                            @for category in names::COURSE_CATEGORIES {
                                option value=(category) { (category) }
                            }
                        }
                    }
                    label {
                        (t!("studio.price_type_label", locale = locale))
                        select name="price_type" {
                            option value="free" { (t!("catalog.free", locale = locale)) }
                            option value="paid" { (t!("catalog.paid", locale = locale)) }
                        }
                    }
                    label {
                        (t!("studio.price_cents_label", locale = locale))
                        input name="price_cents" type="number" min="0" value="0"
                              aria-label=(t!("studio.price_cents_label", locale = locale));
                    }
                }
                label {
                    (t!("studio.image_url_label", locale = locale))
                    input name="image_url" type="url" placeholder="https://..."
                          aria-label=(t!("studio.image_url_label", locale = locale));
                }
                button type="submit" { (t!("studio.create_btn", locale = locale)) }
            }
            p {
                (components::nav_link(
                    names::STUDIO_URL,
                    html! { (t!("studio.back_to_studio", locale = locale)) },
                ))
            }
        }
    }
}
