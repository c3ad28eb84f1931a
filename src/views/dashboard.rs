use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{Certificate, EnrolledCourse};
use crate::{names, views::components};

pub fn dashboard(
    courses: &[EnrolledCourse],
    certificates: &[Certificate],
    wishlist_count: i64,
    locale: &str,
) -> Markup {
    html! {
        h1 { (t!("dashboard.title", locale = locale)) }
        p {
            small {
                (components::nav_link(names::WISHLIST_URL, html! {
                    (t!("dashboard.wishlist_count", locale = locale, count = wishlist_count))
                }))
            }
        }

        @if courses.is_empty() {
            p { (t!("dashboard.no_courses", locale = locale)) }
            p {
                (components::nav_link(
                    names::CATALOG_URL,
                    html! { (t!("dashboard.browse_catalog", locale = locale)) },
                ))
            }
        } @else {
            div class="course-grid" {
                @for course in courses {
                    article class="course-card" {
                        @if let Some(ref image_url) = course.image_url {
                            img src=(image_url) alt=(course.title) class="course-card-image";
                        }
                        h3 {
                            (components::nav_link(
                                &names::learn_url(&course.public_id),
                                html! { (course.title) },
                            ))
                        }
                        p {
                            small {
                                (course.category)
                                @if let Some(ref batch) = course.batch {
                                    " · " (batch)
                                }
                                " · "
                                (t!("dashboard.enrolled_on", locale = locale, date = &course.enrolled_date))
                            }
                        }
                        (components::progress_bar(course.completed_lessons, course.total_lessons))
                        p {
                            small {
                                (t!("dashboard.lessons_done", locale = locale,
                                    completed = course.completed_lessons,
                                    total = course.total_lessons))
                                " · "
                                (t!("dashboard.chapters_done", locale = locale,
                                    completed = course.completed_chapters,
                                    total = course.total_chapters))
                            }
                        }
                        footer class="card-actions" {
                            a role="button"
                              href=(names::learn_url(&course.public_id))
                              style="width: fit-content;" {
                                (t!("dashboard.continue_btn", locale = locale))
                            }
                        }
                    }
                }
            }
        }

        @if !certificates.is_empty() {
            section {
                h2 { (t!("dashboard.certificates_title", locale = locale)) }
                table {
                    thead {
                        tr {
                            th { (t!("dashboard.certificate_course", locale = locale)) }
                            th { (t!("dashboard.certificate_issued", locale = locale)) }
                            th { (t!("dashboard.certificate_downloads", locale = locale)) }
                            th {}
                        }
                    }
                    tbody {
                        @for cert in certificates {
                            tr {
                                td {
                                    (cert.course_title)
                                    @if cert.status == "revoked" {
                                        " " mark { (cert.status) }
                                    }
                                }
                                td { (cert.issued_date) }
                                td { (cert.download_count) }
                                td {
                                    a href=(names::certificate_url(&cert.certificate_code)) {
                                        (t!("dashboard.open_certificate", locale = locale))
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
