use maud::{html, Markup, PreEscaped};
use rust_i18n::t;

use crate::db::models::{
    AuditLogRow, ModerationCourse, ModerationRating, MonthlyEnrollment, PlatformStats,
    UserAdminRow,
};
use crate::{names, views::components};

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.7/dist/chart.umd.min.js";

pub fn admin_page(stats: &PlatformStats, monthly: &[MonthlyEnrollment], locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.title", locale = locale)) }

        div class="stats-grid" {
            (stat_card(stats.total_users, &t!("admin.stat_users", locale = locale)))
            (stat_card(stats.total_courses, &t!("admin.stat_courses", locale = locale)))
            (stat_card(stats.active_courses, &t!("admin.stat_active_courses", locale = locale)))
            (stat_card(stats.total_enrollments, &t!("admin.stat_enrollments", locale = locale)))
            (stat_card(stats.certificates_issued, &t!("admin.stat_certificates", locale = locale)))
            (stat_card(stats.campaigns_sent, &t!("admin.stat_campaigns", locale = locale)))
        }

        @if !monthly.is_empty() {
            article {
                h4 { (t!("admin.enrollments_chart_title", locale = locale)) }
                div style="position: relative; width: 100%; max-height: 400px;" {
                    canvas id="enrollments-chart" {}
                }
                (enrollments_chart_script(monthly, locale))
            }
        }
    }
}

fn stat_card(value: i64, label: &str) -> Markup {
    html! {
        article class="stat-card" {
            h2 { (value) }
            p { small { (label) } }
        }
    }
}

fn enrollments_chart_script(monthly: &[MonthlyEnrollment], locale: &str) -> Markup {
    let labels: Vec<&str> = monthly.iter().map(|m| m.month_label.as_str()).collect();
    let counts: Vec<i64> = monthly.iter().map(|m| m.count).collect();
    let labels_json = serde_json::to_string(&labels).unwrap_or_default();
    let counts_json = serde_json::to_string(&counts).unwrap_or_default();
    let series_label =
        serde_json::to_string(&t!("admin.chart_series", locale = locale).to_string())
            .unwrap_or_default();

    let script = format!(
        r#"(function(){{
var s=document.createElement('script');
s.src='{CHART_JS_URL}';
s.onload=function(){{
var ctx=document.getElementById('enrollments-chart');
if(!ctx)return;
new Chart(ctx,{{type:'bar',data:{{labels:{labels_json},datasets:[{{label:{series_label},data:{counts_json},backgroundColor:'#007bff'}}]}},options:{{responsive:true,plugins:{{legend:{{display:false}}}},scales:{{y:{{beginAtZero:true,ticks:{{precision:0}},title:{{display:true,text:{series_label}}}}}}}}}}});
}};
document.head.appendChild(s);
}})()"#
    );

    html! { script { (PreEscaped(script)) } }
}

pub fn users_page(users: &[UserAdminRow], current_user_id: i32, locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.users_title", locale = locale)) }
        table {
            thead {
                tr {
                    th { (t!("admin.user_email", locale = locale)) }
                    th { (t!("admin.user_name", locale = locale)) }
                    th { (t!("admin.user_role", locale = locale)) }
                    th { (t!("admin.user_enrollments", locale = locale)) }
                    th { (t!("admin.user_since", locale = locale)) }
                    th { (t!("admin.user_status", locale = locale)) }
                }
            }
            tbody {
                @for user in users {
                    tr {
                        td { (user.email) }
                        td { (user.display_name) }
                        td {
                            @if user.id == current_user_id {
                                (user.role)
                            } @else {
                                select name="role"
                                       hx-post=(names::set_user_role_url(user.id))
                                       hx-ext="json-enc"
                                       hx-trigger="change"
                                       hx-target="main"
                                       hx-swap="innerHTML"
                                       aria-label=(t!("admin.user_role", locale = locale)) {
                                    @for role in names::ROLES {
                                        option value=(role) selected[*role == user.role] { (role) }
                                    }
                                }
                            }
                        }
                        td { (user.enrollment_count) }
                        td { (user.created_date) }
                        td {
                            @if user.id == current_user_id {
                                "-"
                            } @else if user.is_active {
                                button class="outline secondary"
                                       style="width: fit-content;"
                                       hx-post=(names::toggle_user_active_url(user.id))
                                       hx-ext="json-enc"
                                       hx-target="main"
                                       hx-swap="innerHTML" {
                                    (t!("admin.deactivate_btn", locale = locale))
                                }
                            } @else {
                                button class="outline"
                                       style="width: fit-content;"
                                       hx-post=(names::toggle_user_active_url(user.id))
                                       hx-ext="json-enc"
                                       hx-target="main"
                                       hx-swap="innerHTML" {
                                    (t!("admin.reactivate_btn", locale = locale))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn moderation_page(
    courses: &[ModerationCourse],
    ratings: &[ModerationRating],
    locale: &str,
) -> Markup {
    html! {
        h1 { (t!("admin.moderation_title", locale = locale)) }

        section {
            h2 { (t!("admin.moderation_courses", locale = locale)) }
            @if courses.is_empty() {
                p { (t!("admin.moderation_no_courses", locale = locale)) }
            } @else {
                table {
                    thead {
                        tr {
                            th { (t!("admin.course_title_col", locale = locale)) }
                            th { (t!("admin.course_creator", locale = locale)) }
                            th { (t!("admin.course_category", locale = locale)) }
                            th { (t!("admin.course_enrollments", locale = locale)) }
                            th { (t!("admin.course_status", locale = locale)) }
                            th {}
                        }
                    }
                    tbody {
                        @for course in courses {
                            tr {
                                td {
                                    (components::nav_link(
                                        &names::course_page_url(&course.public_id),
                                        html! { (course.title) },
                                    ))
                                }
                                td { (course.creator_name) }
                                td { (course.category) }
                                td { (course.enrollment_count) }
                                td {
                                    @if course.status == "active" {
                                        (course.status)
                                    } @else {
                                        mark { (course.status) }
                                    }
                                }
                                td {
                                    @if course.status == "active" {
                                        (course_status_btn(
                                            &course.public_id,
                                            "inactive",
                                            &t!("admin.deactivate_course_btn", locale = locale),
                                            true,
                                        ))
                                    } @else {
                                        (course_status_btn(
                                            &course.public_id,
                                            "active",
                                            &t!("admin.activate_course_btn", locale = locale),
                                            false,
                                        ))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        section {
            h2 { (t!("admin.moderation_ratings", locale = locale)) }
            @if ratings.is_empty() {
                p { (t!("admin.moderation_no_ratings", locale = locale)) }
            } @else {
                table {
                    thead {
                        tr {
                            th { (t!("admin.rating_course", locale = locale)) }
                            th { (t!("admin.rating_user", locale = locale)) }
                            th { (t!("admin.rating_score", locale = locale)) }
                            th { (t!("admin.rating_review", locale = locale)) }
                            th { (t!("admin.rating_status", locale = locale)) }
                            th {}
                        }
                    }
                    tbody {
                        @for rating in ratings {
                            tr {
                                td { (rating.course_title) }
                                td { (rating.user_name) }
                                td { (rating.score) " ★" }
                                td { (rating.review) }
                                td {
                                    @if rating.status == "visible" {
                                        (rating.status)
                                    } @else {
                                        mark { (rating.status) }
                                    }
                                }
                                td {
                                    button class="outline secondary"
                                           style="width: fit-content;"
                                           hx-post=(names::toggle_rating_url(rating.id))
                                           hx-ext="json-enc"
                                           hx-target="main"
                                           hx-swap="innerHTML" {
                                        @if rating.status == "visible" {
                                            (t!("admin.hide_rating_btn", locale = locale))
                                        } @else {
                                            (t!("admin.show_rating_btn", locale = locale))
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
}

fn course_status_btn(public_id: &str, status: &str, label: &str, secondary: bool) -> Markup {
    let class = if secondary {
        "outline secondary"
    } else {
        "outline"
    };
    html! {
        button class=(class)
               style="width: fit-content;"
               hx-post=(names::moderate_course_url(public_id))
               hx-ext="json-enc"
               hx-target="main"
               hx-swap="innerHTML"
               hx-vals=(format!(r#"{{"status": "{status}"}}"#)) {
            (label)
        }
    }
}

fn audit_page_url(action: &str, page: i64) -> String {
    format!(
        "{}?action={}&page={}",
        names::AUDIT_LOG_URL,
        urlencoding::encode(action),
        page,
    )
}

pub fn audit_page(
    rows: &[AuditLogRow],
    actions: &[String],
    current_action: &str,
    page: i64,
    total: i64,
    locale: &str,
) -> Markup {
    let pages = (total + names::AUDIT_PAGE_SIZE - 1) / names::AUDIT_PAGE_SIZE;
    let prev = (page > 0).then(|| audit_page_url(current_action, page - 1));
    let next = (page + 1 < pages).then(|| audit_page_url(current_action, page + 1));
    let page_label = t!(
        "catalog.page_of",
        locale = locale,
        page = page + 1,
        pages = pages.max(1)
    );

    html! {
        h1 { (t!("admin.audit_title", locale = locale)) }

        form action=(names::AUDIT_LOG_URL) method="get" {
            fieldset role="group" {
                select name="action" aria-label=(t!("admin.audit_action", locale = locale)) {
                    option value="" { (t!("admin.audit_all_actions", locale = locale)) }
                    @for action in actions {
                        option value=(action) selected[*action == current_action] { (action) }
                    }
                }
                button type="submit" { (t!("admin.audit_filter_btn", locale = locale)) }
            }
        }

        @if rows.is_empty() {
            p { (t!("admin.audit_empty", locale = locale)) }
        } @else {
            table {
                thead {
                    tr {
                        th { (t!("admin.audit_when", locale = locale)) }
                        th { (t!("admin.audit_action", locale = locale)) }
                        th { (t!("admin.audit_course", locale = locale)) }
                        th { (t!("admin.audit_user", locale = locale)) }
                        th { (t!("admin.audit_fields", locale = locale)) }
                    }
                }
                tbody {
                    @for row in rows {
                        tr {
                            td { (row.created_date) }
                            td { (row.action) }
                            td { (row.course_title) }
                            td { (row.user_name) }
                            td { small { (row.changed_fields.join(", ")) } }
                        }
                    }
                }
            }
            (components::pager(prev, next, &page_label, locale))
        }
    }
}
