use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::db::models::AuthUser;
use crate::views::components;
use crate::{names, utils};

const LOCALES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ja", "日本語"),
    ("zh-CN", "简体中文"),
    ("zh-TW", "繁體中文"),
];

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2.0.6/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://cdn.jsdelivr.net/npm/htmx.org@2.0.4/dist/htmx.min.js" {}
        script src="https://cdn.jsdelivr.net/npm/htmx-ext-json-enc@2.0.1/json-enc.js" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn locale_menu(locale: &str) -> Markup {
    let current = LOCALES
        .iter()
        .find(|(code, _)| *code == locale)
        .map(|(_, label)| *label)
        .unwrap_or("English");

    html! {
        details.dropdown {
            summary { (current) }
            ul dir="rtl" {
                @for (code, label) in LOCALES {
                    li {
                        a href="#"
                          hx-post=(names::SET_LOCALE_URL)
                          hx-ext="json-enc"
                          hx-vals=(format!(r#"{{"locale": "{code}"}}"#)) {
                            (label)
                        }
                    }
                }
            }
        }
    }
}

fn header(locale: &str, user: Option<&AuthUser>) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href=(names::CATALOG_URL) { strong { "CourseCraft" } }
                    }
                    li."secondary" { (utils::VERSION) }
                }
                ul {
                    li {
                        (components::nav_link(names::CATALOG_URL, html! {
                            (t!("nav.catalog", locale = locale))
                        }))
                    }
                    @if let Some(user) = user {
                        li {
                            (components::nav_link(names::DASHBOARD_URL, html! {
                                (t!("nav.dashboard", locale = locale))
                            }))
                        }
                        li {
                            (components::nav_link(names::WISHLIST_URL, html! {
                                (t!("nav.wishlist", locale = locale))
                                " "
                                // Refreshed whenever a mutation response fires
                                // the wishlist-changed event.
                                sup id="nav-wishlist-count"
                                    hx-get=(names::WISHLIST_COUNT_URL)
                                    hx-trigger="load, wishlist-changed from:body"
                                    hx-swap="innerHTML" {}
                            }))
                        }
                        @if user.can_author() {
                            li {
                                (components::nav_link(names::STUDIO_URL, html! {
                                    (t!("nav.studio", locale = locale))
                                }))
                            }
                        }
                        @if user.is_staff() {
                            // The stats dashboard is author-only.
                            @let admin_target = if user.can_author() {
                                names::ADMIN_URL
                            } else {
                                names::MODERATION_URL
                            };
                            li {
                                (components::nav_link(admin_target, html! {
                                    (t!("nav.admin", locale = locale))
                                }))
                            }
                        }
                        li {
                            details.dropdown {
                                summary { (user.display_name) }
                                ul dir="rtl" {
                                    li {
                                        a href=(names::ACCOUNT_URL) {
                                            (t!("nav.account", locale = locale))
                                        }
                                    }
                                    li {
                                        a href="#" hx-post=(names::LOGOUT_URL) {
                                            (t!("nav.log_out", locale = locale))
                                        }
                                    }
                                }
                            }
                        }
                    } @else {
                        li {
                            a href=(names::LOGIN_URL) { (t!("nav.log_in", locale = locale)) }
                        }
                        li {
                            a role="button" href=(names::REGISTER_URL) {
                                (t!("nav.sign_up", locale = locale))
                            }
                        }
                    }
                    li { (locale_menu(locale)) }
                }
            }
        }
    }
}

fn shell(title: &str, body: Markup, locale: &str, user: Option<&AuthUser>) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())
            (icon())

            title { (format!("{title} - CourseCraft")) }
        }

        body."container" {
            (header(locale, user))
            main { (body) }
        }
    }
}

/// Full page for a regular request, title-swap fragment for an HTMX one.
pub fn render(is_htmx: bool, title: &str, body: Markup, locale: &str, user: Option<&AuthUser>) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        shell(title, body, locale, user)
    }
}

pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    shell(title, body, locale, None)
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - CourseCraft" }
        (body)
    }
}
