use maud::{html, Markup};
use rust_i18n::t;

use crate::{names, utils};

/// htmx navigation link with href fallback + hx-get for in-page swap.
pub fn nav_link(href: &str, body: Markup) -> Markup {
    html! {
        a href=(href)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (body)
        }
    }
}

/// Star summary for a course, or a muted placeholder when unrated.
pub fn stars(rating_avg: Option<f64>, rating_count: i64) -> Markup {
    match rating_avg {
        Some(avg) => {
            let filled = (avg.round() as usize).min(5);
            html! {
                span.stars {
                    @for _ in 0..filled { "★" }
                    @for _ in filled..5 { "☆" }
                    " " (format!("{avg:.1}")) " (" (rating_count) ")"
                }
            }
        }
        None => html! {
            span.stars."secondary" { "☆☆☆☆☆" }
        },
    }
}

pub fn price_badge(price_type: &str, price_cents: i32, locale: &str) -> Markup {
    html! {
        @if price_type == "paid" {
            mark { (utils::format_price(price_cents)) }
        } @else {
            mark { (t!("catalog.free", locale = locale)) }
        }
    }
}

pub fn progress_bar(completed: i64, total: i64) -> Markup {
    html! {
        progress value=(completed) max=(total.max(1)) {}
    }
}

/// Heart button that wishlists or un-wishlists a course. The server
/// responds with the flipped button, which swaps in place.
pub fn wishlist_toggle(public_id: &str, in_wishlist: bool, locale: &str) -> Markup {
    let (url, glyph, label) = if in_wishlist {
        (
            names::remove_from_wishlist_url(public_id),
            "♥",
            t!("wishlist.remove", locale = locale),
        )
    } else {
        (
            names::add_to_wishlist_url(public_id),
            "♡",
            t!("wishlist.add", locale = locale),
        )
    };

    html! {
        button.outline."wishlist-toggle"
            hx-post=(url)
            hx-ext="json-enc"
            hx-swap="outerHTML"
            title=(label) {
            (glyph)
        }
    }
}

pub fn pager(prev: Option<String>, next: Option<String>, label: &str, locale: &str) -> Markup {
    html! {
        nav.pager {
            ul {
                li {
                    @if let Some(prev) = prev {
                        (nav_link(&prev, html! { (t!("pager.prev", locale = locale)) }))
                    }
                }
                li { small { (label) } }
                li {
                    @if let Some(next) = next {
                        (nav_link(&next, html! { (t!("pager.next", locale = locale)) }))
                    }
                }
            }
        }
    }
}
