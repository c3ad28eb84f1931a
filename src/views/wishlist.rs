use maud::{html, Markup};
use rust_i18n::t;

use crate::db::models::{WishlistItem, WishlistStats};
use crate::{names, views::components};

pub fn wishlist_page(
    items: &[WishlistItem],
    stats: &WishlistStats,
    error: Option<&str>,
    locale: &str,
) -> Markup {
    html! {
        h1 {
            (t!("wishlist.title", locale = locale))
            " "
            small id="wishlist-count" { "(" (stats.total) ")" }
        }

        @if let Some(error) = error {
            p { mark { (t!("wishlist.error_banner", locale = locale, error = error)) } }
        }

        @if items.is_empty() {
            p { (t!("wishlist.empty", locale = locale)) }
            p {
                (components::nav_link(
                    names::CATALOG_URL,
                    html! { (t!("wishlist.browse_catalog", locale = locale)) },
                ))
            }
        } @else {
            p {
                small {
                    (t!("wishlist.stats_line", locale = locale,
                        total = stats.total,
                        active = stats.active,
                        inactive = stats.inactive,
                        draft = stats.draft,
                        free = stats.free,
                        paid = stats.paid,
                        categories = stats.categories))
                }
            }

            table {
                thead {
                    tr {
                        th { "#" }
                        th { (t!("wishlist.course", locale = locale)) }
                        th { (t!("wishlist.category", locale = locale)) }
                        th { (t!("wishlist.status", locale = locale)) }
                        th { (t!("wishlist.price", locale = locale)) }
                        th { (t!("wishlist.added", locale = locale)) }
                        th { (t!("wishlist.actions", locale = locale)) }
                    }
                }
                tbody {
                    @for (index, item) in items.iter().enumerate() {
                        @let up_target = (index > 0).then(|| items[index - 1].position);
                        @let down_target = items.get(index + 1).map(|next| next.position);
                        tr {
                            td { (index + 1) }
                            td {
                                (components::nav_link(
                                    &names::course_page_url(&item.course_public_id),
                                    html! { (item.course_title) },
                                ))
                            }
                            td { (item.course_category) }
                            td {
                                @if item.course_status == "active" {
                                    (item.course_status)
                                } @else {
                                    mark { (item.course_status) }
                                }
                            }
                            td { (components::price_badge(&item.price_type, item.price_cents, locale)) }
                            td { (item.added_date) }
                            td style="white-space: nowrap;" {
                                @if let Some(position) = up_target {
                                    button class="outline move-btn"
                                           hx-post=(names::move_wishlist_item_url(&item.course_public_id))
                                           hx-ext="json-enc"
                                           hx-target="main"
                                           hx-swap="innerHTML"
                                           hx-vals=(format!(r#"{{"position": {position}}}"#))
                                           title=(t!("wishlist.move_up", locale = locale)) {
                                        "↑"
                                    }
                                }
                                @if let Some(position) = down_target {
                                    button class="outline move-btn"
                                           hx-post=(names::move_wishlist_item_url(&item.course_public_id))
                                           hx-ext="json-enc"
                                           hx-target="main"
                                           hx-swap="innerHTML"
                                           hx-vals=(format!(r#"{{"position": {position}}}"#))
                                           title=(t!("wishlist.move_down", locale = locale)) {
                                        "↓"
                                    }
                                }
                                button class="outline secondary move-btn"
                                       hx-post=(names::remove_from_wishlist_url(&item.course_public_id))
                                       hx-ext="json-enc"
                                       hx-target="main"
                                       hx-swap="innerHTML"
                                       hx-vals=(r#"{"from": "wishlist"}"#)
                                       title=(t!("wishlist.remove", locale = locale)) {
                                    "✕"
                                }
                            }
                        }
                    }
                }
            }

            div class="wishlist-actions" {
                a role="button"
                  class="outline"
                  href=(names::WISHLIST_EXPORT_URL)
                  download="wishlist.json" {
                    (t!("wishlist.export_btn", locale = locale))
                }
                " "
                a role="button"
                  class="outline secondary"
                  href="#"
                  onclick="document.getElementById('clear-dialog').showModal();return false" {
                    (t!("wishlist.clear_btn", locale = locale))
                }
            }

            dialog id="clear-dialog" {
                article {
                    p { (t!("wishlist.clear_confirm", locale = locale)) }
                    footer {
                        button class="secondary"
                               onclick="document.getElementById('clear-dialog').close()" {
                            (t!("wishlist.cancel", locale = locale))
                        }
                        button hx-post=(names::WISHLIST_CLEAR_URL)
                               hx-ext="json-enc"
                               hx-target="main"
                               hx-swap="innerHTML" {
                            (t!("wishlist.clear_confirm_btn", locale = locale))
                        }
                    }
                }
            }
        }
    }
}

/// Nav badge fragment, refreshed after wishlist mutations.
pub fn count_fragment(count: i64) -> Markup {
    html! { (count) }
}
