use maud::{html, Markup};
use rust_i18n::t;

use crate::db::CatalogFilter;
use crate::db::models::{ChapterProgress, Course, CourseCard, Rating};
use crate::{names, views::components};

fn catalog_page_url(filter: &CatalogFilter, page: i64) -> String {
    format!(
        "{}?category={}&price={}&q={}&page={}",
        names::CATALOG_URL,
        urlencoding::encode(&filter.category),
        urlencoding::encode(&filter.price_type),
        urlencoding::encode(&filter.search),
        page,
    )
}

pub fn catalog(
    cards: &[CourseCard],
    categories: &[String],
    filter: &CatalogFilter,
    total: i64,
    wishlisted: &[i32],
    signed_in: bool,
    locale: &str,
) -> Markup {
    let pages = (total + names::CATALOG_PAGE_SIZE - 1) / names::CATALOG_PAGE_SIZE;
    let prev = (filter.page > 0).then(|| catalog_page_url(filter, filter.page - 1));
    let next = (filter.page + 1 < pages).then(|| catalog_page_url(filter, filter.page + 1));
    let page_label = t!(
        "catalog.page_of",
        locale = locale,
        page = filter.page + 1,
        pages = pages.max(1)
    );

    html! {
        h1 { (t!("catalog.title", locale = locale)) }
        form action=(names::CATALOG_URL) method="get" role="search" class="catalog-filters" {
            fieldset role="group" {
                select name="category" aria-label=(t!("catalog.category", locale = locale)) {
                    option value="" { (t!("catalog.all_categories", locale = locale)) }
                    @for category in categories {
                        option value=(category) selected[*category == filter.category] {
                            (category)
                        }
                    }
                }
                select name="price" aria-label=(t!("catalog.price", locale = locale)) {
                    option value="" { (t!("catalog.any_price", locale = locale)) }
                    option value="free" selected[filter.price_type == "free"] {
                        (t!("catalog.free", locale = locale))
                    }
                    option value="paid" selected[filter.price_type == "paid"] {
                        (t!("catalog.paid", locale = locale))
                    }
                }
                input type="search"
                      name="q"
                      value=(filter.search)
                      placeholder=(t!("catalog.search_placeholder", locale = locale))
                      aria-label=(t!("catalog.search_placeholder", locale = locale));
                button type="submit" { (t!("catalog.filter_btn", locale = locale)) }
            }
        }
        @if cards.is_empty() {
            p { (t!("catalog.empty", locale = locale)) }
        } @else {
            div class="course-grid" id="course-results" {
                (course_cards(cards, wishlisted, signed_in, locale))
            }
            (components::pager(prev, next, &page_label, locale))
        }
    }
}

pub fn course_cards(
    cards: &[CourseCard],
    wishlisted: &[i32],
    signed_in: bool,
    locale: &str,
) -> Markup {
    html! {
        @for card in cards {
            article class="course-card" {
                @if let Some(ref image_url) = card.image_url {
                    img src=(image_url) alt=(card.title) class="course-card-image";
                }
                h3 {
                    (components::nav_link(&names::course_page_url(&card.public_id), html! { (card.title) }))
                }
                p {
                    small {
                        (card.category)
                        " · "
                        (t!("catalog.enrolled_count", locale = locale, count = card.enrollment_count))
                    }
                }
                (components::stars(card.rating_avg, card.rating_count))
                footer class="card-actions" {
                    (components::price_badge(&card.price_type, card.price_cents, locale))
                    @if signed_in {
                        (components::wishlist_toggle(&card.public_id, wishlisted.contains(&card.id), locale))
                    }
                }
            }
        }
    }
}

pub struct CoursePageData<'a> {
    pub course: &'a Course,
    pub card: &'a CourseCard,
    pub chapters: &'a [ChapterProgress],
    pub ratings: &'a [Rating],
    pub own_rating: Option<&'a (i32, String)>,
    pub enrolled: bool,
    pub signed_in: bool,
    pub in_wishlist: bool,
}

pub fn course_page(data: &CoursePageData, locale: &str) -> Markup {
    let course = data.course;
    html! {
        article {
            header {
                hgroup {
                    h1 { (course.title) }
                    p {
                        (course.category)
                        " · "
                        (components::price_badge(&course.price_type, course.price_cents, locale))
                    }
                }
                (components::stars(data.card.rating_avg, data.card.rating_count))
                p {
                    small {
                        (t!("catalog.enrolled_count", locale = locale, count = data.card.enrollment_count))
                    }
                }
            }
            @if let Some(ref image_url) = course.image_url {
                img src=(image_url) alt=(course.title) class="course-hero-image";
            }
            p { (course.description) }
            footer {
                @if data.enrolled {
                    a role="button" href=(names::learn_url(&course.public_id)) {
                        (t!("catalog.continue_learning", locale = locale))
                    }
                } @else if data.signed_in {
                    form hx-post=(names::enroll_url(&course.public_id))
                         hx-ext="json-enc"
                         hx-target="main"
                         hx-swap="innerHTML"
                         style="display: inline;" {
                        button type="submit" { (t!("catalog.enroll_btn", locale = locale)) }
                    }
                    " "
                    (components::wishlist_toggle(&course.public_id, data.in_wishlist, locale))
                } @else {
                    a role="button" href=(names::LOGIN_URL) {
                        (t!("catalog.login_to_enroll", locale = locale))
                    }
                }
            }
        }

        section {
            h2 { (t!("catalog.outline", locale = locale)) }
            @if data.chapters.is_empty() {
                p { (t!("catalog.outline_empty", locale = locale)) }
            } @else {
                ol {
                    @for chapter in data.chapters {
                        li {
                            (chapter.title)
                            " "
                            small {
                                (t!("catalog.lesson_count", locale = locale, count = chapter.lesson_count))
                                @if chapter.mcq_count > 0 {
                                    " · "
                                    (t!("catalog.mcq_count", locale = locale, count = chapter.mcq_count))
                                }
                            }
                        }
                    }
                }
            }
        }

        @if data.enrolled {
            (rate_form(&course.public_id, data.own_rating, locale))
        }

        section {
            h2 { (t!("catalog.reviews", locale = locale)) }
            @if data.ratings.is_empty() {
                p { (t!("catalog.no_reviews", locale = locale)) }
            } @else {
                @for rating in data.ratings {
                    article class="review" {
                        header {
                            strong { (rating.user_name) }
                            " "
                            span class="stars" {
                                @for _ in 0..rating.score { "★" }
                                @for _ in rating.score..5 { "☆" }
                            }
                            " "
                            small { (rating.created_date) }
                        }
                        @if !rating.review.is_empty() {
                            p { (rating.review) }
                        }
                    }
                }
            }
        }
    }
}

/// Score select plus review textarea. Prefilled when the user already rated,
/// since submitting again overwrites the previous rating.
pub fn rate_form(public_id: &str, own_rating: Option<&(i32, String)>, locale: &str) -> Markup {
    let (score, review) = match own_rating {
        Some((score, review)) => (*score, review.as_str()),
        None => (0, ""),
    };

    html! {
        section {
            h2 {
                @if own_rating.is_some() {
                    (t!("catalog.update_rating", locale = locale))
                } @else {
                    (t!("catalog.rate_course", locale = locale))
                }
            }
            article style="width: fit-content;" {
                form hx-post=(names::rate_course_url(public_id))
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    label {
                        (t!("catalog.score", locale = locale))
                        select name="score" required="true" {
                            @for value in names::MIN_RATING_SCORE..=names::MAX_RATING_SCORE {
                                option value=(value) selected[value == score] {
                                    (value) " ★"
                                }
                            }
                        }
                    }
                    label {
                        (t!("catalog.review", locale = locale))
                        textarea name="review"
                                 rows="3"
                                 placeholder=(t!("catalog.review_placeholder", locale = locale)) {
                            (review)
                        }
                    }
                    button type="submit" { (t!("catalog.submit_rating", locale = locale)) }
                }
            }
        }
    }
}

pub fn enrolled_confirmation(course: &Course, locale: &str) -> Markup {
    html! {
        article style="width: fit-content;" {
            h3 { (t!("catalog.enrolled_title", locale = locale)) }
            p { (t!("catalog.enrolled_desc", locale = locale, title = &course.title)) }
            a role="button" href=(names::learn_url(&course.public_id)) {
                (t!("catalog.start_learning", locale = locale))
            }
        }
    }
}
