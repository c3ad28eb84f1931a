use axum::{
    extract::{Path, State},
    http::{header::CONTENT_DISPOSITION, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    services::wishlist::WishlistCache,
    views::{self, components},
    AppState,
};

use crate::views::wishlist as wishlist_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::WISHLIST_URL, get(wishlist_page))
        .route("/wishlist/add/{public_id}", post(add_post))
        .route("/wishlist/remove/{public_id}", post(remove_post))
        .route("/wishlist/move/{public_id}", post(move_post))
        .route(names::WISHLIST_CLEAR_URL, post(clear_post))
        .route(names::WISHLIST_EXPORT_URL, get(export_get))
        .route(names::WISHLIST_COUNT_URL, get(count_fragment))
}

/// Tells the nav badge (and anything else listening) to refresh itself.
fn wishlist_changed() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Trigger", HeaderValue::from_static("wishlist-changed"));
    headers
}

fn page_body(cache: &WishlistCache, locale: &str) -> maud::Markup {
    let stats = cache.stats();
    wishlist_views::wishlist_page(cache.items(), &stats, cache.error(), locale)
}

async fn wishlist_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;

    Ok(views::render(
        is_htmx,
        "Wishlist",
        page_body(&cache, &locale),
        &locale,
        Some(&user),
    ))
}

/// Responds with the flipped heart button; the cache handles rollback, so a
/// failed store call flips it right back.
async fn add_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<(HeaderMap, maud::Markup), AppError> {
    let course = state
        .db
        .find_course_by_public_id(&public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;
    let card = state
        .db
        .course_card(course.id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;
    cache.add(&card).await;

    let in_wishlist = cache.contains(course.id);
    Ok((
        wishlist_changed(),
        components::wishlist_toggle(&public_id, in_wishlist, &locale),
    ))
}

#[derive(Deserialize, Default)]
struct RemovePost {
    /// "wishlist" when the button sits on the wishlist page itself, which
    /// then needs the whole table re-rendered instead of a lone button.
    from: Option<String>,
}

async fn remove_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<RemovePost>,
) -> Result<(HeaderMap, maud::Markup), AppError> {
    let course = state
        .db
        .find_course_by_public_id(&public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;
    cache.remove(course.id).await;

    let markup = if body.from.as_deref() == Some("wishlist") {
        views::titled("Wishlist", page_body(&cache, &locale))
    } else {
        components::wishlist_toggle(&public_id, cache.contains(course.id), &locale)
    };
    Ok((wishlist_changed(), markup))
}

#[derive(Deserialize)]
struct MovePost {
    #[serde(deserialize_with = "super::deserialize_string_or_i32")]
    position: i32,
}

async fn move_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<MovePost>,
) -> Result<maud::Markup, AppError> {
    let course = state
        .db
        .find_course_by_public_id(&public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;
    cache.move_item(course.id, body.position).await;

    Ok(views::titled("Wishlist", page_body(&cache, &locale)))
}

async fn clear_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
) -> Result<(HeaderMap, maud::Markup), AppError> {
    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;
    cache.clear().await;

    Ok((
        wishlist_changed(),
        views::titled("Wishlist", page_body(&cache, &locale)),
    ))
}

async fn export_get(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut cache = WishlistCache::new(state.db.clone(), Some(user.id));
    cache.fetch(false).await;

    Ok((
        [(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"wishlist.json\""),
        )],
        Json(cache.export()),
    ))
}

async fn count_fragment(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> maud::Markup {
    let cache = WishlistCache::new(state.db.clone(), Some(user.id));
    wishlist_views::count_fragment(cache.count().await)
}
