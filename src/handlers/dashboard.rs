use axum::{extract::State, routing::get, Router};

use crate::{
    extractors::{AuthGuard, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    services::wishlist::WishlistCache,
    views, AppState,
};

use crate::views::dashboard as dashboard_views;

pub fn routes() -> Router<AppState> {
    Router::new().route(names::DASHBOARD_URL, get(dashboard_page))
}

async fn dashboard_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let courses = state
        .db
        .enrolled_courses(user.id)
        .await
        .reject("could not load enrollments")?;
    let certificates = state
        .db
        .certificates_for_user(user.id)
        .await
        .reject("could not load certificates")?;
    let wishlist_count = WishlistCache::new(state.db.clone(), Some(user.id))
        .count()
        .await;

    Ok(views::render(
        is_htmx,
        "My Learning",
        dashboard_views::dashboard(&courses, &certificates, wishlist_count, &locale),
        &locale,
        Some(&user),
    ))
}
