use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::AuthUser,
    db::CatalogFilter,
    extractors::{AuthGuard, CurrentUser, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    services::wishlist::WishlistCache,
    views, AppState,
};

use crate::views::catalog as catalog_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CATALOG_URL, get(catalog_page))
        .route("/course/{public_id}", get(course_page))
        .route("/course/{public_id}/enroll", post(enroll_post))
        .route("/course/{public_id}/rate", post(rate_post))
}

#[derive(Deserialize, Default)]
struct CatalogQuery {
    category: Option<String>,
    price: Option<String>,
    q: Option<String>,
    page: Option<i64>,
}

async fn catalog_page(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<CatalogQuery>,
) -> Result<maud::Markup, AppError> {
    let filter = CatalogFilter {
        category: query.category.unwrap_or_default(),
        price_type: query.price.unwrap_or_default(),
        search: query.q.unwrap_or_default(),
        page: query.page.unwrap_or(0).max(0),
    };

    let cards = state
        .db
        .catalog(&filter)
        .await
        .reject("could not load catalog")?;
    let total = state
        .db
        .catalog_count(&filter)
        .await
        .reject("could not count catalog")?;
    let categories = state
        .db
        .catalog_categories()
        .await
        .reject("could not load categories")?;

    let mut cache = WishlistCache::new(state.db.clone(), user.as_ref().map(|u| u.id));
    cache.fetch(false).await;
    let wishlisted: Vec<i32> = cache.items().iter().map(|item| item.course_id).collect();

    Ok(views::render(
        is_htmx,
        "Courses",
        catalog_views::catalog(
            &cards,
            &categories,
            &filter,
            total,
            &wishlisted,
            user.is_some(),
            &locale,
        ),
        &locale,
        user.as_ref(),
    ))
}

/// Non-active courses stay reachable for their creator and staff only.
fn can_view(course_status: &str, course_creator: i32, user: Option<&AuthUser>) -> bool {
    if course_status == "active" {
        return true;
    }
    user.is_some_and(|u| u.id == course_creator || u.is_staff())
}

async fn compose_course_page(
    state: &AppState,
    user: Option<&AuthUser>,
    public_id: &str,
    locale: &str,
) -> Result<maud::Markup, AppError> {
    let course = state
        .db
        .find_course_by_public_id(public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    if !can_view(&course.status, course.created_by, user) {
        return Err(AppError::NotFound);
    }

    let card = state
        .db
        .course_card(course.id)
        .await
        .reject("could not load course card")?
        .ok_or(AppError::NotFound)?;

    // user_id 0 matches no progress rows, so anonymous viewers see the
    // outline with everything incomplete.
    let viewer_id = user.map(|u| u.id).unwrap_or(0);
    let chapters = state
        .db
        .chapters_with_progress(course.id, viewer_id)
        .await
        .reject("could not load chapters")?;

    let ratings = state
        .db
        .visible_ratings(course.id)
        .await
        .reject("could not load ratings")?;

    let (enrolled, own_rating, in_wishlist) = match user {
        Some(user) => {
            let enrolled = state
                .db
                .is_enrolled(user.id, course.id)
                .await
                .reject("could not check enrollment")?;
            let own_rating = state
                .db
                .user_rating(user.id, course.id)
                .await
                .reject("could not load rating")?;
            let cache = WishlistCache::new(state.db.clone(), Some(user.id));
            let in_wishlist = cache.check_status(course.id).await;
            (enrolled, own_rating, in_wishlist)
        }
        None => (false, None, false),
    };

    let data = catalog_views::CoursePageData {
        course: &course,
        card: &card,
        chapters: &chapters,
        ratings: &ratings,
        own_rating: own_rating.as_ref(),
        enrolled,
        signed_in: user.is_some(),
        in_wishlist,
    };

    Ok(catalog_views::course_page(&data, locale))
}

async fn course_page(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
) -> Result<maud::Markup, AppError> {
    let body = compose_course_page(&state, user.as_ref(), &public_id, &locale).await?;
    Ok(views::render(
        is_htmx,
        "Course",
        body,
        &locale,
        user.as_ref(),
    ))
}

#[derive(Deserialize, Default)]
struct EnrollPost {
    batch: Option<String>,
}

async fn enroll_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<EnrollPost>,
) -> Result<maud::Markup, AppError> {
    let course = state
        .db
        .find_course_by_public_id(&public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    if course.status != "active" {
        return Err(AppError::Input("course is not open for enrollment"));
    }

    // Re-enrolling is a no-op, so the confirmation is safe to show either way.
    state
        .db
        .enroll(user.id, course.id, body.batch.as_deref())
        .await
        .reject("could not enroll")?;

    Ok(views::titled(
        "Enrolled",
        catalog_views::enrolled_confirmation(&course, &locale),
    ))
}

#[derive(Deserialize)]
struct RatePost {
    #[serde(deserialize_with = "super::deserialize_string_or_i32")]
    score: i32,
    #[serde(default)]
    review: String,
}

async fn rate_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(public_id): Path<String>,
    Json(body): Json<RatePost>,
) -> Result<maud::Markup, AppError> {
    let course = state
        .db
        .find_course_by_public_id(&public_id)
        .await
        .reject("could not load course")?
        .ok_or(AppError::NotFound)?;

    let enrolled = state
        .db
        .is_enrolled(user.id, course.id)
        .await
        .reject("could not check enrollment")?;
    if !enrolled {
        return Err(AppError::Forbidden);
    }

    if !(names::MIN_RATING_SCORE..=names::MAX_RATING_SCORE).contains(&body.score) {
        return Err(AppError::Input("score must be between 1 and 5"));
    }

    state
        .db
        .rate_course(user.id, course.id, body.score, body.review.trim())
        .await
        .reject("could not save rating")?;

    let page = compose_course_page(&state, Some(&user), &public_id, &locale).await?;
    Ok(views::titled("Course", page))
}
