use axum::{
    extract::{Path, State},
    routing::get,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::AuthUser,
    extractors::{AuthGuard, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    services::campaign::SendOutcome,
    views, AppState,
};

use crate::views::campaigns as campaign_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CAMPAIGNS_URL, get(campaigns_page))
        .route(
            names::CREATE_CAMPAIGN_URL,
            get(create_campaign_page).post(create_campaign_post),
        )
        .route("/admin/campaigns/{campaign_id}/send", post(send_campaign_post))
        .route(
            "/admin/campaigns/{campaign_id}/delete",
            post(delete_campaign_post),
        )
}

fn require_author(user: &AuthUser) -> Result<(), AppError> {
    if !user.can_author() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn compose_list(state: &AppState, locale: &str) -> Result<maud::Markup, AppError> {
    let campaigns = state
        .db
        .campaigns()
        .await
        .reject("could not load campaigns")?;
    Ok(campaign_views::campaigns_page(
        &campaigns,
        state.campaigns.email_enabled(),
        locale,
    ))
}

async fn campaigns_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let body = compose_list(&state, &locale).await?;
    Ok(views::render(is_htmx, "Campaigns", body, &locale, Some(&user)))
}

async fn create_campaign_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;
    let courses = state
        .db
        .studio_courses()
        .await
        .reject("could not load courses")?;
    Ok(views::render(
        is_htmx,
        "New Campaign",
        campaign_views::create_campaign_page(
            &courses,
            campaign_views::CreateCampaignState::NoError,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize)]
struct CreateCampaignPost {
    subject: String,
    body_html: String,
    audience: String,
}

async fn create_campaign_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<CreateCampaignPost>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    if body.subject.trim().is_empty() || body.body_html.trim().is_empty() {
        let courses = state
            .db
            .studio_courses()
            .await
            .reject("could not load courses")?;
        return Ok(views::titled(
            "New Campaign",
            campaign_views::create_campaign_page(
                &courses,
                campaign_views::CreateCampaignState::EmptyFields,
                &locale,
            ),
        ));
    }

    if let Some(public_id) = body.audience.strip_prefix(names::AUDIENCE_COURSE_PREFIX) {
        state
            .db
            .find_course_by_public_id(public_id)
            .await
            .reject("could not check audience")?
            .ok_or(AppError::Input("unknown audience"))?;
    } else if body.audience != names::AUDIENCE_ALL {
        return Err(AppError::Input("unknown audience"));
    }

    state
        .db
        .create_campaign(body.subject.trim(), &body.body_html, &body.audience, user.id)
        .await
        .reject("could not create campaign")?;

    let body = compose_list(&state, &locale).await?;
    Ok(views::titled("Campaigns", body))
}

async fn send_campaign_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(campaign_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    let outcome = state
        .campaigns
        .send(campaign_id)
        .await
        .reject("could not send campaign")?;
    match outcome {
        SendOutcome::EmailDisabled => {
            return Err(AppError::Input("email sending is not configured"));
        }
        SendOutcome::NotDraft => {
            return Err(AppError::Input("only draft campaigns can be sent"));
        }
        SendOutcome::Sent { sent, failed } => {
            tracing::info!("campaign {campaign_id} sent by user {}: {sent} ok, {failed} failed", user.id);
        }
    }

    let body = compose_list(&state, &locale).await?;
    Ok(views::titled("Campaigns", body))
}

async fn delete_campaign_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(campaign_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    require_author(&user)?;

    let deleted = state
        .db
        .delete_draft_campaign(campaign_id)
        .await
        .reject("could not delete campaign")?;
    if !deleted {
        return Err(AppError::Input("only draft campaigns can be deleted"));
    }

    let body = compose_list(&state, &locale).await?;
    Ok(views::titled("Campaigns", body))
}
