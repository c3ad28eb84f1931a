use axum::{
    extract::State,
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    extractors::{match_supported_locale, CurrentUser, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/register", get(register_page).post(register_post))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", post(logout_post))
        .route("/verify-email/{token}", get(verify_email))
        .route("/resend-verification", post(resend_verification))
        .route(
            "/forgot-password",
            get(forgot_password_page).post(forgot_password_post),
        )
        .route("/reset-password/{token}", get(reset_password_page))
        .route("/reset-password", post(reset_password_post))
        .route("/set-locale", post(set_locale))
}

/// Signed-in users land on their dashboard, everyone else on the catalog.
async fn homepage(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    let target = if user.is_some() {
        names::DASHBOARD_URL
    } else {
        names::CATALOG_URL
    };
    (
        StatusCode::SEE_OTHER,
        [(LOCATION, HeaderValue::from_static(target))],
        "",
    )
}

async fn register_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        "Register",
        homepage_views::register(homepage_views::RegisterState::NoError, &locale),
        &locale,
        None,
    )
}

async fn login_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        "Log In",
        homepage_views::login(homepage_views::LoginState::NoError, &locale),
        &locale,
        None,
    )
}

/// Session cookie plus a client-side redirect, so the browser leaves the
/// login/register page entirely instead of swapping a fragment.
fn signed_in_response(state: &AppState, session_token: &str) -> Result<HeaderMap, AppError> {
    let cookie = utils::cookie(
        names::USER_SESSION_COOKIE_NAME,
        session_token,
        state.secure_cookies,
    )
    .reject("could not build session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Redirect", HeaderValue::from_static("/"));
    Ok(headers)
}

#[derive(Deserialize)]
struct RegisterPost {
    email: String,
    display_name: String,
    password: String,
}

async fn register_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<RegisterPost>,
) -> Result<axum::response::Response, AppError> {
    use crate::services::auth::RegisterOutcome;

    let outcome = state
        .auth
        .register(&body.email, &body.password, &body.display_name)
        .await
        .reject("registration failed")?;

    let register_state = match outcome {
        RegisterOutcome::LoggedIn(session_token) => {
            return Ok((signed_in_response(&state, &session_token)?, "").into_response());
        }
        RegisterOutcome::VerificationSent(email)
        | RegisterOutcome::VerificationEmailFailed(email) => {
            return Ok(views::titled(
                "Check Your Email",
                homepage_views::check_email(&email, &locale),
            )
            .into_response());
        }
        RegisterOutcome::EmptyFields => homepage_views::RegisterState::EmptyFields,
        RegisterOutcome::EmailTaken => homepage_views::RegisterState::EmailTaken,
        RegisterOutcome::WeakPassword => homepage_views::RegisterState::WeakPassword,
    };

    Ok(views::titled("Register", homepage_views::register(register_state, &locale)).into_response())
}

#[derive(Deserialize)]
struct LoginPost {
    email: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<LoginPost>,
) -> Result<axum::response::Response, AppError> {
    use crate::services::auth::LoginOutcome;

    let outcome = state
        .auth
        .login(&body.email, &body.password)
        .await
        .reject("login failed")?;

    let login_state = match outcome {
        LoginOutcome::Success(session_token) => {
            return Ok((signed_in_response(&state, &session_token)?, "").into_response());
        }
        LoginOutcome::InvalidCredentials => homepage_views::LoginState::IncorrectPassword,
        LoginOutcome::EmailNotVerified => homepage_views::LoginState::EmailNotVerified,
        LoginOutcome::AccountDisabled => homepage_views::LoginState::AccountDisabled,
    };

    Ok(views::titled("Log In", homepage_views::login(login_state, &locale)).into_response())
}

async fn logout_post(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        let _ = state.auth.logout(&session_id).await;
    }

    let clear = utils::clear_cookie(names::USER_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear);
    headers.insert("HX-Redirect", HeaderValue::from_static(names::LOGIN_URL));

    Ok((headers, ""))
}

async fn verify_email(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    axum::extract::Path(token): axum::extract::Path<String>,
) -> Result<maud::Markup, AppError> {
    let verified = state
        .auth
        .verify_email(&token)
        .await
        .reject("could not verify email token")?;

    if verified {
        Ok(views::render(
            is_htmx,
            "Email Verified",
            homepage_views::email_verified(&locale),
            &locale,
            None,
        ))
    } else {
        Ok(views::render(
            is_htmx,
            "Verification Failed",
            homepage_views::verification_failed(&locale),
            &locale,
            None,
        ))
    }
}

#[derive(Deserialize)]
struct ResendVerificationPost {
    email: String,
}

async fn resend_verification(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<ResendVerificationPost>,
) -> Result<axum::response::Response, AppError> {
    if !state.auth.email_enabled() {
        return Err(AppError::Input("email verification not configured"));
    }

    state
        .auth
        .resend_verification(&body.email)
        .await
        .reject("could not resend verification")?;

    // Always show success (don't leak whether email exists)
    Ok(views::titled(
        "Check Your Email",
        homepage_views::check_email(&body.email, &locale),
    )
    .into_response())
}

async fn forgot_password_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        "Forgot Password",
        homepage_views::forgot_password(homepage_views::ForgotPasswordState::NoError, &locale),
        &locale,
        None,
    )
}

#[derive(Deserialize)]
struct ForgotPasswordPost {
    email: String,
}

async fn forgot_password_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<ForgotPasswordPost>,
) -> Result<axum::response::Response, AppError> {
    let sent = state
        .auth
        .forgot_password(&body.email)
        .await
        .reject("could not process password reset")?;

    let fp_state = if sent {
        homepage_views::ForgotPasswordState::EmailSent
    } else {
        homepage_views::ForgotPasswordState::EmailNotConfigured
    };

    Ok(views::titled(
        "Forgot Password",
        homepage_views::forgot_password(fp_state, &locale),
    )
    .into_response())
}

async fn reset_password_page(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    axum::extract::Path(token): axum::extract::Path<String>,
) -> Result<maud::Markup, AppError> {
    let valid = state
        .auth
        .validate_reset_token(&token)
        .await
        .reject("could not validate reset token")?;

    let rp_state = if valid {
        homepage_views::ResetPasswordState::Form
    } else {
        homepage_views::ResetPasswordState::InvalidToken
    };

    let token_str = if valid { &token } else { "" };

    Ok(views::render(
        is_htmx,
        "Reset Password",
        homepage_views::reset_password(rp_state, token_str, &locale),
        &locale,
        None,
    ))
}

#[derive(Deserialize)]
struct ResetPasswordPost {
    token: String,
    password: String,
}

async fn reset_password_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Json(body): Json<ResetPasswordPost>,
) -> Result<axum::response::Response, AppError> {
    use crate::services::auth::ResetPasswordOutcome;

    let outcome = state
        .auth
        .reset_password(&body.token, &body.password)
        .await
        .reject("could not reset password")?;

    let (rp_state, token_str) = match outcome {
        ResetPasswordOutcome::Success => (homepage_views::ResetPasswordState::Success, ""),
        ResetPasswordOutcome::EmptyPassword => (
            homepage_views::ResetPasswordState::EmptyPassword,
            body.token.as_str(),
        ),
        ResetPasswordOutcome::WeakPassword => (
            homepage_views::ResetPasswordState::WeakPassword,
            body.token.as_str(),
        ),
        ResetPasswordOutcome::InvalidToken => {
            (homepage_views::ResetPasswordState::InvalidToken, "")
        }
    };

    Ok(views::titled(
        "Reset Password",
        homepage_views::reset_password(rp_state, token_str, &locale),
    )
    .into_response())
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Json(body): Json<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = match_supported_locale(&body.locale).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
