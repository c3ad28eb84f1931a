use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{names, views};

/// Application-level errors returned by handlers and extractors.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    Unauthorized,
    Forbidden,
    NotFound,
    Input(&'static str),
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "You need to log in first."),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have access to this page.",
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "This page does not exist."),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = views::page(
            "Error",
            html! {
                article {
                    h2 { (code.as_u16()) }
                    p { (message) }
                    @if code == StatusCode::UNAUTHORIZED {
                        a href=(names::LOGIN_URL) { "Log in" }
                    } @else {
                        a href="/" { "Back to home" }
                    }
                }
            },
            names::DEFAULT_LOCALE,
        );

        (code, body).into_response()
    }
}

/// Adapters for turning eyre results into `AppError` responses while logging
/// the underlying error chain.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|err| {
            tracing::error!("{message}: {err:?}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|err| {
            tracing::error!("{message}: {err:?}");
            AppError::Input(message)
        })
    }
}
