use maud::{html, Markup};
use rust_i18n::t;

use crate::{names, views::components};

pub enum RegisterState {
    NoError,
    EmailTaken,
    EmptyFields,
    WeakPassword,
}

pub fn register(state: RegisterState, locale: &str) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::EmailTaken => Some(t!("auth.email_taken", locale = locale)),
        RegisterState::EmptyFields => Some(t!("auth.empty_fields", locale = locale)),
        RegisterState::WeakPassword => Some(t!("auth.weak_password", locale = locale)),
    };

    html! {
        h1 { (t!("auth.register_title", locale = locale)) }
        p { (t!("auth.register_desc", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::REGISTER_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("auth.email", locale = locale))
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required="true"
                          placeholder=(t!("auth.email", locale = locale))
                          aria-label=(t!("auth.email", locale = locale));
                }
                label {
                    (t!("auth.display_name", locale = locale))
                    input name="display_name"
                          type="text"
                          autocomplete="name"
                          required="true"
                          placeholder=(t!("auth.display_name", locale = locale))
                          aria-label=(t!("auth.display_name", locale = locale));
                }
                label {
                    (t!("auth.password", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("auth.password", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("auth.password", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("auth.password", locale = locale))
                              aria-label=(t!("auth.password", locale = locale));
                    }
                }
                button type="submit" { (t!("auth.register_btn", locale = locale)) }
            }
            p {
                (t!("auth.already_have_account", locale = locale))
                " "
                a href=(names::LOGIN_URL) { (t!("auth.log_in", locale = locale)) }
            }
        }
    }
}

pub enum LoginState {
    NoError,
    IncorrectPassword,
    EmailNotVerified,
    AccountDisabled,
}

pub fn login(state: LoginState, locale: &str) -> Markup {
    let error_msg = match state {
        LoginState::NoError => None,
        LoginState::IncorrectPassword => Some(t!("auth.incorrect_password", locale = locale)),
        LoginState::EmailNotVerified => Some(t!("auth.email_not_verified", locale = locale)),
        LoginState::AccountDisabled => Some(t!("auth.account_disabled", locale = locale)),
    };

    html! {
        h1 { (t!("auth.welcome_back", locale = locale)) }
        p { (t!("auth.login_desc", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::LOGIN_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    (t!("auth.email", locale = locale))
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required="true"
                          placeholder=(t!("auth.email", locale = locale))
                          aria-label=(t!("auth.email", locale = locale));
                }
                label {
                    (t!("auth.password", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required="true"
                              placeholder=(t!("auth.password", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("auth.password", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required="true"
                              placeholder=(t!("auth.password", locale = locale))
                              aria-label=(t!("auth.password", locale = locale));
                    }
                }
                p style="margin-bottom: 0.5rem; font-size: 0.85rem;" {
                    (components::nav_link(
                        names::FORGOT_PASSWORD_URL,
                        html! { (t!("auth.forgot_password", locale = locale)) },
                    ))
                }
                button type="submit" { (t!("auth.log_in", locale = locale)) }
            }
            p {
                (t!("auth.no_account", locale = locale))
                " "
                (components::nav_link(
                    names::REGISTER_URL,
                    html! { (t!("auth.register_btn", locale = locale)) },
                ))
            }
        }
    }
}

pub fn check_email(email: &str, locale: &str) -> Markup {
    html! {
        h1 { (t!("auth.check_email_title", locale = locale)) }
        p { (t!("auth.check_email_desc", locale = locale)) }
        p { strong { (email) } }
        p { (t!("auth.check_email_hint", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::RESEND_VERIFICATION_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                input type="hidden" name="email" value=(email);
                button type="submit" class="outline" {
                    (t!("auth.resend_email", locale = locale))
                }
            }
            p {
                a href=(names::LOGIN_URL) { (t!("auth.back_to_login", locale = locale)) }
            }
        }
    }
}

pub fn email_verified(locale: &str) -> Markup {
    html! {
        h1 { (t!("auth.email_verified_title", locale = locale)) }
        p { (t!("auth.email_verified_desc", locale = locale)) }
        p {
            a href=(names::LOGIN_URL) { (t!("auth.log_in", locale = locale)) }
        }
    }
}

pub fn verification_failed(locale: &str) -> Markup {
    html! {
        h1 { (t!("auth.verification_failed_title", locale = locale)) }
        p { (t!("auth.verification_failed_desc", locale = locale)) }
        p {
            a href=(names::REGISTER_URL) { (t!("auth.register_btn", locale = locale)) }
        }
    }
}

pub enum ForgotPasswordState {
    NoError,
    EmailNotConfigured,
    EmailSent,
}

pub fn forgot_password(state: ForgotPasswordState, locale: &str) -> Markup {
    match state {
        ForgotPasswordState::NoError => html! {
            h1 { (t!("auth.forgot_password_title", locale = locale)) }
            p { (t!("auth.forgot_password_desc", locale = locale)) }
            article style="width: fit-content;" {
                form hx-post=(names::FORGOT_PASSWORD_URL)
                     hx-ext="json-enc"
                     hx-target="main"
                     hx-swap="innerHTML" {
                    label {
                        (t!("auth.email", locale = locale))
                        input name="email"
                              type="email"
                              autocomplete="email"
                              required="true"
                              placeholder=(t!("auth.email", locale = locale))
                              aria-label=(t!("auth.email", locale = locale));
                    }
                    button type="submit" { (t!("auth.forgot_password_btn", locale = locale)) }
                }
                p {
                    a href=(names::LOGIN_URL) { (t!("auth.back_to_login", locale = locale)) }
                }
            }
        },
        ForgotPasswordState::EmailNotConfigured => html! {
            h1 { (t!("auth.forgot_password_title", locale = locale)) }
            p { (t!("auth.forgot_password_not_configured", locale = locale)) }
            p {
                a href=(names::LOGIN_URL) { (t!("auth.back_to_login", locale = locale)) }
            }
        },
        ForgotPasswordState::EmailSent => html! {
            h1 { (t!("auth.forgot_password_title", locale = locale)) }
            p { (t!("auth.forgot_password_email_sent", locale = locale)) }
            p { (t!("auth.forgot_password_email_sent_hint", locale = locale)) }
            p {
                a href=(names::LOGIN_URL) { (t!("auth.back_to_login", locale = locale)) }
            }
        },
    }
}

pub enum ResetPasswordState {
    Form,
    InvalidToken,
    EmptyPassword,
    WeakPassword,
    Success,
}

pub fn reset_password(state: ResetPasswordState, token: &str, locale: &str) -> Markup {
    let error_msg = match state {
        ResetPasswordState::Form => None,
        ResetPasswordState::EmptyPassword => Some(t!("auth.empty_fields", locale = locale)),
        ResetPasswordState::WeakPassword => Some(t!("auth.weak_password", locale = locale)),
        ResetPasswordState::InvalidToken => {
            return html! {
                h1 { (t!("auth.reset_token_invalid_title", locale = locale)) }
                p { (t!("auth.reset_token_invalid_desc", locale = locale)) }
                p {
                    a href=(names::FORGOT_PASSWORD_URL) {
                        (t!("auth.forgot_password_btn", locale = locale))
                    }
                }
            }
        }
        ResetPasswordState::Success => {
            return html! {
                h1 { (t!("auth.reset_password_success_title", locale = locale)) }
                p { (t!("auth.reset_password_success_desc", locale = locale)) }
                p {
                    a href=(names::LOGIN_URL) { (t!("auth.log_in", locale = locale)) }
                }
            }
        }
    };

    html! {
        h1 { (t!("auth.reset_password_title", locale = locale)) }
        p { (t!("auth.reset_password_desc", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::RESET_PASSWORD_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML" {
                input type="hidden" name="token" value=(token);
                label {
                    (t!("auth.new_password", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("auth.new_password", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("auth.new_password", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("auth.new_password", locale = locale))
                              aria-label=(t!("auth.new_password", locale = locale));
                    }
                }
                button type="submit" { (t!("auth.reset_password_btn", locale = locale)) }
            }
        }
    }
}
