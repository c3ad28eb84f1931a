use color_eyre::eyre::bail;
use color_eyre::Result;
use serde::Serialize;

const FROM: &str = "CourseCraft <noreply@coursecraft.app>";
const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Sends transactional and campaign email via the Resend API. Without an
/// API key the sender is disabled and the app runs in dev mode.
#[derive(Clone)]
pub struct ResendEmailSender {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ResendEmailSender {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, to_email: &str, subject: &str, html: String) -> Result<()> {
        let Some(api_key) = &self.api_key else {
            bail!("email sending is not configured");
        };

        let body = SendEmailRequest {
            from: FROM.to_string(),
            to: vec![to_email.to_string()],
            subject: subject.to_string(),
            html,
        };

        let resp = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("Resend API error: {status} - {text}");
            bail!("Resend API returned {status}");
        }

        Ok(())
    }

    pub async fn send_verification_email(
        &self,
        to_email: &str,
        verification_url: &str,
    ) -> Result<()> {
        self.send(
            to_email,
            "Verify your CourseCraft account",
            format!(
                r#"<h2>Welcome to CourseCraft!</h2>
<p>Click the link below to verify your email address:</p>
<p><a href="{verification_url}">{verification_url}</a></p>
<p>This link expires in 24 hours.</p>"#
            ),
        )
        .await?;

        tracing::info!("verification email sent to {to_email}");
        Ok(())
    }

    pub async fn send_password_reset_email(&self, to_email: &str, reset_url: &str) -> Result<()> {
        self.send(
            to_email,
            "Reset your CourseCraft password",
            format!(
                r#"<h2>Password Reset</h2>
<p>Click the link below to reset your password:</p>
<p><a href="{reset_url}">{reset_url}</a></p>
<p>This link expires in 1 hour.</p>
<p>If you did not request this, you can safely ignore this email.</p>"#
            ),
        )
        .await?;

        tracing::info!("password reset email sent to {to_email}");
        Ok(())
    }

    /// Campaign bodies are instructor-authored HTML, sent as-is.
    pub async fn send_campaign_email(
        &self,
        to_email: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<()> {
        self.send(to_email, subject, body_html.to_string()).await
    }
}
