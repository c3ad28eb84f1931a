use color_eyre::Result;

use crate::db::models::Campaign;
use crate::db::Db;
use crate::email::ResendEmailSender;
use crate::names;

// ---------------------------------------------------------------------------
// CampaignStore trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait CampaignStore: Send + Sync {
    fn claim_campaign_for_sending(
        &self,
        campaign_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Campaign>>> + Send;

    fn all_recipient_emails(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    fn enrolled_recipient_emails(
        &self,
        course_public_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    fn record_campaign_recipient(
        &self,
        campaign_id: i32,
        email: &str,
        status: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn finish_campaign(
        &self,
        campaign_id: i32,
        sent_count: i32,
        failed_count: i32,
        status: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl CampaignStore for Db {
    async fn claim_campaign_for_sending(&self, campaign_id: i32) -> Result<Option<Campaign>> {
        Db::claim_campaign_for_sending(self, campaign_id).await
    }

    async fn all_recipient_emails(&self) -> Result<Vec<String>> {
        Db::all_recipient_emails(self).await
    }

    async fn enrolled_recipient_emails(&self, course_public_id: &str) -> Result<Vec<String>> {
        Db::enrolled_recipient_emails(self, course_public_id).await
    }

    async fn record_campaign_recipient(
        &self,
        campaign_id: i32,
        email: &str,
        status: &str,
    ) -> Result<()> {
        Db::record_campaign_recipient(self, campaign_id, email, status).await
    }

    async fn finish_campaign(
        &self,
        campaign_id: i32,
        sent_count: i32,
        failed_count: i32,
        status: &str,
    ) -> Result<()> {
        Db::finish_campaign(self, campaign_id, sent_count, failed_count, status).await
    }
}

// ---------------------------------------------------------------------------
// CampaignSender trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait CampaignSender: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn send_campaign_email(
        &self,
        to_email: &str,
        subject: &str,
        body_html: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl CampaignSender for ResendEmailSender {
    fn is_enabled(&self) -> bool {
        ResendEmailSender::is_enabled(self)
    }

    async fn send_campaign_email(
        &self,
        to_email: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<()> {
        ResendEmailSender::send_campaign_email(self, to_email, subject, body_html).await
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

pub enum SendOutcome {
    /// Campaign went out; one recipient row was recorded per address.
    Sent { sent: i32, failed: i32 },
    /// Campaign is missing or already past the draft state.
    NotDraft,
    /// No email API key configured; nothing was attempted.
    EmailDisabled,
}

// ---------------------------------------------------------------------------
// CampaignService
// ---------------------------------------------------------------------------

pub struct CampaignService<S: CampaignStore = Db, E: CampaignSender = ResendEmailSender> {
    store: S,
    email: E,
}

impl<S: CampaignStore + Clone, E: CampaignSender + Clone> Clone for CampaignService<S, E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            email: self.email.clone(),
        }
    }
}

impl<S: CampaignStore, E: CampaignSender> CampaignService<S, E> {
    pub fn new(store: S, email: E) -> Self {
        Self { store, email }
    }

    pub fn email_enabled(&self) -> bool {
        self.email.is_enabled()
    }

    /// Send a draft campaign to its audience, one recipient at a time.
    /// Individual failures are recorded and do not stop the run; the
    /// campaign only ends up `sent` when every delivery succeeded.
    pub async fn send(&self, campaign_id: i32) -> Result<SendOutcome> {
        if !self.email.is_enabled() {
            return Ok(SendOutcome::EmailDisabled);
        }

        let Some(campaign) = self.store.claim_campaign_for_sending(campaign_id).await? else {
            return Ok(SendOutcome::NotDraft);
        };

        let recipients = self.recipients_for(&campaign.audience).await?;

        let mut sent = 0;
        let mut failed = 0;
        for email in &recipients {
            match self
                .email
                .send_campaign_email(email, &campaign.subject, &campaign.body_html)
                .await
            {
                Ok(()) => {
                    sent += 1;
                    self.store
                        .record_campaign_recipient(campaign_id, email, "sent")
                        .await?;
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("campaign {campaign_id}: sending to {email} failed: {e}");
                    self.store
                        .record_campaign_recipient(campaign_id, email, "failed")
                        .await?;
                }
            }
        }

        let status = if failed == 0 { "sent" } else { "failed" };
        self.store
            .finish_campaign(campaign_id, sent, failed, status)
            .await?;

        Ok(SendOutcome::Sent { sent, failed })
    }

    async fn recipients_for(&self, audience: &str) -> Result<Vec<String>> {
        if let Some(public_id) = audience.strip_prefix(names::AUDIENCE_COURSE_PREFIX) {
            self.store.enrolled_recipient_emails(public_id).await
        } else {
            self.store.all_recipient_emails().await
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;

    fn campaign(audience: &'static str) -> Campaign {
        Campaign {
            id: 5,
            subject: "New chapters".to_string(),
            body_html: "<p>Fresh content is up.</p>".to_string(),
            audience: audience.to_string(),
            status: "sending".to_string(),
            sent_count: 0,
            failed_count: 0,
            created_date: "2026-03-01".to_string(),
            sent_date: None,
        }
    }

    fn sender_enabled() -> MockCampaignSender {
        let mut mock = MockCampaignSender::new();
        mock.expect_is_enabled().returning(|| true);
        mock
    }

    #[tokio::test]
    async fn send_without_email_config_is_refused() {
        let mut email = MockCampaignSender::new();
        email.expect_is_enabled().returning(|| false);

        let svc = CampaignService::new(MockCampaignStore::new(), email);
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::EmailDisabled));
    }

    #[tokio::test]
    async fn send_non_draft_campaign_is_refused() {
        let mut store = MockCampaignStore::new();
        store
            .expect_claim_campaign_for_sending()
            .returning(|_| Box::pin(async { Ok(None) }));

        let svc = CampaignService::new(store, sender_enabled());
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::NotDraft));
    }

    #[tokio::test]
    async fn send_to_all_records_every_recipient() {
        let mut store = MockCampaignStore::new();
        store
            .expect_claim_campaign_for_sending()
            .returning(|_| Box::pin(async { Ok(Some(campaign("all"))) }));
        store
            .expect_all_recipient_emails()
            .returning(|| {
                Box::pin(async { Ok(vec!["a@example.com".to_string(), "b@example.com".to_string()]) })
            });
        store
            .expect_record_campaign_recipient()
            .withf(|_, _, status| status == "sent")
            .times(2)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        store
            .expect_finish_campaign()
            .withf(|_, sent, failed, status| *sent == 2 && *failed == 0 && status == "sent")
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(()) }));

        let mut email = sender_enabled();
        email
            .expect_send_campaign_email()
            .times(2)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let svc = CampaignService::new(store, email);
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Sent { sent: 2, failed: 0 }));
    }

    #[tokio::test]
    async fn send_partial_failures_mark_campaign_failed() {
        let mut store = MockCampaignStore::new();
        store
            .expect_claim_campaign_for_sending()
            .returning(|_| Box::pin(async { Ok(Some(campaign("all"))) }));
        store
            .expect_all_recipient_emails()
            .returning(|| {
                Box::pin(async { Ok(vec!["a@example.com".to_string(), "b@example.com".to_string()]) })
            });
        store
            .expect_record_campaign_recipient()
            .times(2)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        store
            .expect_finish_campaign()
            .withf(|_, sent, failed, status| *sent == 1 && *failed == 1 && status == "failed")
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(()) }));

        let mut email = sender_enabled();
        email
            .expect_send_campaign_email()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        email
            .expect_send_campaign_email()
            .times(1)
            .returning(|_, _, _| Box::pin(async { Err(eyre!("bounced")) }));

        let svc = CampaignService::new(store, email);
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Sent { sent: 1, failed: 1 }));
    }

    #[tokio::test]
    async fn send_with_zero_deliveries_marks_campaign_failed() {
        let mut store = MockCampaignStore::new();
        store
            .expect_claim_campaign_for_sending()
            .returning(|_| Box::pin(async { Ok(Some(campaign("all"))) }));
        store
            .expect_all_recipient_emails()
            .returning(|| Box::pin(async { Ok(vec!["a@example.com".to_string()]) }));
        store
            .expect_record_campaign_recipient()
            .withf(|_, _, status| status == "failed")
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        store
            .expect_finish_campaign()
            .withf(|_, sent, failed, status| *sent == 0 && *failed == 1 && status == "failed")
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(()) }));

        let mut email = sender_enabled();
        email
            .expect_send_campaign_email()
            .returning(|_, _, _| Box::pin(async { Err(eyre!("bounced")) }));

        let svc = CampaignService::new(store, email);
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Sent { sent: 0, failed: 1 }));
    }

    #[tokio::test]
    async fn course_audience_targets_enrolled_users() {
        let mut store = MockCampaignStore::new();
        store
            .expect_claim_campaign_for_sending()
            .returning(|_| Box::pin(async { Ok(Some(campaign("course:01ARZ3NDEKTSV"))) }));
        store
            .expect_enrolled_recipient_emails()
            .withf(|public_id| public_id == "01ARZ3NDEKTSV")
            .times(1)
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));
        store
            .expect_finish_campaign()
            .withf(|_, sent, failed, status| *sent == 0 && *failed == 0 && status == "sent")
            .returning(|_, _, _, _| Box::pin(async { Ok(()) }));

        let svc = CampaignService::new(store, sender_enabled());
        let outcome = svc.send(5).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Sent { sent: 0, failed: 0 }));
    }
}
