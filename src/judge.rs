use color_eyre::eyre::bail;
use color_eyre::Result;
use serde::Serialize;

use crate::db::models::CodingQuestion;
use crate::models::JudgeVerdict;

#[derive(Serialize)]
struct JudgeRequest<'a> {
    language: &'a str,
    source_code: &'a str,
    test_cases: &'a serde_json::Value,
    time_limit_ms: i32,
    memory_limit_mb: i32,
}

/// Client for the external code judge. The judge's contract is not ours;
/// requests carry the question limits and responses are parsed leniently.
/// Without a configured URL, code submission is disabled.
#[derive(Clone)]
pub struct JudgeClient {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl JudgeClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    pub async fn submit(
        &self,
        question: &CodingQuestion,
        language: &str,
        source_code: &str,
    ) -> Result<JudgeVerdict> {
        let Some(base_url) = &self.base_url else {
            bail!("code judge is not configured");
        };

        let body = JudgeRequest {
            language,
            source_code,
            test_cases: &question.test_cases,
            time_limit_ms: question.time_limit_ms,
            memory_limit_mb: question.memory_limit_mb,
        };

        let resp = self
            .client
            .post(format!("{base_url}/submissions"))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("judge error: {status} - {text}");
            bail!("judge returned {status}");
        }

        let verdict: JudgeVerdict = resp.json().await?;
        tracing::info!(
            "judge verdict for question {}: passed={}",
            question.id,
            verdict.passed
        );
        Ok(verdict)
    }
}
