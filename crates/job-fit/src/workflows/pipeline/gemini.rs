use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::candidate::CandidateJob;
use super::keyring::{KeyFailure, KeyRing, RotationError};
use super::scorer::{FitScorer, ScorerError};
use super::templates::ResumeTemplates;
use super::PipelineError;
use crate::config::ScorerConfig;
use crate::workflows::category::ResumeCategory;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Fit scorer backed by the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiScorer {
    client: Client,
    model: String,
    keys: KeyRing,
    templates: ResumeTemplates,
}

impl GeminiScorer {
    pub fn new(
        model: impl Into<String>,
        keys: KeyRing,
        templates: ResumeTemplates,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            model: model.into(),
            keys,
            templates,
        })
    }

    pub fn from_config(
        config: &ScorerConfig,
        templates: ResumeTemplates,
    ) -> Result<Self, PipelineError> {
        Self::new(
            config.model.clone(),
            KeyRing::new(config.api_keys.clone()),
            templates,
        )
    }

    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }
}

impl FitScorer for GeminiScorer {
    fn score(&mut self, job: &CandidateJob) -> Result<String, ScorerError> {
        let prompt = build_prompt(&self.templates, job);
        let client = &self.client;
        let model = self.model.as_str();
        debug!(company = %job.company, position = %job.position, model, "requesting fit scores");

        self.keys
            .call(|key| generate(client, model, key, &prompt))
            .map_err(|err| match err {
                RotationError::Fatal(message) => ScorerError::Rejected(message),
                other => ScorerError::Unavailable(other.to_string()),
            })
    }
}

/// Prompt asking for the four fit scores of `job` against every resume variant.
pub fn build_prompt(templates: &ResumeTemplates, job: &CandidateJob) -> String {
    let mut prompt = String::from(
        "You are a technical recruiter. Score how well each resume below fits the job \
         posting, from 0 (no fit) to 100 (perfect fit).\n\
         Return only a JSON object with the integer keys ",
    );
    let keys: Vec<String> = ResumeCategory::ALL
        .iter()
        .map(|category| format!("\"{}\"", category.score_key()))
        .collect();
    prompt.push_str(&keys.join(", "));
    prompt.push_str(". Do not add commentary.\n");

    for category in ResumeCategory::ALL {
        prompt.push_str(&format!(
            "\n--- Resume: {} ---\n{}\n",
            category.label(),
            templates.text(category)
        ));
    }

    prompt.push_str(&format!(
        "\n--- Job: {} at {} ---\n{}\n",
        job.position, job.company, job.description
    ));
    prompt
}

fn generate(client: &Client, model: &str, key: &str, prompt: &str) -> Result<String, KeyFailure> {
    let body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
    });

    let response = client
        .post(format!("{API_BASE}/{model}:generateContent"))
        .header("x-goog-api-key", key)
        .json(&body)
        .send()
        .map_err(|err| KeyFailure::Transient(err.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|err| KeyFailure::Transient(err.to_string()))?;
    if !status.is_success() {
        return Err(classify_failure(status, &text));
    }

    extract_text(&text)
}

/// Map a failed Gemini response onto the key-rotation failure classes.
pub fn classify_failure(status: StatusCode, body: &str) -> KeyFailure {
    let message = format!("{status}: {}", body.trim());
    if status == StatusCode::TOO_MANY_REQUESTS
        || body.contains("RESOURCE_EXHAUSTED")
        || body.to_ascii_lowercase().contains("quota")
    {
        return KeyFailure::QuotaExhausted(message);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return KeyFailure::Unauthorized(message);
    }
    if status.is_server_error() {
        return KeyFailure::Transient(message);
    }
    KeyFailure::Fatal(message)
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn extract_text(body: &str) -> Result<String, KeyFailure> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| KeyFailure::Fatal(format!("unreadable response body: {err}")))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| KeyFailure::Fatal("response contained no text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> ResumeTemplates {
        ResumeTemplates::from_texts(
            ResumeCategory::ALL.map(|category| (category, format!("{} resume text", category.label()))),
        )
    }

    #[test]
    fn prompt_carries_every_template_and_the_job() {
        let job = CandidateJob::new("Contoso", "Cloud Support Engineer", "Support Azure tenants");
        let prompt = build_prompt(&templates(), &job);

        for category in ResumeCategory::ALL {
            assert!(prompt.contains(category.score_key()));
            assert!(prompt.contains(&format!("{} resume text", category.label())));
        }
        assert!(prompt.contains("Cloud Support Engineer at Contoso"));
        assert!(prompt.contains("Support Azure tenants"));
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"sde_fit\": 80}"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).expect("text"), r#"{"sde_fit": 80}"#);

        let empty = r#"{"candidates":[]}"#;
        assert!(matches!(extract_text(empty), Err(KeyFailure::Fatal(_))));
    }

    #[test]
    fn failures_are_classified_for_rotation() {
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            KeyFailure::QuotaExhausted(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#),
            KeyFailure::QuotaExhausted(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, "API key not valid"),
            KeyFailure::Unauthorized(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::SERVICE_UNAVAILABLE, "overloaded"),
            KeyFailure::Transient(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "invalid argument"),
            KeyFailure::Fatal(_)
        ));
    }

    #[test]
    fn scorer_without_keys_is_unavailable() {
        let mut scorer =
            GeminiScorer::new("gemini-2.5-flash", KeyRing::new(Vec::new()), templates())
                .expect("client builds");
        let job = CandidateJob::new("Acme", "Engineer", "Rust");
        assert!(matches!(
            scorer.score(&job),
            Err(ScorerError::Unavailable(_))
        ));
    }
}
