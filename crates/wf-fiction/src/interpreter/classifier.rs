//! Remote zero-shot intent classification.
//!
//! The last interpreter stage may ask an external model which of the
//! current choices the player meant. The model is optional; any failure
//! simply means the input is passed through unexpanded.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;

/// The best label for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// One of the candidate labels.
    pub label: String,
    /// Model confidence, 0-1.
    pub score: f64,
}

/// Something that can pick the most likely label for free text.
pub trait IntentClassifier: Send + Sync {
    /// Rank `labels` against `text` and return the best one.
    fn classify(&self, text: &str, labels: &[String]) -> Result<Classification, ClassifierError>;
}

/// Client for a Hugging Face style zero-shot classification endpoint.
#[derive(Debug, Clone)]
pub struct ZeroShotClassifier {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl ZeroShotClassifier {
    /// Build a client with the configured timeout.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked { labels: Vec<String>, scores: Vec<f64> },
    Pairs(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ZeroShotResponse {
    fn best(self) -> Option<Classification> {
        match self {
            Self::Ranked { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| Classification { label, score })
                .max_by(|a, b| a.score.total_cmp(&b.score)),
            Self::Pairs(pairs) => pairs
                .into_iter()
                .map(|p| Classification {
                    label: p.label,
                    score: p.score,
                })
                .max_by(|a, b| a.score.total_cmp(&b.score)),
        }
    }
}

impl IntentClassifier for ZeroShotClassifier {
    fn classify(&self, text: &str, labels: &[String]) -> Result<Classification, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::Unavailable("no candidate labels".into()));
        }
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
        };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(ClassifierError::Request(format!("{status}: {text}")));
        }
        let parsed: ZeroShotResponse = response.json()?;
        parse_best(parsed)
    }
}

fn parse_best(response: ZeroShotResponse) -> Result<Classification, ClassifierError> {
    response
        .best()
        .ok_or_else(|| ClassifierError::InvalidResponse("no labels returned".into()))
}
