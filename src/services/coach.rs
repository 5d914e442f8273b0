// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Eco-Coach: AI-generated feedback on the day's footprint.
//!
//! Handles:
//! - Prompt construction from activities and emissions
//! - A single `generateContent` call with a structured-output schema
//! - Collapsing every failure into one user-facing "unavailable" error
//! - Refusing a second request while one is in flight
//!
//! No retry is attempted. Dropping the returned future (for example when
//! the HTTP client disconnects) aborts the outbound call and frees the
//! in-flight slot.

use crate::config::Config;
use crate::models::{Activities, AiFeedback, Emissions};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Rendered in the prompt for any field the user left empty.
const NOT_SPECIFIED: &str = "Not specified";

/// Errors surfaced by the coach. Details are logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachError {
    #[error("Please log some activities first to get feedback.")]
    NoData,

    #[error("The Eco-Coach is already working on your feedback.")]
    Busy,

    #[error("Your activities changed while the Eco-Coach was thinking. Please ask again.")]
    Stale,

    #[error("Sorry, the Eco-Coach is unavailable right now. Please try again later.")]
    Unavailable,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against `base_url` (e.g. `.../v1beta`).
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    /// Send one prompt with a response schema and return the raw text of
    /// the first candidate.
    pub async fn generate_json(&self, prompt: &str, schema: &Value) -> anyhow::Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini HTTP {}: {}", status, body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;

        parsed
            .text()
            .ok_or_else(|| anyhow::anyhow!("Gemini response had no candidate text"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Structured-output schema for [`AiFeedback`].
pub fn feedback_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A short, encouraging summary of the user's impact."
            },
            "impactArea": {
                "type": "OBJECT",
                "description": "The single biggest impact area and a brief explanation.",
                "properties": {
                    "name": {
                        "type": "STRING",
                        "description": "The name of the category (e.g., 'Transport', 'Food')."
                    },
                    "explanation": {
                        "type": "STRING",
                        "description": "A brief explanation of why it's the highest impact area."
                    }
                },
                "required": ["name", "explanation"]
            },
            "tips": {
                "type": "ARRAY",
                "description": "2-3 actionable and creative tips to reduce footprint in the specific impact area.",
                "minItems": 2,
                "maxItems": 3,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "tip": {
                            "type": "STRING",
                            "description": "A single, actionable tip."
                        }
                    },
                    "required": ["tip"]
                }
            },
            "motivation": {
                "type": "STRING",
                "description": "A short, motivational message to keep the user going."
            }
        },
        "required": ["summary", "impactArea", "tips", "motivation"]
    })
}

/// Build the natural-language prompt for a day.
pub fn build_prompt(activities: &Activities, emissions: &Emissions) -> String {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_SPECIFIED)
            .to_string()
    };
    let commute = match field(&activities.commute_distance) {
        d if d == NOT_SPECIFIED => d,
        d => format!("{} miles", d),
    };

    format!(
        "You are an encouraging and knowledgeable Eco-Coach. Analyze my daily carbon \
         footprint data and provide personalized feedback in a friendly, conversational tone.\n\
         Return the data in the specified JSON format.\n\
         \n\
         My total footprint today is {total:.1} kg CO2e.\n\
         Here's the breakdown:\n\
         - Transport: {transport:.1} kg\n\
         - Energy: {energy:.1} kg\n\
         - Food: {food:.1} kg\n\
         \n\
         My activities were:\n\
         - Transport Method: {method}\n\
         - Commute Distance: {commute}\n\
         - Flights this month: {flights}\n\
         - Home Type: {home}\n\
         - Heating: {heating}\n\
         - Electricity: {electricity}\n\
         - Diet: {diet}\n\
         - Meals: {meals}\n\
         - Food Waste: {waste}\n",
        total = emissions.total(),
        transport = emissions.transport,
        energy = emissions.energy,
        food = emissions.food,
        method = field(&activities.transport_method),
        commute = commute,
        flights = field(&activities.flights_month),
        home = field(&activities.home_type),
        heating = field(&activities.heating_type),
        electricity = field(&activities.electricity_source),
        diet = field(&activities.diet_type),
        meals = field(&activities.meal_ratio),
        waste = field(&activities.food_waste),
    )
}

/// Coach service with a single in-flight slot.
#[derive(Clone)]
pub struct CoachService {
    client: Option<GeminiClient>,
    in_flight: Arc<AtomicBool>,
}

impl CoachService {
    pub fn new(client: Option<GeminiClient>) -> Self {
        Self {
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build from configuration. Without an API key the coach stays
    /// unconfigured and every request reports it as unavailable.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = match &config.gemini_api_key {
            Some(key) => Some(GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
                Duration::from_secs(config.coach_timeout_secs),
            )?),
            None => {
                tracing::warn!("GEMINI_API_KEY not set, Eco-Coach disabled");
                None
            }
        };
        Ok(Self::new(client))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Ask the model for feedback on the day.
    ///
    /// Fails with [`CoachError::NoData`] before any network call when the
    /// total is zero.
    pub async fn request_feedback(
        &self,
        activities: &Activities,
        emissions: &Emissions,
    ) -> Result<AiFeedback, CoachError> {
        if emissions.is_empty() {
            return Err(CoachError::NoData);
        }

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(CoachError::Busy)?;

        let Some(client) = &self.client else {
            return Err(CoachError::Unavailable);
        };

        let prompt = build_prompt(activities, emissions);
        tracing::info!(total = emissions.total(), "Requesting Eco-Coach feedback");

        let text = client
            .generate_json(&prompt, &feedback_schema())
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Eco-Coach request failed");
                CoachError::Unavailable
            })?;

        serde_json::from_str(text.trim()).map_err(|e| {
            tracing::error!(error = %e, "Eco-Coach returned unparseable feedback");
            CoachError::Unavailable
        })
    }
}

/// Holds the in-flight flag until dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_emissions() -> Emissions {
        Emissions {
            transport: 7.56,
            energy: 30.0,
            food: 5.6,
        }
    }

    #[test]
    fn test_prompt_renders_missing_fields() {
        let prompt = build_prompt(&Activities::default(), &some_emissions());

        assert!(prompt.contains("My total footprint today is 43.2 kg CO2e."));
        assert!(prompt.contains("- Transport: 7.6 kg"));
        assert!(prompt.contains("- Energy: 30.0 kg"));
        assert!(prompt.contains("- Food: 5.6 kg"));
        assert!(prompt.contains("- Transport Method: Not specified"));
        assert!(prompt.contains("- Commute Distance: Not specified"));
        assert!(prompt.contains("- Flights this month: Not specified"));
        assert!(prompt.contains("- Food Waste: Not specified"));
    }

    #[test]
    fn test_prompt_renders_given_fields() {
        let activities = Activities {
            transport_method: Some("car_electric".to_string()),
            commute_distance: Some("20".to_string()),
            diet_type: Some("vegan".to_string()),
            ..Default::default()
        };
        let prompt = build_prompt(&activities, &some_emissions());

        assert!(prompt.contains("- Transport Method: car_electric"));
        assert!(prompt.contains("- Commute Distance: 20 miles"));
        assert!(prompt.contains("- Diet: vegan"));
        assert!(prompt.contains("- Heating: Not specified"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = feedback_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(required, ["summary", "impactArea", "tips", "motivation"]);
        assert_eq!(schema["properties"]["tips"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["tips"]["minItems"], 2);
        assert_eq!(schema["properties"]["tips"]["maxItems"], 3);
    }

    #[test]
    fn test_candidate_text_extraction() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn test_in_flight_guard_is_exclusive() {
        let flag = AtomicBool::new(false);

        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn test_no_data_checked_first() {
        let coach = CoachService::new(None);
        let result = coach
            .request_feedback(&Activities::default(), &Emissions::default())
            .await;

        assert_eq!(result, Err(CoachError::NoData));
    }

    #[tokio::test]
    async fn test_unconfigured_coach_is_unavailable() {
        let coach = CoachService::new(None);
        assert!(!coach.is_configured());

        let result = coach
            .request_feedback(&Activities::default(), &some_emissions())
            .await;

        assert_eq!(result, Err(CoachError::Unavailable));
        assert!(!coach.is_busy());
    }
}
