use anyhow::{Result, anyhow};
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::kernel::intent::IntentResult;
use crate::kernel::value::{Fields, TypedValue};
use super::session::SessionId;

const DEFAULT_BASE_URL: &str = "https://dialogflow.googleapis.com";
/// Supported rates for encoded utterances: 8000, 12000, 16000, 24000, 48000.
const DEFAULT_SAMPLE_RATE: u32 = 48_000;
const TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct NluConfig {
    pub base_url: String,
    pub project_id: String,
    pub language_code: String,
}

impl NluConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("NLU_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            project_id: std::env::var("NLU_PROJECT_ID")
                .unwrap_or_else(|_| "voxplay".to_string()),
            language_code: std::env::var("NLU_LANGUAGE")
                .unwrap_or_else(|_| "en-US".to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest {
    query_input: QueryInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_audio: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_config: Option<AudioConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextInput>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput {
    text: String,
    language_code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    intent: Option<MatchedIntent>,
    #[serde(default)]
    parameters: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedIntent {
    display_name: String,
}

/// Client for the external intent-detection oracle. The oracle is opaque:
/// audio or text goes in, a structured intent result comes out, and
/// failures stay on this side of the kernel boundary.
pub struct NluService {
    client: Client,
    config: NluConfig,
}

impl NluService {
    pub fn new(config: NluConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Send one completed utterance: the encoded blob plus its capture
    /// rate. Different recorders produce different containers, so the
    /// encoding is left unspecified for the oracle to sniff.
    pub async fn detect_audio_intent(
        &self,
        session: &SessionId,
        audio: &[u8],
        sample_rate: Option<u32>,
    ) -> Result<Option<IntentResult>> {
        let request = DetectIntentRequest {
            query_input: QueryInput {
                audio_config: Some(AudioConfig {
                    audio_encoding: "AUDIO_ENCODING_UNSPECIFIED",
                    sample_rate_hertz: sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
                    language_code: self.config.language_code.clone(),
                }),
                text: None,
            },
            input_audio: Some(base64::engine::general_purpose::STANDARD.encode(audio)),
        };

        self.detect(session, request).await
    }

    /// Text path, used by the console driver.
    pub async fn detect_text_intent(
        &self,
        session: &SessionId,
        text: &str,
    ) -> Result<Option<IntentResult>> {
        let request = DetectIntentRequest {
            query_input: QueryInput {
                audio_config: None,
                text: Some(TextInput {
                    text: text.to_string(),
                    language_code: self.config.language_code.clone(),
                }),
            },
            input_audio: None,
        };

        self.detect(session, request).await
    }

    async fn detect(
        &self,
        session: &SessionId,
        request: DetectIntentRequest,
    ) -> Result<Option<IntentResult>> {
        let url = format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.config.base_url, self.config.project_id, session
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("NLU server error: {}", response.status()));
        }

        let body: DetectIntentResponse = response.json().await?;

        Ok(body.query_result.and_then(Self::into_intent_result))
    }

    /// Flatten the oracle's query result into the kernel's shape. A turn
    /// with no matched intent yields None and is ignored by the caller.
    fn into_intent_result(result: QueryResult) -> Option<IntentResult> {
        let intent = result.intent?;

        let mut parameters = Fields::new();
        for (name, value) in &result.parameters {
            parameters.insert(name, TypedValue::from_wire(value));
        }

        Some(IntentResult::new(intent.display_name, parameters))
    }
}
