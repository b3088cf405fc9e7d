use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a successful predict call. `confidence` is a percentage in
/// `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Prediction {
    pub predicted_digit: u8,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    image: &'a str,
}

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    image: &'a str,
    feedback: u8,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking client for the digit recognition service.
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("digit-sketchpad")
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/api/v1/predict` with a base64 PNG payload.
    pub fn predict(&self, image_b64: &str) -> Result<Prediction> {
        let body = serde_json::to_string(&PredictRequest { image: image_b64 })
            .context("serialize predict request")?;
        let resp = self
            .client
            .post(format!("{}/api/v1/predict", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .context("send predict request")?;

        let status = resp.status();
        let text = resp.text().context("read predict response")?;
        if !status.is_success() {
            bail!(error_message(status, &text));
        }
        serde_json::from_str(&text).context("parse prediction response")
    }

    /// `POST {base}/api/v1/record-feedback` pairing the submitted image with
    /// the human-supplied label.
    pub fn record_feedback(&self, image_b64: &str, label: u8) -> Result<()> {
        let body = serde_json::to_string(&FeedbackRequest {
            image: image_b64,
            feedback: label,
        })
        .context("serialize feedback request")?;
        let resp = self
            .client
            .post(format!("{}/api/v1/record-feedback", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .context("send feedback request")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            bail!(error_message(status, &text));
        }
        Ok(())
    }
}

/// Pull the server-provided `message` out of an error body, falling back to a
/// generic status string when the body is absent or not the expected shape.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            if !message.is_empty() {
                return message;
            }
        }
    }
    format!("prediction service returned http status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_server_text() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message":"bad image"}"#),
            "bad image"
        );
    }

    #[test]
    fn error_message_falls_back_on_garbage_bodies() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        for body in ["", "<html>oops</html>", r#"{"message":""}"#, r#"{"detail":"x"}"#] {
            assert_eq!(
                error_message(status, body),
                "prediction service returned http status 500 Internal Server Error"
            );
        }
    }

    #[test]
    fn request_bodies_match_wire_contract() {
        let predict = serde_json::to_value(PredictRequest { image: "abc" }).unwrap();
        assert_eq!(predict, serde_json::json!({ "image": "abc" }));

        let feedback = serde_json::to_value(FeedbackRequest {
            image: "abc",
            feedback: 7,
        })
        .unwrap();
        assert_eq!(feedback, serde_json::json!({ "image": "abc", "feedback": 7 }));
    }

    #[test]
    fn prediction_parses_wire_shape() {
        let parsed: Prediction =
            serde_json::from_str(r#"{"predicted_digit":7,"confidence":93.2}"#).unwrap();
        assert_eq!(parsed.predicted_digit, 7);
        assert!((parsed.confidence - 93.2).abs() < f32::EPSILON);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PredictionClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
