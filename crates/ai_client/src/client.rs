use std::time::Duration;

use serde::{Deserialize, Serialize};

/// System instruction sent with every prompt. The response schema pins the
/// model to the {result, steps, category} shape the caller expects.
const SYSTEM_INSTRUCTION: &str = "You are an advanced mathematical assistant. \
Your goal is to solve math problems provided in natural language or mathematical notation.\n\
Rules:\n\
1. Parse the user's input to understand the mathematical intent.\n\
2. Perform the calculation accurately.\n\
3. Provide the final numerical or algebraic result.\n\
4. Provide a list of concise steps explaining how you arrived at the solution.\n\
5. Categorize the problem (e.g., Arithmetic, Algebra, Calculus, Physics, Finance).\n\
6. If the input is not a math problem, set the result to \"Error\" and steps to \
[\"I can only help with math problems.\"].";

/// Structured solver response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathSolution {
    /// The final answer, or "Error" if the prompt was not a math problem
    pub result: String,
    /// Step-by-step explanation
    pub steps: Vec<String>,
    /// The branch of mathematics
    pub category: String,
}

impl MathSolution {
    /// The shape recorded when the bridge itself fails (network or parse).
    /// A failed call is terminal for that request; the user resubmits.
    pub fn failure() -> Self {
        Self {
            result: "Error".to_string(),
            steps: vec![
                "Failed to connect to AI service.".to_string(),
                "Please check your API key or try again.".to_string(),
            ],
            category: "System".to_string(),
        }
    }

    /// Steps concatenated into a single explanation string, the form the
    /// history recorder stores.
    pub fn explanation(&self) -> String {
        self.steps.join(" ")
    }
}

/// Error type for solver operations.
#[derive(Debug)]
pub enum AiError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Response did not match the expected shape
    Parse(String),
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::Network(msg) => write!(f, "Network error: {}", msg),
            AiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            AiError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AiError {}

/// Gemini `generateContent` client (blocking).
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl AiClient {
    pub fn new(api_base: &str, model: &str, api_key: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("tally/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Submit one natural-language prompt and wait for the structured
    /// solution. Exactly one request; no retry on failure.
    pub fn solve(&self, prompt: &str) -> Result<MathSolution, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        let body = serde_json::json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "result":   { "type": "STRING" },
                        "steps":    { "type": "ARRAY", "items": { "type": "STRING" } },
                        "category": { "type": "STRING" }
                    },
                    "required": ["result", "steps", "category"]
                }
            }
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Http(status, body));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| AiError::Parse(e.to_string()))?;

        // The structured answer rides inside the first candidate's text part.
        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AiError::Parse("Missing candidate text in response".to_string()))?;

        serde_json::from_str(text).map_err(|e| AiError::Parse(e.to_string()))
    }
}
