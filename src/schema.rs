// src/schema.rs
// Wire types for the /triage endpoint and their validation rules

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TriageError;

/// Minimum trimmed length for an inbound message.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// The five triage categories. Anything else on the wire is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    TechnicalSupport,
    BillingInquiry,
    Sales,
    AccountManagement,
    GeneralFeedback,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::TechnicalSupport,
        Category::BillingInquiry,
        Category::Sales,
        Category::AccountManagement,
        Category::GeneralFeedback,
    ];

    /// Wire form, e.g. "TECHNICAL_SUPPORT".
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TechnicalSupport => "TECHNICAL_SUPPORT",
            Category::BillingInquiry => "BILLING_INQUIRY",
            Category::Sales => "SALES",
            Category::AccountManagement => "ACCOUNT_MANAGEMENT",
            Category::GeneralFeedback => "GENERAL_FEEDBACK",
        }
    }

    /// Human-readable form for the interactive client, e.g. "Technical Support".
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Request body for POST /triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRequest {
    pub message: String,
}

impl TriageRequest {
    /// Check the inbound message constraints. Runs before any external call.
    pub fn validate(&self) -> Result<(), TriageError> {
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            return Err(TriageError::InvalidInput(
                "Message cannot be empty.".to_string(),
            ));
        }
        if trimmed.chars().count() < MIN_MESSAGE_CHARS {
            return Err(TriageError::InvalidInput(format!(
                "Message must be at least {} characters long.",
                MIN_MESSAGE_CHARS
            )));
        }
        Ok(())
    }
}

/// Response body for POST /triage, and the shape requested from Gemini.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResponse {
    pub category: Category,
    pub reasoning: String,
    pub score: f64,
}

impl TriageResponse {
    /// Re-check the model's reply against the schema invariants.
    ///
    /// The category is already enforced by deserialization; this covers the
    /// constraints serde cannot express.
    pub fn validate(&self) -> Result<(), TriageError> {
        if !(0.0..=1.0).contains(&self.score) {
            return Err(TriageError::InvalidOutput(format!(
                "confidence score {} is outside [0.0, 1.0]",
                self.score
            )));
        }
        if self.reasoning.trim().is_empty() {
            return Err(TriageError::InvalidOutput(
                "reasoning is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// JSON schema sent to Gemini as `responseSchema`, kept next to the type
    /// so the two cannot drift.
    pub fn response_schema() -> Value {
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": categories,
                    "description": "The determined category for the inquiry"
                },
                "reasoning": {
                    "type": "string",
                    "description": "A 1-2 sentence justification for the classification"
                },
                "score": {
                    "type": "number",
                    "description": "Confidence between 0.0 (not sure) and 1.0 (certain)"
                }
            },
            "required": ["category", "reasoning", "score"]
        })
    }
}
