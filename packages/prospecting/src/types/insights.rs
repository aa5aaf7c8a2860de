//! Sales-insight bundles and outreach messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text sales intelligence for one contact.
///
/// Generated lazily and never required to be cached; each request regenerates
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightBundle {
    pub talking_points: Vec<String>,
    pub pain_points: Vec<String>,
    pub outreach_strategy: String,
    pub company_insights: String,
    pub personalization_data: String,
}

impl InsightBundle {
    /// Industry-neutral substitute returned when the text-generation service
    /// fails or its response cannot be parsed.
    pub fn generic() -> Self {
        Self {
            talking_points: vec![
                "Industry expertise".to_string(),
                "Company growth".to_string(),
                "Market trends".to_string(),
            ],
            pain_points: vec![
                "Scaling challenges".to_string(),
                "Efficiency improvements".to_string(),
            ],
            outreach_strategy: "LinkedIn connection followed by email".to_string(),
            company_insights: "Growing company in competitive market".to_string(),
            personalization_data: "Recent company developments".to_string(),
        }
    }
}

/// Delivery channel for a generated outreach message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    Email,
    Linkedin,
    Phone,
}

impl MessageChannel {
    /// Target length guidance passed to the generator.
    pub fn length_hint(&self) -> &'static str {
        match self {
            Self::Email => "150-200 words",
            Self::Linkedin => "100-150 words",
            Self::Phone => "30-60 seconds",
        }
    }
}

/// Tone for a generated outreach message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Professional,
    Casual,
    Direct,
}

impl Default for MessageTone {
    fn default() -> Self {
        Self::Professional
    }
}

/// Parameters for outreach-message generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachRequest {
    pub channel: MessageChannel,

    #[serde(default)]
    pub tone: MessageTone,

    #[serde(default = "default_objective")]
    pub objective: String,
}

fn default_objective() -> String {
    "introductory meeting".to_string()
}

impl OutreachRequest {
    pub fn new(channel: MessageChannel) -> Self {
        Self {
            channel,
            tone: MessageTone::default(),
            objective: default_objective(),
        }
    }

    pub fn with_tone(mut self, tone: MessageTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = objective.into();
        self
    }
}

/// A generated outreach message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachMessage {
    pub content: String,
    pub channel: MessageChannel,
    pub tone: MessageTone,
    pub objective: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_bundle_is_nonempty() {
        let bundle = InsightBundle::generic();
        assert!(!bundle.talking_points.is_empty());
        assert!(!bundle.outreach_strategy.is_empty());
    }

    #[test]
    fn test_outreach_request_defaults() {
        let request: OutreachRequest = serde_json::from_str(r#"{"channel":"email"}"#).unwrap();
        assert_eq!(request.channel, MessageChannel::Email);
        assert_eq!(request.tone, MessageTone::Professional);
        assert_eq!(request.objective, "introductory meeting");
    }

    #[test]
    fn test_channel_rejects_unknown() {
        let result: Result<OutreachRequest, _> = serde_json::from_str(r#"{"channel":"fax"}"#);
        assert!(result.is_err());
    }
}
