//! AI-backed enrichment services.

pub mod openai;

pub use openai::OpenAiProspectAI;

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::error::{DiscoveryError, Result};
use crate::traits::ai::ProspectAI;
use crate::types::{CandidateContact, InsightBundle, OutreachMessage, OutreachRequest};

/// Insight and outreach generation with the spec'd degradation rules.
///
/// Insights fall back to a fixed generic bundle on any service or parse
/// failure; outreach messages propagate a typed failure since no safe
/// generic substitute exists for outbound content.
pub struct InsightService {
    ai: Arc<dyn ProspectAI>,
}

impl InsightService {
    pub fn new(ai: Arc<dyn ProspectAI>) -> Self {
        Self { ai }
    }

    /// Generate insights for a contact; never fails.
    pub async fn insights_for(&self, contact: &CandidateContact) -> InsightBundle {
        match self.ai.generate_insights(contact).await {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!(contact = %contact.full_name(), error = %e, "insight generation failed, using generic bundle");
                InsightBundle::generic()
            }
        }
    }

    /// Generate an outreach message for a contact.
    pub async fn outreach_message(
        &self,
        contact: &CandidateContact,
        request: &OutreachRequest,
    ) -> Result<OutreachMessage> {
        let content = self
            .ai
            .generate_message(contact, request)
            .await
            .map_err(|e| {
                warn!(contact = %contact.full_name(), error = %e, "message generation failed");
                DiscoveryError::MessageGeneration
            })?;

        Ok(OutreachMessage {
            content,
            channel: request.channel,
            tone: request.tone,
            objective: request.objective.clone(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProspectAI;
    use crate::types::{ContactSource, MessageChannel};

    fn contact() -> CandidateContact {
        CandidateContact::new(ContactSource::Directory)
            .with_name("Jane", "Doe")
            .with_company("Acme Corp")
    }

    #[tokio::test]
    async fn test_insights_degrade_to_generic() {
        let service = InsightService::new(Arc::new(MockProspectAI::new().failing()));
        let bundle = service.insights_for(&contact()).await;
        assert_eq!(bundle.talking_points, InsightBundle::generic().talking_points);
    }

    #[tokio::test]
    async fn test_outreach_failure_is_typed() {
        let service = InsightService::new(Arc::new(MockProspectAI::new().failing()));
        let result = service
            .outreach_message(&contact(), &OutreachRequest::new(MessageChannel::Email))
            .await;
        assert!(matches!(result, Err(DiscoveryError::MessageGeneration)));
    }

    #[tokio::test]
    async fn test_outreach_success_carries_request_shape() {
        let ai = MockProspectAI::new().with_message("Hello Jane, quick question about Acme.");
        let service = InsightService::new(Arc::new(ai));

        let request = OutreachRequest::new(MessageChannel::Linkedin).with_objective("demo call");
        let message = service.outreach_message(&contact(), &request).await.unwrap();

        assert_eq!(message.channel, MessageChannel::Linkedin);
        assert_eq!(message.objective, "demo call");
        assert!(message.content.contains("Jane"));
    }
}
