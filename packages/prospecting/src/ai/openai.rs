//! OpenAI implementation of the `ProspectAI` trait.
//!
//! Plain chat-completion calls over `reqwest`. Responses are expected to be
//! structured text; a parse failure is treated identically to a service
//! failure by callers.

use async_trait::async_trait;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AiError, AiResult};
use crate::traits::ai::ProspectAI;
use crate::types::{
    CandidateContact, ContactSource, InsightBundle, OutreachRequest, SearchFilters,
};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-backed prospect AI.
pub struct OpenAiProspectAI {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiProspectAI {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AiError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn chat(&self, prompt: &str, temperature: f32, max_tokens: u32) -> AiResult<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChatChoiceMessage {
            content: String,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                AiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(AiError::Api(format!("OpenAI API error: {}", error_text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| AiError::Api("No response from OpenAI".into()))
    }
}

/// Strip markdown code fences the model sometimes wraps JSON in.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .trim_end_matches('`')
        .trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedProspect {
    #[serde(alias = "first_name")]
    first_name: Option<String>,
    #[serde(alias = "last_name")]
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    #[serde(alias = "title")]
    position: Option<String>,
    industry: Option<String>,
    location: Option<String>,
    summary: Option<String>,
}

/// Parse the model's prospect array into tagged synthetic candidates.
fn parse_generated_prospects(
    content: &str,
    filters: &SearchFilters,
) -> AiResult<Vec<CandidateContact>> {
    let raw: Vec<GeneratedProspect> = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| AiError::Parse(format!("prospect JSON: {}", e)))?;

    let mut rng = rand::thread_rng();
    let contacts = raw
        .into_iter()
        .map(|p| {
            let first = p.first_name.unwrap_or_default();
            let last = p.last_name.unwrap_or_default();

            let mut contact = CandidateContact::new(ContactSource::Synthetic)
                .with_name(&first, &last)
                .with_company(p.company.unwrap_or_else(|| "Tech Corp".to_string()))
                .with_position(p.position.unwrap_or_else(|| {
                    filters.primary_position().unwrap_or("Manager").to_string()
                }))
                .with_industry(p.industry.unwrap_or_else(|| {
                    filters
                        .primary_industry()
                        .unwrap_or("Technology")
                        .to_string()
                }))
                .with_location(p.location.unwrap_or_else(|| {
                    if filters.location.trim().is_empty() {
                        "San Francisco, CA".to_string()
                    } else {
                        filters.location.clone()
                    }
                }))
                .with_confidence(rng.gen_range(80..=99));

            contact.id = Uuid::new_v4();
            contact.email = p.email.or_else(|| {
                Some(format!(
                    "{}.{}@example.com",
                    contact.first_name.to_lowercase(),
                    contact.last_name.to_lowercase()
                ))
            });
            contact.phone = p.phone;
            contact.summary = p.summary;
            contact.linkedin_url = Some(format!(
                "https://linkedin.com/in/{}-{}",
                contact.first_name.to_lowercase(),
                contact.last_name.to_lowercase()
            ));
            contact
        })
        .collect();

    Ok(contacts)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInsights {
    #[serde(alias = "talking_points", default)]
    talking_points: Vec<String>,
    #[serde(alias = "pain_points", default)]
    pain_points: Vec<String>,
    #[serde(alias = "outreach_strategy", default)]
    outreach_strategy: String,
    #[serde(alias = "company_insights", default)]
    company_insights: String,
    #[serde(alias = "personalization_data", default)]
    personalization_data: String,
}

fn parse_insights(content: &str) -> AiResult<InsightBundle> {
    let raw: RawInsights = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| AiError::Parse(format!("insights JSON: {}", e)))?;

    Ok(InsightBundle {
        talking_points: raw.talking_points,
        pain_points: raw.pain_points,
        outreach_strategy: raw.outreach_strategy,
        company_insights: raw.company_insights,
        personalization_data: raw.personalization_data,
    })
}

fn parse_scores(content: &str) -> Vec<u8> {
    strip_code_fences(content)
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u16>().ok())
        .map(|n| n.min(100) as u8)
        .collect()
}

#[async_trait]
impl ProspectAI for OpenAiProspectAI {
    async fn generate_prospects(
        &self,
        filters: &SearchFilters,
        count: usize,
    ) -> AiResult<Vec<CandidateContact>> {
        let prompt = format!(
            "Generate realistic B2B prospect data.\n\n\
             Filters:\n\
             - Industries: {}\n\
             - Positions: {}\n\
             - Location: {}\n\
             - Company Size: {}\n\
             - Keywords: {}\n\n\
             Create {} realistic prospects, each with: firstName, lastName, \
             email (format first.last@company.com), phone, company, position \
             (matching the position filters), industry, location (near the \
             specified location), and a 2-3 sentence summary.\n\n\
             Make the data feel authentic and diverse. Return ONLY a JSON array.",
            filters.industries.join(", "),
            filters.positions.join(", "),
            filters.location,
            filters.company_size,
            filters.keywords,
            count.clamp(1, 10),
        );

        let content = self.chat(&prompt, 0.8, 2000).await?;
        let contacts = parse_generated_prospects(&content, filters)?;
        debug!(count = contacts.len(), "generated synthetic prospects");
        Ok(contacts)
    }

    async fn generate_insights(&self, contact: &CandidateContact) -> AiResult<InsightBundle> {
        let prompt = format!(
            "Analyze this B2B prospect and provide sales intelligence:\n\n\
             Name: {}\n\
             Company: {}\n\
             Position: {}\n\
             Industry: {}\n\
             Location: {}\n\n\
             Generate:\n\
             1. 3 personalized talking points for outreach\n\
             2. Best outreach strategy (email, LinkedIn, phone)\n\
             3. Potential pain points they might have\n\
             4. Company insights and news opportunities\n\
             5. Personalization data for messaging\n\n\
             Return ONLY a JSON object with: talkingPoints[], outreachStrategy, \
             painPoints[], companyInsights, personalizationData",
            contact.full_name(),
            contact.company,
            contact.position,
            contact.industry,
            contact.location,
        );

        let content = self.chat(&prompt, 0.6, 800).await?;
        parse_insights(&content)
    }

    async fn generate_message(
        &self,
        contact: &CandidateContact,
        request: &OutreachRequest,
    ) -> AiResult<String> {
        let channel = serde_json::to_value(request.channel)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "email".to_string());
        let tone = serde_json::to_value(request.tone)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "professional".to_string());

        let prompt = format!(
            "Create a personalized {} outreach message for:\n\n\
             Name: {}\n\
             Company: {}\n\
             Position: {}\n\
             Industry: {}\n\n\
             Message requirements:\n\
             - Tone: {}\n\
             - Objective: {}\n\
             - Length: {}\n\n\
             Make it highly personalized, relevant, and compelling. Include a \
             clear call-to-action.{}",
            channel,
            contact.full_name(),
            contact.company,
            contact.position,
            contact.industry,
            tone,
            request.objective,
            request.channel.length_hint(),
            if channel == "email" {
                " Include subject line."
            } else {
                ""
            },
        );

        self.chat(&prompt, 0.7, 400).await
    }

    async fn score_batch(&self, contacts: &[CandidateContact]) -> AiResult<Vec<u8>> {
        let listing: Vec<serde_json::Value> = contacts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.full_name(),
                    "position": c.position,
                    "company": c.company,
                    "industry": c.industry,
                })
            })
            .collect();

        let prompt = format!(
            "Score these B2B prospects from 1-100 based on:\n\
             - Position seniority and decision-making power\n\
             - Company size and revenue potential\n\
             - Industry attractiveness\n\
             - Contact data quality\n\n\
             Prospects: {}\n\n\
             Return the scores as numbers only, in the same order.",
            serde_json::to_string(&listing).unwrap_or_default(),
        );

        let content = self.chat(&prompt, 0.3, 200).await?;
        Ok(parse_scores(&content))
    }
}
