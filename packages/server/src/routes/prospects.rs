//! Prospect discovery, enrichment, and outreach routes.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use prospecting::{
    CandidateContact, InsightBundle, InsightService, InsertOutcome, OutreachMessage,
    OutreachRequest, ScoredProspect, SearchFilters,
};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverMetadata {
    pub total: usize,
    pub new_count: usize,
    pub generated: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub prospects: Vec<ScoredProspect>,
    pub metadata: DiscoverMetadata,
}

/// POST /api/prospects/discover
///
/// Always answers 200 with a non-empty, tagged result list for well-formed
/// filters; only request-validation problems produce a client error.
pub async fn discover_handler(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<DiscoverResponse>, ApiError> {
    if !filters.limit_in_range() {
        return Err(ApiError::Validation(
            "limit must be between 1 and 50".to_string(),
        ));
    }

    info!(
        industries = filters.industries.len(),
        positions = filters.positions.len(),
        limit = filters.limit,
        "discovery request"
    );

    let result = state.orchestrator.discover(&filters).await;

    let mut new_count = 0;
    for prospect in &result.prospects {
        match state.store.insert_if_new(prospect).await {
            Ok(InsertOutcome::Inserted) => new_count += 1,
            Ok(InsertOutcome::AlreadyExists(_)) => {}
            // A failed save never fails the request; the prospect is still returned.
            Err(e) => warn!(error = %e, "failed to persist prospect"),
        }
    }

    let metadata = DiscoverMetadata {
        total: result.prospects.len(),
        new_count,
        generated: result.generated,
        timestamp: result.timestamp,
    };

    Ok(Json(DiscoverResponse {
        prospects: result.prospects,
        metadata,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub prospect_id: Uuid,
    pub insights: InsightBundle,
}

/// POST /api/prospects/:id/insights
///
/// AI failure degrades to the generic bundle rather than an error.
pub async fn insights_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let prospect = load_prospect(&state, id).await?;

    let insights = match &state.ai {
        Some(ai) => {
            InsightService::new(ai.clone())
                .insights_for(&prospect.contact)
                .await
        }
        None => InsightBundle::generic(),
    };

    Ok(Json(InsightsResponse {
        prospect_id: id,
        insights,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachProspect {
    pub name: String,
    pub company: String,
    pub position: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachResponse {
    pub prospect: OutreachProspect,
    pub message: OutreachMessage,
}

/// POST /api/prospects/:id/outreach
///
/// Generation failure is surfaced: there is no safe default text for
/// outbound messages.
pub async fn outreach_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, ApiError> {
    let prospect = load_prospect(&state, id).await?;

    let Some(ai) = &state.ai else {
        return Err(ApiError::Upstream("generation failed".to_string()));
    };

    let message = InsightService::new(ai.clone())
        .outreach_message(&prospect.contact, &request)
        .await
        .map_err(|_| ApiError::Upstream("generation failed".to_string()))?;

    Ok(Json(OutreachResponse {
        prospect: OutreachProspect {
            name: prospect.contact.full_name(),
            company: prospect.contact.company.clone(),
            position: prospect.contact.position.clone(),
        },
        message,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub contact_ids: Vec<Uuid>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEntry {
    pub contact_id: Uuid,
    pub score: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub scores: Vec<ScoredEntry>,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/prospects/score
///
/// Batch AI scoring for stored prospects.
pub async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    if request.contact_ids.is_empty() {
        return Err(ApiError::Validation("no contact IDs provided".to_string()));
    }

    let mut contacts: Vec<CandidateContact> = Vec::new();
    let mut found_ids = Vec::new();
    for id in &request.contact_ids {
        if let Some(prospect) = state
            .store
            .get(*id)
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?
        {
            found_ids.push(*id);
            contacts.push(prospect.contact);
        }
    }

    if contacts.is_empty() {
        return Err(ApiError::NotFound("no prospects found".to_string()));
    }

    let Some(ai) = &state.ai else {
        return Err(ApiError::Upstream("generation failed".to_string()));
    };

    let scores = ai
        .score_batch(&contacts)
        .await
        .map_err(|_| ApiError::Upstream("generation failed".to_string()))?;

    let entries = found_ids
        .into_iter()
        .zip(scores)
        .map(|(contact_id, score)| ScoredEntry { contact_id, score })
        .collect();

    Ok(Json(ScoreResponse {
        scores: entries,
        timestamp: Utc::now(),
    }))
}

async fn load_prospect(state: &AppState, id: Uuid) -> Result<ScoredProspect, ApiError> {
    state
        .store
        .get(id)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound("prospect not found".to_string()))
}
