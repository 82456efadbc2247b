//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::ChallengesConfig;
use crate::application::{
    BulkDeleteUseCase, CreateChallengeInput, CreateChallengeUseCase, DeleteChallengeUseCase,
    ListChallengesUseCase,
};
use crate::domain::repository::ChallengeRepository;
use crate::error::ChallengesResult;
use crate::presentation::dto::{
    BulkDeleteRequest, BulkDeleteResponse, CreateChallengeRequest, CreateChallengeResponse,
    DeleteChallengeResponse, ListChallengesResponse,
};

/// Shared state for challenge handlers
#[derive(Clone)]
pub struct ChallengesAppState<R>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub limiter: Arc<MemoryRateLimitStore>,
    pub config: Arc<ChallengesConfig>,
}

/// GET /api/challenges
pub async fn list_challenges<R>(
    State(state): State<ChallengesAppState<R>>,
) -> ChallengesResult<Json<ListChallengesResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListChallengesUseCase::new(state.repo.clone());
    let challenges = use_case.execute().await?;

    Ok(Json(ListChallengesResponse {
        challenges: challenges.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/challenges
pub async fn create_challenge<R>(
    State(state): State<ChallengesAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<CreateChallengeRequest>,
) -> ChallengesResult<Json<CreateChallengeResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = CreateChallengeUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let challenge = use_case
        .execute(CreateChallengeInput {
            title: req.title,
            problem: req.problem,
            concept: req.concept,
            category: req.category,
            difficulty: req.difficulty,
            sample_code: req.sample_code,
            test_cases: req.test_cases,
            client_ip,
        })
        .await?;

    Ok(Json(CreateChallengeResponse {
        success: true,
        challenge: challenge.into(),
    }))
}

/// DELETE /api/challenges/{id}
pub async fn delete_challenge<R>(
    State(state): State<ChallengesAppState<R>>,
    Path(id): Path<i64>,
) -> ChallengesResult<Json<DeleteChallengeResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteChallengeUseCase::new(state.repo.clone());
    use_case.execute(id).await?;

    Ok(Json(DeleteChallengeResponse { success: true }))
}

/// POST /api/challenges/bulk-delete
pub async fn bulk_delete<R>(
    State(state): State<ChallengesAppState<R>>,
    Json(req): Json<BulkDeleteRequest>,
) -> ChallengesResult<Json<BulkDeleteResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let use_case = BulkDeleteUseCase::new(state.repo.clone());
    let deleted_count = use_case.execute(req.ids).await?;

    Ok(Json(BulkDeleteResponse {
        success: true,
        deleted_count,
    }))
}
