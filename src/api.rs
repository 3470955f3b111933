//! JSON API over the engine
//!
//! Every mutating route answers with the snapshot taken right after the
//! command was applied. Results of backend calls arrive later and are visible
//! through `GET /state`.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::ExplorerError;
use crate::engine::EngineHandle;
use crate::state::Snapshot;

#[derive(Serialize, Deserialize)]
pub struct SelectBody {
    pub id: String,
}

#[derive(Serialize, Deserialize)]
pub struct SearchBody {
    pub query: String,
}

type ApiResult = Result<Json<Snapshot>, StatusCode>;

pub fn router(engine: EngineHandle) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/selection", put(select_location))
        .route("/selection", delete(clear_selection))
        .route("/favorites/{id}/toggle", post(toggle_favorite))
        .route("/discovery/explore", post(explore_more))
        .route("/discovery/search", post(search))
        .route("/notice", delete(dismiss_notice))
        .with_state(engine)
}

fn status_for(err: ExplorerError) -> StatusCode {
    match err {
        ExplorerError::Validation { message } => {
            warn!("Rejected request: {}", message);
            StatusCode::NOT_FOUND
        }
        ExplorerError::EngineStopped => {
            error!("Engine is not running");
            StatusCode::SERVICE_UNAVAILABLE
        }
        other => {
            error!("Request failed: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn get_state(State(engine): State<EngineHandle>) -> ApiResult {
    Ok(Json(engine.snapshot()))
}

async fn select_location(
    State(engine): State<EngineHandle>,
    Json(body): Json<SelectBody>,
) -> ApiResult {
    if body.id.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    engine.select(body.id).await.map(Json).map_err(status_for)
}

async fn clear_selection(State(engine): State<EngineHandle>) -> ApiResult {
    engine.clear().await.map(Json).map_err(status_for)
}

async fn toggle_favorite(
    State(engine): State<EngineHandle>,
    Path(id): Path<String>,
) -> ApiResult {
    engine.toggle_favorite(id).await.map(Json).map_err(status_for)
}

async fn explore_more(State(engine): State<EngineHandle>) -> ApiResult {
    engine.explore_more().await.map(Json).map_err(status_for)
}

/// Blank queries are ignored and answer with the unchanged snapshot
async fn search(State(engine): State<EngineHandle>, Json(body): Json<SearchBody>) -> ApiResult {
    engine.search(body.query).await.map(Json).map_err(status_for)
}

async fn dismiss_notice(State(engine): State<EngineHandle>) -> ApiResult {
    engine.dismiss_notice().await.map(Json).map_err(status_for)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::Result;
    use crate::ai::{ContentBackend, GenerationRequest};
    use crate::config::ExplorerConfig;
    use crate::engine::Engine;

    struct SilentBackend;

    #[async_trait]
    impl ContentBackend for SilentBackend {
        async fn generate(&self, _request: &GenerationRequest) -> Result<Value> {
            Ok(json!({}))
        }
    }

    fn app() -> Router {
        router(Engine::spawn(
            &ExplorerConfig::default(),
            Arc::new(SilentBackend),
        ))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_state() {
        let response = app()
            .oneshot(Request::get("/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["locations"].as_array().unwrap().len(), 40);
        assert_eq!(body["activeId"], Value::Null);
    }

    #[tokio::test]
    async fn test_select_known_location() {
        let response = app()
            .oneshot(json_request("PUT", "/selection", json!({ "id": "jingdezhen" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["activeId"], "jingdezhen");
        assert_eq!(body["enrichmentLoading"], true);
    }

    #[tokio::test]
    async fn test_select_unknown_location_is_not_found() {
        let response = app()
            .oneshot(json_request("PUT", "/selection", json!({ "id": "atlantis" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let response = app()
            .oneshot(json_request("POST", "/discovery/search", json!({ "query": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["locations"].as_array().unwrap().len(), 40);
        assert_eq!(body["discovering"], false);
        assert_eq!(body["revision"], 0);
    }

    #[tokio::test]
    async fn test_toggle_favorite_route() {
        let response = app()
            .oneshot(
                Request::post("/favorites/jingdezhen/toggle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["favoriteIds"], json!(["jingdezhen"]));
    }
}
