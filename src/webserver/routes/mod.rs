/// Route table for the playground API
///
/// Undeclared methods on a declared path answer 405 via axum's method
/// routing; undeclared paths answer 404.
pub mod positions;
pub mod rewards;
pub mod status;
pub mod transactions;
pub mod vaults;

use axum::routing::{get, post};
use axum::Router;

use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/depositTx", post(transactions::deposit_tx))
        .route("/api/withdrawTx", post(transactions::withdraw_tx))
        .route("/api/crossChainTx", post(transactions::cross_chain_tx))
        .route("/api/vaults", post(vaults::vaults))
        .route("/api/positions", post(positions::positions))
        .route("/api/positionActivity", post(positions::position_activity))
        .route("/api/rewards", get(rewards::rewards))
        .route("/api/merklRewards", get(rewards::merkl_rewards))
        .route("/api/tokenBySymbol", get(vaults::token_by_symbol))
        .route("/api/health", get(status::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn test_router() -> Router {
        create_router(AppState::new(Arc::new(Config::default())))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn cross_chain_tx_rejects_missing_fields_before_any_upstream_call() {
        let request = post_json("/api/crossChainTx", r#"{"sourceChainId": 1, "amount": "1"}"#);
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "All fields are required");
        assert_eq!(
            json["missingFields"],
            serde_json::json!([
                "destinationChainId",
                "senderAddress",
                "fleetAddress",
                "sourceTokenSymbol",
                "assetTokenSymbol"
            ])
        );
    }

    #[tokio::test]
    async fn merkl_rewards_requires_chain_id() {
        let request = Request::builder()
            .uri("/api/merklRewards?address=0x1111111111111111111111111111111111111111")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["missingFields"], serde_json::json!(["chainId"]));
    }

    #[tokio::test]
    async fn positions_and_token_lookup_require_environment() {
        let request = post_json(
            "/api/positions",
            r#"{"chainId": 8453, "address": "0x1111111111111111111111111111111111111111"}"#,
        );
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["missingFields"], serde_json::json!(["environment"]));

        let request = Request::builder()
            .uri("/api/tokenBySymbol?symbol=USDC&chainId=8453")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["missingFields"], serde_json::json!(["environment"]));
    }

    #[tokio::test]
    async fn undeclared_methods_answer_405() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/vaults")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
