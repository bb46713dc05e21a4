//! News endpoint

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use newsfeed_core::FeedError;
use serde::Serialize;
use tracing::{debug, error};

use crate::AppState;

/// Body of a failed request
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Upstream failures all surface the same way: 500 with the failure's message
struct UpstreamFailure(FeedError);

impl IntoResponse for UpstreamFailure {
    fn into_response(self) -> axum::response::Response {
        error!("Failed to fetch Yahoo Finance news: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/yahoo_news", get(get_yahoo_news))
}

/// GET /api/yahoo_news - Latest Yahoo Finance headlines as `{"data": [...]}`
async fn get_yahoo_news(State(state): State<AppState>) -> impl IntoResponse {
    match state.news_client.fetch_news().await {
        Ok(feed) => {
            debug!("Serving {} Yahoo Finance news items", feed.len());
            (StatusCode::OK, Json(feed)).into_response()
        }
        Err(e) => UpstreamFailure(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Request},
        response::Response,
    };
    use newsfeed_rss::{YahooNewsClient, USER_AGENT};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::app;

    /// Serve a canned feed the way Yahoo does, refusing clients without a browser user agent
    async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
        let upstream = Router::new().route(
            "/news/rssindex",
            get(move |headers: HeaderMap| async move {
                if headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok())
                    != Some(USER_AGENT)
                {
                    return (StatusCode::FORBIDDEN, "");
                }
                (status, body)
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        format!("http://{}/news/rssindex", addr)
    }

    fn state_for(url: String) -> AppState {
        AppState {
            news_client: Arc::new(YahooNewsClient::with_url(url)),
        }
    }

    async fn get_news(state: AppState) -> Response {
        app(state)
            .oneshot(
                Request::builder()
                    .uri("/api/yahoo_news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_single_item_feed() {
        let url = spawn_upstream(
            StatusCode::OK,
            "<rss><channel><item><title>A</title><link>http://x</link>\
             <pubDate>Mon</pubDate></item></channel></rss>",
        )
        .await;

        let response = get_news(state_for(url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "application/json");
        assert_eq!(
            json_body(response).await,
            json!({"data": [{"title": "A", "link": "http://x", "pubDate": "Mon"}]})
        );
    }

    #[tokio::test]
    async fn test_items_in_order_with_defaults() {
        let url = spawn_upstream(
            StatusCode::OK,
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0"><channel>
              <title>Yahoo Finance</title>
              <item><link>http://1</link><pubDate>Tue</pubDate></item>
              <item><title>Two</title><pubDate>Wed</pubDate></item>
              <item><title>Three</title><link>http://3</link></item>
            </channel></rss>"#,
        )
        .await;

        let response = get_news(state_for(url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"data": [
                {"title": "No Title", "link": "http://1", "pubDate": "Tue"},
                {"title": "Two", "link": "#", "pubDate": "Wed"},
                {"title": "Three", "link": "http://3", "pubDate": ""},
            ]})
        );
    }

    #[tokio::test]
    async fn test_no_items_is_empty_data() {
        let url = spawn_upstream(StatusCode::OK, "<rss><channel></channel></rss>").await;

        let response = get_news(state_for(url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"data": []}));
    }

    #[tokio::test]
    async fn test_malformed_xml_is_500() {
        let url = spawn_upstream(StatusCode::OK, "this is not xml").await;

        let response = get_news(state_for(url)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type(&response), "application/json");

        let body = json_body(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(!message.is_empty());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_upstream_status_is_500() {
        let url = spawn_upstream(StatusCode::BAD_GATEWAY, "").await;

        let response = get_news(state_for(url)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_500() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = get_news(state_for(format!("http://{}/news/rssindex", addr))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type(&response), "application/json");

        let body = json_body(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}
