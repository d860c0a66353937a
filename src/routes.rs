use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::fetcher::Fetcher;
use crate::registry::Registry;
use crate::render::render_river;

pub struct AppState {
    pub registry: Registry,
    pub fetcher: Fetcher,
}

// Custom error type
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self.0),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

/// Fetch every feed and render the merged page. Feed failures only shrink
/// the page.
pub async fn river(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let river = state.fetcher.river(&state.registry).await;
    let page = render_river(&river)?;
    Ok(Html(page))
}

pub fn router(state: Arc<AppState>, url_path: &str) -> Router {
    Router::new()
        .route(url_path, get(river))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::Item;
    use crate::fetcher::test_support::StubClient;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_app(client: StubClient, feeds: &[(&str, &str)], url_path: &str) -> Router {
        let configs: Vec<FeedConfig> = feeds
            .iter()
            .map(|(name, url)| FeedConfig {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect();

        let state = Arc::new(AppState {
            registry: Registry::from_configs(&configs),
            fetcher: Fetcher::new(Arc::new(client)),
        });

        router(state, url_path)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    mod river_tests {
        use super::*;

        #[tokio::test]
        async fn test_river_page() {
            let client = StubClient::new()
                .channel("http://x/a", "A", vec![Item::new("T1", "<p>Hi</p><img src=1>")])
                .channel(
                    "http://rss.slashdot.org/x",
                    "B",
                    vec![Item::new("T2", "Read more of this story at Slashdot. <br>bye")],
                );
            let app = create_test_app(
                client,
                &[("A", "http://x/a"), ("B", "http://rss.slashdot.org/x")],
                "/",
            );

            let (status, body) = get_body(app, "/").await;

            assert_eq!(status, StatusCode::OK);
            assert!(body.starts_with("<!DOCTYPE html>"));
            assert!(body.contains("<h3>T1</h3>\n<p>Hi</p>\n"));
            assert!(body.contains("<h3>T2</h3>\n bye\n"));
        }

        #[tokio::test]
        async fn test_all_feeds_failing_is_still_ok() {
            let client = StubClient::new().failing("http://x/a");
            let app = create_test_app(
                client,
                &[("A", "http://x/a"), ("B", "http://x/b")],
                "/",
            );

            let (status, body) = get_body(app, "/").await;

            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("<div class=\"container\">\n</div>"));
            assert!(body.trim_end().ends_with("</html>"));
        }

        #[tokio::test]
        async fn test_content_type_is_html() {
            let app = create_test_app(StubClient::new(), &[], "/");

            let response = app
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();

            let content_type = response.headers().get("content-type").unwrap();
            assert!(content_type.to_str().unwrap().starts_with("text/html"));
        }
    }

    mod path_tests {
        use super::*;

        #[tokio::test]
        async fn test_custom_url_path() {
            let client = StubClient::new().channel("http://x/a", "A", vec![Item::new("T", "d")]);
            let app = create_test_app(client, &[("A", "http://x/a")], "/river");

            let (status, body) = get_body(app, "/river").await;

            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("<h3>T</h3>"));
        }

        #[tokio::test]
        async fn test_other_paths_are_not_found() {
            let app = create_test_app(StubClient::new(), &[], "/river");

            let (status, _) = get_body(app, "/").await;

            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }
}
