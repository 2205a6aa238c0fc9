//! Repeat-date calculator — GET /api/nextdate
//!
//! Query: `?now=YYYYMMDD&date=YYYYMMDD&repeat=<rule>`
//! Response: `text/plain` next date, or an empty body when `repeat` is empty.
//! Error: 400 with the reason as plain text.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tasker_scheduler::{next_date, parse_date};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct NextDateQuery {
    pub now: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub repeat: String,
}

/// GET /api/nextdate — compute the next occurrence of a repeat rule.
pub async fn next_date_handler(Query(query): Query<NextDateQuery>) -> Response {
    let (Some(now), Some(date)) = (query.now, query.date) else {
        return (StatusCode::BAD_REQUEST, "now and date parameters are required").into_response();
    };

    let reference = match parse_date(&now) {
        Ok(d) => d,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, format!("invalid now date {now:?}, expected YYYYMMDD"))
                .into_response()
        }
    };

    match next_date(reference, &date, &query.repeat) {
        Ok(next) => next.unwrap_or_default().into_response(),
        Err(e) => {
            debug!(code = e.code(), error = %e, repeat = %query.repeat, "nextdate rejected");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    async fn call(uri: &str) -> (StatusCode, String) {
        let router = Router::new().route("/api/nextdate", get(next_date_handler));
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn computes_next_date() {
        let (status, body) = call("/api/nextdate?now=20240301&date=20240101&repeat=d%2030").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "20240331");

        let (_, body) = call("/api/nextdate?now=20240115&date=20240101&repeat=w+1,3").await;
        assert_eq!(body, "20240117");

        let (_, body) = call("/api/nextdate?now=20240228&date=20240101&repeat=m+-1+2").await;
        assert_eq!(body, "20240229");
    }

    #[tokio::test]
    async fn empty_rule_gives_empty_body() {
        let (status, body) = call("/api/nextdate?now=20240301&date=20240101&repeat=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, body) = call("/api/nextdate?now=20240301&date=20240101").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn missing_parameters_are_rejected() {
        let (status, _) = call("/api/nextdate?date=20240101&repeat=y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call("/api/nextdate?now=20240101&repeat=y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn engine_errors_are_bad_requests() {
        let (status, body) = call("/api/nextdate?now=20240101&date=20240101&repeat=q").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Unsupported"), "body was {body}");

        let (status, _) = call("/api/nextdate?now=20240101&date=20240101&repeat=d+0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call("/api/nextdate?now=2024-01-01&date=20240101&repeat=y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call("/api/nextdate?now=20240101&date=bogus&repeat=y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
