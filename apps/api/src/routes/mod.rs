pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyze",
            post(handlers::handle_analyze_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .route(
            "/api/v1/analyze/structured",
            post(handlers::handle_analyze_structured),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route("/api/v1/predict-role", post(handlers::handle_predict_role))
        .route("/api/v1/career-paths", post(handlers::handle_career_paths))
        .route("/api/v1/job-details", post(handlers::handle_job_details))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::career_paths::CareerCatalog;
    use crate::analysis::job_listings::JobBoard;
    use crate::analysis::pipeline::tests::{analyzer_with, EchoClassifier, FixedParser};
    use crate::config::Config;
    use crate::ml::ats::ProxyAtsScorer;
    use crate::models::resume::ResumeData;

    fn test_app() -> Router {
        let resume = ResumeData {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        let analyzer = analyzer_with(
            Arc::new(FixedParser(resume)),
            Arc::new(ProxyAtsScorer::default()),
            Arc::new(EchoClassifier),
        );
        build_router(AppState {
            config: Config::default(),
            analyzer: Arc::new(analyzer),
            catalog: Arc::new(CareerCatalog::builtin()),
            jobs: Arc::new(JobBoard::builtin()),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "skillscope-test-boundary";
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillscope-api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_enveloped_404() {
        let (status, body) = post_json(test_app(), "/api/v1/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/analyze/text",
            json!({"resume_text": "Jane Doe, data engineer", "job_description": "Python and Docker"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_skills"], json!(["python"]));
        assert_eq!(body["missing_skills"], json!(["docker"]));
        assert_eq!(body["match_percentage"], 50.0);
        assert_eq!(body["predicted_role"], "role for [python, sql]");
        assert_eq!(body["features"]["skill_count"], 2);
        assert!(body["analysis_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_text_empty_resume_is_400() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/analyze/text",
            json!({"resume_text": "  ", "job_description": "python"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_structured_with_missing_fields() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/analyze/structured",
            json!({"resume": {"skills": ["React"], "experience": null}, "job_description": "react"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_percentage"], 100.0);
        assert_eq!(body["features"]["experience_count"], 0);
    }

    #[tokio::test]
    async fn test_analyze_pdf_without_file_is_400() {
        let response = test_app()
            .oneshot(multipart_request(&[("job_description", None, b"python")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_unreadable_pdf_is_422() {
        let response = test_app()
            .oneshot(multipart_request(&[
                ("pdf", Some("resume.pdf"), b"not a pdf at all"),
                ("job_description", None, b"python"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_match_returns_keywords_and_result() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/match",
            json!({"skills": ["python"], "job_description": "Python and CSS"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["python", "css"]));
        assert_eq!(body["matched"], json!(["python"]));
        assert_eq!(body["missing"], json!(["css"]));
        assert_eq!(body["match_percentage"], 66.67);
    }

    #[tokio::test]
    async fn test_keywords() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/keywords",
            json!({"text": "Experience with ReactJS, machine learning and AWS."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["machine learning", "react", "aws"]));
    }

    #[tokio::test]
    async fn test_predict_role() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/predict-role",
            json!({"skills": ["React", "Node"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["predicted_role"], "role for [react, node]");
    }

    #[tokio::test]
    async fn test_career_paths() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/career-paths",
            json!({"skills": ["Docker", "Kubernetes", "AWS"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["career_paths"][0]["job_title"], "DevOps Engineer");
        assert_eq!(body["career_paths"][0]["match_percentage"], 50.0);
        assert_eq!(body["total_paths"], 1);
    }

    #[tokio::test]
    async fn test_career_paths_without_skills_is_400() {
        let (status, _) = post_json(test_app(), "/api/v1/career-paths", json!({"skills": []})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_job_details() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/job-details",
            json!({"predicted_role": " DevOps Engineer "}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["predicted_role"], "DevOps Engineer");
        assert_eq!(body["total_jobs"], 1);
        assert_eq!(body["matching_jobs"][0]["company_name"], "Stackharbor");
        assert_eq!(body["matching_jobs"][0]["work_from_home"], true);
    }

    #[tokio::test]
    async fn test_job_details_for_unlisted_role_is_empty() {
        let (status, body) = post_json(
            test_app(),
            "/api/v1/job-details",
            json!({"predicted_role": "unknown"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_jobs"], 0);
        assert_eq!(body["matching_jobs"], json!([]));
    }

    #[tokio::test]
    async fn test_job_details_without_role_is_400() {
        let (status, body) = post_json(test_app(), "/api/v1/job-details", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
