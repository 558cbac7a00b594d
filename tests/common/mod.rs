#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::{Duration, Utc};
use premios::{
    models::{
        choice::InlineChoiceRequest, question::CreateQuestionRequest, QuestionWithChoices,
    },
    routes,
    services::Database,
    Config, AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

pub async fn test_app(config: Config) -> (Router, Arc<AppState>) {
    let db = Arc::new(Database::in_memory().await.unwrap());
    let state = Arc::new(AppState::new(config, db).await.unwrap());
    (routes::app_router(state.clone()), state)
}

/// 创建发布时间相对当前偏移 `days` 天的问题
pub async fn create_question(
    state: &AppState,
    question_text: &str,
    days: i64,
    choices: &[&str],
) -> QuestionWithChoices {
    state
        .admin_service
        .create_question(CreateQuestionRequest {
            question_text: question_text.to_string(),
            pub_date: Utc::now() + Duration::days(days),
            choices: choices
                .iter()
                .map(|text| InlineChoiceRequest {
                    choice_text: text.to_string(),
                    votes: 0,
                })
                .collect(),
        })
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<axum::body::BoxBody> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> Response<axum::body::BoxBody> {
    let body = serde_urlencoded::to_string(form).unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<axum::body::BoxBody> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<axum::body::BoxBody>) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<axum::body::BoxBody>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
