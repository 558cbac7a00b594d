mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::*;
use premios::Config;
use serde_json::json;

fn token_config() -> Config {
    Config {
        admin_token: Some("s3cret".to_string()),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_admin_open_without_configured_token() {
    let (app, _state) = test_app(Config::default()).await;
    let response = send_json(&app, "GET", "/admin/questions", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_requires_token_when_configured() {
    let (app, _state) = test_app(token_config()).await;

    let response = send_json(&app, "GET", "/admin/questions", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(&app, "GET", "/admin/questions", Some("wrong"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(&app, "GET", "/admin/questions", Some("s3cret-extra"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(&app, "GET", "/admin/questions", Some("s3cret"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_pages_ignore_admin_token() {
    let (app, _state) = test_app(token_config()).await;
    let response = get(&app, "/polls/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_question_with_inline_choices() {
    let (app, _state) = test_app(Config::default()).await;
    let pub_date = Utc::now() - Duration::hours(2);

    let response = send_json(
        &app,
        "POST",
        "/admin/questions",
        None,
        Some(json!({
            "question_text": "What's new?",
            "pub_date": pub_date,
            "choices": [
                { "choice_text": "Not much" },
                { "choice_text": "The sky", "votes": 2 },
                { "choice_text": "" }
            ]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["question_text"], "What's new?");
    let choices = body["data"]["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[1]["votes"], 2);

    let id = body["data"]["id"].as_i64().unwrap();
    let body = body_json(send_json(&app, "GET", &format!("/admin/questions/{}", id), None, None).await).await;
    assert_eq!(body["data"]["extra_choice_slots"], 3);
    assert_eq!(body["data"]["question"]["choices"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_question_validation_error() {
    let (app, _state) = test_app(Config::default()).await;

    let response = send_json(
        &app,
        "POST",
        "/admin/questions",
        None,
        Some(json!({
            "question_text": "",
            "pub_date": Utc::now(),
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_questions_shows_recency_column() {
    let (app, state) = test_app(Config::default()).await;
    create_question(&state, "Recent", 0, &[]).await;
    create_question(&state, "Old", -10, &[]).await;
    create_question(&state, "Scheduled", 10, &[]).await;

    let body = body_json(send_json(&app, "GET", "/admin/questions", None, None).await).await;
    let rows = body["data"]["data"].as_array().unwrap();
    assert_eq!(body["data"]["total"], 3);

    let recent: Vec<_> = rows
        .iter()
        .filter(|row| row["was_published_recently"] == true)
        .map(|row| row["question_text"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["Recent"]);

    let scheduled: Vec<_> = rows
        .iter()
        .filter(|row| row["is_published"] == false)
        .map(|row| row["question_text"].as_str().unwrap())
        .collect();
    assert_eq!(scheduled, vec!["Scheduled"]);
}

#[tokio::test]
async fn test_list_questions_search() {
    let (app, state) = test_app(Config::default()).await;
    create_question(&state, "Best editor", -1, &[]).await;
    create_question(&state, "Best language", -1, &[]).await;
    create_question(&state, "Worst bug", -1, &[]).await;

    let body = body_json(send_json(&app, "GET", "/admin/questions?q=best", None, None).await).await;
    assert_eq!(body["data"]["total"], 2);

    let body = body_json(
        send_json(&app, "GET", "/admin/questions?q=best&pub_date=today", None, None).await,
    )
    .await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_list_questions_rejects_out_of_range_page() {
    let (app, state) = test_app(Config::default()).await;
    create_question(&state, "Only one", -1, &[]).await;

    let response = send_json(
        &app,
        "GET",
        "/admin/questions?page=18446744073709551615",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let body = body_json(send_json(&app, "GET", "/admin/questions?page=3", None, None).await).await;
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_question_publication_date() {
    let (app, state) = test_app(Config::default()).await;
    let question = create_question(&state, "Scheduled", 10, &[]).await;
    let id = question.question.id;

    assert_eq!(get(&app, &format!("/polls/{}/", id)).await.status(), StatusCode::NOT_FOUND);

    let response = send_json(
        &app,
        "PUT",
        &format!("/admin/questions/{}", id),
        None,
        Some(json!({ "pub_date": Utc::now() - Duration::minutes(1) })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(get(&app, &format!("/polls/{}/", id)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_question_removes_choices() {
    let (app, state) = test_app(Config::default()).await;
    let question = create_question(&state, "Doomed", -1, &["A", "B"]).await;
    let id = question.question.id;

    let response = send_json(&app, "DELETE", &format!("/admin/questions/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(
        send_json(&app, "GET", &format!("/admin/choices?question_id={}", id), None, None).await,
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = send_json(&app, "GET", &format!("/admin/questions/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_choice_crud() {
    let (app, state) = test_app(Config::default()).await;
    let question = create_question(&state, "Crud", -1, &[]).await;

    let response = send_json(
        &app,
        "POST",
        "/admin/choices",
        None,
        Some(json!({ "question_id": question.question.id, "choice_text": "Maybe" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let choice_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        "PUT",
        &format!("/admin/choices/{}", choice_id),
        None,
        Some(json!({ "choice_text": "Definitely" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(send_json(&app, "GET", &format!("/admin/choices/{}", choice_id), None, None).await).await;
    assert_eq!(body["data"]["choice_text"], "Definitely");
    assert_eq!(body["data"]["votes"], 0);

    let response = send_json(&app, "DELETE", &format!("/admin/choices/{}", choice_id), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(&app, "GET", &format!("/admin/choices/{}", choice_id), None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_choice_rejects_negative_votes() {
    let (app, state) = test_app(Config::default()).await;
    let question = create_question(&state, "Votes", -1, &[]).await;

    let response = send_json(
        &app,
        "POST",
        "/admin/choices",
        None,
        Some(json!({ "question_id": question.question.id, "choice_text": "Nope", "votes": -3 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
