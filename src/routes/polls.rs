use crate::{
    error::{AppError, Result},
    models::choice::VoteForm,
    state::AppState,
    utils::templates::{DETAIL, INDEX, RESULTS},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/polls/", get(index))
        .route("/polls/:question_id/", get(detail))
        .route("/polls/:question_id/results/", get(results))
        .route("/polls/:question_id/vote/", post(vote))
}

/// 最新发布的问题列表
/// GET /polls/
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let latest_question_list = state
        .poll_service
        .published_questions(Utc::now(), Some(state.index_page_size()))
        .await?;

    debug!("Rendering index with {} questions", latest_question_list.len());

    let html = state.templates.render(
        INDEX,
        &json!({ "latest_question_list": latest_question_list }),
    )?;
    Ok(Html(html))
}

/// 问题详情与投票表单
/// GET /polls/:question_id/
async fn detail(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
) -> Result<Html<String>> {
    let question = state
        .poll_service
        .published_question(question_id, Utc::now())
        .await?;

    let html = state.templates.render(
        DETAIL,
        &json!({ "question": question, "error_message": null }),
    )?;
    Ok(Html(html))
}

/// 投票结果
/// GET /polls/:question_id/results/
async fn results(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
) -> Result<Html<String>> {
    let question = state
        .poll_service
        .published_question(question_id, Utc::now())
        .await?;
    let total_votes = question.total_votes();

    let html = state.templates.render(
        RESULTS,
        &json!({ "question": question, "total_votes": total_votes }),
    )?;
    Ok(Html(html))
}

/// 投票；成功后跳转到结果页，无效选项时带错误信息重新渲染表单
/// POST /polls/:question_id/vote/
async fn vote(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
    Form(form): Form<VoteForm>,
) -> Result<Response> {
    let now = Utc::now();

    match state.poll_service.vote(question_id, form.choice_id(), now).await {
        Ok(choice) => {
            debug!("Vote accepted for choice {}", choice.id);
            Ok(Redirect::to(&format!("/polls/{}/results/", question_id)).into_response())
        }
        Err(AppError::InvalidVote(error_message)) => {
            let question = state.poll_service.published_question(question_id, now).await?;
            let html = state.templates.render(
                DETAIL,
                &json!({ "question": question, "error_message": error_message }),
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}
