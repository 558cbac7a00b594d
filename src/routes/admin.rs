use crate::{
    error::Result,
    models::{
        admin::{AdminChoiceQuery, AdminQuestionQuery, AdminQuestionRow},
        choice::{CreateChoiceRequest, UpdateChoiceRequest},
        question::{CreateQuestionRequest, UpdateQuestionRequest},
        ApiResponse, Choice, PaginatedResult, Question, QuestionWithChoices,
    },
    services::admin::EXTRA_CHOICE_SLOTS,
    state::AppState,
    utils::middleware::admin_auth_middleware,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/:id",
            get(get_question).put(update_question).delete(delete_question),
        )
        .route("/choices", get(list_choices).post(create_choice))
        .route(
            "/choices/:id",
            get(get_choice).put(update_choice).delete(delete_choice),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

/// 问题列表
/// GET /admin/questions
async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminQuestionQuery>,
) -> Result<Json<ApiResponse<PaginatedResult<AdminQuestionRow>>>> {
    debug!("Admin listing questions: {:?}", query);

    let result = state.admin_service.list_questions(query, Utc::now()).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// 创建问题及内联选项
/// POST /admin/questions
async fn create_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuestionWithChoices>>)> {
    debug!("Admin creating question: {}", request.question_text);

    let question = state.admin_service.create_question(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(question, "Question created successfully")),
    ))
}

/// GET /admin/questions/:id
async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
) -> Result<Json<Value>> {
    let question = state.admin_service.get_question(question_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "question": question,
            "extra_choice_slots": EXTRA_CHOICE_SLOTS,
        }
    })))
}

/// PUT /admin/questions/:id
async fn update_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
    Json(request): Json<UpdateQuestionRequest>,
) -> Result<Json<ApiResponse<Question>>> {
    debug!("Admin updating question: {}", question_id);

    let question = state.admin_service.update_question(question_id, request).await?;
    Ok(Json(ApiResponse::success_with_message(question, "Question updated successfully")))
}

/// DELETE /admin/questions/:id
async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i64>,
) -> Result<Json<Value>> {
    debug!("Admin deleting question: {}", question_id);

    state.admin_service.delete_question(question_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Question deleted successfully"
    })))
}

/// GET /admin/choices
async fn list_choices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminChoiceQuery>,
) -> Result<Json<ApiResponse<Vec<Choice>>>> {
    let choices = state.admin_service.list_choices(query.question_id).await?;
    Ok(Json(ApiResponse::success(choices)))
}

/// POST /admin/choices
async fn create_choice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateChoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Choice>>)> {
    debug!("Admin creating choice for question: {}", request.question_id);

    let choice = state.admin_service.create_choice(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(choice, "Choice created successfully")),
    ))
}

/// GET /admin/choices/:id
async fn get_choice(
    State(state): State<Arc<AppState>>,
    Path(choice_id): Path<i64>,
) -> Result<Json<ApiResponse<Choice>>> {
    let choice = state.admin_service.get_choice(choice_id).await?;
    Ok(Json(ApiResponse::success(choice)))
}

/// PUT /admin/choices/:id
async fn update_choice(
    State(state): State<Arc<AppState>>,
    Path(choice_id): Path<i64>,
    Json(request): Json<UpdateChoiceRequest>,
) -> Result<Json<ApiResponse<Choice>>> {
    debug!("Admin updating choice: {}", choice_id);

    let choice = state.admin_service.update_choice(choice_id, request).await?;
    Ok(Json(ApiResponse::success_with_message(choice, "Choice updated successfully")))
}

/// DELETE /admin/choices/:id
async fn delete_choice(
    State(state): State<Arc<AppState>>,
    Path(choice_id): Path<i64>,
) -> Result<Json<Value>> {
    debug!("Admin deleting choice: {}", choice_id);

    state.admin_service.delete_choice(choice_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Choice deleted successfully"
    })))
}
