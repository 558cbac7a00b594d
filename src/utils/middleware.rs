use crate::{error::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    headers::{authorization::Bearer, Authorization},
    http::Request,
    middleware::Next,
    response::Response,
    TypedHeader,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// 管理接口认证中间件
/// 配置了 ADMIN_TOKEN 时要求 `Authorization: Bearer <token>`
pub async fn admin_auth_middleware(
    State(app_state): State<Arc<AppState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request<Body>,
    next: Next<Body>,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let expected = match app_state.config.admin_token.as_deref() {
        Some(token) => token,
        None => {
            debug!("Admin token not configured, allowing request to: {}", path);
            return Ok(next.run(request).await);
        }
    };

    match bearer {
        Some(TypedHeader(Authorization(bearer))) if tokens_match(bearer.token(), expected) => {
            debug!("Admin request authorized: {}", path);
            Ok(next.run(request).await)
        }
        Some(_) => {
            warn!("Rejected admin request with invalid token: {}", path);
            Err(AppError::unauthorized("Invalid admin token"))
        }
        None => {
            warn!("Rejected admin request without token: {}", path);
            Err(AppError::unauthorized("Admin token required"))
        }
    }
}

/// 先取 SHA-256 摘要再做定长比较，耗时与令牌内容和长度无关
fn tokens_match(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    provided.ct_eq(&expected).into()
}
