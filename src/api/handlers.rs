use crate::application::{
    ActionResponse, AdminService, ErrorResponse, RefundRequest, VerifyConfigurationRequest,
    MESSAGE_REFUND_ERROR,
};
use crate::domain::errors::DomainError;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Form,
};
use std::sync::Arc;
use tracing::{error, info};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub admin_service: Arc<AdminService>,
}

/// 校验Adyen API密钥
pub async fn verify_api_key(
    State(state): State<AppState>,
    payload: Result<Json<VerifyConfigurationRequest>, JsonRejection>,
) -> Json<ActionResponse> {
    info!("Received Adyen API key verification request");

    match payload {
        Ok(Json(request)) => Json(state.admin_service.verify_configuration(request).await),
        Err(rejection) => {
            error!("Invalid verification payload: {}", rejection.body_text());
            Json(ActionResponse::failure(rejection.body_text()))
        }
    }
}

/// 提交退款
pub async fn post_refund(
    State(state): State<AppState>,
    payload: Result<Form<RefundRequest>, FormRejection>,
) -> Response {
    let request = match payload {
        Ok(Form(request)) => request,
        Err(rejection) => {
            error!("Invalid refund payload: {}", rejection.body_text());
            RefundRequest::default()
        }
    };

    info!(
        "Received refund request for order: {}",
        request.order_id.as_deref().unwrap_or("-")
    );

    match state.admin_service.submit_refund(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e @ DomainError::OrderNotFound(_)) => {
            error!("{}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(DomainError::ValidationError(message) | DomainError::InvalidAmount(message)) => {
            error!("{}", message);
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(e) => {
            error!("Refund submission error: {}", e);
            (
                StatusCode::OK,
                Json(ActionResponse::failure(MESSAGE_REFUND_ERROR)),
            )
                .into_response()
        }
    }
}

/// 查询订单退款记录
pub async fn get_refunds(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    info!("Received refund listing request: {}", order_id);

    state
        .admin_service
        .list_refunds(&order_id)
        .await
        .map(|refunds| (StatusCode::OK, Json(refunds)))
        .map_err(|e| {
            error!("Refund listing error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("REFUND_LIST_ERROR".to_string(), e.to_string())),
            )
        })
}

/// 查询订单Adyen通知
pub async fn get_order_notifications(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Response {
    info!("Received notification listing request: {}", order_id);

    match state.admin_service.list_notifications(&order_id).await {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(e @ DomainError::OrderNotFound(_)) => {
            error!("{}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Notification listing error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "NOTIFICATION_LIST_ERROR".to_string(),
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// 健康检查
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
