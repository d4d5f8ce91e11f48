// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::services::CoreError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 核心错误按类别一一映射为HTTP状态码：校验失败400、
/// 未找到404、冲突409、存储瞬时故障503（可重试）。
#[derive(Debug)]
pub enum AppError {
    /// 核心操作错误
    Core(CoreError),
    /// 认证失败
    Unauthorized(String),
    /// 其余内部错误，细节只记录日志
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(CoreError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            AppError::Core(CoreError::NotFound(entity)) => {
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            AppError::Core(CoreError::Conflict(message)) => (StatusCode::CONFLICT, message),
            AppError::Core(CoreError::Transient(message)) => {
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Core(err)
    }
}

impl From<crate::domain::repositories::RepositoryError> for AppError {
    fn from(err: crate::domain::repositories::RepositoryError) -> Self {
        AppError::Core(err.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(err.to_string()))
    }
}
