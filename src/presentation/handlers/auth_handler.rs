// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::auth_request::{
    AppLoginDto, LoginDto, RegisterUserDto, UpdatePasswordDto, UpdateUserDto,
};
use crate::config::settings::Settings;
use crate::domain::models::user::UserRole;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::user_repository::{NewUser, UserRepository};
use crate::domain::services::CoreError;
use crate::presentation::errors::AppError;
use crate::presentation::middleware::auth_middleware::issue_token;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// 注册后台用户
pub async fn register_user(
    Extension(users): Extension<Arc<dyn UserRepository>>,
    Json(payload): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role: UserRole = payload.role.parse().map_err(|_| {
        CoreError::Validation(format!(
            "invalid role {}, allowed roles are admin, manager, employee, Cutting, Sewing, Quality control, Packing",
            payload.role
        ))
    })?;

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = users
        .create(NewUser {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password_hash,
            role,
            employee_id: payload.employee_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": user,
        })),
    ))
}

/// 后台登录
pub async fn login(
    Extension(users): Extension<Arc<dyn UserRepository>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let Some(user) = users.find_by_email(payload.email.trim()).await? else {
        warn!("Login failed for {}: no such user", payload.email);
        return Err(AppError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    };

    let matches = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !matches {
        warn!("Login failed for {}: password mismatch", payload.email);
        return Err(AppError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    let token = issue_token(
        &user,
        &settings.auth.jwt_secret,
        settings.auth.token_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("Login successful for {}", user.email);
    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        },
    })))
}

/// 移动端登录
///
/// 账户必须关联一名员工；响应同时带上员工信息供终端展示。
pub async fn app_login(
    Extension(users): Extension<Arc<dyn UserRepository>>,
    Extension(employees): Extension<Arc<dyn EmployeeRepository>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<AppLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let Some(user) = users.find_by_email(payload.username.trim()).await? else {
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    };

    let matches = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !matches {
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    }

    let Some(employee_id) = user.employee_id else {
        return Err(CoreError::NotFound("employee account link".to_string()).into());
    };
    let employee = employees
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("employee".to_string()))?;

    let token = issue_token(
        &user,
        &settings.auth.jwt_secret,
        settings.auth.token_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("App login successful for {}", user.email);
    Ok(Json(json!({
        "message": "App login successful",
        "token": token,
        "user": {
            "id": user.id,
            "name": user.name,
            "role": user.role,
        },
        "employee": {
            "id": employee.id,
            "name": employee.name,
            "rfid": employee.rfid,
        },
    })))
}

/// 获取全部用户
pub async fn list_users(
    Extension(users): Extension<Arc<dyn UserRepository>>,
) -> Result<impl IntoResponse, AppError> {
    let users = users.list().await?;
    Ok(Json(users))
}

/// 更新用户资料
pub async fn update_user(
    Path(id): Path<i32>,
    Extension(users): Extension<Arc<dyn UserRepository>>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let role = match payload.role.as_deref() {
        Some(role) => Some(role.parse::<UserRole>().map_err(|_| {
            CoreError::Validation(format!("invalid role {}", role))
        })?),
        None => None,
    };

    let user = users
        .update_profile(
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            role,
        )
        .await
        .map_err(|e| CoreError::from_repo(e, "user"))?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": user,
    })))
}

/// 删除用户
pub async fn delete_user(
    Path(id): Path<i32>,
    Extension(users): Extension<Arc<dyn UserRepository>>,
) -> Result<impl IntoResponse, AppError> {
    users
        .delete(id)
        .await
        .map_err(|e| CoreError::from_repo(e, "user"))?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// 重设用户密码
pub async fn update_password(
    Path(id): Path<i32>,
    Extension(users): Extension<Arc<dyn UserRepository>>,
    Json(payload): Json<UpdatePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let password_hash = bcrypt::hash(&payload.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    users
        .set_password_hash(id, &password_hash)
        .await
        .map_err(|e| CoreError::from_repo(e, "user"))?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
