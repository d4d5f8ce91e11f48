// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::employee_request::RegisterEmployeeDto;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::history_repository::HistoryRepository;
use crate::domain::services::CoreError;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 获取全部员工
pub async fn list_employees(
    Extension(employees): Extension<Arc<dyn EmployeeRepository>>,
) -> Result<impl IntoResponse, AppError> {
    let employees = employees.list().await?;
    Ok(Json(employees))
}

/// 登记新员工
///
/// RFID一经登记不可变更：重复登记同一标签或手机号返回409，
/// 绝不覆盖已有员工。
pub async fn register_employee(
    Extension(employees): Extension<Arc<dyn EmployeeRepository>>,
    Json(payload): Json<RegisterEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = employees
        .create(
            payload.name.trim(),
            payload.rfid.trim(),
            payload.mobile.as_deref().map(str::trim),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Employee registered successfully",
            "employee": employee,
        })),
    ))
}

/// 删除员工
///
/// 先级联删除其关联的登录账户，再删除员工本身。
pub async fn delete_employee(
    Path(id): Path<i32>,
    Extension(employees): Extension<Arc<dyn EmployeeRepository>>,
) -> Result<impl IntoResponse, AppError> {
    employees
        .delete_cascade(id)
        .await
        .map_err(|e| CoreError::from_repo(e, "employee"))?;

    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

/// 查询员工的任务历史账本
pub async fn employee_history(
    Path(employee_id): Path<i32>,
    Extension(employees): Extension<Arc<dyn EmployeeRepository>>,
    Extension(histories): Extension<Arc<dyn HistoryRepository>>,
) -> Result<impl IntoResponse, AppError> {
    employees
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("employee".to_string()))?;

    let history = histories.list_by_employee(employee_id).await?;
    Ok(Json(json!({ "history": history })))
}
