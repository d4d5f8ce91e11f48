// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::task_request::AssignTaskDto;
use crate::domain::models::task::TaskDuration;
use crate::domain::repositories::task_repository::TaskDetail;
use crate::domain::services::task_service::TaskService;
use crate::domain::services::CoreError;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

fn detail_row(detail: &TaskDetail, include_rfid: bool) -> Value {
    let mut employee = json!({
        "id": detail.task.employee_id,
        "name": detail.employee_name,
    });
    if include_rfid {
        employee["rfid"] = json!(detail.employee_rfid);
    }

    json!({
        "id": detail.task.id,
        "employee": employee,
        "machine_allocation": {
            "id": detail.task.machine_allocation_id,
            "order_id": detail.order_id,
            "machine_id": detail.machine_id,
            "step": detail.step,
        },
        "target": detail.task.target,
        "completed": detail.task.completed,
        "duration": detail.task.duration.to_string(),
        "status": detail.task.status,
    })
}

/// 指派或改派任务
///
/// 分配上已有任务时改派：既有任务快照写入历史账本，
/// 已完成计数保留。
pub async fn assign_task(
    Extension(service): Extension<Arc<TaskService>>,
    Json(payload): Json<AssignTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let duration: TaskDuration = payload
        .duration
        .parse()
        .map_err(|_| CoreError::Validation("duration must be \"One Day\" or \"Multiple Days\"".to_string()))?;

    let (task, created) = service
        .assign_or_update(
            payload.employee_id,
            payload.machine_allocation_id,
            payload.target,
            duration,
        )
        .await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Task assigned successfully")
    } else {
        (StatusCode::OK, "Task updated successfully")
    };

    Ok((status, Json(json!({ "message": message, "task": task }))))
}

/// 获取全部任务及其员工与分配上下文
pub async fn list_tasks(
    Extension(service): Extension<Arc<TaskService>>,
) -> Result<impl IntoResponse, AppError> {
    let details = service.list_detailed().await?;
    let rows: Vec<Value> = details.iter().map(|d| detail_row(d, false)).collect();
    Ok(Json(rows))
}

/// 工作跟踪：按指派时间排列的任务列表（含员工RFID）
pub async fn list_assigned_tasks(
    Extension(service): Extension<Arc<TaskService>>,
) -> Result<impl IntoResponse, AppError> {
    let details = service.list_detailed().await?;
    let rows: Vec<Value> = details.iter().map(|d| detail_row(d, true)).collect();
    Ok(Json(rows))
}

/// 人工将任务标记为已完成，然后对机器做对账
pub async fn complete_task(
    Path(task_id): Path<i32>,
    Extension(service): Extension<Arc<TaskService>>,
) -> Result<impl IntoResponse, AppError> {
    service.complete(task_id).await?;
    Ok(Json(json!({
        "message": "Task completed, machine status reconciled",
    })))
}

/// 删除任务（先留痕）
pub async fn delete_task(
    Path(task_id): Path<i32>,
    Extension(service): Extension<Arc<TaskService>>,
) -> Result<impl IntoResponse, AppError> {
    service.delete(task_id).await?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
