// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::allocation_request::{AssignMachineDto, MachineIdDto};
use crate::domain::services::allocation_service::AllocationService;
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

/// 获取全部存活分配
pub async fn list_allocations(
    Extension(service): Extension<Arc<AllocationService>>,
) -> Result<impl IntoResponse, AppError> {
    let allocations = service.list_live().await?;
    Ok(Json(allocations))
}

/// 将机器分配到订单工序
pub async fn assign_machine(
    Extension(service): Extension<Arc<AllocationService>>,
    Json(payload): Json<AssignMachineDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let allocation = service
        .assign(payload.order_id, payload.step.trim(), payload.machine_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Machine assigned successfully",
            "allocation": allocation,
        })),
    ))
}

/// 释放机器
///
/// 机器存活分配下仍有未完成任务时返回409，机器状态不变。
pub async fn free_machine(
    Extension(service): Extension<Arc<AllocationService>>,
    Json(payload): Json<MachineIdDto>,
) -> Result<impl IntoResponse, AppError> {
    service.free(payload.machine_id).await?;

    Ok(Json(json!({
        "message": format!("Machine {} is now free and ready to use", payload.machine_id),
    })))
}

/// 对账机器状态
///
/// 幂等修复操作：从机器当前分配下最新任务重新推导状态，
/// 必要时释放机器。
pub async fn reconcile_machine(
    Extension(service): Extension<Arc<AllocationService>>,
    Json(payload): Json<MachineIdDto>,
) -> Result<impl IntoResponse, AppError> {
    let status = service.reconcile_machine_status(payload.machine_id).await?;

    Ok(Json(json!({
        "machine_id": payload.machine_id,
        "status": status.to_string(),
    })))
}

/// 删除分配及其全部任务
pub async fn delete_allocation(
    Path(id): Path<i32>,
    Extension(service): Extension<Arc<AllocationService>>,
) -> Result<impl IntoResponse, AppError> {
    service.delete(id).await?;
    Ok(Json(json!({ "message": "Allocation deleted successfully" })))
}
