// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::order_request::{CreateOrderDto, UpdateOrderDto, UpdateStageDto};
use crate::domain::models::order::ProductionStage;
use crate::domain::services::order_service::OrderService;
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

/// 获取全部订单（状态为当前派生值）
pub async fn list_orders(
    Extension(service): Extension<Arc<OrderService>>,
) -> Result<impl IntoResponse, AppError> {
    let orders = service.list().await?;
    Ok(Json(orders))
}

/// 创建订单及其工序
pub async fn create_order(
    Extension(service): Extension<Arc<OrderService>>,
    Json(payload): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let steps: Vec<String> = payload.steps.iter().map(|s| s.name.clone()).collect();
    let order = service
        .create(
            payload.order_number.trim(),
            payload.product.trim(),
            payload.quantity,
            &steps,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order and steps added successfully",
            "order": order,
        })),
    ))
}

/// 获取订单的工序列表
pub async fn order_steps(
    Path(order_id): Path<i32>,
    Extension(service): Extension<Arc<OrderService>>,
) -> Result<impl IntoResponse, AppError> {
    let steps = service.steps(order_id).await?;
    Ok(Json(steps))
}

/// 全部订单的进度视图（每工序的机器与完成件数）
pub async fn order_progress(
    Extension(service): Extension<Arc<OrderService>>,
) -> Result<impl IntoResponse, AppError> {
    let progress = service.progress().await?;
    Ok(Json(progress))
}

/// 全部订单及其机器指派与任务
pub async fn assigned_machines(
    Extension(service): Extension<Arc<OrderService>>,
) -> Result<impl IntoResponse, AppError> {
    let orders = service.assigned_machines().await?;

    let rows: Vec<Value> = orders
        .into_iter()
        .map(|entry| {
            let allocations: Vec<Value> = entry
                .allocations
                .into_iter()
                .map(|assignment| {
                    let task = assignment.task.map(|detail| {
                        json!({
                            "id": detail.task.id,
                            "employee_id": detail.task.employee_id,
                            "employee_name": detail.employee_name,
                            "target": detail.task.target,
                            "completed": detail.task.completed,
                            "status": detail.task.status,
                        })
                    });
                    json!({
                        "id": assignment.allocation.id,
                        "machine_id": assignment.allocation.machine_id,
                        "step": assignment.allocation.step,
                        "status": assignment.allocation.status,
                        "task": task,
                    })
                })
                .collect();

            json!({
                "id": entry.order.id,
                "order_number": entry.order.order_number,
                "product": entry.order.product,
                "quantity": entry.order.quantity,
                "allocations": allocations,
            })
        })
        .collect();

    Ok(Json(rows))
}

/// 更新订单的产品与目标件数
pub async fn update_order(
    Path(order_id): Path<i32>,
    Extension(service): Extension<Arc<OrderService>>,
    Json(payload): Json<UpdateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = service
        .update_details(order_id, payload.product.trim(), payload.quantity)
        .await?;

    Ok(Json(json!({
        "message": "Order updated successfully",
        "order": order,
    })))
}

/// 设置订单当前生产阶段
///
/// 外部阶段流转操作：校验阶段取值合法，不触发核心级联。
pub async fn update_stage(
    Extension(service): Extension<Arc<OrderService>>,
    Json(payload): Json<UpdateStageDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let stage: ProductionStage = payload.current_stage.parse().map_err(|_| {
        CoreError::Validation(format!(
            "unknown production stage: {}",
            payload.current_stage
        ))
    })?;

    let order = service.set_stage(payload.id, stage).await?;

    Ok(Json(json!({
        "message": "Stage updated successfully",
        "order": order,
    })))
}

/// 删除订单及其全部下游记录
pub async fn delete_order(
    Path(order_id): Path<i32>,
    Extension(service): Extension<Arc<OrderService>>,
) -> Result<impl IntoResponse, AppError> {
    service.delete(order_id).await?;
    Ok(Json(json!({ "message": "Order deleted successfully" })))
}
