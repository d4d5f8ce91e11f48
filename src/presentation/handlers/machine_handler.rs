// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::allocation_request::CreateMachineDto;
use crate::domain::repositories::machine_repository::MachineRepository;
use crate::presentation::errors::AppError;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 登记新机器
pub async fn create_machine(
    Extension(machines): Extension<Arc<dyn MachineRepository>>,
    Json(payload): Json<CreateMachineDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let machine = machines.create(payload.machine_number.trim()).await?;
    Ok((StatusCode::CREATED, Json(machine)))
}

/// 获取全部机器
pub async fn list_machines(
    Extension(machines): Extension<Arc<dyn MachineRepository>>,
) -> Result<impl IntoResponse, AppError> {
    let machines = machines.list().await?;
    Ok(Json(machines))
}
