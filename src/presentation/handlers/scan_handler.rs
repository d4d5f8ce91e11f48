// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::employee_request::RegScanDto;
use crate::application::dto::scan_request::ScanDto;
use crate::domain::models::scan::ScanOutcome;
use crate::domain::repositories::reg_scan_repository::RegScanRepository;
use crate::domain::services::scan_service::ScanService;
use crate::domain::services::CoreError;
use crate::presentation::errors::AppError;
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Duration;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 登记台扫描的时效窗口
const REG_SCAN_MAX_AGE_MINUTES: i64 = 3;

/// 处理一次工牌扫描
///
/// 读卡器上报RFID标签，核心状态机选择任务、递增计数并
/// 驱动级联。设备固件期望2xx响应，"无剩余工作"也返回200。
pub async fn process_scan(
    Extension(service): Extension<Arc<ScanService>>,
    Json(payload): Json<ScanDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    match service.process(&payload.rfid).await? {
        ScanOutcome::Recorded {
            employee_name,
            order_id,
            step,
            completed,
            target,
            status,
        } => Ok(Json(json!({
            "message": "Scan recorded successfully",
            "employee_name": employee_name,
            "order_id": order_id,
            "step": step,
            "completed": completed,
            "target": target,
            "status": status,
        }))),
        ScanOutcome::NoRemainingWork { employee_name } => Ok(Json(json!({
            "message": format!("No remaining work for {}", employee_name),
            "employee_name": employee_name,
        }))),
    }
}

/// 记录一次登记台扫描
pub async fn record_reg_scan(
    Extension(reg_scans): Extension<Arc<dyn RegScanRepository>>,
    Json(payload): Json<RegScanDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    reg_scans.record(payload.rfid.trim()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "RFID scan recorded successfully" })),
    ))
}

/// 获取时效窗口内最近一次登记台扫描
pub async fn latest_reg_scan(
    Extension(reg_scans): Extension<Arc<dyn RegScanRepository>>,
) -> Result<impl IntoResponse, AppError> {
    let scan = reg_scans
        .latest_within(Duration::minutes(REG_SCAN_MAX_AGE_MINUTES))
        .await?
        .ok_or_else(|| CoreError::NotFound("recent scan".to_string()))?;

    Ok(Json(json!({
        "rfid": scan.rfid,
        "scanned_at": scan.scanned_at,
    })))
}
