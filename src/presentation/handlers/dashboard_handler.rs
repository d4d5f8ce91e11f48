// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::dashboard_service::DashboardService;
use crate::presentation::errors::AppError;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// 办公室看板
pub async fn office_dashboard(
    Extension(service): Extension<Arc<DashboardService>>,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = service.office().await?;
    Ok(Json(dashboard))
}

/// 员工看板
pub async fn employee_dashboard(
    Path(employee_id): Path<i32>,
    Extension(service): Extension<Arc<DashboardService>>,
) -> Result<impl IntoResponse, AppError> {
    match service.employee(employee_id).await? {
        Some(dashboard) => Ok(Json(json!(dashboard))),
        None => Ok(Json(json!({ "message": "No active tasks assigned" }))),
    }
}

/// 看板实时推送
///
/// 升级为WebSocket后订阅广播通道，把轮询器发布的计数快照
/// 原样转发给连接的看板。连接注册表就是广播通道的订阅者
/// 集合，核心操作不持有任何传输层连接。
pub async fn live_updates(
    ws: WebSocketUpgrade,
    Extension(live_tx): Extension<broadcast::Sender<String>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| forward_updates(socket, live_tx.subscribe()))
}

async fn forward_updates(mut socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    debug!("Dashboard viewer connected");
    loop {
        match rx.recv().await {
            Ok(update) => {
                if socket.send(Message::Text(update.into())).await.is_err() {
                    break;
                }
            }
            // 落后于广播时跳到最新快照继续
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    debug!("Dashboard viewer disconnected");
}
