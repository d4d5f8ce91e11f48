// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::dashboard_service::DashboardService;
use crate::workers::worker::{Worker, WorkerError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error};

/// 看板广播工作器
///
/// 固定间隔轮询看板快照并发布到广播通道，WebSocket处理器
/// 的订阅者把快照转发给各个看板前端。纯只读轮询，与核心
/// 写路径完全解耦；单次失败记录日志后继续下一轮，广播循环
/// 永不因瞬时故障退出。
pub struct DashboardBroadcastWorker {
    dashboard: Arc<DashboardService>,
    live_tx: broadcast::Sender<String>,
    interval: Duration,
}

impl DashboardBroadcastWorker {
    /// 创建新的广播工作器实例
    pub fn new(
        dashboard: Arc<DashboardService>,
        live_tx: broadcast::Sender<String>,
        interval: Duration,
    ) -> Self {
        Self {
            dashboard,
            live_tx,
            interval,
        }
    }
}

#[async_trait]
impl Worker for DashboardBroadcastWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;

            let snapshot = match self.dashboard.snapshot().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("Dashboard snapshot failed: {}", e);
                    continue;
                }
            };

            match serde_json::to_string(&snapshot) {
                Ok(payload) => {
                    // 没有订阅者时send返回Err，属正常情况
                    let viewers = self.live_tx.send(payload).unwrap_or(0);
                    debug!("Dashboard update sent to {} viewers", viewers);
                }
                Err(e) => error!("Failed to serialize dashboard snapshot: {}", e),
            }
        }
    }

    fn name(&self) -> &str {
        "dashboard-broadcast"
    }
}
