// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::RegScan;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use chrono::Duration;

/// 登记扫描仓库特质
///
/// 登记台读卡器的扫描缓冲：写入扫到的标签，登记界面取
/// 时效窗口内最近的一次扫描来配对新员工。
#[async_trait]
pub trait RegScanRepository: Send + Sync {
    /// 记录一次登记台扫描
    async fn record(&self, rfid: &str) -> Result<RegScan, RepositoryError>;
    /// 获取时效窗口内最近一次扫描
    async fn latest_within(&self, max_age: Duration) -> Result<Option<RegScan>, RepositoryError>;
}
