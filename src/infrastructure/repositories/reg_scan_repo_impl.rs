// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::RegScan;
use crate::domain::repositories::reg_scan_repository::RegScanRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::reg_scan;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// 登记扫描仓库实现
///
/// 基于SeaORM实现的登记台扫描缓冲。
#[derive(Clone)]
pub struct RegScanRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RegScanRepositoryImpl {
    /// 创建新的登记扫描仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<reg_scan::Model> for RegScan {
    fn from(model: reg_scan::Model) -> Self {
        Self {
            id: model.id,
            rfid: model.rfid,
            scanned_at: model.scanned_at,
        }
    }
}

#[async_trait]
impl RegScanRepository for RegScanRepositoryImpl {
    async fn record(&self, rfid: &str) -> Result<RegScan, RepositoryError> {
        let model = reg_scan::ActiveModel {
            rfid: Set(rfid.to_string()),
            scanned_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn latest_within(&self, max_age: Duration) -> Result<Option<RegScan>, RepositoryError> {
        let threshold = Utc::now() - max_age;
        let model = reg_scan::Entity::find()
            .filter(reg_scan::Column::ScannedAt.gte(threshold.fixed_offset()))
            .order_by_desc(reg_scan::Column::ScannedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }
}
