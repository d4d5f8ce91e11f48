// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::machine::{Machine, MachineStatus};
use crate::domain::repositories::machine_repository::MachineRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::machine;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

/// 机器仓库实现
///
/// 基于SeaORM实现的机器注册表。状态写入不在这里：机器
/// 状态由分配仓库的复合操作独占维护。
#[derive(Clone)]
pub struct MachineRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl MachineRepositoryImpl {
    /// 创建新的机器仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<machine::Model> for Machine {
    fn from(model: machine::Model) -> Self {
        Self {
            id: model.id,
            machine_number: model.machine_number,
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl MachineRepository for MachineRepositoryImpl {
    async fn create(&self, machine_number: &str) -> Result<Machine, RepositoryError> {
        let txn = self.db.begin().await?;

        let taken = machine::Entity::find()
            .filter(machine::Column::MachineNumber.eq(machine_number))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "machine number {} already registered",
                machine_number
            )));
        }

        let now = Utc::now().fixed_offset();
        let model = machine::ActiveModel {
            machine_number: Set(machine_number.to_string()),
            status: Set(MachineStatus::Available.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        txn.commit().await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Machine>, RepositoryError> {
        let model = machine::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Machine>, RepositoryError> {
        let models = machine::Entity::find()
            .order_by_asc(machine::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_status(&self, status: MachineStatus) -> Result<u64, RepositoryError> {
        let count = machine::Entity::find()
            .filter(machine::Column::Status.eq(status.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
