// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::history::ActionType;
use crate::domain::models::machine::MachineStatus;
use crate::domain::models::order::{Order, OrderStep, ProductionStage};
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    employee_task, machine_allocation, order, order_step,
};
use crate::infrastructure::repositories::allocation_repo_impl::set_machine_status;
use crate::infrastructure::repositories::history_repo_impl::snapshot_task;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

/// 订单仓库实现
///
/// 基于SeaORM实现的订单与工序目录。订单删除是显式级联：
/// 任务先留痕再删除、分配删除、机器释放、工序与订单删除，
/// 全部在一个事务内完成。
#[derive(Clone)]
pub struct OrderRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl OrderRepositoryImpl {
    /// 创建新的订单仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<order::Model> for Order {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            order_number: model.order_number,
            product: model.product,
            quantity: model.quantity,
            status: model.status.parse().unwrap_or_default(),
            current_stage: model.current_stage.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<order_step::Model> for OrderStep {
    fn from(model: order_step::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            name: model.name,
        }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create_with_steps(
        &self,
        order_number: &str,
        product: &str,
        quantity: i32,
        steps: &[String],
    ) -> Result<Order, RepositoryError> {
        let txn = self.db.begin().await?;

        let taken = order::Entity::find()
            .filter(order::Column::OrderNumber.eq(order_number))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "order number {} already exists",
                order_number
            )));
        }

        let now = Utc::now().fixed_offset();
        let model = order::ActiveModel {
            order_number: Set(order_number.to_string()),
            product: Set(product.to_string()),
            quantity: Set(quantity),
            status: Set("Pending".to_string()),
            current_stage: Set(ProductionStage::Cutting.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        for step in steps {
            let step_model = order_step::ActiveModel {
                order_id: Set(inserted.id),
                name: Set(step.clone()),
                ..Default::default()
            };
            step_model.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let model = order::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let models = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_steps(&self, order_id: i32) -> Result<Vec<OrderStep>, RepositoryError> {
        let models = order_step::Entity::find()
            .filter(order_step::Column::OrderId.eq(order_id))
            .order_by_asc(order_step::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_details(
        &self,
        id: i32,
        product: &str,
        quantity: i32,
    ) -> Result<Order, RepositoryError> {
        let Some(model) = order::Entity::find_by_id(id).one(self.db.as_ref()).await? else {
            return Err(RepositoryError::NotFound);
        };

        let mut active: order::ActiveModel = model.into();
        active.product = Set(product.to_string());
        active.quantity = Set(quantity);
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn set_stage(&self, id: i32, stage: ProductionStage) -> Result<Order, RepositoryError> {
        let Some(model) = order::Entity::find_by_id(id).one(self.db.as_ref()).await? else {
            return Err(RepositoryError::NotFound);
        };

        let mut active: order::ActiveModel = model.into();
        active.current_stage = Set(stage.to_string());
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(order::Entity::find().count(self.db.as_ref()).await?)
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(_) = order::Entity::find_by_id(id).one(&txn).await? else {
            return Err(RepositoryError::NotFound);
        };

        let allocations = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::OrderId.eq(id))
            .all(&txn)
            .await?;

        for allocation in &allocations {
            let tasks = employee_task::Entity::find()
                .filter(employee_task::Column::MachineAllocationId.eq(allocation.id))
                .all(&txn)
                .await?;
            for task in &tasks {
                snapshot_task(&txn, task, ActionType::Delete).await?;
            }
            employee_task::Entity::delete_many()
                .filter(employee_task::Column::MachineAllocationId.eq(allocation.id))
                .exec(&txn)
                .await?;

            set_machine_status(&txn, allocation.machine_id, MachineStatus::Available).await?;
        }

        machine_allocation::Entity::delete_many()
            .filter(machine_allocation::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        order_step::Entity::delete_many()
            .filter(order_step::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        order::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        info!("Order {} deleted with allocations and tasks", id);
        Ok(())
    }
}
