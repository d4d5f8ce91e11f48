// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::allocation::Allocation;
use crate::domain::models::history::ActionType;
use crate::domain::models::machine::MachineStatus;
use crate::domain::models::task::WorkStatus;
use crate::domain::repositories::allocation_repository::AllocationRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{employee_task, machine, machine_allocation};
use crate::infrastructure::repositories::history_repo_impl::snapshot_task;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;

/// 分配仓库实现
///
/// 基于SeaORM实现的机器分配数据访问层。复合操作在单个
/// 事务内重查谓词并写入，机器状态的副作用只发生在这里。
#[derive(Clone)]
pub struct AllocationRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AllocationRepositoryImpl {
    /// 创建新的分配仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<machine_allocation::Model> for Allocation {
    fn from(model: machine_allocation::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            machine_id: model.machine_id,
            step: model.step,
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 在给定连接/事务上写机器状态
pub(crate) async fn set_machine_status<C: ConnectionTrait>(
    conn: &C,
    machine_id: i32,
    status: MachineStatus,
) -> Result<(), DbErr> {
    machine::Entity::update_many()
        .col_expr(machine::Column::Status, Expr::value(status.to_string()))
        .col_expr(
            machine::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(machine::Column::Id.eq(machine_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// 在给定连接/事务上把分配标记为已释放（保留行）
async fn mark_allocation_available<C: ConnectionTrait>(
    conn: &C,
    allocation_id: i32,
) -> Result<(), DbErr> {
    machine_allocation::Entity::update_many()
        .col_expr(
            machine_allocation::Column::Status,
            Expr::value(WorkStatus::Available.to_string()),
        )
        .col_expr(
            machine_allocation::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(machine_allocation::Column::Id.eq(allocation_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// 查找某机器的存活分配
async fn live_allocation_of<C: ConnectionTrait>(
    conn: &C,
    machine_id: i32,
) -> Result<Option<machine_allocation::Model>, DbErr> {
    machine_allocation::Entity::find()
        .filter(machine_allocation::Column::MachineId.eq(machine_id))
        .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
        .order_by_desc(machine_allocation::Column::CreatedAt)
        .one(conn)
        .await
}

/// 机器状态对账，唯一的权威例程
///
/// 所有需要"标记机器可用"的路径（人工对账接口、任务完成、
/// 扫描级联）都经由这里，不允许在别处复制这段逻辑。幂等：
/// 连续执行两次与执行一次结果相同。
pub(crate) async fn reconcile_machine_in_txn<C: ConnectionTrait>(
    conn: &C,
    machine_id: i32,
) -> Result<MachineStatus, DbErr> {
    let Some(allocation) = live_allocation_of(conn, machine_id).await? else {
        // 没有存活分配：机器强制空闲，顺带清理游离的分配行
        machine_allocation::Entity::update_many()
            .col_expr(
                machine_allocation::Column::Status,
                Expr::value(WorkStatus::Available.to_string()),
            )
            .filter(machine_allocation::Column::MachineId.eq(machine_id))
            .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
            .exec(conn)
            .await?;
        set_machine_status(conn, machine_id, MachineStatus::Available).await?;
        debug!("Machine {} reconciled to Available (no allocation)", machine_id);
        return Ok(MachineStatus::Available);
    };

    let latest_task = employee_task::Entity::find()
        .filter(employee_task::Column::MachineAllocationId.eq(allocation.id))
        .order_by_desc(employee_task::Column::CreatedAt)
        .one(conn)
        .await?;

    match latest_task {
        None => {
            mark_allocation_available(conn, allocation.id).await?;
            set_machine_status(conn, machine_id, MachineStatus::Available).await?;
            debug!("Machine {} reconciled to Available (no task)", machine_id);
            Ok(MachineStatus::Available)
        }
        Some(task) if task.completed >= task.target => {
            mark_allocation_available(conn, allocation.id).await?;
            set_machine_status(conn, machine_id, MachineStatus::Available).await?;
            debug!(
                "Machine {} reconciled to Available (task {} reached target)",
                machine_id, task.id
            );
            Ok(MachineStatus::Available)
        }
        Some(_) => {
            set_machine_status(conn, machine_id, MachineStatus::InUse).await?;
            Ok(MachineStatus::InUse)
        }
    }
}

#[async_trait]
impl AllocationRepository for AllocationRepositoryImpl {
    async fn assign_checked(
        &self,
        order_id: i32,
        step: &str,
        machine_id: i32,
    ) -> Result<Allocation, RepositoryError> {
        let txn = self.db.begin().await?;

        // 同一事务内重查唯一性谓词，防止并发分配双双通过检查
        let step_taken = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::OrderId.eq(order_id))
            .filter(machine_allocation::Column::Step.eq(step))
            .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
            .one(&txn)
            .await?;
        if let Some(existing) = step_taken {
            return Err(RepositoryError::Conflict(format!(
                "step {} of order {} already has machine {} assigned",
                step, order_id, existing.machine_id
            )));
        }

        let machine_taken = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::MachineId.eq(machine_id))
            .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
            .one(&txn)
            .await?;
        if let Some(existing) = machine_taken {
            return Err(RepositoryError::Conflict(format!(
                "machine {} is already assigned to order {}, step {}",
                machine_id, existing.order_id, existing.step
            )));
        }

        let now = Utc::now().fixed_offset();
        let model = machine_allocation::ActiveModel {
            order_id: Set(order_id),
            machine_id: Set(machine_id),
            step: Set(step.to_string()),
            status: Set(WorkStatus::Assigned.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        set_machine_status(&txn, machine_id, MachineStatus::InUse).await?;

        txn.commit().await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Allocation>, RepositoryError> {
        let model = machine_allocation::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_live(&self) -> Result<Vec<Allocation>, RepositoryError> {
        let models = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
            .order_by_asc(machine_allocation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_order(&self, order_id: i32) -> Result<Vec<Allocation>, RepositoryError> {
        let models = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::OrderId.eq(order_id))
            .order_by_asc(machine_allocation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_live_by_machine(
        &self,
        machine_id: i32,
    ) -> Result<Option<Allocation>, RepositoryError> {
        let model = live_allocation_of(self.db.as_ref(), machine_id).await?;
        Ok(model.map(Into::into))
    }

    async fn release_machine(&self, machine_id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(allocation) = live_allocation_of(&txn, machine_id).await? else {
            return Err(RepositoryError::NotFound);
        };

        // 存活分配下只要有任何非Completed任务就拒绝释放
        let pending = employee_task::Entity::find()
            .filter(employee_task::Column::MachineAllocationId.eq(allocation.id))
            .filter(employee_task::Column::Status.ne(WorkStatus::Completed.to_string()))
            .count(&txn)
            .await?;
        if pending > 0 {
            return Err(RepositoryError::Conflict(format!(
                "machine {} still has pending tasks",
                machine_id
            )));
        }

        mark_allocation_available(&txn, allocation.id).await?;
        set_machine_status(&txn, machine_id, MachineStatus::Available).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete_cascade(&self, allocation_id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(allocation) = machine_allocation::Entity::find_by_id(allocation_id)
            .one(&txn)
            .await?
        else {
            return Err(RepositoryError::NotFound);
        };

        // 每个任务先留痕再删除
        let tasks = employee_task::Entity::find()
            .filter(employee_task::Column::MachineAllocationId.eq(allocation_id))
            .all(&txn)
            .await?;
        for task in &tasks {
            snapshot_task(&txn, task, ActionType::Delete).await?;
        }

        employee_task::Entity::delete_many()
            .filter(employee_task::Column::MachineAllocationId.eq(allocation_id))
            .exec(&txn)
            .await?;

        machine_allocation::Entity::delete_by_id(allocation_id)
            .exec(&txn)
            .await?;

        set_machine_status(&txn, allocation.machine_id, MachineStatus::Available).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn reconcile_machine(&self, machine_id: i32) -> Result<MachineStatus, RepositoryError> {
        let txn = self.db.begin().await?;
        let status = reconcile_machine_in_txn(&txn, machine_id).await?;
        txn.commit().await?;
        Ok(status)
    }

    async fn count_live(&self) -> Result<u64, RepositoryError> {
        let count = machine_allocation::Entity::find()
            .filter(machine_allocation::Column::Status.ne(WorkStatus::Available.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
