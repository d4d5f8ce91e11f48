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

use crate::domain::models::history::ActionType;
use crate::domain::models::task::{select_scan_target, Task, TaskDuration, WorkStatus};
use crate::domain::repositories::task_repository::{ScanApplication, TaskDetail, TaskRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    employee, employee_task, machine_allocation, rfid_scan,
};
use crate::infrastructure::repositories::allocation_repo_impl::reconcile_machine_in_txn;
use crate::infrastructure::repositories::history_repo_impl::snapshot_task;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;

/// 任务仓库实现
///
/// 基于SeaORM实现的员工任务数据访问层。扫描落账、改派与
/// 删除是事务性复合操作：选择、递增、分配状态联动、历史
/// 留痕、机器对账与审计写入在同一事务内提交。
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<employee_task::Model> for Task {
    fn from(model: employee_task::Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            machine_allocation_id: model.machine_allocation_id,
            target: model.target,
            completed: model.completed,
            duration: model.duration.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 为任务模型装配详情视图（员工与分配上下文）
async fn detail_for<C: ConnectionTrait>(
    conn: &C,
    model: employee_task::Model,
) -> Result<TaskDetail, DbErr> {
    let employee = employee::Entity::find_by_id(model.employee_id)
        .one(conn)
        .await?;
    let allocation = machine_allocation::Entity::find_by_id(model.machine_allocation_id)
        .one(conn)
        .await?;

    let (employee_name, employee_rfid) = employee
        .map(|e| (e.name, e.rfid))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()));
    let (order_id, machine_id, step) = allocation
        .map(|a| (a.order_id, a.machine_id, a.step))
        .unwrap_or((0, 0, String::new()));

    Ok(TaskDetail {
        task: model.into(),
        employee_name,
        employee_rfid,
        order_id,
        machine_id,
        step,
    })
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn upsert_for_allocation(
        &self,
        employee_id: i32,
        allocation_id: i32,
        target: i32,
        duration: TaskDuration,
    ) -> Result<(Task, bool), RepositoryError> {
        let txn = self.db.begin().await?;
        let now = Utc::now().fixed_offset();

        let existing = employee_task::Entity::find()
            .filter(employee_task::Column::MachineAllocationId.eq(allocation_id))
            .one(&txn)
            .await?;

        let result = match existing {
            Some(previous) => {
                // 改派：先快照既有任务，completed与status原样保留
                snapshot_task(&txn, &previous, ActionType::Reassign).await?;

                let mut active: employee_task::ActiveModel = previous.into();
                active.employee_id = Set(employee_id);
                active.target = Set(target);
                active.duration = Set(duration.to_string());
                active.updated_at = Set(now);
                let updated = active.update(&txn).await?;
                (updated.into(), false)
            }
            None => {
                let model = employee_task::ActiveModel {
                    employee_id: Set(employee_id),
                    machine_allocation_id: Set(allocation_id),
                    target: Set(target),
                    completed: Set(0),
                    duration: Set(duration.to_string()),
                    status: Set(WorkStatus::Assigned.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let inserted = model.insert(&txn).await?;
                (inserted.into(), true)
            }
        };

        txn.commit().await?;
        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError> {
        let model = employee_task::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_employee_fifo(&self, employee_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let models = employee_task::Entity::find()
            .filter(employee_task::Column::EmployeeId.eq(employee_id))
            .order_by_asc(employee_task::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_detailed(&self) -> Result<Vec<TaskDetail>, RepositoryError> {
        let models = employee_task::Entity::find()
            .order_by_asc(employee_task::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            details.push(detail_for(self.db.as_ref(), model).await?);
        }
        Ok(details)
    }

    async fn list_open_detailed(&self) -> Result<Vec<TaskDetail>, RepositoryError> {
        let models = employee_task::Entity::find()
            .filter(
                employee_task::Column::Status.is_in([
                    WorkStatus::Assigned.to_string(),
                    WorkStatus::InProgress.to_string(),
                ]),
            )
            .order_by_asc(employee_task::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            details.push(detail_for(self.db.as_ref(), model).await?);
        }
        Ok(details)
    }

    async fn find_open_by_employee(
        &self,
        employee_id: i32,
    ) -> Result<Option<TaskDetail>, RepositoryError> {
        let model = employee_task::Entity::find()
            .filter(employee_task::Column::EmployeeId.eq(employee_id))
            .filter(employee_task::Column::Status.ne(WorkStatus::Completed.to_string()))
            .order_by_asc(employee_task::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        match model {
            Some(model) => Ok(Some(detail_for(self.db.as_ref(), model).await?)),
            None => Ok(None),
        }
    }

    async fn apply_scan(&self, employee_id: i32) -> Result<ScanApplication, RepositoryError> {
        let txn = self.db.begin().await?;

        // 事务内按创建时间升序取任务，选择与递增不会与并发扫描交错
        let models = employee_task::Entity::find()
            .filter(employee_task::Column::EmployeeId.eq(employee_id))
            .order_by_asc(employee_task::Column::CreatedAt)
            .all(&txn)
            .await?;

        let tasks: Vec<Task> = models.iter().cloned().map(Into::into).collect();
        let Some(index) = select_scan_target(&tasks) else {
            txn.commit().await?;
            return Ok(ScanApplication::NoRemainingCapacity);
        };
        let chosen = &models[index];

        let mut task: Task = chosen.clone().into();
        let status = task.apply_increment();
        let now = Utc::now().fixed_offset();

        let mut active: employee_task::ActiveModel = chosen.clone().into();
        active.completed = Set(task.completed);
        active.status = Set(status.to_string());
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        // 分配状态与任务同步，且先于机器对账写入
        let Some(allocation) =
            machine_allocation::Entity::find_by_id(chosen.machine_allocation_id)
                .one(&txn)
                .await?
        else {
            return Err(RepositoryError::NotFound);
        };

        machine_allocation::Entity::update_many()
            .col_expr(
                machine_allocation::Column::Status,
                Expr::value(status.to_string()),
            )
            .col_expr(
                machine_allocation::Column::UpdatedAt,
                Expr::value(now),
            )
            .filter(machine_allocation::Column::Id.eq(allocation.id))
            .exec(&txn)
            .await?;

        if status == WorkStatus::Completed {
            snapshot_task(&txn, &updated, ActionType::Complete).await?;
            reconcile_machine_in_txn(&txn, allocation.machine_id).await?;
        }

        // 审计记录：只要发生了递增就无条件写入
        let scan = rfid_scan::ActiveModel {
            employee_id: Set(employee_id),
            task_id: Set(updated.id),
            scan_time: Set(now),
            ..Default::default()
        };
        scan.insert(&txn).await?;

        txn.commit().await?;
        debug!(
            "Scan applied: task {} now {}/{}",
            updated.id, updated.completed, updated.target
        );

        Ok(ScanApplication::Applied {
            task: updated.into(),
            order_id: allocation.order_id,
            step: allocation.step,
        })
    }

    async fn mark_completed(&self, task_id: i32) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(model) = employee_task::Entity::find_by_id(task_id).one(&txn).await? else {
            return Err(RepositoryError::NotFound);
        };

        let mut active: employee_task::ActiveModel = model.into();
        active.status = Set(WorkStatus::Completed.to_string());
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn delete_with_history(&self, task_id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(model) = employee_task::Entity::find_by_id(task_id).one(&txn).await? else {
            return Err(RepositoryError::NotFound);
        };

        snapshot_task(&txn, &model, ActionType::Delete).await?;
        employee_task::Entity::delete_by_id(task_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn sum_completed_by_allocation(
        &self,
        allocation_id: i32,
    ) -> Result<i64, RepositoryError> {
        let total: Option<Option<i64>> = employee_task::Entity::find()
            .filter(employee_task::Column::MachineAllocationId.eq(allocation_id))
            .select_only()
            .column_as(employee_task::Column::Completed.sum(), "total")
            .into_tuple()
            .one(self.db.as_ref())
            .await?;
        Ok(total.flatten().unwrap_or(0))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(employee_task::Entity::find().count(self.db.as_ref()).await?)
    }

    async fn count_by_status(&self, status: WorkStatus) -> Result<u64, RepositoryError> {
        let count = employee_task::Entity::find()
            .filter(employee_task::Column::Status.eq(status.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
