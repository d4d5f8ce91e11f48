// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::history::{ActionType, TaskHistory};
use crate::domain::repositories::history_repository::{HistoryRepository, NewTaskHistory};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    employee_task, employee_task_history, machine, machine_allocation, order,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// 历史账本仓库实现
///
/// 基于SeaORM实现的任务历史数据访问层。账本只追加：
/// 实现上没有任何更新或删除路径。
#[derive(Clone)]
pub struct HistoryRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl HistoryRepositoryImpl {
    /// 创建新的历史仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<employee_task_history::Model> for TaskHistory {
    fn from(model: employee_task_history::Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            order_number: model.order_number,
            step_name: model.step_name,
            machine_number: model.machine_number,
            target: model.target,
            action_type: model
                .action_type
                .parse()
                .unwrap_or(ActionType::Reassign),
            working_date: model.working_date,
        }
    }
}

/// 在给定连接/事务上追加一条历史记录
pub(crate) async fn insert_history<C: ConnectionTrait>(
    conn: &C,
    record: NewTaskHistory,
) -> Result<employee_task_history::Model, DbErr> {
    let model = employee_task_history::ActiveModel {
        employee_id: Set(record.employee_id),
        order_number: Set(record.order_number),
        step_name: Set(record.step_name),
        machine_number: Set(record.machine_number),
        target: Set(record.target),
        action_type: Set(record.action_type.to_string()),
        working_date: Set(Utc::now().into()),
        ..Default::default()
    };
    model.insert(conn).await
}

/// 把任务连同其分配上下文快照进历史账本
///
/// 经所属分配解析订单编号与机器编号；上下文已经不完整时
/// 以占位符入账而不是拒绝留痕（账本永不拒绝追加）。
pub(crate) async fn snapshot_task<C: ConnectionTrait>(
    conn: &C,
    task: &employee_task::Model,
    action_type: ActionType,
) -> Result<(), DbErr> {
    let allocation = machine_allocation::Entity::find_by_id(task.machine_allocation_id)
        .one(conn)
        .await?;

    let (order_number, step_name, machine_number) = match allocation {
        Some(allocation) => {
            let order_number = order::Entity::find_by_id(allocation.order_id)
                .one(conn)
                .await?
                .map(|o| o.order_number)
                .unwrap_or_else(|| "unknown".to_string());
            let machine_number = machine::Entity::find_by_id(allocation.machine_id)
                .one(conn)
                .await?
                .map(|m| m.machine_number)
                .unwrap_or_else(|| "unknown".to_string());
            (order_number, allocation.step, machine_number)
        }
        None => (
            "unknown".to_string(),
            "unknown".to_string(),
            "unknown".to_string(),
        ),
    };

    insert_history(
        conn,
        NewTaskHistory {
            employee_id: task.employee_id,
            order_number,
            step_name,
            machine_number,
            target: task.target,
            action_type,
        },
    )
    .await?;
    Ok(())
}

#[async_trait]
impl HistoryRepository for HistoryRepositoryImpl {
    async fn append(&self, record: NewTaskHistory) -> Result<TaskHistory, RepositoryError> {
        let model = insert_history(self.db.as_ref(), record).await?;
        Ok(model.into())
    }

    async fn list_by_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<TaskHistory>, RepositoryError> {
        let models = employee_task_history::Entity::find()
            .filter(employee_task_history::Column::EmployeeId.eq(employee_id))
            .order_by_desc(employee_task_history::Column::WorkingDate)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
