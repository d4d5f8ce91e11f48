// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskDuration};
use crate::domain::repositories::allocation_repository::AllocationRepository;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::task_repository::{TaskDetail, TaskRepository};
use crate::domain::services::CoreError;
use std::sync::Arc;
use tracing::info;

/// 任务服务
///
/// 员工任务生命周期的管理入口：指派/改派、人工完成与删除。
/// 改派在仓库事务内先留痕再就地更新，已完成计数跨改派保留；
/// 人工完成后触发所属机器的对账，可能释放机器。
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    allocations: Arc<dyn AllocationRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl TaskService {
    /// 创建新的任务服务实例
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        allocations: Arc<dyn AllocationRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            tasks,
            allocations,
            employees,
        }
    }

    /// 指派或改派任务
    ///
    /// 目标件数必须大于0，员工与分配必须存在且分配仍然存活。
    /// 分配上已有任务时改派：既有任务快照以Reassign动作写入
    /// 历史账本，负责员工、目标与工期就地更新，已完成计数
    /// 与状态保留。没有任务时新建。
    ///
    /// # 返回值
    ///
    /// * `Ok((Task, bool))` - 任务与是否为新建的标记
    /// * `Err(CoreError)` - 校验失败或引用缺失
    pub async fn assign_or_update(
        &self,
        employee_id: i32,
        allocation_id: i32,
        target: i32,
        duration: TaskDuration,
    ) -> Result<(Task, bool), CoreError> {
        if target <= 0 {
            return Err(CoreError::Validation(
                "target must be greater than zero".to_string(),
            ));
        }

        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("employee".to_string()))?;

        let allocation = self
            .allocations
            .find_by_id(allocation_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("machine allocation".to_string()))?;

        if !allocation.is_live() {
            return Err(CoreError::Conflict(format!(
                "machine allocation {} has been released",
                allocation_id
            )));
        }

        let (task, created) = self
            .tasks
            .upsert_for_allocation(employee_id, allocation_id, target, duration)
            .await?;

        if created {
            info!(
                "Task {} assigned to employee {} on allocation {}",
                task.id, employee_id, allocation_id
            );
        } else {
            info!(
                "Task {} reassigned to employee {} (completed count preserved: {})",
                task.id, employee_id, task.completed
            );
        }
        Ok((task, created))
    }

    /// 人工将任务标记为已完成
    ///
    /// 无条件覆盖路径：状态直接置为Completed，随后触发所属
    /// 机器的对账（由对账例程决定机器是否释放）。
    pub async fn complete(&self, task_id: i32) -> Result<Task, CoreError> {
        let task = self
            .tasks
            .mark_completed(task_id)
            .await
            .map_err(|e| CoreError::from_repo(e, "task"))?;

        if let Some(allocation) = self
            .allocations
            .find_by_id(task.machine_allocation_id)
            .await?
        {
            self.allocations
                .reconcile_machine(allocation.machine_id)
                .await?;
        }

        info!("Task {} manually completed", task_id);
        Ok(task)
    }

    /// 删除任务
    ///
    /// 先以Delete动作写入历史账本（快照经所属分配取得订单、
    /// 工序与机器上下文），再删除任务行。
    pub async fn delete(&self, task_id: i32) -> Result<(), CoreError> {
        self.tasks
            .delete_with_history(task_id)
            .await
            .map_err(|e| CoreError::from_repo(e, "task"))?;

        info!("Task {} deleted", task_id);
        Ok(())
    }

    /// 获取全部任务的详情视图
    pub async fn list_detailed(&self) -> Result<Vec<TaskDetail>, CoreError> {
        Ok(self.tasks.list_detailed().await?)
    }
}
