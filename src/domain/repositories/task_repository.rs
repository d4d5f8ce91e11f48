// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskDuration, WorkStatus};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 带分配上下文的任务视图
///
/// 读取路径使用的任务详情：任务本体加上负责员工与所属
/// 分配的订单、工序、机器信息。
#[derive(Debug, Clone)]
pub struct TaskDetail {
    pub task: Task,
    pub employee_name: String,
    pub employee_rfid: String,
    pub order_id: i32,
    pub machine_id: i32,
    pub step: String,
}

/// 扫描落账结果
///
/// [`TaskRepository::apply_scan`]在单个事务内完成扫描的
/// 全部写入后返回的结果。
#[derive(Debug, Clone)]
pub enum ScanApplication {
    /// 员工没有任何有剩余容量的任务（包括无任务的情况）
    NoRemainingCapacity,
    /// 扫描已计入某个任务
    Applied {
        /// 递增后的任务
        task: Task,
        /// 命中任务所属订单ID
        order_id: i32,
        /// 命中任务的工序名
        step: String,
    },
}

/// 任务仓库特质
///
/// 定义员工任务的数据访问接口。改派、扫描递增与删除是
/// 事务性复合操作：历史留痕、任务写入、分配状态联动与
/// 机器对账发生在同一个事务内，调用方观察不到中间状态。
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 指派或改派任务
    ///
    /// 某分配已有任务时：先把既有任务的快照以Reassign动作
    /// 写入历史账本，再就地更新负责员工、目标与工期；
    /// 已完成计数保留，状态不重置。没有任务时新建一个
    /// completed = 0、状态Assigned的任务。返回任务与
    /// 是否为新建的标记。
    async fn upsert_for_allocation(
        &self,
        employee_id: i32,
        allocation_id: i32,
        target: i32,
        duration: TaskDuration,
    ) -> Result<(Task, bool), RepositoryError>;

    /// 根据ID查找任务
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError>;

    /// 获取某员工的全部任务，按创建时间升序（最早指派在前）
    async fn list_by_employee_fifo(&self, employee_id: i32) -> Result<Vec<Task>, RepositoryError>;

    /// 获取全部任务的详情视图
    async fn list_detailed(&self) -> Result<Vec<TaskDetail>, RepositoryError>;

    /// 获取全部未完成任务的详情视图（Assigned与In Progress）
    async fn list_open_detailed(&self) -> Result<Vec<TaskDetail>, RepositoryError>;

    /// 查找某员工最早的未完成任务详情
    async fn find_open_by_employee(
        &self,
        employee_id: i32,
    ) -> Result<Option<TaskDetail>, RepositoryError>;

    /// 落账一次工牌扫描
    ///
    /// 在单个事务内：按创建时间升序取该员工的任务，选择第一个
    /// 有剩余容量的任务，将其completed加1并重算状态，把同一
    /// 状态写到所属分配上；若任务因此达标，追加Complete历史
    /// 记录并对机器做对账（可能释放机器）；最后无条件写入一条
    /// RFID扫描审计记录。分配状态先于机器释放更新，保证机器
    /// 释放时其分配不会仍报告Assigned。
    async fn apply_scan(&self, employee_id: i32) -> Result<ScanApplication, RepositoryError>;

    /// 人工将任务标记为已完成（无条件覆盖路径）
    async fn mark_completed(&self, task_id: i32) -> Result<Task, RepositoryError>;

    /// 删除任务，先以Delete动作写入历史账本
    async fn delete_with_history(&self, task_id: i32) -> Result<(), RepositoryError>;

    /// 统计某分配下任务的完成件数之和
    async fn sum_completed_by_allocation(
        &self,
        allocation_id: i32,
    ) -> Result<i64, RepositoryError>;

    /// 任务总数
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// 按状态统计任务数量
    async fn count_by_status(&self, status: WorkStatus) -> Result<u64, RepositoryError>;
}
