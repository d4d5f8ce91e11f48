// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::allocation::Allocation;
use crate::domain::models::machine::MachineStatus;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 分配仓库特质
///
/// 定义机器分配生命周期的数据访问接口。四个复合操作
/// （assign_checked、release_machine、delete_cascade、
/// reconcile_machine）各自在单个存储事务内执行检查再写入，
/// 并独占机器状态的副作用；任何调用方都不得绕开它们
/// 直接修改机器状态。
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    /// 将机器分配到（订单，工序）对
    ///
    /// 在同一事务内重查两条唯一性谓词：该（订单，工序）对
    /// 没有存活分配，且该机器没有存活分配。任一谓词不成立
    /// 返回Conflict。成功时创建Assigned状态的分配并把机器
    /// 置为占用。
    async fn assign_checked(
        &self,
        order_id: i32,
        step: &str,
        machine_id: i32,
    ) -> Result<Allocation, RepositoryError>;

    /// 根据ID查找分配
    async fn find_by_id(&self, id: i32) -> Result<Option<Allocation>, RepositoryError>;

    /// 获取全部存活分配
    async fn list_live(&self) -> Result<Vec<Allocation>, RepositoryError>;

    /// 获取某订单的全部分配
    async fn list_by_order(&self, order_id: i32) -> Result<Vec<Allocation>, RepositoryError>;

    /// 查找某机器的存活分配
    async fn find_live_by_machine(
        &self,
        machine_id: i32,
    ) -> Result<Option<Allocation>, RepositoryError>;

    /// 释放机器
    ///
    /// 机器存活分配下仍有未完成任务时返回Conflict，机器状态
    /// 不变。成功时分配标记为Available（保留行，不删除），
    /// 机器置为空闲。没有存活分配时返回NotFound。
    async fn release_machine(&self, machine_id: i32) -> Result<(), RepositoryError>;

    /// 删除分配及其全部任务
    ///
    /// 每个任务先以Delete动作写入历史账本再删除，随后删除
    /// 分配行并把机器置为空闲。分配不存在返回NotFound。
    async fn delete_cascade(&self, allocation_id: i32) -> Result<(), RepositoryError>;

    /// 对账机器状态
    ///
    /// 从机器当前分配下最新任务重新推导状态的幂等修复操作：
    /// 没有存活分配则强制机器空闲并清理游离的分配行；最新
    /// 任务已达目标则释放分配（标记Available）并置机器空闲；
    /// 否则保持占用。所有需要"标记机器可用"的路径一律经由
    /// 本操作。
    async fn reconcile_machine(&self, machine_id: i32) -> Result<MachineStatus, RepositoryError>;

    /// 按状态统计分配数量
    async fn count_live(&self) -> Result<u64, RepositoryError>;
}
