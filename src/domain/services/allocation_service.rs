// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::allocation::Allocation;
use crate::domain::models::machine::MachineStatus;
use crate::domain::repositories::allocation_repository::AllocationRepository;
use crate::domain::repositories::machine_repository::MachineRepository;
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::services::CoreError;
use std::sync::Arc;
use tracing::info;

/// 分配服务
///
/// 机器分配生命周期的管理入口：把机器绑定到订单工序、
/// 释放机器、删除分配、对账机器状态。唯一性与可用性
/// 谓词在仓库的事务内强制执行，本服务负责解析引用、
/// 校验输入并把结果映射为核心错误分类。
pub struct AllocationService {
    allocations: Arc<dyn AllocationRepository>,
    machines: Arc<dyn MachineRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl AllocationService {
    /// 创建新的分配服务实例
    pub fn new(
        allocations: Arc<dyn AllocationRepository>,
        machines: Arc<dyn MachineRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            allocations,
            machines,
            orders,
        }
    }

    /// 将机器分配到订单的某个工序
    ///
    /// 校验订单、工序与机器都存在后，由仓库在单个事务内
    /// 重查两条唯一性谓词并落库：（订单，工序）对已有存活
    /// 分配或机器已被占用时返回Conflict。成功时分配为
    /// Assigned状态，机器置为占用。
    ///
    /// # 返回值
    ///
    /// * `Ok(Allocation)` - 创建成功的分配
    /// * `Err(CoreError)` - 校验失败、引用缺失或不变式冲突
    pub async fn assign(
        &self,
        order_id: i32,
        step: &str,
        machine_id: i32,
    ) -> Result<Allocation, CoreError> {
        if step.trim().is_empty() {
            return Err(CoreError::Validation("step name is required".to_string()));
        }

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("order".to_string()))?;

        let steps = self.orders.list_steps(order_id).await?;
        if !steps.iter().any(|s| s.name == step) {
            return Err(CoreError::Validation(format!(
                "step {} does not belong to order {}",
                step, order.order_number
            )));
        }

        self.machines
            .find_by_id(machine_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("machine".to_string()))?;

        let allocation = self
            .allocations
            .assign_checked(order_id, step, machine_id)
            .await?;

        info!(
            "Machine {} assigned to order {} step {}",
            machine_id, order_id, step
        );
        Ok(allocation)
    }

    /// 释放机器
    ///
    /// 机器存活分配下仍有未完成任务时失败，机器状态不变。
    /// 成功时分配标记为Available（保留行），机器置为空闲。
    pub async fn free(&self, machine_id: i32) -> Result<(), CoreError> {
        self.machines
            .find_by_id(machine_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("machine".to_string()))?;

        self.allocations
            .release_machine(machine_id)
            .await
            .map_err(|e| CoreError::from_repo(e, "live allocation"))?;

        info!("Machine {} freed", machine_id);
        Ok(())
    }

    /// 删除分配
    ///
    /// 级联：每个任务先写Delete历史再删除，随后删除分配行，
    /// 机器置为空闲。分配不存在返回NotFound。
    pub async fn delete(&self, allocation_id: i32) -> Result<(), CoreError> {
        self.allocations
            .delete_cascade(allocation_id)
            .await
            .map_err(|e| CoreError::from_repo(e, "allocation"))?;

        info!("Allocation {} deleted with its tasks", allocation_id);
        Ok(())
    }

    /// 对账机器状态
    ///
    /// 幂等修复操作：从机器当前分配下最新任务重新推导状态。
    /// 所有"标记机器可用"的路径都必须经由这一个例程。
    pub async fn reconcile_machine_status(
        &self,
        machine_id: i32,
    ) -> Result<MachineStatus, CoreError> {
        self.machines
            .find_by_id(machine_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("machine".to_string()))?;

        Ok(self.allocations.reconcile_machine(machine_id).await?)
    }

    /// 获取全部存活分配
    pub async fn list_live(&self) -> Result<Vec<Allocation>, CoreError> {
        Ok(self.allocations.list_live().await?)
    }
}
