// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::allocation::Allocation;
use crate::domain::models::order::{Order, OrderStatus, OrderStep, ProductionStage};
use crate::domain::repositories::allocation_repository::AllocationRepository;
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::repositories::task_repository::{TaskDetail, TaskRepository};
use crate::domain::services::CoreError;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// 单个工序的进度
#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    /// 工序名
    pub step: String,
    /// 分配到该工序的机器ID（未分配为None）
    pub machine_id: Option<i32>,
    /// 该工序已完成件数
    pub completed: i64,
}

/// 订单进度视图
#[derive(Debug, Clone, Serialize)]
pub struct OrderProgress {
    pub id: i32,
    pub order_number: String,
    pub product: String,
    pub quantity: i32,
    /// 派生的订单状态
    pub status: OrderStatus,
    pub current_stage: ProductionStage,
    /// 全部工序完成件数之和
    pub completed: i64,
    pub steps: Vec<StepProgress>,
}

/// 订单下的分配及其任务
#[derive(Debug, Clone)]
pub struct AllocationAssignment {
    pub allocation: Allocation,
    pub task: Option<TaskDetail>,
}

/// 订单及其机器指派视图
#[derive(Debug, Clone)]
pub struct OrderAssignments {
    pub order: Order,
    pub allocations: Vec<AllocationAssignment>,
}

/// 订单服务
///
/// 订单与工序目录的管理入口，以及订单状态/进度的只读派生。
/// 订单状态永远是读取路径上的派生值：存活分配下任务完成
/// 件数之和等于订单目标为已完成，大于0为生产中，否则待开工。
/// 核心不在写路径上反规范化该值。
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    allocations: Arc<dyn AllocationRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl OrderService {
    /// 创建新的订单服务实例
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        allocations: Arc<dyn AllocationRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            orders,
            allocations,
            tasks,
        }
    }

    /// 创建订单及其工序列表
    pub async fn create(
        &self,
        order_number: &str,
        product: &str,
        quantity: i32,
        steps: &[String],
    ) -> Result<Order, CoreError> {
        if order_number.trim().is_empty() {
            return Err(CoreError::Validation("order number is required".to_string()));
        }
        if product.trim().is_empty() {
            return Err(CoreError::Validation("product is required".to_string()));
        }
        if quantity <= 0 {
            return Err(CoreError::Validation(
                "quantity must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for step in steps {
            if step.trim().is_empty() {
                return Err(CoreError::Validation("step name is required".to_string()));
            }
            if !seen.insert(step.as_str()) {
                return Err(CoreError::Validation(format!(
                    "step {} is duplicated within the order",
                    step
                )));
            }
        }

        let order = self
            .orders
            .create_with_steps(order_number, product, quantity, steps)
            .await?;

        info!(
            "Order {} created with {} steps",
            order.order_number,
            steps.len()
        );
        Ok(order)
    }

    /// 获取全部订单，状态为当前派生值
    pub async fn list(&self) -> Result<Vec<Order>, CoreError> {
        let mut orders = self.orders.list().await?;
        for order in &mut orders {
            let status = self.derived_status_of(order).await?;
            order.status = status;
        }
        Ok(orders)
    }

    /// 派生某订单的当前状态
    pub async fn derived_status(&self, order_id: i32) -> Result<OrderStatus, CoreError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("order".to_string()))?;
        self.derived_status_of(&order).await
    }

    async fn derived_status_of(&self, order: &Order) -> Result<OrderStatus, CoreError> {
        // 分配行从不删除（完成后只标记Available），因此订单的
        // 完成件数对全部分配求和，机器释放不会让计数消失
        let allocations = self.allocations.list_by_order(order.id).await?;
        let mut completed: i64 = 0;
        for allocation in &allocations {
            completed += self
                .tasks
                .sum_completed_by_allocation(allocation.id)
                .await?;
        }
        Ok(OrderStatus::derive(order.quantity, completed))
    }

    /// 获取订单的工序列表
    pub async fn steps(&self, order_id: i32) -> Result<Vec<OrderStep>, CoreError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("order".to_string()))?;
        Ok(self.orders.list_steps(order_id).await?)
    }

    /// 全部订单的进度视图
    ///
    /// 每个工序给出分配的机器与完成件数。与状态派生不同，
    /// 进度报表把已释放分配的完成件数也计入，避免机器释放后
    /// 工序进度归零。
    pub async fn progress(&self) -> Result<Vec<OrderProgress>, CoreError> {
        let orders = self.orders.list().await?;
        let mut result = Vec::with_capacity(orders.len());

        for order in orders {
            let steps = self.orders.list_steps(order.id).await?;
            let allocations = self.allocations.list_by_order(order.id).await?;

            let mut step_rows = Vec::with_capacity(steps.len());
            let mut total: i64 = 0;

            for step in &steps {
                let allocation = allocations.iter().find(|a| a.step == step.name);
                let mut completed = 0;
                if let Some(allocation) = allocation {
                    completed = self
                        .tasks
                        .sum_completed_by_allocation(allocation.id)
                        .await?;
                    total += completed;
                }
                step_rows.push(StepProgress {
                    step: step.name.clone(),
                    machine_id: allocation.map(|a| a.machine_id),
                    completed,
                });
            }

            result.push(OrderProgress {
                id: order.id,
                order_number: order.order_number,
                product: order.product,
                quantity: order.quantity,
                status: OrderStatus::derive(order.quantity, total),
                current_stage: order.current_stage,
                completed: total,
                steps: step_rows,
            });
        }

        Ok(result)
    }

    /// 全部订单及其机器指派与任务
    pub async fn assigned_machines(&self) -> Result<Vec<OrderAssignments>, CoreError> {
        let orders = self.orders.list().await?;
        let details = self.tasks.list_detailed().await?;
        let mut result = Vec::with_capacity(orders.len());

        for order in orders {
            let allocations = self.allocations.list_by_order(order.id).await?;
            let assignments = allocations
                .into_iter()
                .map(|allocation| {
                    let task = details
                        .iter()
                        .find(|d| d.task.machine_allocation_id == allocation.id)
                        .cloned();
                    AllocationAssignment { allocation, task }
                })
                .collect();
            result.push(OrderAssignments {
                order,
                allocations: assignments,
            });
        }

        Ok(result)
    }

    /// 更新订单的产品与目标件数
    pub async fn update_details(
        &self,
        order_id: i32,
        product: &str,
        quantity: i32,
    ) -> Result<Order, CoreError> {
        if product.trim().is_empty() {
            return Err(CoreError::Validation("product is required".to_string()));
        }
        if quantity <= 0 {
            return Err(CoreError::Validation(
                "quantity must be greater than zero".to_string(),
            ));
        }

        self.orders
            .update_details(order_id, product, quantity)
            .await
            .map_err(|e| CoreError::from_repo(e, "order"))
    }

    /// 设置订单当前生产阶段
    ///
    /// 外部阶段流转操作：只校验阶段取值合法，不触发任何
    /// 核心状态级联。
    pub async fn set_stage(
        &self,
        order_id: i32,
        stage: ProductionStage,
    ) -> Result<Order, CoreError> {
        let order = self
            .orders
            .set_stage(order_id, stage)
            .await
            .map_err(|e| CoreError::from_repo(e, "order"))?;

        info!("Order {} moved to stage {}", order_id, stage);
        Ok(order)
    }

    /// 删除订单
    ///
    /// 显式级联：任务先留痕再删除，分配删除，机器释放，
    /// 工序与订单删除。
    pub async fn delete(&self, order_id: i32) -> Result<(), CoreError> {
        self.orders
            .delete_cascade(order_id)
            .await
            .map_err(|e| CoreError::from_repo(e, "order"))?;

        info!("Order {} deleted with allocations and tasks", order_id);
        Ok(())
    }
}
