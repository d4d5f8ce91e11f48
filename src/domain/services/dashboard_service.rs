// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::machine::MachineStatus;
use crate::domain::models::order::OrderStatus;
use crate::domain::models::task::WorkStatus;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::machine_repository::MachineRepository;
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::order_service::OrderService;
use crate::domain::services::CoreError;
use serde::Serialize;
use std::sync::Arc;

/// 实时广播快照
///
/// 广播轮询器定期读取并推送给看板前端的扁平计数对象。
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastSnapshot {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub active_orders: u64,
    pub available_machines: u64,
    pub in_use_machines: u64,
}

/// 办公室看板的任务行
#[derive(Debug, Clone, Serialize)]
pub struct OfficeTaskRow {
    pub employee_name: String,
    pub order_id: i32,
    pub step_name: String,
    pub completed: i32,
    pub target: i32,
    pub status: WorkStatus,
}

/// 办公室看板视图
#[derive(Debug, Clone, Serialize)]
pub struct OfficeDashboard {
    pub total_orders: u64,
    pub active_orders: u64,
    pub completed_orders: u64,
    pub total_employees: u64,
    pub employees_working: u64,
    pub available_machines: u64,
    pub in_use_machines: u64,
    pub tasks: Vec<OfficeTaskRow>,
}

/// 员工看板视图
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDashboard {
    pub task_id: i32,
    pub order_id: i32,
    pub product: String,
    pub step: String,
    pub machine_id: i32,
    pub target: i32,
    pub completed: i32,
}

/// 看板服务
///
/// 核心状态之上的只读聚合投影，不携带任何生命周期逻辑。
/// 广播轮询器与看板接口都从这里取数，读取与核心写路径
/// 完全解耦。
pub struct DashboardService {
    orders: Arc<dyn OrderRepository>,
    order_service: Arc<OrderService>,
    employees: Arc<dyn EmployeeRepository>,
    machines: Arc<dyn MachineRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl DashboardService {
    /// 创建新的看板服务实例
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        order_service: Arc<OrderService>,
        employees: Arc<dyn EmployeeRepository>,
        machines: Arc<dyn MachineRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            orders,
            order_service,
            employees,
            machines,
            tasks,
        }
    }

    /// 广播快照
    pub async fn snapshot(&self) -> Result<BroadcastSnapshot, CoreError> {
        let (active_orders, _) = self.order_status_counts().await?;

        Ok(BroadcastSnapshot {
            total_tasks: self.tasks.count().await?,
            completed_tasks: self.tasks.count_by_status(WorkStatus::Completed).await?,
            active_orders,
            available_machines: self
                .machines
                .count_by_status(MachineStatus::Available)
                .await?,
            in_use_machines: self.machines.count_by_status(MachineStatus::InUse).await?,
        })
    }

    /// 办公室看板
    pub async fn office(&self) -> Result<OfficeDashboard, CoreError> {
        let (active_orders, completed_orders) = self.order_status_counts().await?;
        let open_tasks = self.tasks.list_open_detailed().await?;

        let employees_working = open_tasks.len() as u64;
        let tasks = open_tasks
            .into_iter()
            .map(|detail| OfficeTaskRow {
                employee_name: detail.employee_name,
                order_id: detail.order_id,
                step_name: detail.step,
                completed: detail.task.completed,
                target: detail.task.target,
                status: detail.task.status,
            })
            .collect();

        Ok(OfficeDashboard {
            total_orders: self.orders.count().await?,
            active_orders,
            completed_orders,
            total_employees: self.employees.count().await?,
            employees_working,
            available_machines: self
                .machines
                .count_by_status(MachineStatus::Available)
                .await?,
            in_use_machines: self.machines.count_by_status(MachineStatus::InUse).await?,
            tasks,
        })
    }

    /// 员工看板
    ///
    /// 返回该员工最早的未完成任务；没有未完成任务时返回None。
    pub async fn employee(&self, employee_id: i32) -> Result<Option<EmployeeDashboard>, CoreError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("employee".to_string()))?;

        let Some(detail) = self.tasks.find_open_by_employee(employee_id).await? else {
            return Ok(None);
        };

        let product = self
            .orders
            .find_by_id(detail.order_id)
            .await?
            .map(|order| order.product)
            .unwrap_or_default();

        Ok(Some(EmployeeDashboard {
            task_id: detail.task.id,
            order_id: detail.order_id,
            product,
            step: detail.step,
            machine_id: detail.machine_id,
            target: detail.task.target,
            completed: detail.task.completed,
        }))
    }

    /// 按派生状态统计订单数（生产中，已完成）
    async fn order_status_counts(&self) -> Result<(u64, u64), CoreError> {
        let orders = self.orders.list().await?;
        let mut active = 0;
        let mut completed = 0;
        for order in &orders {
            match self.order_service.derived_status(order.id).await? {
                OrderStatus::InProgress => active += 1,
                OrderStatus::Completed => completed += 1,
                OrderStatus::Pending => {}
            }
        }
        Ok((active, completed))
    }
}
