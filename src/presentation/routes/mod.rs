// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::history_repository::HistoryRepository;
use crate::domain::repositories::machine_repository::MachineRepository;
use crate::domain::repositories::reg_scan_repository::RegScanRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::allocation_service::AllocationService;
use crate::domain::services::dashboard_service::DashboardService;
use crate::domain::services::order_service::OrderService;
use crate::domain::services::scan_service::ScanService;
use crate::domain::services::task_service::TaskService;
use crate::presentation::handlers::{
    allocation_handler, auth_handler, dashboard_handler, employee_handler, machine_handler,
    order_handler, scan_handler, task_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;

/// 路由装配所需的共享状态
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeRepository>,
    pub machines: Arc<dyn MachineRepository>,
    pub users: Arc<dyn UserRepository>,
    pub reg_scans: Arc<dyn RegScanRepository>,
    pub histories: Arc<dyn HistoryRepository>,
    pub allocation_service: Arc<AllocationService>,
    pub task_service: Arc<TaskService>,
    pub scan_service: Arc<ScanService>,
    pub order_service: Arc<OrderService>,
    pub dashboard_service: Arc<DashboardService>,
    pub live_tx: broadcast::Sender<String>,
    pub settings: Arc<Settings>,
}

/// 创建应用路由
///
/// 设备侧端点（工牌扫描、登记台扫描）与登录端点公开；
/// 其余管理端点要求Bearer令牌。
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/auth/login", post(auth_handler::login))
        .route("/v1/auth/app-login", post(auth_handler::app_login))
        .route("/v1/scans", post(scan_handler::process_scan))
        .route("/v1/reg-scans", post(scan_handler::record_reg_scan))
        .route("/v1/reg-scans/latest", get(scan_handler::latest_reg_scan))
        .route("/v1/dashboard/live", get(dashboard_handler::live_updates));

    let protected_routes = Router::new()
        .route("/v1/employees", get(employee_handler::list_employees))
        .route(
            "/v1/employees/register",
            post(employee_handler::register_employee),
        )
        .route(
            "/v1/employees/{id}",
            delete(employee_handler::delete_employee),
        )
        .route(
            "/v1/employees/{id}/history",
            get(employee_handler::employee_history),
        )
        .route("/v1/machines", get(machine_handler::list_machines))
        .route("/v1/machines", post(machine_handler::create_machine))
        .route("/v1/orders", get(order_handler::list_orders))
        .route("/v1/orders", post(order_handler::create_order))
        .route("/v1/orders/progress", get(order_handler::order_progress))
        .route(
            "/v1/orders/assigned-machines",
            get(order_handler::assigned_machines),
        )
        .route("/v1/orders/stage", post(order_handler::update_stage))
        .route("/v1/orders/{id}", put(order_handler::update_order))
        .route("/v1/orders/{id}", delete(order_handler::delete_order))
        .route("/v1/orders/{id}/steps", get(order_handler::order_steps))
        .route(
            "/v1/allocations",
            get(allocation_handler::list_allocations),
        )
        .route(
            "/v1/allocations/assign",
            post(allocation_handler::assign_machine),
        )
        .route("/v1/allocations/free", post(allocation_handler::free_machine))
        .route(
            "/v1/allocations/reconcile",
            post(allocation_handler::reconcile_machine),
        )
        .route(
            "/v1/allocations/{id}",
            delete(allocation_handler::delete_allocation),
        )
        .route("/v1/tasks", get(task_handler::list_tasks))
        .route("/v1/tasks/assign", post(task_handler::assign_task))
        .route("/v1/tasks/assigned", get(task_handler::list_assigned_tasks))
        .route("/v1/tasks/{id}/complete", post(task_handler::complete_task))
        .route("/v1/tasks/{id}", delete(task_handler::delete_task))
        .route(
            "/v1/dashboard/office",
            get(dashboard_handler::office_dashboard),
        )
        .route(
            "/v1/dashboard/employee/{id}",
            get(dashboard_handler::employee_dashboard),
        )
        .route("/v1/auth/register", post(auth_handler::register_user))
        .route("/v1/auth/users", get(auth_handler::list_users))
        .route("/v1/auth/users/{id}", put(auth_handler::update_user))
        .route("/v1/auth/users/{id}", delete(auth_handler::delete_user))
        .route(
            "/v1/auth/users/{id}/password",
            put(auth_handler::update_password),
        )
        .layer(axum::middleware::from_fn_with_state(
            AuthState {
                jwt_secret: state.settings.auth.jwt_secret.clone(),
            },
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(Extension(state.employees))
        .layer(Extension(state.machines))
        .layer(Extension(state.users))
        .layer(Extension(state.reg_scans))
        .layer(Extension(state.histories))
        .layer(Extension(state.allocation_service))
        .layer(Extension(state.task_service))
        .layer(Extension(state.scan_service))
        .layer(Extension(state.order_service))
        .layer(Extension(state.dashboard_service))
        .layer(Extension(state.live_tx))
        .layer(Extension(state.settings))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
