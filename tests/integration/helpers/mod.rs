// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

use stitchrs::domain::models::employee::Employee;
use stitchrs::domain::models::machine::Machine;
use stitchrs::domain::models::order::Order;
use stitchrs::domain::repositories::allocation_repository::AllocationRepository;
use stitchrs::domain::repositories::employee_repository::EmployeeRepository;
use stitchrs::domain::repositories::history_repository::HistoryRepository;
use stitchrs::domain::repositories::machine_repository::MachineRepository;
use stitchrs::domain::repositories::order_repository::OrderRepository;
use stitchrs::domain::repositories::reg_scan_repository::RegScanRepository;
use stitchrs::domain::repositories::task_repository::TaskRepository;
use stitchrs::domain::repositories::user_repository::UserRepository;
use stitchrs::domain::services::allocation_service::AllocationService;
use stitchrs::domain::services::dashboard_service::DashboardService;
use stitchrs::domain::services::order_service::OrderService;
use stitchrs::domain::services::scan_service::ScanService;
use stitchrs::domain::services::task_service::TaskService;
use stitchrs::infrastructure::repositories::allocation_repo_impl::AllocationRepositoryImpl;
use stitchrs::infrastructure::repositories::employee_repo_impl::EmployeeRepositoryImpl;
use stitchrs::infrastructure::repositories::history_repo_impl::HistoryRepositoryImpl;
use stitchrs::infrastructure::repositories::machine_repo_impl::MachineRepositoryImpl;
use stitchrs::infrastructure::repositories::order_repo_impl::OrderRepositoryImpl;
use stitchrs::infrastructure::repositories::reg_scan_repo_impl::RegScanRepositoryImpl;
use stitchrs::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use stitchrs::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;

/// 集成测试上下文
///
/// 内存SQLite数据库上的全套真实仓库与核心服务
pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub machines: Arc<dyn MachineRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub allocations: Arc<dyn AllocationRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub histories: Arc<dyn HistoryRepository>,
    pub reg_scans: Arc<dyn RegScanRepository>,
    pub users: Arc<dyn UserRepository>,
    pub allocation_service: AllocationService,
    pub task_service: TaskService,
    pub scan_service: ScanService,
    pub order_service: Arc<OrderService>,
    pub dashboard_service: DashboardService,
}

/// 搭建测试上下文
///
/// 单连接池保证所有查询看到同一个内存数据库
pub async fn setup() -> TestContext {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("sqlite should connect");
    let db = Arc::new(db);

    Migrator::up(db.as_ref(), None)
        .await
        .expect("migrations should apply");

    let employees: Arc<dyn EmployeeRepository> = Arc::new(EmployeeRepositoryImpl::new(db.clone()));
    let machines: Arc<dyn MachineRepository> = Arc::new(MachineRepositoryImpl::new(db.clone()));
    let orders: Arc<dyn OrderRepository> = Arc::new(OrderRepositoryImpl::new(db.clone()));
    let allocations: Arc<dyn AllocationRepository> =
        Arc::new(AllocationRepositoryImpl::new(db.clone()));
    let tasks: Arc<dyn TaskRepository> = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let histories: Arc<dyn HistoryRepository> = Arc::new(HistoryRepositoryImpl::new(db.clone()));
    let reg_scans: Arc<dyn RegScanRepository> = Arc::new(RegScanRepositoryImpl::new(db.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));

    let order_service = Arc::new(OrderService::new(
        orders.clone(),
        allocations.clone(),
        tasks.clone(),
    ));

    TestContext {
        allocation_service: AllocationService::new(
            allocations.clone(),
            machines.clone(),
            orders.clone(),
        ),
        task_service: TaskService::new(tasks.clone(), allocations.clone(), employees.clone()),
        scan_service: ScanService::new(employees.clone(), tasks.clone()),
        dashboard_service: DashboardService::new(
            orders.clone(),
            order_service.clone(),
            employees.clone(),
            machines.clone(),
            tasks.clone(),
        ),
        order_service,
        db,
        employees,
        machines,
        orders,
        allocations,
        tasks,
        histories,
        reg_scans,
        users,
    }
}

impl TestContext {
    /// 登记员工
    pub async fn seed_employee(&self, name: &str, rfid: &str) -> Employee {
        self.employees
            .create(name, rfid, None)
            .await
            .expect("employee should register")
    }

    /// 登记机器
    pub async fn seed_machine(&self, machine_number: &str) -> Machine {
        self.machines
            .create(machine_number)
            .await
            .expect("machine should register")
    }

    /// 创建订单及工序
    pub async fn seed_order(&self, order_number: &str, quantity: i32, steps: &[&str]) -> Order {
        let steps: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
        self.orders
            .create_with_steps(order_number, "Shirt", quantity, &steps)
            .await
            .expect("order should be created")
    }
}
