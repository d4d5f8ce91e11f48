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

use std::sync::Arc;
use std::time::Duration;

use stitchrs::config::settings::Settings;
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
use stitchrs::infrastructure::database::connection;
use stitchrs::infrastructure::repositories::allocation_repo_impl::AllocationRepositoryImpl;
use stitchrs::infrastructure::repositories::employee_repo_impl::EmployeeRepositoryImpl;
use stitchrs::infrastructure::repositories::history_repo_impl::HistoryRepositoryImpl;
use stitchrs::infrastructure::repositories::machine_repo_impl::MachineRepositoryImpl;
use stitchrs::infrastructure::repositories::order_repo_impl::OrderRepositoryImpl;
use stitchrs::infrastructure::repositories::reg_scan_repo_impl::RegScanRepositoryImpl;
use stitchrs::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use stitchrs::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use stitchrs::presentation::routes::{self, AppState};
use stitchrs::utils::telemetry;
use stitchrs::workers::broadcast_worker::DashboardBroadcastWorker;
use stitchrs::workers::worker::Worker;

use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting stitchrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let employees: Arc<dyn EmployeeRepository> = Arc::new(EmployeeRepositoryImpl::new(db.clone()));
    let machines: Arc<dyn MachineRepository> = Arc::new(MachineRepositoryImpl::new(db.clone()));
    let orders: Arc<dyn OrderRepository> = Arc::new(OrderRepositoryImpl::new(db.clone()));
    let allocations: Arc<dyn AllocationRepository> =
        Arc::new(AllocationRepositoryImpl::new(db.clone()));
    let tasks: Arc<dyn TaskRepository> = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let histories: Arc<dyn HistoryRepository> = Arc::new(HistoryRepositoryImpl::new(db.clone()));
    let reg_scans: Arc<dyn RegScanRepository> = Arc::new(RegScanRepositoryImpl::new(db.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));

    // 5. Initialize core services
    let allocation_service = Arc::new(AllocationService::new(
        allocations.clone(),
        machines.clone(),
        orders.clone(),
    ));
    let task_service = Arc::new(TaskService::new(
        tasks.clone(),
        allocations.clone(),
        employees.clone(),
    ));
    let scan_service = Arc::new(ScanService::new(employees.clone(), tasks.clone()));
    let order_service = Arc::new(OrderService::new(
        orders.clone(),
        allocations.clone(),
        tasks.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        orders.clone(),
        order_service.clone(),
        employees.clone(),
        machines.clone(),
        tasks.clone(),
    ));

    // 6. Start the dashboard broadcast worker
    let (live_tx, _) = broadcast::channel(16);
    let broadcast_worker = DashboardBroadcastWorker::new(
        dashboard_service.clone(),
        live_tx.clone(),
        Duration::from_secs(settings.broadcast.interval_secs),
    );
    tokio::spawn(async move {
        if let Err(e) = broadcast_worker.run().await {
            error!("Broadcast worker exited: {}", e);
        }
    });
    info!("Dashboard broadcast worker started");

    // 7. Start HTTP server
    let app = routes::routes(AppState {
        employees,
        machines,
        users,
        reg_scans,
        histories,
        allocation_service,
        task_service,
        scan_service,
        order_service,
        dashboard_service,
        live_tx,
        settings: settings.clone(),
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
