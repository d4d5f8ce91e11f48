// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use stitchrs::config::settings::{
    AuthSettings, BroadcastSettings, DatabaseSettings, ServerSettings, Settings,
};
use stitchrs::domain::services::allocation_service::AllocationService;
use stitchrs::domain::services::dashboard_service::DashboardService;
use stitchrs::domain::services::scan_service::ScanService;
use stitchrs::domain::services::task_service::TaskService;
use stitchrs::presentation::routes::{routes, AppState};
use tokio::sync::broadcast;

/// 在内存SQLite仓库之上装配完整路由
async fn test_server() -> (TestServer, crate::helpers::TestContext) {
    let ctx = setup().await;

    let settings = Arc::new(Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthSettings {
            jwt_secret: "test-secret".to_string(),
            token_expiry_hours: 1,
        },
        broadcast: BroadcastSettings { interval_secs: 3 },
    });

    let (live_tx, _) = broadcast::channel(4);
    let app = routes(AppState {
        employees: ctx.employees.clone(),
        machines: ctx.machines.clone(),
        users: ctx.users.clone(),
        reg_scans: ctx.reg_scans.clone(),
        histories: ctx.histories.clone(),
        allocation_service: Arc::new(AllocationService::new(
            ctx.allocations.clone(),
            ctx.machines.clone(),
            ctx.orders.clone(),
        )),
        task_service: Arc::new(TaskService::new(
            ctx.tasks.clone(),
            ctx.allocations.clone(),
            ctx.employees.clone(),
        )),
        scan_service: Arc::new(ScanService::new(ctx.employees.clone(), ctx.tasks.clone())),
        order_service: ctx.order_service.clone(),
        dashboard_service: Arc::new(DashboardService::new(
            ctx.orders.clone(),
            ctx.order_service.clone(),
            ctx.employees.clone(),
            ctx.machines.clone(),
            ctx.tasks.clone(),
        )),
        live_tx,
        settings,
    });

    (TestServer::new(app).expect("router should build"), ctx)
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (server, _ctx) = test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn management_endpoints_require_a_token() {
    let (server, _ctx) = test_server().await;

    let response = server.get("/v1/employees").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn login_issues_a_token_that_opens_protected_endpoints() {
    let (server, ctx) = test_server().await;

    // User registration is itself a protected endpoint, so the first
    // account is seeded through the repository layer
    let hash = bcrypt::hash("secret123", 4).unwrap();
    ctx.users
        .create(stitchrs::domain::repositories::user_repository::NewUser {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash,
            role: stitchrs::domain::models::user::UserRole::Admin,
            employee_id: None,
        })
        .await
        .unwrap();

    let login = server
        .post("/v1/auth/login")
        .json(&json!({ "email": "admin@example.com", "password": "secret123" }))
        .await;
    login.assert_status_ok();
    let body: Value = login.json();
    let token = body["token"].as_str().expect("token in response");

    let employees = server
        .get("/v1/employees")
        .authorization_bearer(token)
        .await;
    employees.assert_status_ok();

    // Wrong password is rejected
    let bad = server
        .post("/v1/auth/login")
        .json(&json!({ "email": "admin@example.com", "password": "wrong" }))
        .await;
    assert_eq!(bad.status_code(), 401);
}

#[tokio::test]
async fn scan_endpoint_reports_unknown_tags() {
    let (server, _ctx) = test_server().await;

    let response = server
        .post("/v1/scans")
        .json(&json!({ "rfid": "TAG-GHOST" }))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn scan_endpoint_records_progress_for_known_tags() {
    let (server, ctx) = test_server().await;

    let order = ctx.seed_order("ORD-90", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-900").await;
    let employee = ctx.seed_employee("Amina", "TAG-900").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(
            employee.id,
            allocation.id,
            3,
            stitchrs::domain::models::task::TaskDuration::OneDay,
        )
        .await
        .unwrap();

    let response = server
        .post("/v1/scans")
        .json(&json!({ "rfid": "TAG-900" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["employee_name"], "Amina");
    assert_eq!(body["completed"], 1);
    assert_eq!(body["target"], 3);
    assert_eq!(body["step"], "Cutting");
}
