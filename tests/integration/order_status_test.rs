// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use stitchrs::domain::models::order::OrderStatus;
use stitchrs::domain::models::task::TaskDuration;

/// 订单状态是读取路径上的派生值：无进度Pending、部分进度
/// In Progress、完成件数之和达到目标Completed
#[tokio::test]
async fn order_status_follows_the_completed_sum() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-30", 4, &["Cutting", "Sewing"]).await;
    let machine_a = ctx.seed_machine("M-300").await;
    let machine_b = ctx.seed_machine("M-301").await;
    let emp_a = ctx.seed_employee("Amina", "TAG-300").await;
    let emp_b = ctx.seed_employee("Banu", "TAG-301").await;

    assert_eq!(
        ctx.order_service.derived_status(order.id).await.unwrap(),
        OrderStatus::Pending
    );

    let allocation_a = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine_a.id)
        .await
        .unwrap();
    let allocation_b = ctx
        .allocation_service
        .assign(order.id, "Sewing", machine_b.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(emp_a.id, allocation_a.id, 2, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(emp_b.id, allocation_b.id, 2, TaskDuration::OneDay)
        .await
        .unwrap();

    // 3 of 4 pieces done
    ctx.scan_service.process("TAG-300").await.unwrap();
    ctx.scan_service.process("TAG-300").await.unwrap();
    ctx.scan_service.process("TAG-301").await.unwrap();
    assert_eq!(
        ctx.order_service.derived_status(order.id).await.unwrap(),
        OrderStatus::InProgress
    );

    // Fourth piece completes the order; freed machines must not
    // make the completed count disappear
    ctx.scan_service.process("TAG-301").await.unwrap();
    assert_eq!(
        ctx.order_service.derived_status(order.id).await.unwrap(),
        OrderStatus::Completed
    );
}

/// 进度视图给出每工序的机器与完成件数
#[tokio::test]
async fn progress_reports_per_step_counts() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-31", 10, &["Cutting", "Sewing"]).await;
    let machine = ctx.seed_machine("M-310").await;
    let employee = ctx.seed_employee("Chitra", "TAG-310").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.scan_service.process("TAG-310").await.unwrap();
    ctx.scan_service.process("TAG-310").await.unwrap();

    let progress = ctx.order_service.progress().await.unwrap();
    assert_eq!(progress.len(), 1);
    let entry = &progress[0];
    assert_eq!(entry.order_number, "ORD-31");
    assert_eq!(entry.completed, 2);
    assert_eq!(entry.steps.len(), 2);

    let cutting = entry.steps.iter().find(|s| s.step == "Cutting").unwrap();
    assert_eq!(cutting.machine_id, Some(machine.id));
    assert_eq!(cutting.completed, 2);

    let sewing = entry.steps.iter().find(|s| s.step == "Sewing").unwrap();
    assert_eq!(sewing.machine_id, None);
    assert_eq!(sewing.completed, 0);
}

/// 看板快照与办公室看板统计核心计数
#[tokio::test]
async fn dashboard_counts_reflect_core_state() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-32", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-320").await;
    ctx.seed_machine("M-321").await;
    let employee = ctx.seed_employee("Devi", "TAG-320").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.scan_service.process("TAG-320").await.unwrap();

    let snapshot = ctx.dashboard_service.snapshot().await.unwrap();
    assert_eq!(snapshot.total_tasks, 1);
    assert_eq!(snapshot.completed_tasks, 0);
    assert_eq!(snapshot.active_orders, 1);
    assert_eq!(snapshot.available_machines, 1);
    assert_eq!(snapshot.in_use_machines, 1);

    let office = ctx.dashboard_service.office().await.unwrap();
    assert_eq!(office.total_orders, 1);
    assert_eq!(office.total_employees, 1);
    assert_eq!(office.employees_working, 1);
    assert_eq!(office.tasks.len(), 1);
    assert_eq!(office.tasks[0].employee_name, "Devi");
    assert_eq!(office.tasks[0].completed, 1);

    let employee_view = ctx
        .dashboard_service
        .employee(employee.id)
        .await
        .unwrap()
        .expect("employee has an open task");
    assert_eq!(employee_view.order_id, order.id);
    assert_eq!(employee_view.step, "Cutting");
    assert_eq!(employee_view.completed, 1);
    assert_eq!(employee_view.target, 5);
}
