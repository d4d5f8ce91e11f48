// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use stitchrs::domain::models::machine::MachineStatus;
use stitchrs::domain::models::task::{TaskDuration, WorkStatus};
use stitchrs::domain::services::CoreError;

/// 分配成功后机器占用，重复分配同一工序或同一机器都冲突
#[tokio::test]
async fn assign_enforces_both_uniqueness_invariants() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-1", 100, &["Cutting", "Sewing"]).await;
    let m5 = ctx.seed_machine("M-005").await;
    let m6 = ctx.seed_machine("M-006").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", m5.id)
        .await
        .unwrap();
    assert_eq!(allocation.status, WorkStatus::Assigned);

    let machine = ctx.machines.find_by_id(m5.id).await.unwrap().unwrap();
    assert_eq!(machine.status, MachineStatus::InUse);

    // Second machine on the same (order, step)
    let err = ctx
        .allocation_service
        .assign(order.id, "Cutting", m6.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    // Same machine on another step
    let err = ctx
        .allocation_service
        .assign(order.id, "Sewing", m5.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    // The free machine is still assignable to the free step
    ctx.allocation_service
        .assign(order.id, "Sewing", m6.id)
        .await
        .unwrap();
}

/// 机器状态与存活分配始终一致
#[tokio::test]
async fn machine_status_agrees_with_live_allocations() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-2", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-010").await;

    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );
    assert!(ctx
        .allocations
        .find_live_by_machine(machine.id)
        .await
        .unwrap()
        .is_none());

    ctx.allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();

    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::InUse
    );
    assert!(ctx
        .allocations
        .find_live_by_machine(machine.id)
        .await
        .unwrap()
        .is_some());
}

/// 存活分配下有未完成任务时拒绝释放，机器状态不变
#[tokio::test]
async fn free_with_pending_tasks_is_a_conflict() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-3", 50, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-020").await;
    let employee = ctx.seed_employee("Amina", "TAG-20").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();

    let err = ctx.allocation_service.free(machine.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::InUse
    );
}

/// 人工完成任务后可以释放：分配标记Available但保留行
#[tokio::test]
async fn free_after_completion_keeps_the_allocation_row() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-4", 50, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-030").await;
    let employee = ctx.seed_employee("Banu", "TAG-30").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    let (task, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();

    ctx.task_service.complete(task.id).await.unwrap();
    ctx.allocation_service.free(machine.id).await.unwrap();

    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );

    // Row survives as Available so history stays addressable
    let released = ctx
        .allocations
        .find_by_id(allocation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status, WorkStatus::Available);

    // Machine and step are assignable again
    ctx.allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
}

/// 释放没有存活分配的机器返回NotFound
#[tokio::test]
async fn free_without_live_allocation_is_not_found() {
    let ctx = setup().await;
    let machine = ctx.seed_machine("M-040").await;

    let err = ctx.allocation_service.free(machine.id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

/// 删除分配：任务先留痕再删除，机器释放；重复删除NotFound
#[tokio::test]
async fn delete_cascade_records_history_and_frees_the_machine() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-5", 50, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-050").await;
    let employee = ctx.seed_employee("Chitra", "TAG-50").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    let (task, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();

    ctx.allocation_service.delete(allocation.id).await.unwrap();

    assert!(ctx.tasks.find_by_id(task.id).await.unwrap().is_none());
    assert!(ctx
        .allocations
        .find_by_id(allocation.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );

    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order_number, "ORD-5");
    assert_eq!(history[0].step_name, "Cutting");
    assert_eq!(history[0].machine_number, "M-050");
    assert_eq!(history[0].target, 5);

    let err = ctx
        .allocation_service
        .delete(allocation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

/// 对账是幂等的：连续两次与一次结果相同
#[tokio::test]
async fn reconcile_is_idempotent() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-6", 2, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-060").await;
    let employee = ctx.seed_employee("Devi", "TAG-60").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(employee.id, allocation.id, 1, TaskDuration::OneDay)
        .await
        .unwrap();

    // Task reaches target through a scan, machine is already freed
    ctx.scan_service.process("TAG-60").await.unwrap();

    let first = ctx
        .allocation_service
        .reconcile_machine_status(machine.id)
        .await
        .unwrap();
    let second = ctx
        .allocation_service
        .reconcile_machine_status(machine.id)
        .await
        .unwrap();

    assert_eq!(first, MachineStatus::Available);
    assert_eq!(second, MachineStatus::Available);
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );
}

/// 对账会修复失去任务支撑的占用机器
#[tokio::test]
async fn reconcile_frees_a_machine_whose_allocation_has_no_tasks() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-7", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-070").await;

    ctx.allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::InUse
    );

    let status = ctx
        .allocation_service
        .reconcile_machine_status(machine.id)
        .await
        .unwrap();

    assert_eq!(status, MachineStatus::Available);
    assert!(ctx
        .allocations
        .find_live_by_machine(machine.id)
        .await
        .unwrap()
        .is_none());
}
