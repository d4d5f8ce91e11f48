// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use stitchrs::domain::models::history::ActionType;
use stitchrs::domain::models::task::{TaskDuration, WorkStatus};
use stitchrs::domain::services::CoreError;

/// 改派保留完成计数，并为既有任务写Reassign快照
#[tokio::test]
async fn reassignment_preserves_progress_and_snapshots_the_old_state() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-20", 100, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-200").await;
    let first = ctx.seed_employee("Amina", "TAG-200").await;
    let second = ctx.seed_employee("Banu", "TAG-201").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    let (task, created) = ctx
        .task_service
        .assign_or_update(first.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();
    assert!(created);

    // Two pieces done by the first employee
    ctx.scan_service.process("TAG-200").await.unwrap();
    ctx.scan_service.process("TAG-200").await.unwrap();

    // Reassign to the second employee with a new target
    let (updated, created) = ctx
        .task_service
        .assign_or_update(second.id, allocation.id, 8, TaskDuration::MultipleDays)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(updated.id, task.id, "task is updated in place");
    assert_eq!(updated.employee_id, second.id);
    assert_eq!(updated.target, 8);
    assert_eq!(updated.completed, 2, "completed counter survives reassignment");
    assert_eq!(updated.status, WorkStatus::InProgress, "status is not reset");

    // The snapshot records the previous holder and target
    let history = ctx.histories.list_by_employee(first.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Reassign);
    assert_eq!(history[0].target, 5);
    assert_eq!(history[0].machine_number, "M-200");
}

/// 指派校验：目标必须为正，引用必须存在，分配必须存活
#[tokio::test]
async fn assignment_validation_rules() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-21", 100, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-210").await;
    let employee = ctx.seed_employee("Chitra", "TAG-210").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();

    let err = ctx
        .task_service
        .assign_or_update(employee.id, allocation.id, 0, TaskDuration::OneDay)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = ctx
        .task_service
        .assign_or_update(9999, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));

    let err = ctx
        .task_service
        .assign_or_update(employee.id, 9999, 5, TaskDuration::OneDay)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

/// 删除任务先写Delete快照；重复删除NotFound
#[tokio::test]
async fn delete_task_appends_history_first() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-22", 100, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-220").await;
    let employee = ctx.seed_employee("Devi", "TAG-220").await;

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

    ctx.task_service.delete(task.id).await.unwrap();

    assert!(ctx.tasks.find_by_id(task.id).await.unwrap().is_none());
    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Delete);

    let err = ctx.task_service.delete(task.id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

/// 人工完成未达标的任务：机器保持占用（最新任务未达标），
/// 但此后释放请求不再被未完成任务挡住
#[tokio::test]
async fn manual_complete_unblocks_freeing_without_forcing_it() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-23", 100, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-230").await;
    let employee = ctx.seed_employee("Esha", "TAG-230").await;

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

    let completed = ctx.task_service.complete(task.id).await.unwrap();
    assert_eq!(completed.status, WorkStatus::Completed);

    // Reconciliation looks at counts, not the manual flag, so the
    // machine stays busy until explicitly freed
    use stitchrs::domain::models::machine::MachineStatus;
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::InUse
    );

    ctx.allocation_service.free(machine.id).await.unwrap();
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );
}

/// 历史账本按事件时间降序返回
#[tokio::test]
async fn history_is_returned_newest_first() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-24", 100, &["Cutting", "Sewing"]).await;
    let machine_a = ctx.seed_machine("M-240").await;
    let machine_b = ctx.seed_machine("M-241").await;
    let employee = ctx.seed_employee("Farah", "TAG-240").await;

    let allocation_a = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine_a.id)
        .await
        .unwrap();
    let (task_a, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation_a.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.task_service.delete(task_a.id).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let allocation_b = ctx
        .allocation_service
        .assign(order.id, "Sewing", machine_b.id)
        .await
        .unwrap();
    let (task_b, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation_b.id, 7, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.task_service.delete(task_b.id).await.unwrap();

    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].step_name, "Sewing", "newest event first");
    assert_eq!(history[1].step_name, "Cutting");
    assert!(history[0].working_date >= history[1].working_date);
}
