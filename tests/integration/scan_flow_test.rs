// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use stitchrs::domain::models::history::ActionType;
use stitchrs::domain::models::machine::MachineStatus;
use stitchrs::domain::models::scan::ScanOutcome;
use stitchrs::domain::models::task::{TaskDuration, WorkStatus};
use stitchrs::domain::services::CoreError;

/// 扫描递增任务并把同一状态写到分配；达标后释放机器、留痕
#[tokio::test]
async fn scan_to_completion_cascades_through_allocation_and_machine() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-10", 2, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-100").await;
    let employee = ctx.seed_employee("Amina", "TAG-100").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    let (task, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation.id, 2, TaskDuration::OneDay)
        .await
        .unwrap();

    // First scan: 1/2, In Progress on both task and allocation
    match ctx.scan_service.process("TAG-100").await.unwrap() {
        ScanOutcome::Recorded {
            completed,
            target,
            status,
            step,
            ..
        } => {
            assert_eq!(completed, 1);
            assert_eq!(target, 2);
            assert_eq!(status, WorkStatus::InProgress);
            assert_eq!(step, "Cutting");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let live = ctx
        .allocations
        .find_by_id(allocation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.status, WorkStatus::InProgress);
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::InUse
    );

    // Second scan: 2/2, Completed, machine freed, history appended
    match ctx.scan_service.process("TAG-100").await.unwrap() {
        ScanOutcome::Recorded {
            completed, status, ..
        } => {
            assert_eq!(completed, 2);
            assert_eq!(status, WorkStatus::Completed);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let task = ctx.tasks.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(task.completed, 2);
    assert_eq!(task.status, WorkStatus::Completed);

    let released = ctx
        .allocations
        .find_by_id(allocation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status, WorkStatus::Available);
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );

    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Complete);
    assert_eq!(history[0].order_number, "ORD-10");

    // Third scan: no remaining work, nothing moves past the target
    assert!(matches!(
        ctx.scan_service.process("TAG-100").await.unwrap(),
        ScanOutcome::NoRemainingWork { .. }
    ));
    let task = ctx.tasks.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(task.completed, 2, "scans beyond target must be no-ops");
}

/// 未知标签返回NotFound，无任何副作用
#[tokio::test]
async fn unknown_tag_has_no_side_effects() {
    let ctx = setup().await;
    ctx.seed_employee("Amina", "TAG-110").await;

    let err = ctx.scan_service.process("TAG-NOPE").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

/// 没有任务指派的员工扫描报告"无剩余工作"
#[tokio::test]
async fn employee_without_tasks_reports_no_remaining_work() {
    let ctx = setup().await;
    ctx.seed_employee("Banu", "TAG-120").await;

    assert!(matches!(
        ctx.scan_service.process("TAG-120").await.unwrap(),
        ScanOutcome::NoRemainingWork { .. }
    ));
}

/// 双任务场景：扫描命中较早的任务A并使其完成，
/// 任务B不受影响，任务A的机器被释放
#[tokio::test]
async fn scan_services_the_earliest_task_first() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-11", 100, &["Cutting", "Sewing"]).await;
    let machine_a = ctx.seed_machine("M-111").await;
    let machine_b = ctx.seed_machine("M-112").await;
    let employee = ctx.seed_employee("Chitra", "TAG-130").await;

    // Task A first (target 2), brought to 1/2 with a scan
    let allocation_a = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine_a.id)
        .await
        .unwrap();
    let (task_a, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation_a.id, 2, TaskDuration::OneDay)
        .await
        .unwrap();
    ctx.scan_service.process("TAG-130").await.unwrap();

    // Task B created afterwards (target 3)
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let allocation_b = ctx
        .allocation_service
        .assign(order.id, "Sewing", machine_b.id)
        .await
        .unwrap();
    let (task_b, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation_b.id, 3, TaskDuration::MultipleDays)
        .await
        .unwrap();

    // The scan hits task A (older), completing it
    match ctx.scan_service.process("TAG-130").await.unwrap() {
        ScanOutcome::Recorded {
            completed, status, ..
        } => {
            assert_eq!(completed, 2);
            assert_eq!(status, WorkStatus::Completed);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let task_a = ctx.tasks.find_by_id(task_a.id).await.unwrap().unwrap();
    let task_b = ctx.tasks.find_by_id(task_b.id).await.unwrap().unwrap();
    assert_eq!(task_a.completed, 2);
    assert_eq!(task_b.completed, 0, "newer task must stay untouched");

    assert_eq!(
        ctx.machines
            .find_by_id(machine_a.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        MachineStatus::Available
    );
    assert_eq!(
        ctx.machines
            .find_by_id(machine_b.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        MachineStatus::InUse
    );

    // Further scans fall through to task B
    match ctx.scan_service.process("TAG-130").await.unwrap() {
        ScanOutcome::Recorded { completed, .. } => assert_eq!(completed, 1),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

/// 对单任务连续扫描N次：completed = min(N, target)
#[tokio::test]
async fn repeated_scans_clamp_at_target() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-12", 100, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-120").await;
    let employee = ctx.seed_employee("Devi", "TAG-140").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    let (task, _) = ctx
        .task_service
        .assign_or_update(employee.id, allocation.id, 3, TaskDuration::OneDay)
        .await
        .unwrap();

    for _ in 0..7 {
        ctx.scan_service.process("TAG-140").await.unwrap();
    }

    let task = ctx.tasks.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(task.completed, 3);
    assert_eq!(task.status, WorkStatus::Completed);
}
