// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use stitchrs::domain::models::history::ActionType;
use stitchrs::domain::models::machine::MachineStatus;
use stitchrs::domain::models::task::TaskDuration;
use stitchrs::domain::models::user::UserRole;
use stitchrs::domain::repositories::user_repository::NewUser;
use stitchrs::domain::repositories::RepositoryError;
use stitchrs::infrastructure::database::entities::reg_scan;

/// RFID一经登记不可重复使用；手机号同样唯一
#[tokio::test]
async fn duplicate_rfid_or_mobile_registration_fails() {
    let ctx = setup().await;

    ctx.employees
        .create("Amina", "TAG-400", Some("9876543210"))
        .await
        .unwrap();

    let err = ctx
        .employees
        .create("Imposter", "TAG-400", None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let err = ctx
        .employees
        .create("Other", "TAG-401", Some("9876543210"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // The original record is untouched
    let amina = ctx.employees.find_by_rfid("TAG-400").await.unwrap().unwrap();
    assert_eq!(amina.name, "Amina");
}

/// 删除员工先级联删除其登录账户
#[tokio::test]
async fn employee_deletion_cascades_to_login_accounts() {
    let ctx = setup().await;
    let employee = ctx.seed_employee("Banu", "TAG-410").await;

    let user = ctx
        .users
        .create(NewUser {
            name: "Banu".to_string(),
            email: "banu@example.com".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Employee,
            employee_id: Some(employee.id),
        })
        .await
        .unwrap();

    ctx.employees.delete_cascade(employee.id).await.unwrap();

    assert!(ctx.employees.find_by_id(employee.id).await.unwrap().is_none());
    assert!(ctx.users.find_by_id(user.id).await.unwrap().is_none());
}

/// 有任务在身的员工不可删除
#[tokio::test]
async fn employee_with_tasks_cannot_be_deleted() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-41", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-410").await;
    let employee = ctx.seed_employee("Chitra", "TAG-420").await;

    let allocation = ctx
        .allocation_service
        .assign(order.id, "Cutting", machine.id)
        .await
        .unwrap();
    ctx.task_service
        .assign_or_update(employee.id, allocation.id, 5, TaskDuration::OneDay)
        .await
        .unwrap();

    let err = ctx.employees.delete_cascade(employee.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

/// 机器编号与订单编号唯一
#[tokio::test]
async fn machine_and_order_numbers_are_unique() {
    let ctx = setup().await;

    ctx.seed_machine("M-430").await;
    let err = ctx.machines.create("M-430").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    ctx.seed_order("ORD-43", 10, &["Cutting"]).await;
    let err = ctx
        .orders
        .create_with_steps("ORD-43", "Shirt", 10, &["Cutting".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

/// 删除订单：任务留痕、分配删除、机器释放、工序清空
#[tokio::test]
async fn order_deletion_cascades_explicitly() {
    let ctx = setup().await;
    let order = ctx.seed_order("ORD-44", 10, &["Cutting"]).await;
    let machine = ctx.seed_machine("M-440").await;
    let employee = ctx.seed_employee("Devi", "TAG-440").await;

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

    ctx.order_service.delete(order.id).await.unwrap();

    assert!(ctx.orders.find_by_id(order.id).await.unwrap().is_none());
    assert!(ctx
        .allocations
        .find_by_id(allocation.id)
        .await
        .unwrap()
        .is_none());
    assert!(ctx.tasks.find_by_id(task.id).await.unwrap().is_none());
    assert_eq!(
        ctx.machines.find_by_id(machine.id).await.unwrap().unwrap().status,
        MachineStatus::Available
    );

    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Delete);
}

/// 登记台缓冲返回时效窗口内最近的扫描
#[tokio::test]
async fn reg_scan_buffer_honors_the_freshness_window() {
    let ctx = setup().await;

    // An old scan outside the window, inserted directly
    let stale = reg_scan::ActiveModel {
        rfid: Set("TAG-OLD".to_string()),
        scanned_at: Set((Utc::now() - Duration::minutes(10)).fixed_offset()),
        ..Default::default()
    };
    stale.insert(ctx.db.as_ref()).await.unwrap();

    assert!(ctx
        .reg_scans
        .latest_within(Duration::minutes(3))
        .await
        .unwrap()
        .is_none());

    ctx.reg_scans.record("TAG-NEW").await.unwrap();

    let latest = ctx
        .reg_scans
        .latest_within(Duration::minutes(3))
        .await
        .unwrap()
        .expect("fresh scan should be returned");
    assert_eq!(latest.rfid, "TAG-NEW");
}

/// 历史账本追加从不拒绝重复数据
#[tokio::test]
async fn history_append_accepts_duplicates() {
    let ctx = setup().await;
    let employee = ctx.seed_employee("Esha", "TAG-450").await;

    use stitchrs::domain::repositories::history_repository::NewTaskHistory;
    let record = NewTaskHistory {
        employee_id: employee.id,
        order_number: "ORD-45".to_string(),
        step_name: "Cutting".to_string(),
        machine_number: "M-450".to_string(),
        target: 5,
        action_type: ActionType::Complete,
    };

    ctx.histories.append(record.clone()).await.unwrap();
    ctx.histories.append(record).await.unwrap();

    let history = ctx.histories.list_by_employee(employee.id).await.unwrap();
    assert_eq!(history.len(), 2);
}
