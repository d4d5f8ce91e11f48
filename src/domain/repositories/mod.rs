// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 员工仓库（employee_repository）：员工登记、查询与级联删除
/// - 机器仓库（machine_repository）：机器登记与状态查询
/// - 订单仓库（order_repository）：订单、工序与级联删除
/// - 分配仓库（allocation_repository）：机器分配生命周期的事务性复合操作
/// - 任务仓库（task_repository）：员工任务与扫描递增的事务性复合操作
/// - 历史仓库（history_repository）：任务历史账本的追加与查询
/// - 登记扫描仓库（reg_scan_repository）：登记台扫描缓冲
/// - 用户仓库（user_repository）：后台登录账户
///
/// 涉及多步检查再写入的不变式操作（分配、释放、扫描、删除级联）
/// 以复合方法的形式出现在接口上，实现方必须在单个存储事务内
/// 重查谓词并完成写入。
pub mod allocation_repository;
pub mod employee_repository;
pub mod history_repository;
pub mod machine_repository;
pub mod order_repository;
pub mod reg_scan_repository;
pub mod task_repository;
pub mod user_repository;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 唯一性或可用性谓词被违反
    #[error("Conflict: {0}")]
    Conflict(String),
}
