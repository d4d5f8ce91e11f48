// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现
/// 包括各种实体仓库的数据库实现
///
/// 涉及不变式的复合操作（分配、释放、扫描落账、删除级联）
/// 都在单个SeaORM事务内完成：谓词在事务内重查，历史留痕、
/// 状态联动与机器对账和主写入一起提交，失败时整体回滚。
pub mod allocation_repo_impl;
pub mod employee_repo_impl;
pub mod history_repo_impl;
pub mod machine_repo_impl;
pub mod order_repo_impl;
pub mod reg_scan_repo_impl;
pub mod task_repo_impl;
pub mod user_repo_impl;
