// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::machine::{Machine, MachineStatus};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 机器仓库特质
///
/// 定义机器注册表的数据访问接口。注意：机器状态的写入
/// 不在此接口上，状态副作用由分配仓库的复合操作独占，
/// 以保证机器状态与存活分配始终一致。
#[async_trait]
pub trait MachineRepository: Send + Sync {
    /// 登记新机器
    async fn create(&self, machine_number: &str) -> Result<Machine, RepositoryError>;
    /// 根据ID查找机器
    async fn find_by_id(&self, id: i32) -> Result<Option<Machine>, RepositoryError>;
    /// 获取全部机器
    async fn list(&self) -> Result<Vec<Machine>, RepositoryError>;
    /// 按状态统计机器数量
    async fn count_by_status(&self, status: MachineStatus) -> Result<u64, RepositoryError>;
}
