// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::history::{ActionType, TaskHistory};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 待追加的历史记录
#[derive(Debug, Clone)]
pub struct NewTaskHistory {
    pub employee_id: i32,
    pub order_number: String,
    pub step_name: String,
    pub machine_number: String,
    pub target: i32,
    pub action_type: ActionType,
}

/// 历史账本仓库特质
///
/// 纯审计账本：追加除存储不可用外总是成功，从不因重复或
/// 重叠数据而拒绝；记录一经写入不再更新或删除。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 追加一条历史记录
    async fn append(&self, record: NewTaskHistory) -> Result<TaskHistory, RepositoryError>;
    /// 查询某员工的全部历史记录，按事件时间降序
    async fn list_by_employee(&self, employee_id: i32)
        -> Result<Vec<TaskHistory>, RepositoryError>;
}
