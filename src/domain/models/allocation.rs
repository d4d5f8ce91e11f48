// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::WorkStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 机器分配实体
///
/// 将一台机器绑定到一个（订单，工序）对。不变式：
/// - 每个（订单，工序）对至多有一个存活分配；
/// - 每台机器至多有一个存活分配；
/// - 分配状态由其任务的聚合进度驱动，不允许被独立设置。
///
/// 机器状态的副作用由分配生命周期独占：分配创建使机器占用，
/// 释放/删除/对账使机器空闲。分配完成后标记为 Available
/// 保留行记录，从不删除，以保证任务与历史记录可寻址。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// 分配唯一标识符
    pub id: i32,
    /// 绑定的订单ID
    pub order_id: i32,
    /// 绑定的机器ID
    pub machine_id: i32,
    /// 绑定的工序名（订单内唯一）
    pub step: String,
    /// 分配状态，与任务共享同一套状态词汇
    pub status: WorkStatus,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl Allocation {
    /// 判断分配是否存活（仍占用其机器）
    pub fn is_live(&self) -> bool {
        self.status != WorkStatus::Available
    }
}
