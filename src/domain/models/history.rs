// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 任务历史记录
///
/// 任务终结事件（改派、删除、达标完成）发生时对任务及其
/// 分配上下文（订单、工序、机器、目标件数）的不可变快照。
/// 只追加，核心永不更新或删除历史记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHistory {
    /// 历史记录唯一标识符
    pub id: i32,
    /// 当时负责的员工ID
    pub employee_id: i32,
    /// 订单编号快照
    pub order_number: String,
    /// 工序名快照
    pub step_name: String,
    /// 机器编号快照
    pub machine_number: String,
    /// 目标件数快照
    pub target: i32,
    /// 终结事件类型
    pub action_type: ActionType,
    /// 事件发生时间
    pub working_date: DateTime<FixedOffset>,
}

/// 任务终结事件类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// 任务被改派给其他员工或调整目标
    Reassign,
    /// 任务被删除
    Delete,
    /// 任务计数达到目标
    Complete,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActionType::Reassign => write!(f, "Reassign"),
            ActionType::Delete => write!(f, "Delete"),
            ActionType::Complete => write!(f, "Complete"),
        }
    }
}

impl FromStr for ActionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reassign" => Ok(ActionType::Reassign),
            "Delete" => Ok(ActionType::Delete),
            "Complete" => Ok(ActionType::Complete),
            _ => Err(()),
        }
    }
}
