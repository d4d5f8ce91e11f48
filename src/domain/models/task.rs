// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 员工任务实体
///
/// 表示一名员工在某个机器分配上的生产任务，是RFID扫描
/// 所作用的工作单元。任务持有目标件数与已完成件数，
/// 已完成计数单调不减，且扫描递增永远不会超过目标值：
/// 当 completed == target 时，扫描对该任务是空操作，
/// 扫描处理器必须改为选择其他有剩余容量的任务。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: i32,
    /// 负责员工ID
    pub employee_id: i32,
    /// 所属机器分配ID
    pub machine_allocation_id: i32,
    /// 目标件数（必须大于0）
    pub target: i32,
    /// 已完成件数（0 <= completed，扫描递增不超过target）
    pub completed: i32,
    /// 工期类型，仅描述性信息
    pub duration: TaskDuration,
    /// 任务状态，由扫描进度驱动
    pub status: WorkStatus,
    /// 创建时间，扫描选择任务时按此字段先进先出
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 工作状态枚举
///
/// 任务与机器分配共享同一套状态词汇。分配的状态由其任务的
/// 进度驱动，不允许被独立设置；Available 仅用于分配侧，
/// 表示该分配已释放机器、不再存活。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorkStatus {
    /// 已指派，尚未开始计件
    #[default]
    Assigned,
    /// 进行中，已有扫描计入但未达目标
    #[serde(rename = "In Progress")]
    InProgress,
    /// 已完成，计数达到目标或被人工标记完成
    Completed,
    /// 已释放（仅用于机器分配）
    Available,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkStatus::Assigned => write!(f, "Assigned"),
            WorkStatus::InProgress => write!(f, "In Progress"),
            WorkStatus::Completed => write!(f, "Completed"),
            WorkStatus::Available => write!(f, "Available"),
        }
    }
}

impl FromStr for WorkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assigned" => Ok(WorkStatus::Assigned),
            "In Progress" => Ok(WorkStatus::InProgress),
            "Completed" => Ok(WorkStatus::Completed),
            "Available" => Ok(WorkStatus::Available),
            _ => Err(()),
        }
    }
}

/// 工期类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskDuration {
    /// 单日任务
    #[default]
    #[serde(rename = "One Day")]
    OneDay,
    /// 多日任务
    #[serde(rename = "Multiple Days")]
    MultipleDays,
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskDuration::OneDay => write!(f, "One Day"),
            TaskDuration::MultipleDays => write!(f, "Multiple Days"),
        }
    }
}

impl FromStr for TaskDuration {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "One Day" => Ok(TaskDuration::OneDay),
            "Multiple Days" => Ok(TaskDuration::MultipleDays),
            _ => Err(()),
        }
    }
}

impl Task {
    /// 判断任务是否还有剩余容量
    ///
    /// # 返回值
    ///
    /// 已完成件数小于目标件数时返回true
    pub fn has_capacity(&self) -> bool {
        self.completed < self.target
    }

    /// 记录一次扫描递增
    ///
    /// 将已完成件数加1并重新计算状态：达到目标则为已完成，
    /// 否则为进行中。当任务已无剩余容量时不做任何修改，
    /// 返回当前状态。
    ///
    /// # 返回值
    ///
    /// 返回递增后的任务状态
    pub fn apply_increment(&mut self) -> WorkStatus {
        if !self.has_capacity() {
            return self.status;
        }
        self.completed += 1;
        self.status = if self.completed >= self.target {
            WorkStatus::Completed
        } else {
            WorkStatus::InProgress
        };
        self.status
    }

    /// 判断任务计数是否已达目标
    pub fn is_target_reached(&self) -> bool {
        self.completed >= self.target
    }
}

/// 选择扫描要递增的任务
///
/// 任务列表必须已按创建时间升序排列（最早指派的优先）。
/// 返回第一个有剩余容量的任务下标；全部任务已达目标
/// 或列表为空时返回None。
pub fn select_scan_target(tasks: &[Task]) -> Option<usize> {
    tasks.iter().position(|task| task.has_capacity())
}
