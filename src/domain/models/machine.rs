// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 机器实体
///
/// 表示车间内一台可分配的生产设备。机器状态必须与其
/// 当前是否存在存活分配保持一致：没有存活分配的机器
/// 不得为占用状态，反之亦然。状态变更只能由分配生命周期
/// 驱动，不得被其他路径直接修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// 机器唯一标识符
    pub id: i32,
    /// 机器编号（唯一标签）
    pub machine_number: String,
    /// 机器状态
    pub status: MachineStatus,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 机器状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MachineStatus {
    /// 空闲，可以被分配到工序
    #[default]
    Available,
    /// 占用中，存在一个存活分配引用该机器
    #[serde(rename = "In Use")]
    InUse,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MachineStatus::Available => write!(f, "Available"),
            MachineStatus::InUse => write!(f, "In Use"),
        }
    }
}

impl FromStr for MachineStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(MachineStatus::Available),
            "In Use" => Ok(MachineStatus::InUse),
            _ => Err(()),
        }
    }
}
