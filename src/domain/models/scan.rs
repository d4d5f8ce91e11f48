// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::WorkStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// RFID扫描审计记录
///
/// 每次成功计入的工牌扫描都会无条件追加一条审计记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfidScan {
    pub id: i32,
    pub employee_id: i32,
    pub task_id: i32,
    pub scan_time: DateTime<FixedOffset>,
}

/// 登记台扫描记录
///
/// 员工登记流程中，读卡器先把扫到的标签写入缓冲表，
/// 登记界面再取最近一次扫描与新员工配对。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegScan {
    pub id: i32,
    pub rfid: String,
    pub scanned_at: DateTime<FixedOffset>,
}

/// 扫描处理结果
///
/// 扫描处理器对一次工牌扫描的确定性结果：要么命中一个
/// 有剩余容量的任务并计入一件，要么该员工没有剩余工作。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// 扫描已计入
    Recorded {
        /// 员工姓名
        employee_name: String,
        /// 命中任务所属订单ID
        order_id: i32,
        /// 命中任务的工序名
        step: String,
        /// 递增后的完成件数
        completed: i32,
        /// 任务目标件数
        target: i32,
        /// 递增后的任务状态
        status: WorkStatus,
    },
    /// 没有剩余工作（无任务指派，或全部任务已达目标）
    NoRemainingWork {
        /// 员工姓名
        employee_name: String,
    },
}
