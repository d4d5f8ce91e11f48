// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 员工实体
///
/// 表示一名持有RFID工牌的生产线员工。RFID标签一经登记
/// 不可变更，重复登记同一标签必须失败而不是覆盖。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// 员工唯一标识符
    pub id: i32,
    /// 员工姓名
    pub name: String,
    /// RFID工牌标签（全局唯一，不可变更）
    pub rfid: String,
    /// 手机号码（唯一，可选）
    pub mobile: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}
