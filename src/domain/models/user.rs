// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 后台用户实体
///
/// 管理系统的登录账户，可以关联一名员工（移动端登录）。
/// 密码只保存bcrypt散列，明文不落库。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// bcrypt散列后的密码
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    /// 关联的员工ID（移动端账户使用）
    pub employee_id: Option<i32>,
    pub reset_token: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 用户角色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "manager")]
    Manager,
    #[default]
    #[serde(rename = "employee")]
    Employee,
    Cutting,
    Sewing,
    #[serde(rename = "Quality control")]
    QualityControl,
    Packing,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Employee => "employee",
            UserRole::Cutting => "Cutting",
            UserRole::Sewing => "Sewing",
            UserRole::QualityControl => "Quality control",
            UserRole::Packing => "Packing",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "employee" => Ok(UserRole::Employee),
            "Cutting" => Ok(UserRole::Cutting),
            "Sewing" => Ok(UserRole::Sewing),
            "Quality control" => Ok(UserRole::QualityControl),
            "Packing" => Ok(UserRole::Packing),
            _ => Err(()),
        }
    }
}
