// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 订单实体
///
/// 表示一个生产订单，持有目标件数与当前生产阶段。
/// 订单状态是读取路径上的派生值（见[`OrderStatus::derive`]），
/// 核心写路径不维护它；当前阶段由外部阶段流转操作显式设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 订单唯一标识符
    pub id: i32,
    /// 订单编号（唯一）
    pub order_number: String,
    /// 产品名称
    pub product: String,
    /// 订单目标件数
    pub quantity: i32,
    /// 订单状态（派生值的最近快照）
    pub status: OrderStatus,
    /// 当前生产阶段
    pub current_stage: ProductionStage,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 订单工序
///
/// 属于且仅属于一个订单，名称在订单内唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStep {
    pub id: i32,
    pub order_id: i32,
    pub name: String,
}

/// 订单状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// 待开工，尚无完成件数
    #[default]
    Pending,
    /// 生产中，已有完成件数但未达目标
    #[serde(rename = "In Progress")]
    InProgress,
    /// 已完成，完成件数达到订单目标
    Completed,
}

impl OrderStatus {
    /// 从完成件数派生订单状态
    ///
    /// 订单状态始终由其所有存活分配下任务的完成件数之和
    /// 派生，核心不在写路径上反规范化该值：总和等于订单
    /// 目标为已完成，大于0为生产中，否则为待开工。
    ///
    /// # 参数
    ///
    /// * `quantity` - 订单目标件数
    /// * `completed` - 所有存活分配下任务的完成件数之和
    pub fn derive(quantity: i32, completed: i64) -> Self {
        if completed >= quantity as i64 && quantity > 0 {
            OrderStatus::Completed
        } else if completed > 0 {
            OrderStatus::InProgress
        } else {
            OrderStatus::Pending
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::InProgress => write!(f, "In Progress"),
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "In Progress" => Ok(OrderStatus::InProgress),
            "Completed" => Ok(OrderStatus::Completed),
            _ => Err(()),
        }
    }
}

/// 生产阶段枚举
///
/// 订单级的描述性生产阶段，区别于工序级的分配/任务状态。
/// 阶段由车间管理员通过外部阶段流转操作设置，不参与
/// 核心状态机的级联。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProductionStage {
    #[default]
    Cutting,
    #[serde(rename = "Cutting Started")]
    CuttingStarted,
    #[serde(rename = "Cutting Completed")]
    CuttingCompleted,
    #[serde(rename = "Sewing is in progress")]
    SewingInProgress,
    #[serde(rename = "Sewing Completed")]
    SewingCompleted,
    #[serde(rename = "Quality Check in progress")]
    QualityCheckInProgress,
    #[serde(rename = "Quality Check Completed")]
    QualityCheckCompleted,
    #[serde(rename = "Packing is in progress")]
    PackingInProgress,
    #[serde(rename = "Packing Completed")]
    PackingCompleted,
    #[serde(rename = "Ready for Dispatch")]
    ReadyForDispatch,
    Dispatched,
}

impl ProductionStage {
    /// 所有阶段的固定顺序列表
    pub const ALL: [ProductionStage; 11] = [
        ProductionStage::Cutting,
        ProductionStage::CuttingStarted,
        ProductionStage::CuttingCompleted,
        ProductionStage::SewingInProgress,
        ProductionStage::SewingCompleted,
        ProductionStage::QualityCheckInProgress,
        ProductionStage::QualityCheckCompleted,
        ProductionStage::PackingInProgress,
        ProductionStage::PackingCompleted,
        ProductionStage::ReadyForDispatch,
        ProductionStage::Dispatched,
    ];
}

impl fmt::Display for ProductionStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            ProductionStage::Cutting => "Cutting",
            ProductionStage::CuttingStarted => "Cutting Started",
            ProductionStage::CuttingCompleted => "Cutting Completed",
            ProductionStage::SewingInProgress => "Sewing is in progress",
            ProductionStage::SewingCompleted => "Sewing Completed",
            ProductionStage::QualityCheckInProgress => "Quality Check in progress",
            ProductionStage::QualityCheckCompleted => "Quality Check Completed",
            ProductionStage::PackingInProgress => "Packing is in progress",
            ProductionStage::PackingCompleted => "Packing Completed",
            ProductionStage::ReadyForDispatch => "Ready for Dispatch",
            ProductionStage::Dispatched => "Dispatched",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ProductionStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductionStage::ALL
            .iter()
            .find(|stage| stage.to_string() == s)
            .copied()
            .ok_or(())
    }
}
