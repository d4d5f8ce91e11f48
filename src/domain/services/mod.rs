// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use thiserror::Error;

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了
/// 车间生产跟踪的生命周期规则，协调多个仓库来完成业务操作。
///
/// 包含的服务：
/// - 分配服务（allocation_service）：机器与订单工序的绑定、释放与对账
/// - 任务服务（task_service）：员工任务的指派、改派、完成与删除
/// - 扫描服务（scan_service）：RFID工牌扫描的入口与级联编排
/// - 订单服务（order_service）：订单目录与进度/状态派生
/// - 看板服务（dashboard_service）：办公室与员工看板的只读聚合
///
/// 分配服务与任务服务互不直接调用，级联规则集中在扫描服务
/// 与显式的管理操作（指派/释放/删除）中，保证状态机只有
/// 一份权威实现。
pub mod allocation_service;
pub mod dashboard_service;
pub mod order_service;
pub mod scan_service;
pub mod task_service;


/// 核心错误类型
///
/// 所有核心操作的统一错误分类，调用方按类别映射为对外结果：
/// 校验失败、引用对象不存在、不变式冲突、存储瞬时故障
/// （可重试）。存储驱动的内部细节只记录日志，不对外暴露。
#[derive(Error, Debug)]
pub enum CoreError {
    /// 输入缺失或非法
    #[error("Validation error: {0}")]
    Validation(String),

    /// 引用的实体不存在
    #[error("{0} not found")]
    NotFound(String),

    /// 不变式冲突（重复登记、重复分配、释放未完成的机器等）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 存储瞬时故障，调用方可退避重试
    #[error("Transient store failure: {0}")]
    Transient(String),
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(db_err) => {
                tracing::error!("Store failure: {}", db_err);
                CoreError::Transient("storage temporarily unavailable".to_string())
            }
            RepositoryError::NotFound => CoreError::NotFound("record".to_string()),
            RepositoryError::Conflict(message) => CoreError::Conflict(message),
        }
    }
}

impl CoreError {
    /// 把仓库的NotFound映射为具体实体名，其余错误走常规转换
    pub(crate) fn from_repo(err: RepositoryError, entity: &str) -> Self {
        match err {
            RepositoryError::NotFound => CoreError::NotFound(entity.to_string()),
            other => other.into(),
        }
    }
}
