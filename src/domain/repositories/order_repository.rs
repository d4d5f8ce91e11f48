// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::order::{Order, OrderStep, ProductionStage};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 订单仓库特质
///
/// 定义订单与工序目录的数据访问接口。订单删除必须以显式
/// 级联步骤实现（历史、任务、分配、机器释放、工序、订单），
/// 不依赖存储层的隐式外键级联。
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 创建订单并写入其工序列表
    async fn create_with_steps(
        &self,
        order_number: &str,
        product: &str,
        quantity: i32,
        steps: &[String],
    ) -> Result<Order, RepositoryError>;
    /// 根据ID查找订单
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
    /// 获取全部订单
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;
    /// 获取订单的工序列表
    async fn list_steps(&self, order_id: i32) -> Result<Vec<OrderStep>, RepositoryError>;
    /// 更新订单的产品与目标件数
    async fn update_details(
        &self,
        id: i32,
        product: &str,
        quantity: i32,
    ) -> Result<Order, RepositoryError>;
    /// 设置订单当前生产阶段（外部阶段流转操作，不产生级联）
    async fn set_stage(&self, id: i32, stage: ProductionStage) -> Result<Order, RepositoryError>;
    /// 订单总数
    async fn count(&self) -> Result<u64, RepositoryError>;
    /// 删除订单及其全部下游记录（任务先留痕再删除，机器释放）
    async fn delete_cascade(&self, id: i32) -> Result<(), RepositoryError>;
}
