// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::employee::Employee;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 员工仓库特质
///
/// 定义员工身份注册表的数据访问接口。RFID与手机号的唯一性
/// 由实现方强制：重复登记返回Conflict，绝不覆盖已有记录。
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 登记新员工
    async fn create(
        &self,
        name: &str,
        rfid: &str,
        mobile: Option<&str>,
    ) -> Result<Employee, RepositoryError>;
    /// 根据ID查找员工
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError>;
    /// 根据RFID标签解析员工身份
    async fn find_by_rfid(&self, rfid: &str) -> Result<Option<Employee>, RepositoryError>;
    /// 获取全部员工
    async fn list(&self) -> Result<Vec<Employee>, RepositoryError>;
    /// 员工总数
    async fn count(&self) -> Result<u64, RepositoryError>;
    /// 删除员工，先级联删除其关联的登录账户
    async fn delete_cascade(&self, id: i32) -> Result<(), RepositoryError>;
}
