// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserRole};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 待创建的用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub employee_id: Option<i32>,
}

/// 用户仓库特质
///
/// 定义后台登录账户的数据访问接口。邮箱唯一性由实现方强制。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// 根据ID查找用户
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    /// 获取全部用户
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
    /// 更新用户资料（姓名、邮箱、角色中给出的项）
    async fn update_profile(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> Result<User, RepositoryError>;
    /// 重设密码散列
    async fn set_password_hash(&self, id: i32, password_hash: &str)
        -> Result<(), RepositoryError>;
    /// 删除用户
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
