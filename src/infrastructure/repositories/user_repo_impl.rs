// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserRole};
use crate::domain::repositories::user_repository::{NewUser, UserRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::user;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

/// 用户仓库实现
///
/// 基于SeaORM实现的后台登录账户存取。邮箱唯一性在创建与
/// 更新事务内重查。
#[derive(Clone)]
pub struct UserRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    /// 创建新的用户仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role.parse().unwrap_or_default(),
            employee_id: model.employee_id,
            reset_token: model.reset_token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let txn = self.db.begin().await?;

        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(new_user.email.as_str()))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(RepositoryError::Conflict(
                "email already registered".to_string(),
            ));
        }

        let now = Utc::now().fixed_offset();
        let model = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.to_string()),
            employee_id: Set(new_user.employee_id),
            reset_token: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        txn.commit().await?;
        info!("User registered: {}", inserted.email);
        Ok(inserted.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_profile(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> Result<User, RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(model) = user::Entity::find_by_id(id).one(&txn).await? else {
            return Err(RepositoryError::NotFound);
        };

        if let Some(email) = email {
            if email != model.email {
                let taken = user::Entity::find()
                    .filter(user::Column::Email.eq(email))
                    .one(&txn)
                    .await?;
                if taken.is_some() {
                    return Err(RepositoryError::Conflict(
                        "email already registered".to_string(),
                    ));
                }
            }
        }

        let mut active: user::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name.to_string());
        }
        if let Some(email) = email {
            active.email = Set(email.to_string());
        }
        if let Some(role) = role {
            active.role = Set(role.to_string());
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn set_password_hash(
        &self,
        id: i32,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let Some(model) = user::Entity::find_by_id(id).one(self.db.as_ref()).await? else {
            return Err(RepositoryError::NotFound);
        };

        let mut active: user::ActiveModel = model.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = user::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
