// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::employee::Employee;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{employee, employee_task, user};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

/// 员工仓库实现
///
/// 基于SeaORM实现的员工身份注册表。RFID与手机号的唯一性
/// 在登记事务内重查：重复登记返回Conflict而不是覆盖。
#[derive(Clone)]
pub struct EmployeeRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl EmployeeRepositoryImpl {
    /// 创建新的员工仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<employee::Model> for Employee {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            rfid: model.rfid,
            mobile: model.mobile,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeRepositoryImpl {
    async fn create(
        &self,
        name: &str,
        rfid: &str,
        mobile: Option<&str>,
    ) -> Result<Employee, RepositoryError> {
        let txn = self.db.begin().await?;

        let rfid_taken = employee::Entity::find()
            .filter(employee::Column::Rfid.eq(rfid))
            .one(&txn)
            .await?;
        if rfid_taken.is_some() {
            return Err(RepositoryError::Conflict(
                "rfid already registered".to_string(),
            ));
        }

        if let Some(mobile) = mobile {
            let mobile_taken = employee::Entity::find()
                .filter(employee::Column::Mobile.eq(mobile))
                .one(&txn)
                .await?;
            if mobile_taken.is_some() {
                return Err(RepositoryError::Conflict(
                    "mobile number already registered".to_string(),
                ));
            }
        }

        let now = Utc::now().fixed_offset();
        let model = employee::ActiveModel {
            name: Set(name.to_string()),
            rfid: Set(rfid.to_string()),
            mobile: Set(mobile.map(|m| m.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;

        txn.commit().await?;
        info!("Employee registered: {} (rfid {})", name, rfid);
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError> {
        let model = employee::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_rfid(&self, rfid: &str) -> Result<Option<Employee>, RepositoryError> {
        let model = employee::Entity::find()
            .filter(employee::Column::Rfid.eq(rfid))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let models = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(employee::Entity::find().count(self.db.as_ref()).await?)
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(_) = employee::Entity::find_by_id(id).one(&txn).await? else {
            return Err(RepositoryError::NotFound);
        };

        let open_tasks = employee_task::Entity::find()
            .filter(employee_task::Column::EmployeeId.eq(id))
            .count(&txn)
            .await?;
        if open_tasks > 0 {
            return Err(RepositoryError::Conflict(format!(
                "employee {} still has tasks assigned",
                id
            )));
        }

        // 先级联删除依赖的登录账户，再删除员工本身
        user::Entity::delete_many()
            .filter(user::Column::EmployeeId.eq(id))
            .exec(&txn)
            .await?;
        employee::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        info!("Employee {} deleted", id);
        Ok(())
    }
}
