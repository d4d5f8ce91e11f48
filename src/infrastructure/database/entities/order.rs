// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_number: String,
    pub product: String,
    pub quantity: i32,
    pub status: String,
    pub current_stage: String,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_step::Entity")]
    OrderStep,
    #[sea_orm(has_many = "super::machine_allocation::Entity")]
    MachineAllocation,
}

impl Related<super::order_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderStep.def()
    }
}

impl Related<super::machine_allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineAllocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
