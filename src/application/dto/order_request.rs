// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateOrderDto {
    #[validate(length(min = 1, message = "order number is required"))]
    pub order_number: String,
    #[validate(length(min = 1, message = "product is required"))]
    pub product: String,
    #[validate(range(min = 1, message = "quantity must be greater than zero"))]
    pub quantity: i32,
    #[serde(default)]
    pub steps: Vec<OrderStepDto>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct OrderStepDto {
    #[validate(length(min = 1, message = "step name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateOrderDto {
    #[validate(length(min = 1, message = "product is required"))]
    pub product: String,
    #[validate(range(min = 1, message = "quantity must be greater than zero"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateStageDto {
    pub id: i32,
    #[validate(length(min = 1, message = "current_stage is required"))]
    pub current_stage: String,
}
