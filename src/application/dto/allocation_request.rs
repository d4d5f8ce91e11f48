// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AssignMachineDto {
    pub order_id: i32,
    #[validate(length(min = 1, message = "step is required"))]
    pub step: String,
    pub machine_id: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MachineIdDto {
    pub machine_id: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateMachineDto {
    #[validate(length(min = 1, message = "machine number is required"))]
    pub machine_number: String,
}
