// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AssignTaskDto {
    pub employee_id: i32,
    pub machine_allocation_id: i32,
    #[validate(range(min = 1, message = "target must be greater than zero"))]
    pub target: i32,
    /// "One Day" 或 "Multiple Days"
    #[validate(length(min = 1, message = "duration is required"))]
    pub duration: String,
}
