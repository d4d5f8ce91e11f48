// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::validators::validate_mobile;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterEmployeeDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "rfid is required"))]
    pub rfid: String,
    /// 十位数字手机号，可选
    #[validate(custom(function = validate_mobile))]
    pub mobile: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegScanDto {
    #[validate(length(min = 1, message = "rfid is required"))]
    pub rfid: String,
}
