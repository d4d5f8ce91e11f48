// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use validator::ValidationError;

/// 校验手机号格式
///
/// 登记表单使用的十位纯数字手机号。
///
/// # 参数
///
/// * `mobile` - 手机号
///
/// # 返回值
///
/// 格式合法返回Ok，否则返回带错误码的ValidationError
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_mobile")
            .with_message("invalid mobile number format".into()))
    }
}
