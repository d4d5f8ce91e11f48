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

use crate::domain::models::user::User;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// JWT签名密钥
    pub jwt_secret: String,
}

/// JWT声明
///
/// 登录时签发，受保护接口的中间件解码后注入请求扩展。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    pub sub: i32,
    /// 用户邮箱
    pub email: String,
    /// 用户角色
    pub role: String,
    /// 关联员工ID（移动端账户）
    pub employee_id: Option<i32>,
    /// 过期时间（Unix时间戳）
    pub exp: i64,
    /// 签发时间（Unix时间戳）
    pub iat: i64,
}

/// 为用户签发JWT令牌
///
/// # 参数
///
/// * `user` - 登录成功的用户
/// * `secret` - 签名密钥
/// * `expiry_hours` - 有效期（小时）
///
/// # 返回值
///
/// * `Ok(String)` - 签发的令牌
/// * `Err(jsonwebtoken::errors::Error)` - 签发失败
pub fn issue_token(
    user: &User,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        employee_id: user.employee_id,
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// 认证中间件
///
/// 验证请求中的Bearer令牌，并把解码出的声明注入请求扩展
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(StatusCode)` - 认证失败的状态码
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path();
    debug!("AuthMiddleware processing path: {}", path);

    let token_str = {
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if !auth_header.starts_with("Bearer ") {
            return Err(StatusCode::UNAUTHORIZED);
        }

        auth_header[7..].to_string()
    };

    match decode::<Claims>(
        &token_str,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(token) => {
            req.extensions_mut().insert(token.claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!("Token rejected: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
