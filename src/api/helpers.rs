//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::AdroitError;

use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ApiResponse::ok(data))
}

/// 构建 201 Created 响应
pub fn created_response<T: Serialize>(data: T, message: &str) -> HttpResponse {
    json_response(StatusCode::CREATED, ApiResponse::ok_with_message(data, message))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error: &str) -> HttpResponse {
    json_response::<()>(status, ApiResponse::fail(error))
}

/// 从 AdroitError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_adroit(err: &AdroitError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 AdroitError。
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(err) => error_from_adroit(&err),
    }
}
