use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::services::LinkService;
use crate::utils::is_valid_code;

/// 保留路径前缀，命中后不参与短码解析
const RESERVED_PREFIXES: [&str; 6] = [
    "api",
    "swagger",
    "health",
    "favicon.ico",
    "robots.txt",
    "_framework",
];

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        _req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let captured_path = path.into_inner();

        if Self::is_reserved_path(&captured_path) || !is_valid_code(&captured_path) {
            // 保留路径与非法短码直接 404，不触碰存储
            trace!("Redirect: rejected path '{}'", captured_path);
            return Self::not_found_response();
        }

        match service.resolve(&captured_path).await {
            Ok(destination) => {
                // 点击计数在后台推进，跳转响应不等它
                service.record_click(&captured_path);
                debug!("Redirect: '{}' -> '{}'", captured_path, destination);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", destination))
                    .finish()
            }
            Err(_) => {
                debug!("Redirect: unknown code '{}'", captured_path);
                Self::not_found_response()
            }
        }
    }

    /// 保留路径：空路径、API/静态资源前缀、以及含 '.' 的文件请求
    fn is_reserved_path(path: &str) -> bool {
        if path.is_empty() {
            return true;
        }

        let lower = path.to_lowercase();
        if RESERVED_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
        {
            return true;
        }

        path.contains('.')
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "public, max-age=60"))
            .body("Not Found")
    }
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Scope {
    use actix_web::web;

    web::scope("")
        .route("/{path}*", web::get().to(RedirectService::handle_redirect))
        .route("/{path}*", web::head().to(RedirectService::handle_redirect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_paths() {
        assert!(RedirectService::is_reserved_path(""));
        assert!(RedirectService::is_reserved_path("api"));
        assert!(RedirectService::is_reserved_path("api/urls"));
        assert!(RedirectService::is_reserved_path("API"));
        assert!(RedirectService::is_reserved_path("swagger"));
        assert!(RedirectService::is_reserved_path("health"));
        assert!(RedirectService::is_reserved_path("favicon.ico"));
        assert!(RedirectService::is_reserved_path("robots.txt"));
        assert!(RedirectService::is_reserved_path("_framework/blazor"));
        // 含 '.' 的路径按静态文件处理
        assert!(RedirectService::is_reserved_path("styles.css"));
    }

    #[test]
    fn test_ordinary_codes_are_not_reserved() {
        assert!(!RedirectService::is_reserved_path("abc1234"));
        assert!(!RedirectService::is_reserved_path("promo"));
        // 前缀匹配只针对保留字，短码自身可以包含字母 a
        assert!(!RedirectService::is_reserved_path("apple123"));
    }
}
