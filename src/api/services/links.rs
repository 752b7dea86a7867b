//! Links API CRUD 操作

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace, warn};

use crate::api::helpers::{api_result, created_response, error_from_adroit, error_response, success_response};
use crate::api::types::{CreateUrlRequest, LookupQuery, UrlResponse, UrlStatsResponse};
use crate::services::{CreateLinkRequest, LinkService};

/// 对外短链接前缀，未配置 base_url 时回退到监听地址
fn public_base_url() -> String {
    let config = crate::config::get_config();
    match &config.server.base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => format!("http://{}:{}", config.server.host, config.server.port),
    }
}

/// 创建短链接
pub async fn create_url(
    _req: HttpRequest,
    payload: web::Json<CreateUrlRequest>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();
    info!(
        "Links API: create request - long_url: {}, custom_code: {:?}",
        payload.long_url, payload.custom_short_code
    );

    let request = CreateLinkRequest {
        destination: payload.long_url,
        custom_code: payload.custom_short_code,
    };

    match service.create_link(request).await {
        Ok(link) => {
            let response = UrlResponse::from_link(link, &public_base_url());
            Ok(created_response(response, "Short URL created successfully"))
        }
        Err(e) => {
            warn!("Links API: create rejected - {}", e);
            Ok(error_from_adroit(&e))
        }
    }
}

/// 获取所有链接（按创建时间倒序）
pub async fn get_all_urls(
    _req: HttpRequest,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    trace!("Links API: request to list all links");

    let base_url = public_base_url();
    let links: Vec<UrlResponse> = service
        .list_links()
        .await
        .into_iter()
        .map(|link| UrlResponse::from_link(link, &base_url))
        .collect();

    info!("Links API: returning {} links", links.len());
    Ok(success_response(links))
}

/// 按目的地 URL 精确查找已有短链接
pub async fn lookup_urls(
    _req: HttpRequest,
    query: web::Query<LookupQuery>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let long_url = match query.long_url.as_ref().filter(|u| !u.trim().is_empty()) {
        Some(url) => url.clone(),
        None => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Long URL is required",
            ));
        }
    };

    let base_url = public_base_url();
    let matches: Vec<UrlResponse> = service
        .find_by_destination(&long_url)
        .await
        .into_iter()
        .map(|link| UrlResponse::from_link(link, &base_url))
        .collect();

    info!(
        "Links API: lookup for '{}' matched {} links",
        long_url,
        matches.len()
    );
    Ok(success_response(matches))
}

/// 获取单个链接
pub async fn get_url_details(
    _req: HttpRequest,
    code: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = code.into_inner();
    trace!("Links API: request for link '{}'", code);

    let base_url = public_base_url();
    let result = service
        .get_details(&code)
        .await
        .map(|link| UrlResponse::from_link(link, &base_url));

    Ok(api_result(result))
}

/// 获取单个链接的访问统计
pub async fn get_url_stats(
    _req: HttpRequest,
    code: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = code.into_inner();
    trace!("Links API: stats request for link '{}'", code);

    let base_url = public_base_url();
    let result = service
        .get_details(&code)
        .await
        .map(|link| UrlStatsResponse::from_link(link, &base_url));

    Ok(api_result(result))
}

/// 删除链接
pub async fn delete_url(
    _req: HttpRequest,
    code: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = code.into_inner();

    if service.delete_link(&code).await {
        info!("Links API: deleted link '{}'", code);
        Ok(HttpResponse::NoContent().finish())
    } else {
        warn!("Links API: delete of unknown link '{}'", code);
        Ok(error_response(
            StatusCode::NOT_FOUND,
            &format!("Short URL '{}' not found", code),
        ))
    }
}

/// 链接管理路由 `/api/urls`
///
/// 包含：
/// - GET /api/urls - 获取所有链接
/// - POST /api/urls - 创建链接
/// - GET /api/urls/lookup?long_url= - 按目的地查找
/// - GET /api/urls/{code} - 获取单个链接
/// - GET /api/urls/{code}/stats - 获取访问统计
/// - DELETE /api/urls/{code} - 删除链接
pub fn urls_routes() -> actix_web::Scope {
    web::scope("/api/urls")
        .route("", web::get().to(get_all_urls))
        .route("", web::post().to(create_url))
        // lookup must be before /{code}
        .route("/lookup", web::get().to(lookup_urls))
        // /{code}/stats must be before /{code}
        .route("/{code}/stats", web::get().to(get_url_stats))
        .route("/{code}", web::get().to(get_url_details))
        .route("/{code}", web::delete().to(delete_url))
}
