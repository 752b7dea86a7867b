use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::LinkService;
use crate::storage::{LinkStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
}

/// 准备服务器启动的上下文
/// 包括存储后端与链接服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create().context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.get_backend_name().await);

    // Create LinkService for unified link management
    let link_service = Arc::new(LinkService::new(store.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        link_service,
    })
}
