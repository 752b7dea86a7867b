use tracing::info;

use adroit::config::{get_config, init_config};
use adroit::runtime::server::run_server;
use adroit::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_config();
    let config = get_config();

    // 日志守卫必须存活到进程退出，否则缓冲日志会丢失
    let _log_guard = init_logging(&config);

    info!("Adroit v{} starting", env!("CARGO_PKG_VERSION"));

    run_server().await
}
