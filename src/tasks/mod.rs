//! 后台定时任务。启动时调用一次 `spawn_all`。

use crate::services::TokenService;
use chrono::Duration;

/// 启动全部后台任务（`tokio::spawn`，不阻塞）
pub fn spawn_all(token_service: TokenService, cleanup_interval_secs: u64, retention: Duration) {
    // 过期 token 清理
    {
        let svc = token_service.clone();
        let interval = std::time::Duration::from_secs(cleanup_interval_secs.max(1));
        tokio::spawn(async move {
            loop {
                match svc.purge_expired(retention).await {
                    Ok(n) if n > 0 => log::info!("Expired tokens purged: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to purge expired tokens: {e:?}"),
                }
                tokio::time::sleep(interval).await;
            }
        });
    }
}
