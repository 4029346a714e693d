use crate::domain::window::CoordinationWindow;
use crate::infrastructure::chain::BlockStream;
use futures_util::StreamExt;
use log::debug;
use std::sync::Arc;

/// Watches the block stream for new coordination windows and runs the
/// callback for each one, exactly once per window.
///
/// A window opens at every block that is a positive multiple of
/// `frequency_blocks`. The block stream may repeat or reorder blocks;
/// only windows strictly after the last emitted one are dispatched. The
/// callback runs on its own task so a slow consumer never blocks the
/// watch loop. Returns when the block stream ends; cancel by dropping
/// the stream's source or aborting the surrounding task.
pub async fn watch_coordination_windows<F>(
    mut blocks: BlockStream,
    frequency_blocks: u64,
    on_window: F,
) where
    F: Fn(CoordinationWindow) + Send + Sync + 'static,
{
    let on_window = Arc::new(on_window);
    let mut last_window: Option<CoordinationWindow> = None;

    while let Some(block) = blocks.next().await {
        if frequency_blocks == 0 || block == 0 || block % frequency_blocks != 0 {
            continue;
        }

        let window = CoordinationWindow::new(block);
        if !window.is_after(last_window.as_ref()) {
            debug!("watcher: ignoring stale window block={}", block);
            continue;
        }
        last_window = Some(window);

        let on_window = on_window.clone();
        tokio::spawn(async move {
            on_window(window);
        });
    }
}
