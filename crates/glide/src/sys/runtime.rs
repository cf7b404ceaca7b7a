use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the socket server and config watcher on a tokio runtime of their own.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    thread::Builder::new()
        .name("glide-services".to_string())
        .spawn(move || {
            rt.block_on(async {
                tokio::spawn(crate::sys::server::run_server(tx.clone()));
                tokio::spawn(crate::config::run_async_watcher(tx));

                std::future::pending::<()>().await;
            });
        })?;
    Ok(())
}
