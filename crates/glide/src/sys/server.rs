use crate::events::AppEvent;
use async_channel::Sender;
use knob::ipc::{Request, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_client(mut stream: UnixStream, tx: Sender<AppEvent>) {
    let reader = BufReader::new(&mut stream);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.parse::<Request>() {
            Ok(request) => {
                log::debug!("Received '{}'", request);
                if tx.send(AppEvent::from(request)).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring request '{}': {}", line.trim(), e),
        }
    }
}
