use crate::{
    config, error, info,
    server::{AppState, start_api_server},
    warning,
};

/// Runs the web application until the process is stopped.
pub async fn serve(state: AppState, open: bool) {
    info!(
        "Mood policy {}, {} tracks per recommendation",
        state.policy, state.limit
    );

    let server = tokio::spawn(start_api_server(state));

    if open {
        let url = format!("http://{}/", config::server_addr());
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Please navigate to {}", url);
        }
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped. Err: {}", e),
        Err(e) => error!("Server task failed. Err: {}", e),
    }
}
