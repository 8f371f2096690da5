use std::sync::Arc;

use memstatic::config::{AppState, Config};
use memstatic::logger;
use memstatic::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = config.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&config)?;

    let addr = config.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(config).await?);
    logger::log_server_start(&addr, &state.config);

    server::run(listener, state).await;
    Ok(())
}
