use std::sync::Arc;

use pubserv::{config, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::ServerConfig::resolve()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // A bind failure (port taken) propagates out and exits non-zero.
    let listener = server::bind_listener(cfg.addr)?;

    logger::log_server_start(&cfg.addr, &cfg.root);

    server::run(listener, Arc::new(cfg)).await?;
    Ok(())
}
