use std::net::{IpAddr, SocketAddr};

use anyhow::{anyhow, Context, Result};

use pyq_lib::server::{start_server, SiteServerState};

use crate::app::App;

pub fn run(app: App, host: IpAddr, port: u16) -> Result<()> {
    // Fail early on a missing content tree instead of on the first request.
    app.catalog()?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async move {
        let state = SiteServerState {
            store: app.store,
            config: app.config,
        };
        let mut server = start_server(state, SocketAddr::new(host, port))
            .await
            .map_err(|e| anyhow!("Failed to start server: {}", e))?;

        println!("Serving on {} (Ctrl-C to stop)", server.base_url());

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        server.stop();
        Ok::<(), anyhow::Error>(())
    })
}
