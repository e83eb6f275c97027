use super::ProviderArgs;
use anyhow::Result;
use pulse_server::{PulseServer, PulseService, ServerConfig};

pub fn execute(host: &str, port: u16, providers: &ProviderArgs) -> Result<()> {
    let settings = providers.settings()?;
    let config = ServerConfig::new().with_host(host).with_port(port);

    tracing::info!("Using model {}", settings.model);

    let service = PulseService::from_settings(&settings)?;
    let server = PulseServer::new(config, service);

    // Run the server (this blocks until Ctrl+C)
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    Ok(())
}
