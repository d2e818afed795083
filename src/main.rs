use anyhow::Result;
use job_aggregator::{start_web_server, ServerSettings};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("job_aggregator=info,rocket::server=off")),
        )
        .init();

    let settings = ServerSettings::from_env()?;

    tracing::info!("Starting remote startup job aggregator");
    tracing::info!("Server: http://0.0.0.0:{}", settings.port);

    start_web_server(settings).await
}
