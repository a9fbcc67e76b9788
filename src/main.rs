use anyhow::Result;
use network_checker::infrastructure::init_tracing;
use network_checker::{Application, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    init_tracing(&settings.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %settings.application.environment,
        "Starting network checker"
    );

    let app = Application::build(settings).await?;
    app.run().await?;

    Ok(())
}
