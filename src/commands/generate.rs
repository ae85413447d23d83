//! Generate static files

use anyhow::{Context as _, Result};

use crate::client::ContentClient;
use crate::generator::Generator;
use crate::Startrail;

/// Generate the static site from the content repository
pub async fn run(app: &Startrail) -> Result<()> {
    let start = std::time::Instant::now();

    let client = ContentClient::new(&app.config.api)
        .context("failed to construct the content repository client")?;
    let generator = Generator::new(app)?;

    generator.generate(&client).await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
