use std::sync::Arc;

use campus_navigator::config::{self, Config};
use campus_navigator::console::{self, ConsoleGeolocator, ConsoleMap, ConsoleRouting};
use campus_navigator::engine::Navigator;
use campus_navigator::error::Error;
use campus_navigator::external::HttpLocationSource;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "campus navigator stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let source = HttpLocationSource::new(&config.api_base);
    let geolocator = ConsoleGeolocator::new(config::fixed_position()?);

    let mut navigator = Navigator::new(
        config,
        Box::new(ConsoleMap::default()),
        Box::new(ConsoleRouting::default()),
        Arc::new(geolocator),
    );

    if let Err(err) = navigator.start(Arc::new(source)).await {
        eprintln!("! {}", err.notice());
    }

    console::serve(navigator).await
}
