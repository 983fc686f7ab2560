use anyhow::Result;
use tracing::info;

use pms_showcase::config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pms_showcase=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    info!(
        "Starting with key policy {}, autoplay {}, assets in {:?}",
        config.key_policy, config.autoplay, config.asset_dir
    );

    run(config)
}

#[cfg(feature = "gui")]
fn run(config: Config) -> Result<()> {
    let app = pms_showcase::app::ShowcaseApp::new(config);
    std::process::exit(app.run());
}

#[cfg(not(feature = "gui"))]
fn run(config: Config) -> Result<()> {
    use pms_showcase::console::{self, TextPort};
    use pms_showcase::models;
    use pms_showcase::OverlayController;

    let port = TextPort::new(config.asset_dir.clone());
    let mut controller = OverlayController::new(models::builtin(), port)
        .with_policy(config.key_policy)
        .with_autoplay(config.autoplay);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console::run(&mut controller, stdin.lock(), stdout.lock())
}
