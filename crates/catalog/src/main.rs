use clap::Parser;

use hastkala_catalog::CatalogConfig;
use hastkala_catalog::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    hastkala_observability::init();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env();

    let stdout = std::io::stdout();
    run(cli, config, &mut stdout.lock())
}
