use clap::Parser;

use ccswitch::cli::{self, Cli};
use ccswitch::logging::init_tracing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli::run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
