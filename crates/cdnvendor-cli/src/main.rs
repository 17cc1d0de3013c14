use cdnvendor_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging(cli.verbose).is_err() {
        logging::init_logging_stderr(cli.verbose);
    }

    if let Err(err) = cli.run().await {
        eprintln!("cdnvendor error: {:#}", err);
        std::process::exit(1);
    }
}
