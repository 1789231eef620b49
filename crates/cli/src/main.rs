use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(err) = crosswap_cli::run(crosswap_cli::args::Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
