mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    commands::dispatch(args).await
}
