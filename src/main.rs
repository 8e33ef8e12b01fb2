mod adapter;
mod classifier;
mod config;
mod contentmoderator;
mod fetcher;
mod handlers;
mod ipfs;
mod job;
mod labels;

use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(clap::Parser)]
struct Opts {
    #[clap(long, default_value = "config.toml")]
    config: std::path::PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve jobs over HTTP: POST a job to `/`, get the envelope back.
    Serve,

    /// Handle a single event read from stdin and write the reply to stdout.
    Invoke {
        #[clap(long, value_enum, default_value = "queue")]
        shape: handlers::Shape,
    },
}

fn new_adapter_from_config(config: &config::Config) -> Result<adapter::Adapter, anyhow::Error> {
    Ok(adapter::Adapter::new(
        fetcher::new_fetcher_from_config(&config.gateway)?,
        classifier::new_classifier_from_config(&config.classifier.typ, config.classifier_params())?,
    ))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::builder()
        .filter_module("moderation_adapter", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opts::parse();

    let config = config::Config::load(&opts.config)?;
    let adapter = new_adapter_from_config(&config)?;

    match opts.command {
        Command::Serve => {
            let listener = tokio::net::TcpListener::bind(config.server.listen).await?;
            log::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, handlers::router(std::sync::Arc::new(adapter))).await?;
        }
        Command::Invoke { shape } => {
            log::info!("invoking as {}", serde_plain::to_string(&shape)?);

            let mut event = vec![];
            tokio::io::stdin().read_to_end(&mut event).await?;

            let reply = handlers::invoke(&adapter, shape, &event).await?;

            let mut stdout = tokio::io::stdout();
            stdout.write_all(&serde_json::to_vec(&reply)?).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
