mod config;
mod domain;
mod error;
mod youtube;
mod youtube2json;

use std::io::Write;

use youtube::YouTubeSearchClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        report_error(&err, std::io::stderr().lock());
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;
    log::info!(
        "Updating {} for channel {}",
        config.out_path.display(),
        config.channel_id
    );

    let client = YouTubeSearchClient::new(config.api_key.clone())?;
    youtube2json::update_latest_videos(&client, &config).await?;

    Ok(())
}

/// Fatal errors go straight to stderr so `RUST_LOG` cannot silence them.
fn report_error(err: &anyhow::Error, mut out: impl Write) {
    let _ = writeln!(out, "{:#}", err);
}
