use meme_board::{
    app::{App, Step},
    commands::{Command, HELP},
    config::Config,
    domain::MemeRepository,
    errors::AppError,
    models::sample_memes,
    repositories::{HttpMemeRepository, InMemoryMemeRepository},
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing (logging). Logs go to stderr, away from the screen.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "meme_board=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = Config::load()?;
    tracing::info!(
        base_url = %config.api_base_url,
        offline = config.offline,
        "Configuration loaded"
    );

    // --- Meme Source ---
    let repo: Arc<dyn MemeRepository> = if config.offline {
        Arc::new(InMemoryMemeRepository::new(sample_memes()))
    } else {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::InitError(format!("Failed to create HTTP client: {}", e)))?;
        Arc::new(HttpMemeRepository::new(client, config.api_base_url.clone()))
    };

    let mut app = App::new(repo, config);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_screen(&mut stdout, &mut app, None).await?;
    stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                stdout.write_all(format!("{}\n", e).as_bytes()).await?;
                continue;
            }
        };

        match app.apply(command) {
            Step::Quit => break,
            Step::Continue { message } => print_screen(&mut stdout, &mut app, message).await?,
        }
    }

    tracing::info!("Bye");
    Ok(())
}

/// Draws the current screen. Shows the loading placeholder first while a
/// fetch is outstanding.
async fn print_screen(
    stdout: &mut tokio::io::Stdout,
    app: &mut App,
    message: Option<String>,
) -> Result<(), AppError> {
    if let Some(message) = message {
        stdout.write_all(format!("{}\n", message).as_bytes()).await?;
        return Ok(());
    }
    if app.is_loading() {
        stdout.write_all(format!("{}\n", app.render()).as_bytes()).await?;
        stdout.flush().await?;
        app.settle().await;
    }
    stdout.write_all(format!("{}\n", app.render()).as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
