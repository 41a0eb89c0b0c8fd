/// Soundboard - play a community's sounds from the terminal
use clap::{Parser, Subcommand};
use soundboard_audio_desktop::DesktopOutput;
use soundboard_cli::{App, AppConfig, PreferencesStore};
use soundboard_client::{ClientConfig, SoundboardClient};
use soundboard_core::{filter_catalog, message_link};
use soundboard_session::{authorize_url, consume_redirect, FileSessionStore, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundboard")]
#[command(about = "Browse and play a community's sounds", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SOUNDBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Address the login page redirected to (carries the access token)
    #[arg(long)]
    redirect: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive soundboard (default)
    Run,
    /// Print the login page, or store the token from --redirect
    Login,
    /// Forget the stored session
    Logout,
    /// Print the sound list and exit
    List {
        /// Only sounds whose name contains this
        term: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the view
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let state_dir = config.state_dir()?;
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::in_dir(&state_dir));
    tracing::debug!("State directory: {}", state_dir.display());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config, store, state_dir, cli.redirect.as_deref()).await?,
        Commands::Login => login(&config, store.as_ref(), cli.redirect.as_deref())?,
        Commands::Logout => {
            store.clear()?;
            println!("Logged out");
        }
        Commands::List { term } => {
            consume_redirect(store.as_ref(), cli.redirect.as_deref())?;
            list(&config, store.as_ref(), term.as_deref().unwrap_or("")).await?;
        }
    }

    Ok(())
}

async fn run(
    config: AppConfig,
    store: Arc<dyn SessionStore>,
    state_dir: PathBuf,
    redirect: Option<&str>,
) -> anyhow::Result<()> {
    let output = DesktopOutput::new()?;
    let preferences = PreferencesStore::in_dir(&state_dir);

    let mut app = App::new(config, store, preferences, output)?.with_browser(true);
    app.start(redirect)?;

    tracing::info!("Starting Soundboard");
    app.run().await?;
    Ok(())
}

fn login(
    config: &AppConfig,
    store: &dyn SessionStore,
    redirect: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(redirect) = redirect {
        match consume_redirect(store, Some(redirect))? {
            Some(_) => println!("Logged in"),
            None => anyhow::bail!("The redirect address carries no access token"),
        }
        return Ok(());
    }

    let url = authorize_url(&config.oauth_config())?;
    println!("Open this page to log in:\n  {}", url);
    println!("Then run: soundboard --redirect '<the address you were sent back to>' login");
    if let Err(e) = open::that(url.as_str()) {
        tracing::warn!("Could not open a browser: {}", e);
    }
    Ok(())
}

async fn list(config: &AppConfig, store: &dyn SessionStore, term: &str) -> anyhow::Result<()> {
    if store.load()?.is_none() {
        anyhow::bail!("Not logged in (run `soundboard login` first)");
    }

    let client = SoundboardClient::new(ClientConfig::new(
        config.identity.api_base.clone(),
        config.catalog.backend_url.clone(),
    ))?;
    let catalog = client.fetch_catalog(&config.catalog.guild_id).await?;

    for (key, sound) in filter_catalog(&catalog, term) {
        println!(
            "{}\t{}\t{}",
            key,
            sound.volume_label(),
            message_link(&config.catalog.link_host, &config.catalog.guild_id, sound)
        );
    }
    Ok(())
}
