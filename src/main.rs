mod models;
mod commands;
mod services;

use commands::get_framework;
use models::config::Config;
use services::{
    bot_init,
    geolocation::{Geolocator, IpApiClient},
    notifier::{AuditSink, WebhookNotifier},
    record_store::RecordStore
};
use std::fs;
use std::env;
use std::error;
use serenity::model::gateway::GatewayIntents;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

type Error = Box<dyn error::Error + Send + Sync>;
type FinderContext<'a> = poise::Context<'a, Data, Error>;

/// Shared across every command for the life of the process.
pub struct Data {
    pub config: Config,
    pub store: RecordStore,
    pub geo: Box<dyn Geolocator>,
    pub audit: Box<dyn AuditSink>
}

fn init_logger() -> Result<WorkerGuard, Box<dyn error::Error>> {
    let file_appender = tracing_appender::rolling::hourly("logs", "fivefinder.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing::subscriber::set_global_default(
        fmt::Subscriber::builder()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_ansi(true)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
            .with(fmt::Layer::default().with_writer(non_blocking))
    )?;

    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");
    info!("Initializing FiveFinder v{}", VERSION.unwrap_or("<unknown>"));
    info!("Reading from {}", env::current_dir()?.display());

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    // Dropping the guard stops the file writer.
    let _guard = match init_logger() {
        Ok(guard) => Some(guard),
        Err(ex) => {
            eprintln!("Failed to initialize logger: {ex}");
            None
        }
    };

    let config_json = fs::read_to_string("config.json")
        .map_err(|ex| format!("config.json not found: {ex}"))?;
    let config: Config = serde_json::from_str::<Config>(&config_json)
        .map_err(|ex| format!("config.json is malformed: {ex}"))?
        .apply_env();

    let store = RecordStore::open(&config.data_path, &config.calipso_path, &config.blacklist_path);
    let geo = IpApiClient::new(config.geolocation_url.clone(), config.geolocation_lang.clone(), config.http_timeout())?;
    let audit = WebhookNotifier::new(config.webhook_url.clone(), config.http_timeout())?;
    if !audit.is_enabled() {
        info!("No webhook_url configured, /check audits go to the log only");
    }

    let token = config.token.clone();
    let data = Data {
        config,
        store,
        geo: Box::new(geo),
        audit: Box::new(audit)
    };

    let result = poise::Framework::builder()
        .token(token)
        .intents(GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_PRESENCES)
        .options(get_framework())
        .setup(move |ctx, ready, framework| Box::pin(bot_init::ready(ctx, ready, framework, data)))
        .run()
        .await;

    if let Err(ex) = result {
        error!("Discord bot client error: {:?}", ex);
        return Err(ex.into());
    }

    Ok(())
}
