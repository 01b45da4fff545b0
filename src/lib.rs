pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyCode, Language, RateSource};
use crate::store::RateStore;
use crate::store::scheduler::RefreshScheduler;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the rate store and its background refresh for the lifetime of a command.
pub struct App {
    store: Arc<RateStore>,
    scheduler: RefreshScheduler,
    language: Language,
}

impl App {
    /// Builds the provider from `config`, then starts like [`App::start_with_source`].
    pub async fn start(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let provider = providers::FrankfurterProvider::new(
            &config.provider.base_url,
            config.request_timeout(),
        )
        .context("Failed to build HTTP client")?;
        Self::start_with_source(config, Arc::new(provider)).await
    }

    /// Runs the first refresh to completion, then hands refreshing over to the scheduler.
    pub async fn start_with_source(
        config: &AppConfig,
        source: Arc<dyn RateSource>,
    ) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(RateStore::new(source));
        let report = store.refresh().await;
        debug!(?report, "Startup refresh finished");

        let scheduler = RefreshScheduler::start(Arc::clone(&store), config.refresh_interval());
        Ok(Self {
            store,
            scheduler,
            language: config.language,
        })
    }

    pub fn store(&self) -> &Arc<RateStore> {
        &self.store
    }

    pub fn converter(&self) -> Converter {
        Converter::new(Arc::clone(&self.store))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
        debug!("App stopped");
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: f64,
        source: CurrencyCode,
        target: CurrencyCode,
    },
    Rates,
    Watch,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    language: Option<Language>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(language) = language {
        config.language = language;
    }
    debug!("Loaded config: {config:#?}");

    let spinner = cli::ui::new_spinner(cli::ui::labels(config.language).fetching);
    let app = App::start(&config).await;
    spinner.finish_and_clear();
    let app = app?;

    let result = execute(&app, command).await;
    app.shutdown().await;
    result
}

async fn execute(app: &App, command: AppCommand) -> Result<()> {
    let language = app.language();
    match command {
        AppCommand::Convert {
            amount,
            source,
            target,
        } => {
            info!(amount, %source, %target, "Converting");
            match cli::convert::display_conversion(
                &app.converter(),
                amount,
                source,
                target,
                language,
            ) {
                Ok(output) => {
                    println!("{output}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{}", cli::convert::display_error(&e, language));
                    Err(e.into())
                }
            }
        }
        AppCommand::Rates => {
            println!(
                "{}",
                cli::rates::display_rates(&app.store().snapshot(), language)
            );
            Ok(())
        }
        AppCommand::Watch => {
            cli::watch::watch_rates(
                app.store(),
                language,
                &mut std::io::stdout(),
                tokio::signal::ctrl_c(),
            )
            .await
        }
    }
}
