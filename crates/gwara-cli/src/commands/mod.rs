//! Subcommands and the options they share.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use gwara_core::controller::QuizController;
use gwara_core::model::{MAX_AMOUNT, MAX_LEVEL, MIN_AMOUNT, MIN_LEVEL};
use gwara_core::shuffle::{RandomSource, SeededRandom, ThreadRandom};
use gwara_providers::config::{create_provider, load_config_from};

pub mod fetch;
pub mod init;
pub mod play;

/// Options of every command that talks to the question service.
#[derive(Args, Debug, Clone)]
pub struct QuizArgs {
    /// Number of questions (1-10; default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_AMOUNT as i64..=MAX_AMOUNT as i64))]
    pub amount: Option<u32>,

    /// Difficulty level (1-3; default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_LEVEL as i64..=MAX_LEVEL as i64))]
    pub level: Option<u32>,

    /// Seed for a reproducible option order and result image
    #[arg(long)]
    pub seed: Option<u64>,

    /// Question service URL (overrides config and GWARA_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// A controller wired to the configured service, plus the settings to use.
pub struct Setup {
    pub controller: QuizController,
    pub amount: u32,
    pub level: u32,
}

pub fn setup(args: &QuizArgs) -> Result<Setup> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(url) = &args.base_url {
        config.provider.base_url = url.clone();
    }

    let provider = create_provider(&config.provider)?;
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    tracing::debug!(base_url = %config.provider.base_url, "question service");

    Ok(Setup {
        controller: QuizController::with_random(Arc::from(provider), rng),
        amount: args.amount.unwrap_or(config.default_amount),
        level: args.level.unwrap_or(config.default_level),
    })
}
