//! tagsync: apply management tags to AWS resources
//!
//! Applies a desired tag set, including the management marker tag, to a
//! resource identified by ARN using the Resource Groups Tagging API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagsync::ResourceGroupsTagger;
use tagsync::aws::{AwsContext, classify_anyhow_error};
use tagsync::config::{ConfigError, TaggerConfig, parse_tag_arg};
use tagsync_common::defaults::DEFAULT_REGION;
use tagsync_common::{ResourceArn, SyncMode};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tagsync")]
#[command(about = "Apply management tags to AWS resources")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Arguments for the sync command (extracted to reduce enum size)
#[derive(clap::Args, Debug)]
struct SyncArgs {
    /// ARN of the resource to tag
    #[arg(long)]
    arn: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    aws_profile: Option<String>,

    /// JSON config file with tags, marker and mode
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tag to apply, repeatable (overrides tags from the config file)
    #[arg(short, long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    tags: Vec<(String, String)>,

    /// Management marker tag key
    #[arg(long)]
    marker_key: Option<String>,

    /// Management marker tag value
    #[arg(long)]
    marker_value: Option<String>,

    /// Sync mode: additive (apply only) or reconcile (also remove undesired tags)
    #[arg(long)]
    mode: Option<SyncMode>,
}

impl SyncArgs {
    /// Merge command-line overrides onto the file (or default) config
    fn tagger_config(&self) -> Result<TaggerConfig> {
        let mut config = match &self.config {
            Some(path) => TaggerConfig::load(path)?,
            None => TaggerConfig::default(),
        };

        config.tags.extend(self.tags.iter().cloned());
        if let Some(key) = &self.marker_key {
            config.marker_key = key.clone();
        }
        if let Some(value) = &self.marker_value {
            config.marker_value = value.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_tag(s: &str) -> Result<(String, String), ConfigError> {
    parse_tag_arg(s)
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the desired tags to a resource
    Sync(Box<SyncArgs>),

    /// Print the service segment of an ARN
    Service {
        /// ARN to inspect
        #[arg(long)]
        arn: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    // Print main error message
    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    // Print error chain (causes)
    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match args.command {
        Command::Sync(sync_args) => handle_sync(*sync_args).await,
        Command::Service { arn } => {
            let arn = ResourceArn::parse(&arn)?;
            println!("{}", arn.service());
            Ok(())
        }
    }
}

async fn handle_sync(args: SyncArgs) -> Result<()> {
    let config = args.tagger_config()?;
    let mode = config.mode;
    let desired = config.into_desired_tags();

    if let Some(profile) = &args.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let aws = AwsContext::with_profile(&args.region, args.aws_profile.as_deref()).await;
    let tagger = ResourceGroupsTagger::from_context(&aws, desired).with_mode(mode);
    tagger.sync_tags(&args.arn).await
}
