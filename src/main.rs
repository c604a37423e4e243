use anyhow::Context;
use clap::Parser;
use invitation_widgets::config::InvitationConfig;
use invitation_widgets::countdown::{self, DisplayMode};
use invitation_widgets::page::{install_config, Page};
use std::path::PathBuf;

/// A wedding invitation in the terminal.
#[derive(Parser, Debug)]
#[command(name = "invitation", version, about)]
struct Args {
    /// TOML file describing the invitation
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Count down to this RFC 3339 moment instead of the configured one
    #[arg(short, long, value_name = "RFC3339")]
    target: Option<String>,

    /// With --once, print only the one-line countdown
    #[arg(long)]
    compact: bool,

    /// Print the page once and exit instead of running interactively
    #[arg(long)]
    once: bool,
}

fn load_config(args: &Args) -> anyhow::Result<InvitationConfig> {
    let mut config = match &args.config {
        Some(path) => InvitationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InvitationConfig::default(),
    };
    if let Some(target) = &args.target {
        config.set_target(target).context("--target")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.once {
        if args.compact {
            let countdown = countdown::new(config.target()?, DisplayMode::Compact);
            println!("{}", countdown.view());
        } else {
            println!("{}", Page::new(config).render_all());
        }
        return Ok(());
    }

    log::info!("counting down to {}", config.target);
    install_config(config);
    let program = bubbletea_rs::Program::<Page>::builder()
        .alt_screen(true)
        .build()?;
    program.run().await?;
    Ok(())
}
