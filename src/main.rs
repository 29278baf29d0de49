use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use memory_pet::config::{load_config, load_config_from, save_config_to, PetConfig};
use memory_pet::git::{CommitClock, FixedClock, Freshness, GitRepo};
use memory_pet::plain::LineMode;
use memory_pet::render::{RenderContext, SpriteSheet, Theme};
use memory_pet::tui::{self, App};

/// A terminal pet that forgets you when you stop committing.
#[derive(Parser, Debug)]
#[command(name = "memory-pet", version, about)]
struct Cli {
    /// Owner name; skips the name prompt
    #[arg(long)]
    owner: Option<String>,

    /// Pet name
    #[arg(long)]
    pet: Option<String>,

    /// Line mode instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Pretend this many hours have passed since the last commit
    #[arg(long, value_name = "HOURS")]
    hours: Option<f64>,

    /// Repository to track (default: current directory)
    #[arg(long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Config file (TOML or JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory of sprite files
    #[arg(long, value_name = "DIR")]
    sprites: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Write the resolved configuration to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Log at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    tracing::info!("Starting memory-pet version {}", env!("CARGO_PKG_VERSION"));

    let config = build_config(&cli)?;
    if cli.save_config {
        let path = cli
            .config
            .clone()
            .or_else(PetConfig::config_path)
            .context("no config location on this platform")?;
        save_config_to(&config, &path)?;
        writeln!(io::stdout(), "Saved configuration to {}", path.display())?;
        return Ok(());
    }

    let repo = cli.repo.clone().map_or_else(GitRepo::current, GitRepo::new);

    let (clock, banner): (Box<dyn CommitClock>, Vec<String>) = match cli.hours {
        Some(hours) => {
            let clock = FixedClock(hours);
            let hours = clock.hours_since_last_commit();
            let banner = vec![
                format!("Pretending {hours:.1}h since the last commit"),
                Freshness::from_hours(hours).describe(hours),
            ];
            (Box::new(clock), banner)
        }
        None => {
            let banner = repo_banner(&repo);
            (Box::new(repo), banner)
        }
    };

    let ctx = RenderContext::new(Theme::for_color(config.color), load_sprites(&config));

    if cli.plain {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let session = LineMode::new(stdin.lock(), stdout.lock(), ctx)
            .run(&config, clock.as_ref(), &banner)
            .context("line mode failed")?;
        tracing::info!(
            interactions = session.pet().memory.interaction_count(),
            "Session finished"
        );
        return Ok(());
    }

    let app = App::new(config, ctx, clock, banner);
    let farewell = tui::run(app).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    if let Some(text) = farewell {
        writeln!(io::stdout(), "{text}")?;
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_ansi(false);

    // The full-screen UI owns the terminal; point logs at a file for it.
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// File config with command-line overrides.
fn build_config(cli: &Cli) -> anyhow::Result<PetConfig> {
    let loaded = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if e.is_user_input() => {
            return Err(anyhow::Error::new(e).context("fix or remove the config file"))
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(owner) = &cli.owner {
        config.owner_name = Some(owner.clone());
    }
    if let Some(pet) = &cli.pet {
        config.pet_name.clone_from(pet);
    }
    if let Some(dir) = &cli.sprites {
        config.sprite_dir = Some(dir.clone());
    }
    if cli.no_color {
        config.color = false;
    }

    tracing::debug!(?config, "Configuration resolved");
    Ok(config)
}

fn load_sprites(config: &PetConfig) -> SpriteSheet {
    let Some(dir) = &config.sprite_dir else {
        return SpriteSheet::builtin();
    };
    SpriteSheet::load(dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using built-in sprites");
        SpriteSheet::builtin()
    })
}

fn repo_banner(repo: &GitRepo) -> Vec<String> {
    if !repo.is_git_repo() {
        return vec![format!(
            "⚠️  {} is not a git repo! Pet won't decay.",
            repo.dir().display()
        )];
    }

    let mut banner = vec![format!(
        "Tracking commits in: {} ({} commits)",
        repo.name(),
        repo.total_commits()
    )];
    if let Some(info) = repo.commit_info() {
        banner.push(format!(
            "Last commit: {} by {} ({})",
            info.message, info.author, info.time_ago
        ));
    }
    let hours = repo.hours_since_last_commit();
    banner.push(Freshness::from_hours(hours).describe(hours));
    banner
}
