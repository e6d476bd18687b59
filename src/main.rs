use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spotify_eda::analysis::{BatchAnalyzer, DatasetSummary, DEFAULT_TOP_N};
use spotify_eda::cli_style::{self, get_styles};
use spotify_eda::config::{AppConfig, CliConfig, FileConfig};
use spotify_eda::dataset::{load_tracks, Dataset, MalformedRowPolicy};
use spotify_eda::report_output::{OutputFormat, ReportSink};
use spotify_eda::spotify_store::{SqliteSpotifyStore, TrackStore};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "spotify-eda", version, styles = get_styles())]
#[command(about = "Exploratory reports over the spotify track dataset")]
struct CliArgs {
    /// Optional TOML config file. Its values override the matching flags.
    #[clap(long, global = true, value_parser = parse_path)]
    config: Option<PathBuf>,

    /// What to do with rows whose numeric fields do not parse.
    #[clap(long, global = true, default_value = "fail")]
    on_malformed: MalformedRowPolicy,

    /// Report output format.
    #[clap(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Write the report to this file instead of stdout. Reports only.
    #[clap(long, global = true, value_parser = parse_path)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// CSV dataset, analyzed in memory.
    #[clap(long, value_parser = parse_path, conflicts_with = "db")]
    csv: Option<PathBuf>,

    /// SQLite database filled by `import`, analyzed with SQL.
    #[clap(long, value_parser = parse_path)]
    db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loads and cleans a CSV file into the spotify table of a SQLite database,
    /// replacing its previous contents.
    Import {
        #[clap(long, value_parser = parse_path)]
        csv: PathBuf,

        /// Target database, created if missing.
        #[clap(long, value_parser = parse_path)]
        db: Option<PathBuf>,
    },

    /// Top tracks per artist by total views, dense ranked.
    TopTracks {
        #[command(flatten)]
        source: SourceArgs,

        /// Highest rank to keep.
        #[clap(long, default_value_t = DEFAULT_TOP_N)]
        top_n: u32,
    },

    /// Energy spread (max - min) per album, widest first.
    EnergyDiversity {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Record counts of the dataset.
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
}

enum Source {
    Csv(PathBuf),
    Db(PathBuf),
}

impl Source {
    fn resolve(args: &SourceArgs, config: &AppConfig) -> Result<Self> {
        if let Some(csv) = &args.csv {
            return Ok(Source::Csv(csv.clone()));
        }
        match args.db.as_ref().or(config.db_path.as_ref()) {
            Some(db) => Ok(Source::Db(db.clone())),
            None => bail!("No input given: pass --csv or --db, or set db_path in the config file"),
        }
    }
}

fn open_existing_store(path: &Path) -> Result<SqliteSpotifyStore> {
    if !path.exists() {
        bail!(
            "Database {:?} does not exist, run `spotify-eda import` first",
            path
        );
    }
    let store = SqliteSpotifyStore::new(path)?;
    if store.count_tracks()? == 0 {
        bail!("The spotify table in {:?} is empty", path);
    }
    Ok(store)
}

fn load_dataset(path: &Path, config: &AppConfig) -> Result<Dataset> {
    load_tracks(path, config.on_malformed)
        .with_context(|| format!("Failed to load dataset from {:?}", path))
}

fn run_import(csv: &Path, db: Option<&PathBuf>, config: &AppConfig) -> Result<()> {
    let db = db
        .or(config.db_path.as_ref())
        .context("No database given: pass --db or set db_path in the config file")?;

    cli_style::print_banner("spotify dataset import");
    let dataset = load_dataset(csv, config)?;
    let store = SqliteSpotifyStore::new(db)?;
    let imported = store.replace_tracks(&dataset.tracks)?;

    cli_style::print_success(&format!("Imported {} tracks into {:?}", imported, db));
    print_drop_counts(&dataset);
    Ok(())
}

fn run_top_tracks(source: Source, config: &AppConfig, sink: &ReportSink) -> Result<()> {
    let rows = match source {
        Source::Csv(path) => {
            let dataset = load_dataset(&path, config)?;
            BatchAnalyzer::new(&dataset.tracks).top_tracks_per_artist(config.top_n)?
        }
        Source::Db(path) => open_existing_store(&path)?.top_tracks_per_artist(config.top_n)?,
    };
    debug!("Top tracks report has {} rows", rows.len());
    sink.emit_top_tracks(&rows)
}

fn run_energy_diversity(source: Source, config: &AppConfig, sink: &ReportSink) -> Result<()> {
    let rows = match source {
        Source::Csv(path) => {
            let dataset = load_dataset(&path, config)?;
            BatchAnalyzer::new(&dataset.tracks).energy_diversity_per_album()
        }
        Source::Db(path) => open_existing_store(&path)?.energy_diversity_per_album()?,
    };
    debug!("Energy diversity report has {} rows", rows.len());
    sink.emit_energy_diversity(&rows)
}

fn run_summary(source: Source, config: &AppConfig) -> Result<()> {
    match source {
        Source::Csv(path) => {
            let dataset = load_dataset(&path, config)?;
            print_summary(&BatchAnalyzer::new(&dataset.tracks).summary());
            print_drop_counts(&dataset);
        }
        Source::Db(path) => {
            let tracks = open_existing_store(&path)?.all_tracks()?;
            print_summary(&BatchAnalyzer::new(&tracks).summary());
        }
    }
    Ok(())
}

fn print_summary(summary: &DatasetSummary) {
    cli_style::print_section_header("Dataset");
    cli_style::print_key_value("Tracks", &summary.tracks.to_string());
    cli_style::print_key_value("Artists", &summary.artists.to_string());
    cli_style::print_key_value("Albums", &summary.albums.to_string());
    for (album_type, count) in &summary.by_album_type {
        cli_style::print_key_value(&format!("album_type={}", album_type), &count.to_string());
    }
    for (platform, count) in &summary.by_most_played_on {
        cli_style::print_key_value(&format!("most_played_on={}", platform), &count.to_string());
    }
    cli_style::print_section_footer();
}

fn print_drop_counts(dataset: &Dataset) {
    if dataset.malformed_dropped > 0 {
        cli_style::print_warning(&format!(
            "{} rows dropped with malformed numeric fields",
            dataset.malformed_dropped
        ));
    }
    if dataset.dropped_non_positive_duration > 0 {
        cli_style::print_warning(&format!(
            "{} rows dropped with duration_min <= 0",
            dataset.dropped_non_positive_duration
        ));
    }
    if dataset.dropped_malformed_fields > 0 {
        cli_style::print_warning(&format!(
            "{} rows dropped with a blank name or malformed categorical or boolean fields",
            dataset.dropped_malformed_fields
        ));
    }
}

fn run(cli_args: CliArgs) -> Result<()> {
    if cli_args.output.is_some()
        && matches!(cli_args.command, Command::Import { .. } | Command::Summary { .. })
    {
        bail!("--output only applies to the top-tracks and energy-diversity reports");
    }

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        on_malformed: cli_args.on_malformed,
        top_n: match &cli_args.command {
            Command::TopTracks { top_n, .. } => *top_n,
            _ => DEFAULT_TOP_N,
        },
        format: cli_args.format,
        db_path: None,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;
    debug!("Resolved config: {:?}", config);

    let sink = ReportSink {
        format: config.format,
        output: cli_args.output.as_deref(),
    };

    match &cli_args.command {
        Command::Import { csv, db } => run_import(csv, db.as_ref(), &config)?,
        Command::TopTracks { source, .. } => {
            run_top_tracks(Source::resolve(source, &config)?, &config, &sink)?
        }
        Command::EnergyDiversity { source } => {
            run_energy_diversity(Source::resolve(source, &config)?, &config, &sink)?
        }
        Command::Summary { source } => run_summary(Source::resolve(source, &config)?, &config)?,
    }

    if let Some(output) = &cli_args.output {
        info!("Report written to {:?}", output);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    if let Err(e) = run(cli_args) {
        cli_style::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
