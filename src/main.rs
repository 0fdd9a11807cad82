use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use laterality::analysis::{export, report, RunAnalysis};
use laterality::assets::AssetStore;
use laterality::cli::{Cli, Commands};
use laterality::models::Kind;
use laterality::runlog;
use laterality::sequencer::{RunConfig, TrialSequencer};
use laterality::session::TerminalSession;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Run {
            assets,
            out,
            count,
            limit,
            repeats,
            no_equal,
        } => run(assets, out, count, limit, repeats, no_equal),
        Commands::Analyze {
            file,
            csv,
            append,
            detailed_csv,
        } => analyze(&file, csv.as_deref(), append, detailed_csv.as_deref()),
    }
}

fn run(
    assets: PathBuf,
    out: PathBuf,
    count: usize,
    limit: Option<Kind>,
    repeats: bool,
    no_equal: bool,
) -> Result<()> {
    let store = AssetStore::new(assets);
    store.ensure_layout()?;

    let mut session = TerminalSession::new();
    let Some(pain_level) = session.prompt_pain_level()? else {
        return Ok(());
    };

    let config = RunConfig {
        pain_level,
        limit_to: limit,
        num_trials: count,
        equalize: !no_equal,
        allow_repeats: repeats,
    };
    let buckets = store.load(&config.kinds())?;
    let mut sequencer = TrialSequencer::new(config, buckets)?;

    let completed = session.run_trials(&mut sequencer)?;
    let result = sequencer.result();
    if result.guess_log.is_empty() {
        // Quit before the first trial: nothing worth persisting.
        return Ok(());
    }
    if !completed {
        log::info!("run stopped early after {} trials", result.guess_log.len());
    }
    runlog::append_result(&out, &result)?;

    report::write_summary(&mut io::stdout(), &RunAnalysis::new(result))?;
    Ok(())
}

fn analyze(
    file: &Path,
    csv: Option<&Path>,
    append: bool,
    detailed_csv: Option<&Path>,
) -> Result<()> {
    let runs: Vec<RunAnalysis> = runlog::read_results(file)?
        .into_iter()
        .map(RunAnalysis::new)
        .collect();

    let mut stdout = io::stdout();
    for ra in &runs {
        report::write_summary(&mut stdout, ra)?;
    }
    if let Some(dest) = csv {
        export::write_summary_csv(&runs, dest, append)?;
    }
    if let Some(dest) = detailed_csv {
        export::write_detailed_csv(&runs, dest)?;
    }
    Ok(())
}
