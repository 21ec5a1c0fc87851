use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use diverge_lib::comparison::{FsCompareService, FsFileWriter};
use diverge_lib::config::{Settings, YamlConfigStore};
use diverge_lib::input_validation::{validate_ignore_dirs, validate_path_argument};
use diverge_lib::logging::LogManager;
use diverge_lib::outline::{language_for_file, parse_structure, OutlineNavigator};
use diverge_lib::session::DiffSession;
use diverge_lib::watcher::CompareWatcher;

#[derive(Parser)]
#[command(name = "diverge-cli")]
#[command(about = "Directory comparison and merge CLI", long_about = None)]
struct Cli {
    #[arg(short, long)]
    left: Option<PathBuf>,

    #[arg(short, long)]
    right: Option<PathBuf>,

    /// Extra ignore patterns on top of the configured list
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Copy every differing file's left content over the right side
    #[arg(short = 'a', long)]
    apply_all: bool,

    /// Write applied changes to disk
    #[arg(short, long)]
    save: bool,

    /// Re-compare whenever either root changes
    #[arg(short, long)]
    watch: bool,

    /// Print the outline of a file instead of comparing
    #[arg(long)]
    outline: Option<PathBuf>,

    /// Filter for --outline
    #[arg(short, long)]
    query: Option<String>,

    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(file) = &cli.outline {
        return print_outline(file, cli.query.as_deref(), cli.json);
    }

    let left = cli
        .left
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: --left"))?;
    let right = cli
        .right
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: --right"))?;
    let left = left.to_string_lossy().to_string();
    let right = right.to_string_lossy().to_string();
    validate_path_argument(&left)?;
    validate_path_argument(&right)?;

    let mut settings = Settings::load(Box::new(YamlConfigStore::from_env()?))?;
    let mut ignore_dirs = settings.config().ignore_dirs.clone();
    ignore_dirs.extend(cli.ignore.iter().cloned());
    validate_ignore_dirs(&ignore_dirs)?;

    let compare_service = FsCompareService::new(ignore_dirs)?;
    log::debug!("Ignoring: {}", compare_service.ignore_dirs().join(", "));

    let log_manager = Arc::new(LogManager::default());
    let mut session = DiffSession::new(
        Arc::new(compare_service),
        Arc::new(FsFileWriter::new()),
        log_manager.clone(),
    );
    session.set_left_dir(left.clone());
    session.set_right_dir(right.clone());

    run_compare(&mut session, cli.json).await?;
    if let Err(e) = settings.add_recent_comparison(&left, &right) {
        log::warn!("Could not record recent comparison: {e}");
    }

    if cli.apply_all {
        session.apply_all_to_right();
        println!("📝 Applied {} file(s) to the right side", session.overlay().len());
    }

    if cli.save {
        if session.overlay().is_empty() {
            println!("✅ Nothing to save");
        } else {
            let report = session.save_all().await?;
            println!("💾 Saved {} file(s)", report.saved);
            for failure in &report.failures {
                eprintln!("   ⚠️  {}: {}", failure.rel_path, failure.message);
            }
            if report.refreshed {
                print_summary(&session, cli.json)?;
            }
        }
    } else if !session.overlay().is_empty() {
        println!("ℹ️  Changes not written, pass --save to write them");
    }

    if cli.watch {
        watch(&mut session, PathBuf::from(&left), PathBuf::from(&right), cli.json).await?;
    }

    Ok(())
}

async fn run_compare(session: &mut DiffSession, json: bool) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!(
        "Comparing {} and {}...",
        session.left_dir(),
        session.right_dir()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    session.compare().await;

    if let Some(err) = session.error() {
        spinner.abandon_with_message("❌ Comparison failed!");
        anyhow::bail!("{err}");
    }
    spinner.finish_and_clear();
    print_summary(session, json)
}

fn print_summary(session: &DiffSession, json: bool) -> anyhow::Result<()> {
    let Some(result) = session.result() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("📊 Comparison Results:");
    println!("   Total files: {}", result.total);
    println!("   Identical: {}", result.identical);
    println!("   Different: {}", result.different);
    println!("   Only left: {}", result.only_left);
    println!("   Only right: {}", result.only_right);
    if !result.ignored_dirs.is_empty() {
        println!("   Ignored: {}", result.ignored_dirs.join(", "));
    }
    println!();

    let mut shown = 0;
    for record in &result.records {
        let status = session.effective_status(record);
        if status == diverge_lib::EffectiveStatus::Identical {
            continue;
        }
        println!("   {} {:<10} {}", status.icon(), status.label(), record.rel_path);
        shown += 1;
    }
    if shown == 0 {
        println!("✅ Directories are identical!");
    }
    Ok(())
}

fn print_outline(file: &PathBuf, query: Option<&str>, json: bool) -> anyhow::Result<()> {
    let content = fs::read_to_string(file)?;
    let language = language_for_file(&file.to_string_lossy());
    let nodes = parse_structure(&content, language);

    let mut navigator = OutlineNavigator::new(&nodes);
    if let Some(query) = query {
        navigator.set_query(query);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(navigator.visible())?);
        return Ok(());
    }

    println!("🔍 {} ({language})", file.display());
    for entry in navigator.visible() {
        println!("{:>6}  {}{}", entry.line, "  ".repeat(entry.depth), entry.key);
    }
    Ok(())
}

async fn watch(
    session: &mut DiffSession,
    left: PathBuf,
    right: PathBuf,
    json: bool,
) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut watcher = CompareWatcher::start(left, right, move |paths| {
        let _ = tx.send(paths);
    })?;

    println!("👀 Watching for changes (Ctrl+C to stop)...");
    loop {
        tokio::select! {
            Some(paths) = rx.recv() => {
                log::info!("{} path(s) changed, refreshing", paths.len());
                session.refresh().await;
                match session.error() {
                    Some(err) => eprintln!("❌ Error: {err}"),
                    None => print_summary(session, json)?,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    watcher.stop();
    Ok(())
}
