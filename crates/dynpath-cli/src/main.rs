use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dynpath_core::config::{CliOverrides, ProjectConfig};
use dynpath_core::pipeline::{
    Chunk, ChunkEntry, ChunkId, Compiler, RuntimeModule, RuntimeModuleKind,
};
use dynpath_core::resolver::RuntimeConfig;
use dynpath_core::Container;
use dynpath_runtime::public_path::{commonjs_source, initializer_source, DEFAULT_INITIALIZER};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// dynpath - runtime-resolved public paths for bundled chunks
#[derive(Parser, Debug)]
#[command(name = "dynpath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite generated publicPath runtime modules to call the initializer
    Rewrite(RewriteArgs),

    /// Resolve the base path of an entry from a runtime map
    Resolve(ResolveArgs),

    /// Write a sample dynpath.yaml and the initializer script
    Init,

    /// Print the start-up initializer script
    Runtime {
        /// Function name of the initializer
        #[arg(long, value_name = "NAME", default_value = DEFAULT_INITIALIZER)]
        name: String,

        /// Print the CommonJS module form instead of a named function
        #[arg(long, conflicts_with = "name")]
        commonjs: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct RewriteArgs {
    /// Files holding the generated publicPath runtime module, one chunk each
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Path to dynpath.yaml configuration file
    #[arg(short, long, value_name = "FILE")]
    project: Option<PathBuf>,

    /// Name of the start-up function that computes the public path
    #[arg(long, value_name = "NAME")]
    initializer: Option<String>,

    /// Entry point name passed to the initializer
    #[arg(long, value_name = "NAME")]
    entry_name: Option<String>,

    /// Output directory for rewritten modules
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print diagnostics without colors
    #[arg(long)]
    no_pretty: bool,

    /// Watch input files for changes
    #[arg(short, long)]
    watch: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Entry whose base path to resolve
    #[arg(value_name = "ENTRY")]
    entry: String,

    /// JSON file with the entry → environment → endpoint map
    #[arg(long, value_name = "FILE", requires = "environment")]
    map: Option<PathBuf>,

    /// Active environment name
    #[arg(long, value_name = "ENV", requires = "map")]
    environment: Option<String>,

    /// JSON file with `__MAP__` and `__ENVIRONMENT__` globals
    #[arg(long, value_name = "FILE", conflicts_with_all = ["map", "environment"])]
    globals: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for per-module logs
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Rewrite(args) => {
            let config = load_config(&args)?;
            if args.watch {
                watch_mode(&args, config)?;
            } else if !rewrite_files(&args.files, config)? {
                std::process::exit(1);
            }
        }
        Command::Resolve(args) => {
            let path = resolve(&args)?;
            println!("{}", path);
        }
        Command::Init => init_project()?,
        Command::Runtime { name, commonjs } => {
            if commonjs {
                print!("{}", commonjs_source());
            } else {
                print!("{}", initializer_source(&name));
            }
        }
    }

    Ok(())
}

/// Level filter from `RUST_LOG`, `info` when unset or invalid
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize a project with a configuration file and the initializer script
fn init_project() -> anyhow::Result<()> {
    let config = ProjectConfig::sample();
    config.write_yaml(Path::new("dynpath.yaml"))?;
    println!("Created dynpath.yaml");

    let initializer = config
        .rewrite
        .as_ref()
        .map(|r| r.initializer())
        .unwrap_or(DEFAULT_INITIALIZER);
    std::fs::write("set-path.js", initializer_source(initializer))?;
    println!("Created set-path.js");

    println!("\nInclude set-path.js in the host page before any bundle loads.");
    println!("Run 'dynpath rewrite <FILE>' on a generated publicPath module.");

    Ok(())
}

/// Load the project file (explicit, or `dynpath.yaml` in the working directory) and apply CLI overrides
fn load_config(args: &RewriteArgs) -> anyhow::Result<ProjectConfig> {
    let mut config = if let Some(ref project_path) = args.project {
        ProjectConfig::from_file(project_path)
            .with_context(|| format!("Failed to load config file {}", project_path.display()))?
    } else {
        let default_path = PathBuf::from("dynpath.yaml");
        if default_path.exists() {
            ProjectConfig::from_file(&default_path).context("Failed to load dynpath.yaml")?
        } else {
            ProjectConfig::default()
        }
    };

    let overrides = CliOverrides {
        initializer: args.initializer.clone(),
        entry_name: args.entry_name.clone(),
        out_dir: args
            .out_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string()),
        pretty: args.no_pretty.then_some(false),
    };
    config.merge(&overrides)?;

    // Surface a missing rewrite section before any file is touched
    config.rewrite_config()?;
    Ok(config)
}

/// Result of rewriting a single file
struct FileResult {
    file_path: PathBuf,
    outcome: anyhow::Result<Option<PathBuf>>,
}

/// Run one compilation per file, in parallel. Returns whether every file was rewritten.
fn rewrite_files(files: &[PathBuf], config: ProjectConfig) -> anyhow::Result<bool> {
    use rayon::prelude::*;

    info!("Rewriting {} file(s)...", files.len());

    let out_dir = config.out_dir.as_ref().map(PathBuf::from);
    let outputs = output_paths(files, out_dir.as_deref())?;
    let container = Container::new(config);
    let compiler = container.compiler()?;

    let results: Vec<FileResult> = files
        .par_iter()
        .zip(outputs.par_iter())
        .enumerate()
        .map(|(index, (file_path, output_path))| FileResult {
            file_path: file_path.clone(),
            outcome: rewrite_file(&compiler, index as u32, file_path, output_path),
        })
        .collect();

    let mut all_ok = true;
    for result in results {
        match result.outcome {
            Ok(Some(output_path)) => info!("Generated: {}", output_path.display()),
            Ok(None) => all_ok = false,
            Err(error) => {
                all_ok = false;
                eprintln!("Error rewriting {}: {:#}", result.file_path.display(), error);
            }
        }
    }

    if all_ok {
        info!("Rewrite completed successfully!");
    } else {
        warn!(
            "Rewrite failed ({} error(s) reported)",
            container.error_count()
        );
    }
    Ok(all_ok)
}

/// Rewrite one file. `Ok(None)` means the compilation reported errors and nothing was written.
fn rewrite_file(
    compiler: &Compiler,
    index: u32,
    file_path: &Path,
    output_path: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let source = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    let chunk_name = chunk_name(file_path);
    let entry = ChunkEntry::new(Chunk::named(index, chunk_name))
        .with_runtime_module(RuntimeModule::new(RuntimeModuleKind::PublicPath, source));

    let compilation = compiler.run(vec![entry]);
    if compilation.has_errors() {
        return Ok(None);
    }

    let code = compilation
        .runtime_modules(ChunkId(index))
        .and_then(|modules| modules.first())
        .map(|module| module.generated_code().to_string())
        .unwrap_or_default();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, format!("{}\n", code))?;
    debug!("Wrote {} byte(s) to {:?}", code.len() + 1, output_path);

    Ok(Some(output_path.to_path_buf()))
}

fn chunk_name(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "main".to_string())
}

/// `<stem>.rewritten.js`, next to the input or inside `out_dir`
fn output_path(file_path: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{}.rewritten.js", chunk_name(file_path));
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => file_path.with_file_name(file_name),
    }
}

/// Output path of every input, failing when two inputs would write the same file
fn output_paths(files: &[PathBuf], out_dir: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
    let mut claimed: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    let mut outputs = Vec::with_capacity(files.len());

    for file_path in files {
        let output = output_path(file_path, out_dir);
        if let Some(previous) = claimed.insert(output.clone(), file_path) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                file_path.display(),
                output.display()
            );
        }
        outputs.push(output);
    }

    Ok(outputs)
}

fn resolve(args: &ResolveArgs) -> anyhow::Result<String> {
    let config = match (&args.globals, &args.map, &args.environment) {
        (Some(globals), _, _) => {
            let content = std::fs::read_to_string(globals)
                .with_context(|| format!("Failed to read {}", globals.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)?;
            RuntimeConfig::from_globals(&value)?
        }
        (None, Some(map), Some(environment)) => RuntimeConfig::from_map_file(map, environment)
            .with_context(|| format!("Failed to load runtime map {}", map.display()))?,
        _ => anyhow::bail!("Either --globals or both --map and --environment are required"),
    };

    debug!(
        "Resolving '{}' in environment '{}'",
        args.entry, config.environment
    );
    Ok(config.resolve(&args.entry)?)
}

fn watch_mode(args: &RewriteArgs, config: ProjectConfig) -> anyhow::Result<()> {
    use notify::{
        event::{EventKind, ModifyKind},
        Event, RecursiveMode, Watcher,
    };
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};

    println!("Watching for changes... (Press Ctrl+C to stop)");

    println!("\nInitial rewrite:");
    report_run(rewrite_files(&args.files, config.clone()));

    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for file_path in &args.files {
        match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                watcher.watch(parent, RecursiveMode::NonRecursive)?
            }
            _ => watcher.watch(Path::new("."), RecursiveMode::NonRecursive)?,
        }
    }

    let watched = watched_paths(&args.files);
    let mut last_run = Instant::now();
    let debounce_duration = Duration::from_millis(100);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let should_rerun = matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_)) | EventKind::Create(_)
                );
                if !should_rerun || !touches_watched(&watched, &event.paths) {
                    continue;
                }

                let now = Instant::now();
                if now.duration_since(last_run) >= debounce_duration {
                    println!("\n\nFile changed, rewriting...");
                    report_run(rewrite_files(&args.files, config.clone()));
                    last_run = now;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("File watcher disconnected"));
            }
        }
    }
}

/// Log the outcome of one watch-mode run; failures do not stop watching
fn report_run(result: anyhow::Result<bool>) {
    match result {
        Ok(true) => {}
        Ok(false) => warn!("Some files could not be rewritten; waiting for changes"),
        Err(error) => warn!("Rewrite failed: {:#}", error),
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn watched_paths(files: &[PathBuf]) -> FxHashSet<PathBuf> {
    files.iter().map(|file| canonical(file)).collect()
}

/// Whether any event path is one of the watched inputs, compared as full paths
fn touches_watched(watched: &FxHashSet<PathBuf>, paths: &[PathBuf]) -> bool {
    paths.iter().any(|path| watched.contains(&canonical(path)))
}
