use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use simple_file_picker::app::events::{Command, SessionEvent};
use simple_file_picker::app::view_model::ViewModel;
use simple_file_picker::app::PickerSession;
use simple_file_picker::config::{settings, SessionConfig};
use simple_file_picker::core::{DialogMode, EntryKind};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Open,
    Save,
    Folder,
}

impl From<ModeArg> for DialogMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Open => DialogMode::OpenFile,
            ModeArg::Save => DialogMode::SaveFile,
            ModeArg::Folder => DialogMode::SelectFolder,
        }
    }
}

/// Pick files and folders from the terminal.
#[derive(Parser, Debug)]
#[command(name = "simple-file-picker", version, about)]
struct Args {
    /// What the dialog is for.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Directory to start in.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Filter string, e.g. "Text|*.txt;*.md|All|*".
    #[arg(long)]
    filter: Option<String>,

    /// Extension appended to typed names without one.
    #[arg(long = "default-ext")]
    default_ext: Option<String>,

    /// Initial filename.
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    multiselect: bool,

    /// Save mode only: the chosen file must already exist.
    #[arg(long)]
    require_exists: bool,

    #[arg(long)]
    title: Option<String>,

    /// Read settings from this JSON file instead of the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to this file and exit.
    #[arg(long)]
    export_config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs one session. Returns `true` when a choice was accepted.
fn run(args: Args) -> Result<bool> {
    let stored = load_base_config(args.config.as_deref());
    let mut config = stored.clone();
    apply_args(&mut config, &args);

    if let Some(path) = &args.export_config {
        settings::export_config(&config, path)
            .with_context(|| format!("Failed to export settings to {}", path.display()))?;
        return Ok(true);
    }

    let (tx, rx) = mpsc::channel();
    let mut session = PickerSession::new(config, tx);
    session
        .start()
        .context("Failed to open the start directory")?;

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut out = io::stdout().lock();

    while !session.is_closed() {
        let mut latest_view = None;
        let mut overwrite = None;
        for event in rx.try_iter() {
            match event {
                SessionEvent::StateUpdate(view) => latest_view = Some(view),
                SessionEvent::Error(message) => writeln!(out, "! {}", message)?,
                SessionEvent::OverwritePrompt(paths) => overwrite = Some(paths),
                SessionEvent::Busy(_) | SessionEvent::Closed(_) => {}
            }
        }
        if let Some(view) = latest_view {
            render(&mut out, &view)?;
        }

        if let Some(paths) = overwrite {
            for path in &paths {
                writeln!(out, "{} already exists.", path.display())?;
            }
            write!(out, "Replace? [y/n] ")?;
            out.flush()?;
            let answer = input.next().transpose()?.unwrap_or_default();
            session.dispatch(if answer.trim().eq_ignore_ascii_case("y") {
                Command::AcceptOverwrite
            } else {
                Command::DeclineOverwrite
            });
            continue;
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = input.next().transpose()? else {
            session.dispatch(Command::Cancel);
            break;
        };
        match parse_line(&line, session.config().mode) {
            Ok(commands) => commands.into_iter().for_each(|c| session.dispatch(c)),
            Err(usage) => writeln!(out, "? {}", usage)?,
        }
    }

    let (finished, result) = session.finish();
    let Some(result) = result else {
        return Ok(false);
    };

    if let Err(e) = remember_directory(stored, &finished, args.config.as_deref()) {
        tracing::warn!("Could not remember the last directory: {:#}", e);
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        for path in &result.paths {
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(true)
}

fn load_base_config(path: Option<&Path>) -> SessionConfig {
    let loaded = match path {
        Some(path) => settings::load_config(Some(path)),
        None => SessionConfig::load(),
    };
    match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default settings: {:#}", e);
            SessionConfig::default()
        }
    }
}

/// Writes the finished session's directory into the settings as loaded from
/// disk. Command-line overrides apply to one run only and are never saved.
fn remember_directory(
    mut stored: SessionConfig,
    finished: &SessionConfig,
    path: Option<&Path>,
) -> Result<()> {
    if !stored.remember_last_directory {
        return Ok(());
    }
    stored.last_directory = finished.last_directory.clone();
    settings::save_config(&stored, path)
}

fn apply_args(config: &mut SessionConfig, args: &Args) {
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(dir) = &args.dir {
        config.initial_directory = Some(dir.clone());
        config.last_directory = None;
    }
    if let Some(filter) = &args.filter {
        config.filter = filter.clone();
    }
    if let Some(ext) = &args.default_ext {
        config.set_default_extension(ext);
    }
    if let Some(name) = &args.name {
        config.initial_filename = name.clone();
    }
    if let Some(title) = &args.title {
        config.title = Some(title.clone());
    }
    config.multiselect |= args.multiselect;
    config.require_exists |= args.require_exists;
}

/// Translates one input line into session commands.
fn parse_line(line: &str, mode: DialogMode) -> Result<Vec<Command>, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        if line.is_empty() {
            return Ok(vec![Command::SubmitText]);
        }
        if mode == DialogMode::SelectFolder {
            return Ok(vec![Command::NavigateTo(PathBuf::from(line))]);
        }
        return Ok(vec![
            Command::SetTypedName(line.to_string()),
            Command::SubmitText,
        ]);
    };

    let (verb, arg) = match rest.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (rest, ""),
    };
    let index = || {
        arg.parse::<usize>()
            .map_err(|_| format!(":{} needs a row number", verb))
    };

    let command = match verb {
        "cd" if !arg.is_empty() => Command::NavigateTo(PathBuf::from(arg)),
        "cd" => return Err(":cd needs a path".to_string()),
        "up" => Command::GoUp,
        "back" => Command::Undo,
        "forward" => Command::Redo,
        "refresh" => Command::Refresh,
        "filter" => Command::SelectFilter(index()?),
        "clear" => Command::ClearCustomFilter,
        "select" => Command::SelectEntry {
            index: index()?,
            additive: false,
        },
        "add" => Command::SelectEntry {
            index: index()?,
            additive: true,
        },
        "open" => Command::ActivateEntry(index()?),
        "ok" => Command::Commit,
        "cancel" => Command::Cancel,
        _ => {
            return Err(format!(
                "unknown command :{} (try :cd :up :back :forward :refresh :filter :clear :select :add :open :ok :cancel)",
                verb
            ))
        }
    };
    Ok(vec![command])
}

fn render(out: &mut impl Write, view: &ViewModel) -> io::Result<()> {
    let dir = view
        .current_directory
        .as_deref()
        .map(|d| d.display().to_string())
        .unwrap_or_default();
    writeln!(out, "== {}: {} ==", view.title, dir)?;

    let width = view.rows.iter().map(|r| r.name.len()).max().unwrap_or(0) + 1;
    for (i, row) in view.rows.iter().enumerate() {
        let marker = if row.selected { '*' } else { ' ' };
        let name = match row.kind {
            EntryKind::Directory => format!("{}/", row.name),
            EntryKind::File => row.name.clone(),
        };
        writeln!(
            out,
            "{}{:>4}  {:<width$} {:>9}  {}",
            marker,
            i,
            name,
            row.size,
            row.modified,
            width = width
        )?;
    }
    if view.rows.is_empty() {
        writeln!(out, "  (empty)")?;
    }

    if !view.filter_labels.is_empty() {
        let labels: Vec<String> = view
            .filter_labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if view.active_filter == Some(i) {
                    format!("[{}: {}]", i, label)
                } else {
                    format!("{}: {}", i, label)
                }
            })
            .collect();
        writeln!(out, "Filters: {}", labels.join("  "))?;
    }
    if let Some(custom) = &view.custom_filter {
        writeln!(out, "Custom filter: {}", custom)?;
    }
    if view.filename_editable {
        writeln!(out, "Name: {}", view.typed_name)?;
    }
    writeln!(out, "[{}]", view.ok_label)
}
