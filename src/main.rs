//! Entry point for the **wsnamer** daemon.
//!
//! Reads workspace refreshes pushed by the host runtime, either from stdin
//! (default) or from a Unix socket (`--socket [path]`), and writes one JSON
//! line of labels per refresh to stdout:
//!
//! ```json
//! [{"name":"1","label":"1: Web","focused":true},{"name":"2","label":"2","focused":false}]
//! ```
//!
//! The source runs on a background thread; labelling happens on the main
//! thread.

use log::{error, info, warn};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use wsnamer::config::Config;
use wsnamer::ipc::listener::UnixSocketListener;
use wsnamer::ipc::stream::StreamSource;
use wsnamer::namer::WorkspaceNamer;
use wsnamer::snapshot::Refresh;
use wsnamer::traits::SnapshotSource;

/// Default socket path for `--socket` without an argument.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/wsnamer.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/wsnamer`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("wsnamer")
}

/// Command-line options.
struct Args {
    config: Option<PathBuf>,
    socket: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        socket: None,
    };
    let mut it = std::env::args().skip(1).peekable();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next().map(PathBuf::from),
            "--socket" => {
                let explicit = it.next_if(|next| !next.starts_with("--"));
                args.socket = Some(explicit.unwrap_or_else(default_socket_path));
            }
            other => warn!("ignoring unknown argument {:?}", other),
        }
    }
    args
}

/// Load the config from `--config`, or from `$XDG_CONFIG_HOME/wsnamer/config.json`,
/// falling back to compiled-in defaults.
///
/// An explicitly named file that cannot be loaded is fatal.
fn load_config(explicit: Option<PathBuf>) -> Config {
    let required = explicit.is_some();
    let path = explicit.unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) if required => {
            error!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args = parse_args();
    let config = load_config(args.config);
    let namer = match WorkspaceNamer::from_config(&config) {
        Ok(namer) => namer,
        Err(e) => {
            error!("invalid rule table: {}", e);
            std::process::exit(1);
        }
    };
    info!("{} rule(s), {:?} matching", namer.rules().len(), namer.mode());

    let (tx, rx) = mpsc::channel::<Refresh>();
    match args.socket {
        Some(path) => spawn_source(UnixSocketListener::new(path), tx),
        None => spawn_source(StreamSource::new(BufReader::new(std::io::stdin())), tx),
    }

    run(&namer, rx);
}

/// Label every refresh and print it as one JSON line.
fn run(namer: &WorkspaceNamer, rx: mpsc::Receiver<Refresh>) {
    let stdout = std::io::stdout();
    for refresh in rx {
        let labels = namer.label_all(&refresh.workspaces);
        let line = match serde_json::to_string(&labels) {
            Ok(line) => line,
            Err(e) => {
                error!("failed to encode labels: {}", e);
                continue;
            }
        };
        let mut out = stdout.lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            error!("stdout closed ({}), exiting", e);
            return;
        }
    }
    info!("snapshot source closed, exiting");
}

fn spawn_source<S: SnapshotSource + 'static>(mut source: S, tx: mpsc::Sender<Refresh>) {
    std::thread::spawn(move || {
        if let Err(e) = source.run(tx) {
            error!("snapshot source error: {}", e);
        }
    });
}
