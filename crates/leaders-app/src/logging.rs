// Log destination selection and tracing setup.
//
// Logs go to log/baseballbot.log unless the command line carries `log=1` or
// `log=stdout`, in which case they go to stdout.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub const DEFAULT_LOG_FILE: &str = "log/baseballbot.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    File(PathBuf),
}

impl LogDestination {
    /// Pick a destination from raw command line arguments.
    pub fn from_args<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        if args.into_iter().any(|arg| is_stdout_flag(arg.as_ref())) {
            LogDestination::Stdout
        } else {
            LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
        }
    }

    /// Like [`from_args`](Self::from_args), but for the process's raw
    /// arguments. Arguments that are not valid UTF-8 are read lossily and
    /// left for clap to reject.
    pub fn from_os_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::from_args(
            args.into_iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }
}

/// Whether `arg` is one of the `log=` arguments. Used to keep these out of
/// the stat key list.
pub fn is_log_arg(arg: &str) -> bool {
    arg.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("log="))
}

fn is_stdout_flag(arg: &str) -> bool {
    is_log_arg(arg) && {
        let value = &arg[4..];
        value == "1" || value.eq_ignore_ascii_case("stdout")
    }
}

/// Install the global tracing subscriber writing to `destination`.
pub fn init_tracing(destination: &LogDestination) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("leaders_core=info,leaders_app=info,warn"));

    match destination {
        LogDestination::Stdout => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stdout)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set tracing subscriber")?;
        }
        LogDestination::File(path) => {
            let log_file = open_log_file(path)?;
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set tracing subscriber")?;
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
