use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::utils::{self, Profile};

pub const LOG_FILE_NAME: &str = "taskai.log";

/// Where the log file for `profile` goes
pub fn log_file_path(profile: Profile) -> Option<PathBuf> {
    utils::get_data_dir(profile).map(|dir| dir.join(LOG_FILE_NAME))
}

fn open_log_file(profile: Profile) -> Option<File> {
    let path = log_file_path(profile)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Where records go when the log file cannot be opened. The interactive UI
/// owns the terminal, so it drops them; the `list` command keeps stderr.
fn fallback_target(interactive: bool) -> Target {
    if interactive {
        Target::Pipe(Box::new(io::sink()))
    } else {
        Target::Stderr
    }
}

/// Install the global logger. `RUST_LOG` picks the level, `info` otherwise.
///
/// Records go to the profile's log file when it can be opened.
pub fn init_logging(profile: Profile, interactive: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    match open_log_file(profile) {
        Some(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(fallback_target(interactive));
        }
    }
    // A second init (e.g. from tests) keeps the first logger
    let _ = builder.try_init();
}
