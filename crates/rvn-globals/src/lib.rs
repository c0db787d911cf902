use anyhow::{Result, bail};
use clap::Args;
use log::warn;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static INIT_SYNC: std::sync::Once = std::sync::Once::new();
static GLOBAL_OPTS: OnceCell<GlobalOpts> = OnceCell::new();

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Directory the generated files are written to (default: current dir)
    #[arg(short = 'o', long, value_name = "DIR", global = true)]
    pub output: Option<PathBuf>,

    /// Number of worker threads for the kernels (default: one per core)
    #[arg(short = 't', long, value_name = "N", global = true)]
    pub threads: Option<usize>,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Resolve `file_name` against the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

pub fn log_filter(level: u8) -> String {
    let level = match level {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("rvn={}", level)
}

// -v flags map onto a filter for the workspace crates only, RUST_LOG still wins
pub fn setup_logging(level: u8) {
    let env = env_logger::Env::default().default_filter_or(log_filter(level));
    let _ = env_logger::Builder::from_env(env).try_init();
}

pub fn setup_rayon(threads: Option<usize>) {
    INIT_SYNC.call_once(|| {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        if let Err(e) = builder.build_global() {
            warn!("rayon global pool already set up: {}", e);
        }
    });
}

pub fn init_globals(opts: GlobalOpts) -> Result<&'static GlobalOpts> {
    if GLOBAL_OPTS.set(opts).is_err() {
        bail!("Global options already initialized");
    }

    let opts = get_globals();

    // logging
    setup_logging(opts.verbose);
    // threading
    setup_rayon(opts.threads);

    Ok(opts)
}

pub fn get_globals() -> &'static GlobalOpts {
    GLOBAL_OPTS.get().expect("Global options not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "rvn=info");
        assert_eq!(log_filter(1), "rvn=debug");
        assert_eq!(log_filter(2), "rvn=trace");
        assert_eq!(log_filter(9), "rvn=trace");
    }

    #[test]
    fn test_output_path_defaults_to_cwd() {
        let opts = GlobalOpts::default();
        assert_eq!(opts.output_path("ones.txt"), PathBuf::from("ones.txt"));

        let opts = GlobalOpts {
            output: Some(PathBuf::from("/tmp/vectors")),
            ..Default::default()
        };
        assert_eq!(
            opts.output_path("randn.txt"),
            PathBuf::from("/tmp/vectors/randn.txt")
        );
    }

    #[test]
    fn test_init_globals_only_once() {
        let opts = GlobalOpts {
            threads: Some(2),
            ..Default::default()
        };
        let first = init_globals(opts.clone());
        assert!(first.is_ok());
        assert_eq!(get_globals().threads, Some(2));

        let second = init_globals(opts);
        assert!(second.is_err());
    }
}
