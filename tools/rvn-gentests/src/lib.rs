pub mod cli;
pub mod golden;
pub mod pattern;

use crate::cli::GentestsArgs;
use crate::golden::GoldenVectors;
use crate::pattern::Pattern;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rvn_globals::GlobalOpts;
use std::path::PathBuf;

/// Build the input for `pattern`, compute `x + x` in bf16 and pair them up.
pub fn generate(pattern: Pattern, seed: u64) -> Result<GoldenVectors> {
    let x = pattern.build(seed)?;
    debug!("rvn-gentests: {} input shape {:?}", pattern, x.shape());

    let o = (&x + &x)?;

    GoldenVectors::new(&x, &o)
}

/// Returns the written path, or `None` when the pattern name is unknown.
pub async fn run_gentests_cmd(cmd: GentestsArgs, globals: &GlobalOpts) -> Result<Option<PathBuf>> {
    debug!("rvn-gentests::run");
    debug!("rvn-gentests args: {:#?}", &cmd);

    // an unknown name is a clean exit, not a failure
    let pattern = match cmd.pattern.parse::<Pattern>() {
        Ok(p) => p,
        Err(e) => {
            warn!("{}", e);
            println!("Invalid test name: {}", cmd.pattern);
            return Ok(None);
        }
    };

    if pattern == Pattern::Randn {
        info!("rvn-gentests: randn seed {}", cmd.seed);
    }

    let vectors = generate(pattern, cmd.seed)?;

    if let Some(dir) = &globals.output {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating output dir {}", dir.display()))?;
    }

    let path = globals.output_path(&pattern.file_name());
    tokio::fs::write(&path, vectors.render())
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        "rvn-gentests: wrote {} tokens ({} input + {} output) to {}",
        vectors.token_count(),
        vectors.input.len(),
        vectors.output.len(),
        path.display()
    );

    Ok(Some(path))
}
