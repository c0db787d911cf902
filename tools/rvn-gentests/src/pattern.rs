use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rvn_core_tensor::{Tensor, div_scalar};
use std::fmt;
use std::str::FromStr;

pub const B: usize = 1;
pub const N: usize = 16;
pub const D: usize = 32;
pub const SHAPE: [usize; 3] = [B, N, D];

/// How the input tensor is initialized.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pattern {
    Ones,
    Randn,
    Arange,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Ones, Pattern::Randn, Pattern::Arange];

    pub const fn name(self) -> &'static str {
        match self {
            Pattern::Ones => "ones",
            Pattern::Randn => "randn",
            Pattern::Arange => "arange",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    /// Build the `(B, N, D)` input. `seed` only matters for `Randn`.
    pub fn build(self, seed: u64) -> Result<Tensor> {
        match self {
            Pattern::Ones => Ok(Tensor::ones(&SHAPE)),
            Pattern::Randn => {
                let mut rng = StdRng::seed_from_u64(seed);
                div_scalar(Tensor::randn(&SHAPE, &mut rng), D as f32)
            }
            Pattern::Arange => Tensor::arange(B * N * D).reshape(&SHAPE),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ones" => Ok(Pattern::Ones),
            "randn" => Ok(Pattern::Randn),
            "arange" => Ok(Pattern::Arange),
            other => bail!("unknown pattern '{}'", other),
        }
    }
}
