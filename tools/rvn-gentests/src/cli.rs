use clap::{Args, Parser};
use rvn_globals::GlobalOpts;

#[derive(Parser, Debug)]
#[command(
    name = "rvn-gentests",
    version = env!("CARGO_PKG_VERSION"),
    about = "Golden test vectors for the bf16 element-wise add kernel."
)]
pub struct Cli {
    #[command(flatten)]
    pub g: GlobalOpts,

    #[command(flatten)]
    pub args: GentestsArgs,
}

#[derive(Args, Debug)]
pub struct GentestsArgs {
    /// Initialization pattern: ones | randn | arange
    // kept as a plain string so an unknown name is reported by us, not clap
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Seed for the randn generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_only() {
        let cli = Cli::try_parse_from(["rvn-gentests", "ones"]).unwrap();
        assert_eq!(cli.args.pattern, "ones");
        assert_eq!(cli.args.seed, 0);
        assert!(cli.g.output.is_none());
        assert_eq!(cli.g.verbose, 0);
    }

    #[test]
    fn test_unknown_pattern_still_parses() {
        let cli = Cli::try_parse_from(["rvn-gentests", "zeros"]).unwrap();
        assert_eq!(cli.args.pattern, "zeros");
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "rvn-gentests",
            "-vv",
            "-o",
            "out",
            "--threads",
            "3",
            "randn",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(cli.args.pattern, "randn");
        assert_eq!(cli.args.seed, 42);
        assert_eq!(cli.g.verbose, 2);
        assert_eq!(cli.g.threads, Some(3));
        assert_eq!(cli.g.output.as_deref(), Some(std::path::Path::new("out")));
    }

    #[test]
    fn test_missing_pattern_is_usage_error() {
        assert!(Cli::try_parse_from(["rvn-gentests"]).is_err());
    }
}
