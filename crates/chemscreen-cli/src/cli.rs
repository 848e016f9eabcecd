use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "chemscreen - Count charge-neutral, electronegativity-ordered stoichiometries across combinations of chemical elements.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count charge-neutral stoichiometries for every combination size up to max-n.
    Count(CountArgs),
    /// List elements with their oxidation states and electronegativities.
    Elements(ElementsArgs),
    /// Find charge-neutral site assignments for a lattice prototype.
    Compositions(CompositionsArgs),
    /// Compute the stoichiometry-weighted electronegativity of a compound.
    Electronegativity(ElectronegativityArgs),
}

/// Element universe selection shared by several subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ElementArgs {
    /// Comma-separated element symbols, screened in the given order (e.g., 'H,O,Na').
    #[arg(short, long, value_delimiter = ',', value_name = "SYMBOLS", conflicts_with_all = ["first", "last"])]
    pub elements: Option<Vec<String>>,

    /// First atomic number of the element range.
    #[arg(long, value_name = "Z")]
    pub first: Option<u8>,

    /// Last atomic number of the element range.
    #[arg(long, value_name = "Z")]
    pub last: Option<u8>,

    /// Alternative element data file in CSV format.
    #[arg(long, value_name = "PATH")]
    pub element_data: Option<PathBuf>,
}

/// Arguments for the `count` subcommand.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub elements: ElementArgs,

    // --- Search Overrides ---
    /// Largest combination size to count (2 to 6).
    #[arg(short = 'n', long, value_name = "INT")]
    pub max_n: Option<usize>,

    /// Upper bound on each stoichiometric coefficient.
    #[arg(short = 't', long, value_name = "INT")]
    pub stoichiometry_threshold: Option<u32>,

    /// Count every coefficient tuple instead of each distinct ratio once.
    #[arg(long)]
    pub raw_counts: bool,

    // --- Filter Overrides ---
    /// Margin by which anions must be more electronegative than cations.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub pauling_threshold: Option<f64>,

    /// Electronegativity source used by the filter: 'pauling' or 'mulliken'.
    #[arg(long, value_name = "SOURCE")]
    pub electronegativity: Option<String>,

    // --- Execution Overrides ---
    /// Number of progress lines to print per round.
    #[arg(long, value_name = "INT")]
    pub progress_reports: Option<usize>,

    #[command(flatten)]
    pub parallelism: Parallelism,

    /// Number of worker threads.
    #[arg(short, long, value_name = "INT")]
    pub workers: Option<usize>,

    /// Minimum number of element combinations handed to a worker at once.
    #[arg(long, value_name = "INT")]
    pub chunk_size: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S filter.repeat-anions=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive flags overriding `parallel.enabled`.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct Parallelism {
    /// Count with a pool of worker threads.
    #[arg(long)]
    pub parallel: bool,
    /// Count on the calling thread only.
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the `elements` subcommand.
#[derive(Args, Debug)]
pub struct ElementsArgs {
    #[command(flatten)]
    pub elements: ElementArgs,
}

/// Arguments for the `compositions` subcommand.
#[derive(Args, Debug)]
pub struct CompositionsArgs {
    /// Structure prototype: 'perovskite', 'spinel' or 'wurtzite'.
    #[arg(short, long, value_name = "NAME")]
    pub prototype: String,

    /// Allowed oxidation states per site, sites separated by ';' (e.g., '1,2;4,5;-2').
    #[arg(short, long, value_name = "STATES", allow_hyphen_values = true)]
    pub site_states: String,

    #[command(flatten)]
    pub elements: ElementArgs,
}

/// Arguments for the `electronegativity` subcommand.
#[derive(Args, Debug)]
pub struct ElectronegativityArgs {
    /// Element symbols of the compound (e.g., 'Cu S').
    #[arg(required = true, value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Stoichiometry of each element, in the same order.
    #[arg(long, required = true, num_args(1..), value_name = "FLOAT")]
    pub stoichs: Vec<f64>,

    /// Electronegativity source: 'mulliken' or 'pauling'.
    #[arg(long, default_value = "mulliken", value_name = "SOURCE")]
    pub source: String,

    /// Alternative element data file in CSV format.
    #[arg(long, value_name = "PATH")]
    pub element_data: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_flags_parse() {
        let cli = Cli::parse_from([
            "chemscreen",
            "-vv",
            "count",
            "--elements",
            "H,O,Na",
            "-n",
            "3",
            "--pauling-threshold",
            "-0.5",
            "--sequential",
            "-S",
            "parallel.workers=2",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Count(args) = cli.command else {
            panic!("expected 'count'");
        };
        assert_eq!(
            args.elements.elements,
            Some(vec!["H".to_string(), "O".to_string(), "Na".to_string()])
        );
        assert_eq!(args.max_n, Some(3));
        assert_eq!(args.pauling_threshold, Some(-0.5));
        assert!(args.parallelism.sequential);
        assert!(!args.parallelism.parallel);
        assert_eq!(args.set_values, vec!["parallel.workers=2"]);
    }

    #[test]
    fn parallel_and_sequential_conflict() {
        let result = Cli::try_parse_from(["chemscreen", "count", "--parallel", "--sequential"]);
        assert!(result.is_err());
    }

    #[test]
    fn symbols_conflict_with_range() {
        let result = Cli::try_parse_from(["chemscreen", "elements", "-e", "H", "--first", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn compositions_accept_negative_leading_states() {
        let cli = Cli::parse_from([
            "chemscreen",
            "compositions",
            "--prototype",
            "wurtzite",
            "--site-states",
            "-2;2",
        ]);
        let Commands::Compositions(args) = cli.command else {
            panic!("expected 'compositions'");
        };
        assert_eq!(args.site_states, "-2;2");
    }

    #[test]
    fn electronegativity_takes_symbols_and_stoichs() {
        let cli = Cli::parse_from([
            "chemscreen",
            "electronegativity",
            "Cu",
            "S",
            "--stoichs",
            "2",
            "1",
        ]);
        let Commands::Electronegativity(args) = cli.command else {
            panic!("expected 'electronegativity'");
        };
        assert_eq!(args.symbols, vec!["Cu", "S"]);
        assert_eq!(args.stoichs, vec![2.0, 1.0]);
        assert_eq!(args.source, "mulliken");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
