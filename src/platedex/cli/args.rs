use clap::{Args, Parser, Subcommand};
use platedex::error::PlatedexError;
use platedex::model::ItemKind;
use platedex::sort::SortKey;
use std::path::PathBuf;
use std::str::FromStr;

/// Version string: "0.3.2" for releases, "0.3.2@abc1234" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("PLATEDEX_GIT_HASH");
    const IS_RELEASE: &str = env!("PLATEDEX_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "platedex", version = get_version())]
#[command(about = "Catalog your license plate collection, wishlist and archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Item kind to work on: owned, wanted or archived (default from config)
    #[arg(short, long, global = true)]
    pub kind: Option<ItemKind>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new item
    #[command(alias = "a")]
    Add {
        /// Registration number
        registration: String,

        /// Field assignments, e.g. country=Finland year=1972
        fields: Vec<String>,
    },

    /// Change fields of one or more items
    #[command(alias = "u")]
    Update {
        /// Indexes or registration numbers
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Field assignment name=value (repeatable; empty value clears)
        #[arg(short, long = "set", required = true)]
        set: Vec<String>,
    },

    /// Delete one or more items
    #[command(alias = "rm")]
    Delete {
        /// Indexes or registration numbers
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// List items, filtered, sorted and searched
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show every field of one or more items
    #[command(alias = "v")]
    Show {
        /// Indexes or registration numbers
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move wanted items into the collection
    Acquire {
        /// Indexes or registration numbers of wanted items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Acquisition date, YYYY-MM-DD (default today)
        #[arg(long)]
        date: Option<String>,

        /// Extra field assignment name=value (repeatable)
        #[arg(short, long = "set")]
        set: Vec<String>,
    },

    /// Move owned items into the archive
    Archive {
        /// Indexes or registration numbers of owned items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Archival date, YYYY-MM-DD (default today)
        #[arg(long)]
        date: Option<String>,

        /// Why the plate left (sold, traded, ...)
        #[arg(long)]
        reason: Option<String>,

        /// Extra field assignment name=value (repeatable)
        #[arg(short, long = "set")]
        set: Vec<String>,
    },

    /// Manage collections of owned items
    #[command(alias = "col")]
    Collections {
        #[command(subcommand)]
        action: Option<CollectionCommands>,
    },

    /// Show min/max of every range field
    Bounds {
        /// Only members of this collection
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Export items as CSV
    Export {
        /// Output file (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import items from CSV
    Import {
        /// CSV file with a header row
        path: PathBuf,
    },

    /// Write a blank CSV import template
    Template {
        /// Output file (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. currency-symbol)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// List collections with member counts
    #[command(alias = "ls")]
    List,

    /// Create a collection
    Create { name: String },

    /// Rename a collection
    Rename { name: String, new_name: String },

    /// Delete a collection
    #[command(alias = "rm")]
    Delete {
        name: String,

        /// Also delete the items in it
        #[arg(long)]
        cascade: bool,
    },

    /// Add owned items to a collection
    Add {
        name: String,
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Remove items from a collection
    Remove {
        name: String,
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
}

/// Ranges are `MIN..MAX`; either end may be left out to mean the current
/// data bound. Money is in minor units (cents).
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Search registration numbers
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order (default from config)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Only members of this collection
    #[arg(short, long)]
    pub collection: Option<String>,

    #[arg(long = "country")]
    pub countries: Vec<String>,

    #[arg(long = "type")]
    pub types: Vec<String>,

    #[arg(long = "location")]
    pub locations: Vec<String>,

    /// Matches the main or the secondary color
    #[arg(long = "color")]
    pub colors: Vec<String>,

    #[arg(long = "source-type")]
    pub source_types: Vec<String>,

    #[arg(long = "source-country")]
    pub source_countries: Vec<String>,

    #[arg(long = "archival-reason")]
    pub archival_reasons: Vec<String>,

    #[arg(long = "recipient-country")]
    pub recipient_countries: Vec<String>,

    #[arg(long)]
    pub period: Option<RangeArg>,

    #[arg(long)]
    pub year: Option<RangeArg>,

    #[arg(long)]
    pub cost: Option<RangeArg>,

    #[arg(long)]
    pub value: Option<RangeArg>,

    /// Acquisition date range
    #[arg(long)]
    pub date: Option<RangeArg>,

    #[arg(long)]
    pub archival_date: Option<RangeArg>,

    /// Only items with a vehicle recorded
    #[arg(long)]
    pub has_vehicle: bool,
}

impl ListArgs {
    pub fn has_ranges(&self) -> bool {
        [
            &self.period,
            &self.year,
            &self.cost,
            &self.value,
            &self.date,
            &self.archival_date,
        ]
        .iter()
        .any(|r| r.is_some())
    }
}

/// `MIN..MAX`, `MIN..` or `..MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeArg {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl FromStr for RangeArg {
    type Err = PlatedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s.split_once("..").ok_or_else(|| {
            PlatedexError::Validation(format!("Expected a range like MIN..MAX, got `{}`", s))
        })?;
        let end = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        Ok(RangeArg {
            min: end(min),
            max: end(max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::parse_from([
            "platedex",
            "--kind",
            "archived",
            "list",
            "--country",
            "Finland",
            "--country",
            "Sweden",
            "--year",
            "1970..",
            "--sort",
            "archived-newest",
        ]);
        assert_eq!(cli.kind, Some(ItemKind::Archived));
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.countries, vec!["Finland", "Sweden"]);
        assert_eq!(args.sort, Some(SortKey::ArchivedNewest));
        assert_eq!(
            args.year,
            Some(RangeArg {
                min: Some("1970".into()),
                max: None
            })
        );
        assert!(args.has_ranges());
    }

    #[test]
    fn range_requires_separator() {
        assert!("1970".parse::<RangeArg>().is_err());
        let open = "..2020-01-01".parse::<RangeArg>().unwrap();
        assert_eq!(open.min, None);
        assert_eq!(open.max.as_deref(), Some("2020-01-01"));
    }

    #[test]
    fn parses_collection_delete_cascade() {
        let cli = Cli::parse_from(["platedex", "col", "rm", "Nordics", "--cascade"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Collections {
                action: Some(CollectionCommands::Delete { cascade: true, .. })
            })
        ));
    }
}
