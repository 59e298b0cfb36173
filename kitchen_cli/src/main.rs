use clap::{Parser, Subcommand};
use kitchen_core::allergen::Record;
use kitchen_core::*;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kitchen")]
#[command(about = "Kitchen data utilities: friendly IDs, allergens, inventory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a UUID as a friendly ID
    Encode {
        /// UUID to encode
        uuid: String,
    },

    /// Decode a friendly ID back to its UUID
    Decode {
        /// Friendly ID to decode
        code: String,
    },

    /// Check whether a string is a well-formed friendly ID
    Validate {
        /// Candidate friendly ID
        code: String,
    },

    /// Classify an inventory item as prepared or purchased
    Classify {
        /// Item code on the inventory record
        #[arg(long)]
        item_code: Option<String>,

        /// Source recipe reference, if any
        #[arg(long)]
        source_recipe: Option<String>,
    },

    /// Allergen conversions
    #[command(subcommand)]
    Allergens(AllergenCommands),

    /// Inventory export tools
    #[command(subcommand)]
    Inventory(InventoryCommands),
}

#[derive(Subcommand)]
enum AllergenCommands {
    /// Extract an allergen profile from a JSON record (file or stdin)
    Extract {
        /// Record has three-way recipe columns instead of ingredient flags
        #[arg(long)]
        derived: bool,

        /// JSON file holding the record; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Project allergen lists onto the full set of boolean columns
    Project {
        /// Allergens definitely present
        #[arg(long, value_delimiter = ',')]
        contains: Vec<String>,

        /// Allergens with cross-contact risk
        #[arg(long, value_delimiter = ',')]
        may_contain: Vec<String>,

        /// Facility-level allergens
        #[arg(long, value_delimiter = ',')]
        environment: Vec<String>,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// Append friendly IDs and ingredient types to an inventory CSV
    Annotate {
        /// Inventory export to read
        input: PathBuf,

        /// Where to write the annotated copy
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    kitchen_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Run one command; `Ok(false)` means it completed with a negative answer
fn run(cli: Cli) -> Result<bool> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Encode { uuid } => {
            println!("{}", encode_str(&uuid)?);
        }
        Commands::Decode { code } => {
            println!("{}", decode(code.trim())?);
        }
        Commands::Validate { code } => return Ok(cmd_validate(&code)),
        Commands::Classify {
            item_code,
            source_recipe,
        } => {
            let signals = IngredientSignals {
                item_code,
                source_recipe_id: source_recipe,
            };
            println!("{}", determine_ingredient_type(&signals));
        }
        Commands::Allergens(AllergenCommands::Extract { derived, file }) => {
            cmd_extract(derived, file.as_deref(), &config)?
        }
        Commands::Allergens(AllergenCommands::Project {
            contains,
            may_contain,
            environment,
        }) => {
            let columns = arrays_to_booleans(&contains, &may_contain, Some(environment.as_slice()));
            print_json(&columns, &config)?;
        }
        Commands::Inventory(InventoryCommands::Annotate { input, output }) => {
            cmd_annotate(&input, output, &config)?
        }
    }

    Ok(true)
}

fn cmd_validate(code: &str) -> bool {
    let valid = is_valid_friendly_id(code);
    println!("{}", if valid { "valid" } else { "invalid" });
    valid
}

fn cmd_extract(derived: bool, file: Option<&Path>, config: &Config) -> Result<()> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let record: Option<&Record> = value.as_object();
    if record.is_none() {
        tracing::warn!("Input is not a JSON object; reporting no allergens");
    }

    let profile = if derived {
        extract_from_derived(record)
    } else {
        AllergenProfile::from_source(record)
    };

    print_json(&profile, config)
}

fn cmd_annotate(input: &Path, output: Option<PathBuf>, config: &Config) -> Result<()> {
    let output = output.unwrap_or_else(|| default_annotated_path(input));

    let count = annotate_inventory_csv(input, &output, &config.inventory)?;

    println!("✓ Annotated {} rows", count);
    println!("  CSV: {}", output.display());

    Ok(())
}

fn default_annotated_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "inventory".into());
    input.with_file_name(format!("{}.annotated.csv", stem))
}

fn print_json<T: Serialize>(value: &T, config: &Config) -> Result<()> {
    let text = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
