use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_SCORING: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive dashboard (default if no subcommand)
    Dashboard,
    /// List the highest scoring regions
    Top {
        /// Number of regions to show (defaults to dashboard.top_n from config)
        #[arg(short)]
        n: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print headline KPIs and the correlation matrix
    Summary,
    /// Show metrics, radar values and score breakdown for one region
    Region {
        /// Region identifier as it appears in the SA3 column
        name: String,
    },
    /// List all region identifiers
    Regions,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "suburb-radar")]
#[command(about = "Rank SA3 property markets by investment score", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/suburb-radar/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Spreadsheet to load (overrides data.path)
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Worksheet name (overrides data.sheet)
    #[arg(long, global = true)]
    sheet: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init needs no data, handle it before anything can fail on a missing file
    if let Commands::Init { force } = command {
        let path = match config_path.map(Ok).unwrap_or_else(suburb_radar::config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = suburb_radar::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match suburb_radar::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Command line wins over the config file
    if let Some(file) = cli.file {
        config.data.path = PathBuf::from(file);
    }
    if let Some(sheet) = cli.sheet {
        config.data.sheet = sheet;
    }

    if let Err(errors) = suburb_radar::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Loading {} (sheet {}, id column {})",
            config.data.path.display(),
            config.data.sheet,
            config.data.id_column
        );
        eprintln!(
            "Scoring: buy affordability ranked {:?}",
            config.scoring.buy_affordability
        );
    }

    // Load the sheet
    let load_options = suburb_radar::data::LoadOptions {
        sheet: config.data.sheet.clone(),
        id_column: config.data.id_column.clone(),
        verbose: cli.verbose,
    };
    let load_start = Instant::now();
    let dataset = match suburb_radar::data::load_dataset(&config.data.path, &load_options) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load data: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if cli.verbose {
        eprintln!(
            "  Loaded {} regions, {} columns in {:?}",
            dataset.len(),
            dataset.columns.len(),
            load_start.elapsed()
        );
    }

    // Score once, up front; everything downstream reads the scored dataset
    let dataset = match suburb_radar::scoring::score_dataset(dataset, &config.scoring) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Scoring failed: {}", e);
            std::process::exit(EXIT_SCORING);
        }
    };

    let region_count = dataset.len();
    let incomplete = suburb_radar::scoring::incomplete_records(&dataset).len();
    let use_colors = suburb_radar::output::should_use_colors();

    // Route based on subcommand
    match command {
        Commands::Dashboard => {
            let theme = suburb_radar::tui::resolve_theme(config.dashboard.theme);
            let file_name = config
                .data
                .path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| config.data.path.display().to_string());
            let source = format!("{} [{}]", file_name, config.data.sheet);
            let app = suburb_radar::tui::App::new(dataset, config, theme, source);

            if let Err(e) = suburb_radar::tui::run_tui(app).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Top { n, format } => {
            let n = n.unwrap_or(config.dashboard.top_n);
            if n == 0 {
                eprintln!("Invalid count 0. Must be at least 1.");
                std::process::exit(EXIT_CONFIG);
            }

            let top = suburb_radar::analytics::top_n(&dataset, n);
            match format {
                OutputFormat::Table => {
                    println!("{}", suburb_radar::output::format_scored_table(&top, use_colors));
                }
                OutputFormat::Tsv => print!("{}", suburb_radar::output::format_tsv(&top)),
                OutputFormat::Json => match suburb_radar::output::format_json(&top) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize: {}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                },
            }
        }
        Commands::Summary => {
            let kpis = suburb_radar::analytics::kpis(&dataset);
            println!("{}", suburb_radar::output::format_kpis(&kpis, use_colors));
            println!();

            let matrix = suburb_radar::analytics::correlation_matrix(
                &dataset,
                &suburb_radar::analytics::CORRELATION_METRICS,
            );
            println!("{}", suburb_radar::output::format_correlation(&matrix, use_colors));
        }
        Commands::Region { name } => {
            let record = match suburb_radar::analytics::find_region(&dataset, &name) {
                Some(r) => r,
                None => {
                    eprintln!("Unknown region '{}'.", name);
                    let suggestions = suburb_radar::analytics::search_regions(&dataset, &name);
                    if !suggestions.is_empty() {
                        eprintln!("Did you mean: {}", suggestions.join(", "));
                    }
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let radar = suburb_radar::analytics::radar_profile(record);
            println!(
                "{}",
                suburb_radar::output::format_region_detail(record, &radar, use_colors)
            );
        }
        Commands::Regions => {
            for name in suburb_radar::analytics::region_names(&dataset) {
                println!("{}", name);
            }
        }
        Commands::Init { .. } => {} // Handled before loading data
    }

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Total: {} regions ({} with missing {}) in {:?}",
            region_count,
            incomplete,
            if incomplete == 1 { "input" } else { "inputs" },
            start_time.elapsed()
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
