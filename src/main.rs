use clap::{Parser, Subcommand};
use help_site::{config, generate, output, scan, verticals};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "help-site")]
#[command(about = "Static site generator for help centers")]
#[command(long_about = "\
Static site generator for help centers

Documents exported from the content platform are matched to page templates
by entity type and locale, then rendered to static HTML.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  └── documents/                   # Exported documents (*.json, nested dirs OK)
      ├── articles.json            # An array of documents...
      └── home.json                # ...or a single document

Templates:
  helpArticle           → /{slug} (or /{name}), redirect from /index-old/{id}
  helpstarter_homePage  → /index.html

Run 'help-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".help-site-temp", global = true)]
    temp_dir: PathBuf,

    /// Extra config file layered over the content directory's config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan documents into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content by rendering every page without writing
    Check,
    /// List the navigation verticals
    Verticals,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan_with_config(&cli.source, cli.config.as_deref())?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let input_manifest: serde_json::Value = serde_json::from_str(&manifest_content)?;
            let site_config: config::SiteConfig = input_manifest
                .get("config")
                .cloned()
                .map(serde_json::from_value)
                .transpose()?
                .unwrap_or_default();
            init_thread_pool(&site_config.processing);
            let report = generate::generate(&manifest_path, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan_with_config(&cli.source, cli.config.as_deref())?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_from_manifest(&manifest, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan_with_config(&cli.source, cli.config.as_deref())?;
            output::print_scan_output(&manifest, &cli.source);
            init_thread_pool(&manifest.config.processing);
            let pages = generate::render_site(&manifest)?;
            output::print_vertical_warnings(verticals::VERTICALS);
            println!("==> {} pages render cleanly", pages.len());
        }
        Command::Verticals => {
            output::print_verticals(verticals::VERTICALS);
            output::print_vertical_warnings(verticals::VERTICALS);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
