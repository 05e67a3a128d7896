use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use vitrine_core::{
    APPLICATION_SLOTS, CmsClient, CmsConfig, FallbackTable, Resolution, Resolver, RouteKind, SERVICE_SLOTS, SeoHead,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for a route nothing could be found for
const EXIT_NOT_FOUND: u8 = 2;
/// Exit code for a route whose content is unavailable
const EXIT_UNAVAILABLE: u8 = 3;

/// Resolve marketing-site routes against a headless WordPress CMS
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(author = "Vitrine Contributors")]
#[command(version)]
#[command(about = "Resolve site routes against the headless CMS", long_about = None)]
struct Args {
    /// WordPress base URL
    #[arg(long, env = "CMS_BASE_URL", value_name = "URL", global = true)]
    cms_url: Option<String>,

    /// Public site URL used for SEO head lookups
    #[arg(long, env = "SITE_URL", value_name = "URL", global = true)]
    site_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, env = "CMS_TIMEOUT_SECS", default_value = "10", value_name = "SECS", global = true)]
    timeout: u64,

    /// JSON file replacing the built-in fallback table
    #[arg(long, env = "VITRINE_FALLBACK_FILE", value_name = "FILE", global = true)]
    fallback: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a site path to its view model and SEO head
    Resolve {
        /// Site path, e.g. /services/app-development
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Fetch and parse the SEO head the CMS serves for a site path
    Seo {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Parse a head fragment from a local file, or "-" for stdin
    Head {
        #[arg(value_name = "INPUT")]
        input: String,
    },
    /// List the routes the resolver knows about
    Routes,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "vitrine_core=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn cms_config(args: &Args) -> anyhow::Result<CmsConfig> {
    let base = args
        .cms_url
        .as_deref()
        .context("No CMS URL given: pass --cms-url or set CMS_BASE_URL")?;
    let mut builder = CmsConfig::builder().base_url(base).context("Invalid CMS URL")?;
    if let Some(site) = &args.site_url {
        builder = builder.site_url(site).context("Invalid site URL")?;
    }
    Ok(builder.timeout(args.timeout).build())
}

fn fallback_table(path: Option<&Path>) -> anyhow::Result<FallbackTable> {
    match path {
        Some(path) => {
            FallbackTable::from_path(path).with_context(|| format!("Failed to load fallback table: {}", path.display()))
        }
        None => FallbackTable::builtin().context("Failed to load built-in fallback table"),
    }
}

fn write_output(args: &Args, value: &serde_json::Value) -> anyhow::Result<()> {
    let rendered = if args.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

async fn resolve(args: &Args, path: &str) -> anyhow::Result<ExitCode> {
    let route = RouteKind::classify(path);
    if route == RouteKind::Unknown {
        echo::print_error(&format!("No route matches {}", path));
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    }

    if args.verbose {
        echo::print_step(1, 3, "Loading configuration");
    }
    let config = cms_config(args)?;
    let fallback = fallback_table(args.fallback.as_deref())?;
    if args.verbose {
        eprintln!("  {} {}", "CMS:".dimmed(), config.base_url.as_str().bright_white());
        eprintln!("  {} {:?}\n", "Route:".dimmed(), route);
        echo::print_step(2, 3, &format!("Resolving {}", route.path().bright_white().underline()));
    }

    let client = CmsClient::new(config).context("Failed to build CMS client")?;
    let resolver = Resolver::new(client, fallback);
    let started = Instant::now();
    let resolution = resolver.resolve_bundle(path).await;
    if args.verbose {
        echo::print_timing("Resolve", started.elapsed());
    }

    match resolution {
        Resolution::Found { view, .. } => {
            if args.verbose {
                echo::print_bundle_details(&view);
                echo::print_step(3, 3, "Writing output");
            }
            write_output(args, &serde_json::to_value(&view)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Resolution::NotFound => {
            echo::print_error(&format!("Not found: {}", path));
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Resolution::Unavailable => {
            echo::print_warning(&format!("Content unavailable: {} (CMS unreachable, no fallback)", path));
            Ok(ExitCode::from(EXIT_UNAVAILABLE))
        }
    }
}

async fn seo(args: &Args, path: &str) -> anyhow::Result<ExitCode> {
    let client = CmsClient::new(cms_config(args)?).context("Failed to build CMS client")?;
    if args.verbose {
        echo::print_step(1, 2, &format!("Fetching SEO head for {}", path.bright_white().underline()));
    }

    let Some(head) = client.fetch_seo_head(path).await else {
        echo::print_warning(&format!("No SEO head available for {}", path));
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    };

    if args.verbose {
        echo::print_head_details(&head);
        echo::print_step(2, 2, "Writing output");
    }
    write_output(args, &serde_json::to_value(&head)?)?;
    Ok(ExitCode::SUCCESS)
}

fn head(args: &Args, input: &str) -> anyhow::Result<ExitCode> {
    if args.verbose {
        echo::print_step(1, 2, &format!("Parsing {}", if input == "-" { "stdin" } else { input }));
    }
    let markup = read_input(input)?;
    let head = SeoHead::parse(&markup);

    if args.verbose {
        echo::print_head_details(&head);
        echo::print_step(2, 2, "Writing output");
    }
    write_output(args, &serde_json::to_value(&head)?)?;
    Ok(ExitCode::SUCCESS)
}

fn routes() -> ExitCode {
    for route in [
        RouteKind::Home,
        RouteKind::About,
        RouteKind::Contact,
        RouteKind::Privacy,
        RouteKind::ServicesIndex,
    ] {
        println!("{}", route.path());
    }
    for slot in SERVICE_SLOTS.slots() {
        println!("{}", RouteKind::Service(slot.slug.to_string()).path());
    }
    println!("{}", RouteKind::ApplicationsIndex.path());
    for slot in APPLICATION_SLOTS.slots() {
        println!("{}", RouteKind::Application(slot.slug.to_string()).path());
    }
    println!("{}", RouteKind::Blog(None).path());
    println!("/blog/category/{{slug}}");
    println!("/blog/{{slug}}");
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match &args.command {
        Command::Resolve { path } => resolve(&args, path).await,
        Command::Seo { path } => seo(&args, path).await,
        Command::Head { input } => head(&args, input),
        Command::Routes => Ok(routes()),
    }
}
