use owo_colors::OwoColorize;
use vitrine_core::{Origin, PageBundle, SeoHead};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Vitrine".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Resolve site routes against the headless CMS\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);
    if ms < 250.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 1000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print a summary of a resolved page
pub fn print_bundle_details(bundle: &PageBundle) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Resolution".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Route:".dimmed(), bundle.route.bright_white());
    match bundle.origin {
        Origin::Cms => eprintln!("  {} {}", "Origin:".dimmed(), "cms".bright_green()),
        Origin::Fallback => eprintln!("  {} {}", "Origin:".dimmed(), "fallback".bright_yellow()),
    }
    if let Some(title) = &bundle.seo.title {
        eprintln!("  {} {}", "SEO title:".dimmed(), title.bright_white());
    }
    eprintln!("  {} {}\n", "JSON-LD blocks:".dimmed(), bundle.json_ld.len().to_string().bright_white());
}

/// Print a summary of a parsed SEO head
pub fn print_head_details(head: &SeoHead) {
    let meta = &head.metadata;
    eprintln!(
        "  {} {}",
        "Title:".dimmed(),
        meta.title.as_deref().unwrap_or("(none)").bright_white()
    );
    eprintln!(
        "  {} {}",
        "Canonical:".dimmed(),
        meta.alternates.canonical.as_deref().unwrap_or("(none)").bright_white()
    );
    eprintln!(
        "  {} {} og, {} twitter, {} other",
        "Meta:".dimmed(),
        meta.open_graph.len(),
        meta.twitter.len(),
        meta.other.len()
    );
    eprintln!("  {} {}\n", "JSON-LD blocks:".dimmed(), head.json_ld.len().to_string().bright_white());
}
