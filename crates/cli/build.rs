use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let path_arg = || clap::arg!(<PATH> "Site path, e.g. /services/app-development");

    let mut cmd = clap::Command::new("vitrine")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Vitrine Contributors")
        .about("Resolve site routes against the headless CMS")
        .subcommand_required(true)
        .arg(clap::arg!(--cms_url <URL> "WordPress base URL").value_name("URL").global(true))
        .arg(clap::arg!(--site_url <URL> "Public site URL used for SEO head lookups").value_name("URL").global(true))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10").global(true))
        .arg(
            clap::arg!(--fallback <FILE> "JSON file replacing the built-in fallback table")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(clap::arg!(--compact "Emit single-line JSON").global(true))
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(clap::Command::new("resolve").about("Resolve a site path to its view model and SEO head").arg(path_arg()))
        .subcommand(clap::Command::new("seo").about("Fetch and parse the SEO head the CMS serves for a site path").arg(path_arg()))
        .subcommand(
            clap::Command::new("head")
                .about("Parse a head fragment from a local file, or \"-\" for stdin")
                .arg(clap::arg!(<INPUT> "Head file or '-' for stdin")),
        )
        .subcommand(clap::Command::new("routes").about("List the routes the resolver knows about"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "vitrine", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "vitrine", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "vitrine", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "vitrine", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
