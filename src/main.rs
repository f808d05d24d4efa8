// seomatic-head: print the head descriptor for one rendered route

use anyhow::Result;
use clap::Parser;
use seomatic_head::{SeoHeadClient, load_yaml_config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "seomatic-head",
    disable_help_subcommand = true,
    about = "Print the SEOmatic head descriptor for a rendered route",
    long_about = "Resolve the route through the configured remap table, query SEOmatic over GraphQL and print the normalized head descriptor as JSON.",
    after_help = "Logging follows RUST_LOG (default: info) and is written to stderr."
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "seomatic.yaml",
        help = "YAML config file; defaults are used when it does not exist"
    )]
    config: PathBuf,
    #[arg(
        short,
        long = "site",
        value_name = "ID",
        help = "Site id to query instead of the configured one"
    )]
    site_id: Option<i64>,
    #[arg(
        long,
        help = "Add __dangerouslyDisableSanitizers for Nuxt's head manager"
    )]
    nuxt: bool,
    #[arg(value_name = "PATH", help = "Rendered route path, e.g. /about")]
    path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_yaml_config(&cli.config)?;
    let client = SeoHeadClient::from_config(config)?;

    let head = client.get_head_descriptor(&cli.path, cli.site_id).await?;

    let json = if cli.nuxt {
        serde_json::to_string_pretty(&head.into_nuxt_head())?
    } else {
        serde_json::to_string_pretty(&head)?
    };
    println!("{json}");

    Ok(())
}
