// Optimly Core Entry Point
// AI search visibility analysis for a brand profile

mod analysis;
mod clients;
mod config;
mod error;
mod export;
mod models;
mod runner;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use config::{ApiCredentials, ProxyConfig};
use models::{BrandProfile, SearchContext};
use runner::AnalysisRunner;

struct CliArgs {
    profile_path: PathBuf,
    context: SearchContext,
    seed: Option<u64>,
    csv_path: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut profile_path = None;
    let mut context = SearchContext::default();
    let mut seed = None;
    let mut csv_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--context" => {
                let value = args.next().context("--context requires a value")?;
                context = match value.as_str() {
                    "ai" => SearchContext::AiChat,
                    "voice" => SearchContext::Voice,
                    "traditional" => SearchContext::Traditional,
                    other => bail!("Unknown context '{other}' (expected ai|voice|traditional)"),
                };
            }
            "--seed" => {
                let value = args.next().context("--seed requires a value")?;
                seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--csv" => {
                let value = args.next().context("--csv requires a path")?;
                csv_path = Some(PathBuf::from(value));
            }
            other if profile_path.is_none() => profile_path = Some(PathBuf::from(other)),
            other => bail!("Unexpected argument '{other}'"),
        }
    }

    Ok(CliArgs {
        profile_path: profile_path
            .context("Usage: optimly-core <brand-profile.json> [--context ai|voice|traditional] [--seed N] [--csv PATH]")?,
        context,
        seed,
        csv_path,
    })
}

fn load_profile(path: &PathBuf) -> Result<BrandProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read brand profile {}", path.display()))?;
    let profile: BrandProfile =
        serde_json::from_str(&raw).context("Brand profile is not valid JSON")?;
    profile.validate().context("Brand profile failed validation")?;
    Ok(profile)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let profile = load_profile(&args.profile_path)?;

    let credentials = ApiCredentials::from_env();
    if !credentials.has_completion_key() {
        info!("No completion API key configured; responses will use generated mock data");
    }
    let proxy = ProxyConfig::from_env()?;

    let mut runner = AnalysisRunner::new(&profile, &credentials, proxy, args.seed);
    let report = runner.run(&profile, args.context).await?;

    info!(
        brand = %report.brand,
        keywords = report.summary.total_keywords,
        overall_score = report.summary.overall_score,
        mention_rate = format!("{:.0}%", report.summary.mention_rate),
        risk = report.summary.risk_level.label(),
        "Visibility report ready"
    );
    for competitor in &report.summary.competitor_totals {
        info!(
            name = %competitor.name,
            mentions = competitor.mentions,
            outranked_in = competitor.outranked_in,
            "Competitor presence"
        );
    }

    if let Some(csv_path) = &args.csv_path {
        export::export_to_path(csv_path, &report.results)?;
        info!(path = %csv_path.display(), "CSV report written");
    }

    Ok(())
}
