mod output;

use clap::{Parser, Subcommand};
use sitebrief_agent::Analyst;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sitebrief")]
#[command(about = "Company website profiler with AI question answering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a company website and print its profile
    Analyze {
        /// Company homepage; `https://` is assumed when no scheme is given
        url: String,
        /// Print the full profile as JSON
        #[arg(long, conflicts_with = "export")]
        json: bool,
        /// Print the flat export row as JSON
        #[arg(long)]
        export: bool,
        /// Skip the AI summary
        #[arg(long)]
        no_summary: bool,
    },
    /// Scrape a company website, then answer a question about it
    Ask {
        url: String,
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sitebrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");
    let analyst = Analyst::from_config(&config)?;

    match cli.command {
        Commands::Analyze {
            url,
            json,
            export,
            no_summary,
        } => {
            let profile = if no_summary {
                analyst.scrape(&url).await?
            } else {
                analyst.analyze(&url).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else if export {
                println!("{}", output::render_export(&profile)?);
            } else {
                print!("{}", output::render_profile(&profile));
            }
        }
        Commands::Ask {
            url,
            question,
            json,
        } => {
            let question = question.join(" ");
            let profile = analyst.scrape(&url).await?;
            let result = analyst.ask(&question, &profile).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", output::render_answer(&profile, &result));
            }
        }
    }

    Ok(())
}
