use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "taglens-web")]
#[command(
    author,
    version,
    about = "Demo web front end for research-abstract subject classification"
)]
pub struct Cli {
    /// Listen port
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Base URL of the hosted classifier space
    #[arg(
        long,
        default_value = "https://yeager07-multi-label-cs-article-classification.hf.space"
    )]
    pub space_url: String,

    /// Prediction API name on the space
    #[arg(long, default_value = "/classify_subjects")]
    pub api_name: String,

    /// Number of concurrent upstream call slots
    #[arg(long, default_value = "3")]
    pub worker_slots: usize,

    /// Caller wait budget in seconds
    #[arg(long, default_value = "10")]
    pub wait_budget_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
