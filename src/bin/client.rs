// src/bin/client.rs

use clap::Parser;

use triage::repl::Repl;

#[derive(Parser)]
#[command(name = "triage-client")]
#[command(about = "Interactive terminal client for the triage API")]
struct Args {
    /// Base URL of the triage API
    #[arg(long, env = "TRIAGE_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut repl = Repl::new(args.api_url)?;
    repl.run().await
}
