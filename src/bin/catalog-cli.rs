use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Command-line client for the Product Catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service liveness probe
    Health,
    /// List all products
    List,
    /// Show one product
    Get { id: i64 },
    /// Create a product
    Create { name: String },
    /// Rename a product
    Update { id: i64, name: String },
    /// Delete a product
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/healthz", base)).send().await?,
        Commands::List => client.get(format!("{}/products", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/products/{}", base, id)).send().await?,
        Commands::Create { name } => {
            client
                .post(format!("{}/products", base))
                .json(&json!({ "name": name }))
                .send()
                .await?
        }
        Commands::Update { id, name } => {
            client
                .put(format!("{}/products/{}", base, id))
                .json(&json!({ "name": name }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/products/{}", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text.trim_end());
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text.trim_end()),
    }
    Ok(())
}
