use clap::Parser;
use morsel_etl::core::pipeline::scan_products;
use morsel_etl::utils::logger;
use morsel_etl::LocalStorage;

#[derive(Parser)]
#[command(name = "list-products")]
#[command(about = "List the distinct product names found in the input files")]
struct Args {
    /// Directory scanned (non-recursively) for .csv input files
    #[arg(long, default_value = "data")]
    input_dir: String,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let storage = LocalStorage::new(".".to_string());

    match scan_products(&storage, &args.input_dir).await {
        Ok(products) => {
            println!("Products found in data files:");
            for product in products {
                println!("{}", product);
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
