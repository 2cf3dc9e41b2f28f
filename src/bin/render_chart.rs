use clap::Parser;
use morsel_etl::chart::{Region, SalesChart, SalesDataset};
use morsel_etl::utils::logger;

#[derive(Parser)]
#[command(name = "render-chart")]
#[command(about = "Build the sales line-chart description for a region")]
struct Args {
    /// Consolidated sales file produced by the ETL run
    #[arg(long, default_value = "cleaned_sales.csv")]
    data: String,

    /// Region to plot: all, north, east, south or west (case-insensitive)
    #[arg(long, default_value = "all")]
    region: String,

    /// Where to write the figure JSON; prints to stdout when omitted
    #[arg(long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let dataset = SalesDataset::load(&args.data);
    if dataset.is_empty() {
        tracing::warn!(
            "Loaded an empty dataset from '{}'; the figure will be a placeholder",
            args.data
        );
    }

    let chart = SalesChart::new(dataset);
    let figure = chart.figure(Region::from_input(&args.region));
    let json = serde_json::to_string_pretty(&figure)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("📁 Figure written to: {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
