mod config;
mod crawl;
mod structs;

use std::error::Error;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = config::load()?;
    let crawler = crawl::Crawler::new(&config)?;
    let report = crawler.run().await?;

    // the file lands only after the whole catalog validated
    crawl::write_report(Path::new("all.json"), &report)?;
    println!(
        "complete: {} incomplete: {} broken lessons: {}",
        report.complete,
        report.incomplete,
        report.broken.len()
    );
    Ok(())
}
