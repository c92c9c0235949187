use frost_enrich::{Frost, FrostEnrichError, FrostSettings};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), FrostEnrichError> {
    let client_id = env::var("FROST_CLIENT_ID").unwrap_or_default();
    let client = Frost::new(FrostSettings::new(client_id)).await;

    let report = client
        .enrich_dataset()
        .input(Path::new("reduced_dataset.csv"))
        .output(Path::new("reduced_dataset_full.csv"))
        .call()
        .await?;

    println!(
        "Enriched {} of {} records ({} without station, {} without data, {} unreadable)",
        report.enriched,
        report.records,
        report.skipped_no_station,
        report.skipped_no_data,
        report.skipped_missing_fields
    );
    Ok(())
}
