use frost_enrich::{Frost, FrostEnrichError, FrostSettings, StationDirectory};
use std::env;

#[tokio::main]
async fn main() -> Result<(), FrostEnrichError> {
    let client_id = env::var("FROST_CLIENT_ID").unwrap_or_default();

    // The directory is not needed when the station id is already known.
    let client = Frost::with_directory(FrostSettings::new(client_id), StationDirectory::empty());

    // Blindern, Oslo.
    let summary = client
        .weather_summary()
        .station("SN18700")
        .date("15.06.2022")
        .call()
        .await?;

    println!("{summary}");
    Ok(())
}
