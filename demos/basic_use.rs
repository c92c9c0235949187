use frost_enrich::{Frost, FrostEnrichError, FrostSettings, LatLon};
use std::env;

#[tokio::main]
async fn main() -> Result<(), FrostEnrichError> {
    let client_id = env::var("FROST_CLIENT_ID").unwrap_or_default();
    let client = Frost::new(FrostSettings::new(client_id)).await;

    println!("Station directory holds {} stations", client.directory().len());

    // Downtown Oslo.
    let candidates = client
        .find_stations()
        .location(LatLon(59.9139, 10.7522))
        .call()
        .await;

    let Some(nearest) = candidates.first() else {
        println!("No station within range");
        return Ok(());
    };
    println!("Nearest station: {} ({} candidates)", nearest.id, candidates.len());

    let summary = client
        .weather_summary()
        .station(&nearest.id)
        .date("15.06.2022")
        .call()
        .await?;
    println!("{summary}");

    Ok(())
}
