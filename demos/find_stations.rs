use frost_enrich::{Frost, FrostSettings, LatLon};
use std::env;

#[tokio::main]
async fn main() {
    let client_id = env::var("FROST_CLIENT_ID").unwrap_or_default();
    let client = Frost::new(FrostSettings::new(client_id)).await;

    for (name, location) in [
        ("Oslo", LatLon(59.9139, 10.7522)),
        ("Bergen", LatLon(60.3913, 5.3221)),
        ("Tromsø", LatLon(69.6492, 18.9553)),
    ] {
        let candidates = client
            .find_stations()
            .location(location)
            .max_distance_km(50.0)
            .call()
            .await;
        println!("{name}: {} stations within 50 km", candidates.len());
        for station in candidates.iter().take(3) {
            println!("  {} at ({}, {})", station.id, station.latitude, station.longitude);
        }
    }
}
