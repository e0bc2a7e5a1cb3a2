// src/bin/suggest.rs
// DOCUMENTATION: Interactive front-end for the suggestion controller
// PURPOSE: Type a query per line, get predictions; prefix with "geocode " to
// resolve an address to coordinates

use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use suggest_places::{
    geocode, lat_lng_of, Config, ControllerOptions, GeocoderRequest, GooglePlacesClient,
    MemoryStore, SuggestionController,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    log::info!("Starting suggest-places interactive client...");
    log::info!(
        "Cache slot: {} (TTL: {}s), debounce: {}ms",
        config.cache_key,
        config.cache_expiration_secs,
        config.debounce_ms
    );

    let client = Arc::new(GooglePlacesClient::new(config.google_places_api_key.clone()));
    let controller = SuggestionController::new(
        Arc::clone(&client) as Arc<dyn suggest_places::SuggestionProvider>,
        Arc::new(MemoryStore::new()),
        ControllerOptions::from_config(&config),
    );

    let debounce_slack = std::time::Duration::from_millis(config.debounce_ms + 700);

    println!("Type a query and press enter (or `geocode <address>`). Ctrl-D quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if let Some(address) = line.strip_prefix("geocode ") {
            let request = GeocoderRequest {
                address: Some(address.trim().to_string()),
                ..Default::default()
            };
            match geocode(&client, &request).await {
                Ok(results) => {
                    for result in &results {
                        let coords = lat_lng_of(result);
                        println!(
                            "  {} -> ({}, {})",
                            result.formatted_address.as_deref().unwrap_or("<no address>"),
                            coords.lat,
                            coords.lng
                        );
                    }
                }
                Err(e) => eprintln!("  geocoding failed: {}", e),
            }
            continue;
        }

        controller.on_value_change(&line);
        // Give the debounce window and the fetch time to settle
        tokio::time::sleep(debounce_slack).await;

        let predictions = controller.predictions();
        if predictions.is_empty() {
            println!("  (no predictions)");
        }
        for prediction in &predictions {
            let main = prediction
                .main_text
                .as_ref()
                .or(prediction.text.as_ref())
                .map(|t| t.text.as_str())
                .unwrap_or(&prediction.place_id);
            let secondary = prediction
                .secondary_text
                .as_ref()
                .map(|t| t.text.as_str())
                .unwrap_or("");
            println!("  {} {} [{}]", main, secondary, prediction.place_id);
        }
    }

    Ok(())
}
