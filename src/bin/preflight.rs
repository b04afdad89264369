use inventory_api::{
    storage, AppConfig, InventoryService, LookupClient, ProductLookup, DEFAULT_CATEGORY,
};
use std::sync::Arc;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--barcode <code>]\n\
         \n\
         Reads the same env vars as api_server:\n\
           STORE_BACKEND, DATABASE_URL, LOOKUP_BASE_URL, LOOKUP_TIMEOUT_SECS\n\
         With --barcode, performs one external lookup for <code>.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let barcode = match args.iter().position(|a| a == "--barcode") {
        Some(i) => match args.get(i + 1) {
            Some(code) => Some(code.clone()),
            None => usage_and_exit(),
        },
        None => None,
    };

    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    println!("  STORE_BACKEND={}", config.store_backend);
    println!("  LOOKUP_BASE_URL={}", config.lookup_base_url);

    let store = storage::connect(&config).await?;
    let lookup = LookupClient::new(&config.lookup_base_url, config.lookup_timeout)?;
    let service = InventoryService::new(store, Arc::new(lookup.clone()));

    service.ping().await?;
    println!("  Store is reachable.");

    let summary = service.summary().await?;
    println!("  Categories: {}", summary.categories);
    println!("  Products: {}", summary.products);
    if summary.has_default_category {
        println!("  Default category '{}' exists.", DEFAULT_CATEGORY);
    } else {
        eprintln!(
            "  Warning: default category '{}' is missing; api_server creates it on start.",
            DEFAULT_CATEGORY
        );
    }

    if let Some(code) = barcode {
        println!("  Looking up barcode {} at {}", code, lookup.product_url(&code));
        match lookup.lookup(&code).await {
            Ok(product) => println!("  Found: {}", serde_json::to_string(&product)?),
            Err(e) if e.is_not_found() => println!("  Lookup service has no record for {}.", code),
            Err(e) => return Err(anyhow::anyhow!("External lookup failed: {}", e)),
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
