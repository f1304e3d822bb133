//! # Seed Data Loader
//!
//! Loads the demo product set into PostgreSQL.
//!
//! ## Usage
//! ```bash
//! # Seed the default local database (localhost:6432/productapp)
//! cargo run -p product-db --bin seed
//!
//! # Point at another server and wipe the table first
//! cargo run -p product-db --bin seed -- --host db.internal --port 5432 --reset
//! ```
//!
//! ## Data Set
//! ```text
//! name    price   discount  store
//! air     3000    22        ABC TECH
//! iron    1500    10        ABC TECH
//! fax     10000   15        ABC TECH
//! phone   2000    0         x brand
//! ```

use std::env;

use anyhow::Context;
use product_core::{validation::validate_create_product, CreateProduct};
use product_db::{migrations, Database, DbConfig, ProductRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// The demo products: (name, price, discount, store).
const PRODUCTS: &[(&str, f32, f32, &str)] = &[
    ("air", 3000.0, 22.0, "ABC TECH"),
    ("iron", 1500.0, 10.0, "ABC TECH"),
    ("fax", 10000.0, 15.0, "ABC TECH"),
    ("phone", 2000.0, 0.0, "x brand"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = DbConfig::new("localhost", "productapp")
        .port(6432)
        .credentials("postgres", "postgres")
        .max_connections(2);
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match (args[i].as_str(), value) {
            ("--host", Some(v)) => {
                config.host = v;
                i += 1;
            }
            ("--port", Some(v)) => {
                config.port = v.parse().with_context(|| format!("invalid port '{}'", v))?;
                i += 1;
            }
            ("--db", Some(v)) => {
                config.database = v;
                i += 1;
            }
            ("--user", Some(v)) => {
                config.user = v;
                i += 1;
            }
            ("--password", Some(v)) => {
                config.password = v;
                i += 1;
            }
            ("--reset", _) => reset = true,
            ("--help" | "-h", _) => {
                println!("Product App Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --host <HOST>          Database host (default: localhost)");
                println!("  --port <PORT>          Database port (default: 6432)");
                println!("  --db <NAME>            Database name (default: productapp)");
                println!("  --user <USER>          Database user (default: postgres)");
                println!("  --password <PASSWORD>  Database password (default: postgres)");
                println!("  --reset                Truncate products before seeding");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            (other, _) => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = Database::new(config)
        .await
        .context("connecting to database")?;
    let (total, applied) = migrations::migration_status(db.pool()).await?;
    info!(total, applied, "Migrations applied");

    let repo = db.products();

    if reset {
        repo.truncate().await?;
    }

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Products table is not empty, skipping seed (use --reset to reload)"
        );
        db.close().await;
        return Ok(());
    }

    for (name, price, discount, store) in PRODUCTS {
        let request = CreateProduct {
            name: name.to_string(),
            price: *price,
            discount: *discount,
            store: store.to_string(),
        };
        validate_create_product(&request)?;
        repo.add(&request.into_product()).await?;
    }

    let count = repo.count().await?;
    let abc_tech = repo.get_all_by_store("ABC TECH").await?.len();
    info!(count, abc_tech, "Seed complete");

    db.close().await;
    Ok(())
}
