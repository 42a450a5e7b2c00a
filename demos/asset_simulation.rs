//! Simulated boiler sensor.
//!
//! Registers with the platform described by an `asset.config.json`, reports
//! its firmware version once and then a temperature reading every few seconds.
//!
//! ```text
//! cargo run --example asset_simulation --features std -- demos/asset.config.json
//! ```

use liveintersect::asset::{Asset, Error, post_attribute, post_metric};
use liveintersect::config::AssetConfig;
use liveintersect::network::tcp::TcpNetwork;
use std::env;
use std::thread;
use std::time::Duration;

const DEFAULT_CONFIG: &str = "demos/asset.config.json";
const READINGS: usize = 5;
const INTERVAL: Duration = Duration::from_secs(5);

fn main() -> Result<(), Error> {
    let path = env::args().nth(1).unwrap_or(DEFAULT_CONFIG.to_string());
    let config = AssetConfig::from_file(&path)?;
    println!("Loaded {} ({})", config.asset_name, config.sr_no);

    let mut asset = Asset::new(TcpNetwork::new(), config)?;
    asset.register_asset()?;
    println!("Registered as asset {}", asset.asset_id());

    post_attribute(&mut asset, "firmware", env!("CARGO_PKG_VERSION"))?;

    // A slow sawtooth between 40 and 50 degrees.
    for i in 0..READINGS {
        let reading = format!("{:.1}C", 40.0 + (i % 10) as f32 * 2.5);
        match post_metric(&mut asset, "temp", &reading) {
            Ok(()) => println!("temp = {}", reading),
            Err(e @ Error::Server(_)) | Err(e @ Error::Network(_)) => {
                println!("temp = {} not delivered: {}", reading, e);
            }
            Err(e) => return Err(e),
        }
        thread::sleep(INTERVAL);
    }

    let info = liveintersect::asset::get_asset_info(&mut asset)?;
    for attribute in &info.attributes {
        println!("{} = {}", attribute.attribute_code, attribute.attribute_value);
    }
    Ok(())
}
