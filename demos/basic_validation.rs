//! Basic license validation example.
//!
//! Demonstrates the validate / ensure_valid workflows and how offline
//! degradation shows up in results.
//!
//! # Running
//!
//! ```bash
//! export LICENSE_KEY="your-license-key"
//! cargo run --example basic_validation
//! ```

use gracekeeper::{GracekeeperConfig, GracekeeperError, LicenseAgent};
use std::time::Duration;

// Your license authority. The product name identifies what this agent
// protects; one agent instance validates exactly one product/key pair.
const SERVER_URL: &str = "https://license.example.com";
const PRODUCT: &str = "example-app";

fn main() {
    // The secret key CAN come from environment/config.
    let license_key = std::env::var("LICENSE_KEY").expect("Set LICENSE_KEY environment variable");

    let mut config = GracekeeperConfig::new(SERVER_URL, license_key, PRODUCT);
    config.cache_ttl = Duration::from_secs(60 * 60); // re-check hourly
    config.grace_period = Duration::from_secs(24 * 60 * 60); // tolerate a day offline

    // Construction fails before any network activity if a required field is
    // missing.
    let agent = match LicenseAgent::new(config) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // `validate` never fails on network conditions; inspect the flags.
    let result = agent.validate(None);
    if result.is_valid {
        println!("✓ License valid!");
        if result.is_grace_period {
            println!("  (running on grace period; authority unreachable)");
        }
        if let Some(expires) = result.expires_at {
            println!("  Expires: {}", expires);
        }
        if let Some(allowed) = &result.allowed_data {
            println!("  Entitlements: {}", allowed);
        }
    } else {
        println!("✗ License invalid ({})", result.reason.as_deref().unwrap_or("unknown"));
    }

    // `ensure_valid` raises instead: silent on valid or grace-covered
    // verdicts, an error otherwise.
    match agent.ensure_valid(None) {
        Ok(()) => println!("✓ Strict check passed"),
        Err(GracekeeperError::Network(msg)) => {
            eprintln!("Authority unreachable and no grace coverage: {}", msg);
            std::process::exit(1);
        }
        Err(GracekeeperError::Validation { reason, status, .. }) => {
            eprintln!(
                "License rejected (reason: {}, status: {})",
                reason.as_deref().unwrap_or("-"),
                status.as_deref().unwrap_or("-")
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
