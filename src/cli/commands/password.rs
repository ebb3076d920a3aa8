use anyhow::Context;
use serde_json::json;

use crate::auth::password::{hash_password, hash_password_with_cost};
use crate::cli::OutputFormat;

pub fn handle(password: &str, cost: Option<u32>, output_format: OutputFormat) -> anyhow::Result<()> {
    let hash = match cost {
        Some(cost) => hash_password_with_cost(password, cost),
        None => hash_password(password),
    }
    .context("failed to hash password")?;

    match output_format {
        OutputFormat::Text => println!("{}", hash),
        OutputFormat::Json => println!("{}", json!({ "hash": hash })),
    }
    Ok(())
}
