//! Limit listing.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

fn describe(limit: u32) -> String {
    if limit == 0 {
        "banned".to_string()
    } else {
        limit.to_string()
    }
}

/// List configured limits.
pub fn list(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let registry = config.registry()?;
    let limits = registry.limits();

    if output::is_json() {
        output::json_output(json!({
            "command": "limits",
            "limits": limits
                .iter()
                .map(|(good, limit)| json!({
                    "item": good.as_str(),
                    "name": good.display_name(),
                    "limit": limit,
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Item limits");

    if limits.is_empty() {
        output::note("(none configured; every item is unlimited)");
        return Ok(());
    }

    let rows: Vec<LimitRow> = limits
        .iter()
        .map(|(good, limit)| LimitRow {
            item: good.to_string(),
            name: good.display_name(),
            limit: describe(*limit),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::note("Items not listed are unlimited.");
    Ok(())
}
