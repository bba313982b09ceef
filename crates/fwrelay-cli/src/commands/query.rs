//! Query command - run the lookup chain once and print the result

use std::sync::Arc;

use anyhow::{bail, Result};
use fwrelay_chat::{render, ChatFrontend};
use fwrelay_core::{DeviceLookup, LookupQuery, LookupResult};

use crate::output::{FieldRow, OutputContext, OutputFormat};

/// Look up a device by SN and/or MTM
pub async fn query(
    lookup: Arc<dyn DeviceLookup>,
    query: LookupQuery,
    ctx: &OutputContext,
) -> Result<()> {
    let query = query.normalized();
    if !query.has_key() {
        bail!("Either --sn or --mtm is required");
    }

    tracing::debug!(?query, "Running lookup");
    let result = lookup.resolve(&query).await;

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&result),
        OutputFormat::Chat => ctx.print_messages(&chat_messages(&query, &result)),
        OutputFormat::Table => {
            if result.success {
                print_tables(&query, &result, ctx);
            }
        }
    }

    if !result.success {
        bail!(
            "Lookup failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

/// The messages a chat user would receive for this lookup
fn chat_messages(query: &LookupQuery, result: &LookupResult) -> Vec<String> {
    let mut messages = vec![render::progress(query)];
    messages.extend(ChatFrontend::replies(query, result));
    messages
}

fn print_tables(query: &LookupQuery, result: &LookupResult, ctx: &OutputContext) {
    if let Some(info) = &result.machine_info {
        ctx.print_section(
            "Device",
            &[
                FieldRow::new("SN", query.sn.as_deref()),
                FieldRow::new("MTM", info.model_code()),
                FieldRow::new("Machine name", info.machine_name.as_deref()),
                FieldRow::new("Product model", info.product_model()),
                FieldRow::new("Product date", info.product_date.as_deref()),
                FieldRow::new("Scan date", info.scan_date.as_deref()),
                FieldRow::new("Sale area", info.sale_area.as_deref()),
                FieldRow::new("Series", info.product_series.as_deref()),
                FieldRow::new("Big class", info.product_big_class.as_deref()),
                FieldRow::new("Small class", info.product_small_class.as_deref()),
            ],
        );
    }

    if let Some(package) = &result.full_package {
        ctx.print_section(
            "Full flash package",
            &[
                FieldRow::new("MTM", result.mtm()),
                FieldRow::new("Product name", package.product_name.as_deref()),
                FieldRow::new("Latest version", package.latest_version.as_deref()),
                FieldRow::new("Platform", package.platform.as_deref()),
                FieldRow::new("Download URL", package.download_url.as_deref()),
                FieldRow::new(
                    "Flashing method",
                    package.flashing_machine_method.as_deref(),
                ),
            ],
        );
    }

    if let Some(current) = query.current_firmware_version.as_deref() {
        match &result.ota_package {
            Some(ota) => ctx.print_section(
                "OTA update",
                &[
                    FieldRow::new("Current version", Some(current)),
                    FieldRow::new("Target version", Some(ota.version.as_str())),
                    FieldRow::new("Download URL", Some(ota.url.as_str())),
                ],
            ),
            None => ctx.warn(&format!("No incremental update from version {}", current)),
        }
    } else {
        ctx.success("Lookup complete");
    }
}
