//! mockfill harness commands
//!
//! Runs the plugin outside a design tool: documents come from JSON files and
//! the in-memory host stands in for the application.

use anyhow::{Context, Result};
use mockfill_catalog::Catalog;
use mockfill_core::{
    Document, FillReport, Handled, Plugin, PluginConfig, PluginMessage, RecordingHost, RequestId,
    UiMessage,
};
use mockfill_picker::IndexPicker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

/// Options for the `fill` command
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    /// Document JSON
    pub document: PathBuf,
    /// Merchant to fill with
    pub merchant: String,
    /// TOML config file
    pub config: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Selection override
    pub select: Vec<String>,
    /// Descend into frames
    pub traverse_frames: bool,
    /// Image bytes to answer every download request with
    pub image: Option<PathBuf>,
}

/// Result of the `fill` command
#[derive(Debug, Clone, Serialize)]
pub struct FillOutput {
    /// Fill summary
    pub report: FillReport,
    /// Messages posted to the UI
    pub messages: Vec<PluginMessage>,
    /// Rectangles painted from `--image`
    pub images_applied: usize,
    /// Filled document
    pub document: Document,
}

/// Render the built-in catalog
///
/// # Errors
/// Fails only if JSON encoding fails
pub fn list_merchants(json: bool) -> Result<String> {
    let catalog = Catalog::builtin();
    if json {
        let merchants: Vec<_> = catalog.merchants().collect();
        return serde_json::to_string_pretty(&merchants).context("encode merchants");
    }

    let mut out = String::new();
    for merchant in catalog.merchants() {
        out.push_str(&format!(
            "{:<10} {:<20} {:<10} {}\n",
            merchant.merchant_id, merchant.name, merchant.cuisine, merchant.address
        ));
    }
    Ok(out)
}

/// Load a document, fill it and optionally answer image requests
///
/// # Errors
/// Fails on unreadable inputs, an unknown merchant, or a rejected image
pub async fn run_fill(options: &FillOptions) -> Result<FillOutput> {
    let mut config = match &options.config {
        Some(path) => PluginConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PluginConfig::new(),
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if options.traverse_frames {
        config = config.with_traverse_frames(true);
    }

    let raw = std::fs::read_to_string(&options.document)
        .with_context(|| format!("read document {}", options.document.display()))?;
    let mut document: Document = serde_json::from_str(&raw)
        .with_context(|| format!("parse document {}", options.document.display()))?;
    if !options.select.is_empty() {
        document = document.with_selection(options.select.iter().map(String::as_str));
    }
    tracing::info!(
        "Loaded {} with {} selected nodes",
        options.document.display(),
        document.selection.len()
    );

    let mut plugin = Plugin::new(RecordingHost::new(), document, config);
    let handled = plugin
        .handle(UiMessage::PopulateMerchantNode {
            merchant_id: options.merchant.as_str().into(),
        })
        .await
        .context("populate selection")?;
    let report = match handled {
        Handled::Populated(report) => report,
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    };

    let messages = plugin.host().take_messages();
    let mut images_applied = 0;
    if let Some(path) = &options.image {
        let data = std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
        for request in download_requests(&messages) {
            plugin
                .handle(UiMessage::OnImageDataResponse {
                    node_id: request,
                    data: data.clone(),
                })
                .await
                .with_context(|| format!("apply image for request {request}"))?;
            images_applied += 1;
        }
    }

    Ok(FillOutput {
        report,
        messages,
        images_applied,
        document: plugin.into_document(),
    })
}

fn download_requests(messages: &[PluginMessage]) -> Vec<RequestId> {
    messages
        .iter()
        .filter_map(|message| match message {
            PluginMessage::DownloadImage { node_id, .. } => Some(*node_id),
            PluginMessage::MerchantsResponse { .. } => None,
        })
        .collect()
}

/// Draw `draws` indices from a picker over `size` candidates
#[must_use]
pub fn run_pick(size: usize, draws: usize, window: Option<usize>, seed: Option<u64>) -> Vec<usize> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut picker = match window {
        Some(window) => IndexPicker::with_window(size, window),
        None => IndexPicker::new(size),
    };
    (0..draws).map(|_| picker.next(&mut rng)).collect()
}
