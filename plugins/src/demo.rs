//! Bundled demo models offered by the file-based providers.

use tmstore_core::api::{ThreatModel, ThreatModelSummary};

const DEMO_MODELS: &[(&str, &str)] = &[
    (
        "demo_threat_model.json",
        include_str!("../demo/demo_threat_model.json"),
    ),
    ("generic_cia.json", include_str!("../demo/generic_cia.json")),
];

/// Bundled demo documents, parsed fresh on every call.
pub fn models() -> anyhow::Result<Vec<ThreatModel>> {
    DEMO_MODELS
        .iter()
        .map(|(file, raw)| {
            ThreatModel::from_json(raw)
                .map_err(|e| anyhow::anyhow!("bundled demo {file} is invalid: {e}"))
        })
        .collect()
}

/// Titles of the bundled demos, as listed by the file-based providers.
pub fn summaries() -> anyhow::Result<Vec<ThreatModelSummary>> {
    Ok(models()?
        .iter()
        .filter_map(|m| m.title().map(ThreatModelSummary::named))
        .collect())
}

/// Looks a demo model up by its summary title.
pub fn find(title: &str) -> anyhow::Result<Option<ThreatModel>> {
    Ok(models()?.into_iter().find(|m| m.title() == Some(title)))
}
