use std::path::Path;

use anyhow::Context;
use tracing::debug;
use uuid::Uuid;

use crate::models::FeedbackRecord;

/// Loads every feedback record from a `.json` array or a `.csv` file with camelCase headers.
pub fn load_feedback(path: &Path) -> anyhow::Result<Vec<FeedbackRecord>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        read_csv(path)?
    } else {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feedback file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid feedback JSON in {}", path.display()))?
    };

    debug!(count = records.len(), path = %path.display(), "loaded feedback");
    Ok(records)
}

fn read_csv(path: &Path) -> anyhow::Result<Vec<FeedbackRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open feedback CSV {}", path.display()))?;
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<FeedbackRecord>().enumerate() {
        let mut record = result.with_context(|| format!("invalid feedback row {}", line + 1))?;
        if record.id.is_empty() {
            record.id = format!("import-{}", Uuid::new_v4());
        }
        records.push(record);
    }

    Ok(records)
}
