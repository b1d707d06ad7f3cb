use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::ManualEntryError;
use crate::model::{Provider, ProviderRecord, ProviderRecords, Section};

/// Manually entered averages and counts, keyed by section and provider.
///
/// Stored as JSON:
/// ```json
/// {
///   "avl_hub": {
///     "AC_avl_Solusof": {
///       "averages": ["00:01:04", "00:02:33", "00:06:55", "00:59:43"],
///       "counts": [20965, 5317, 159, 351]
///     }
///   }
/// }
/// ```
/// Sections or providers left out read as empty records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualEntries {
    entries: BTreeMap<Section, BTreeMap<Provider, ProviderRecord>>,
}

impl ManualEntries {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManualEntryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManualEntryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let entries: Self = serde_json::from_str(&content).map_err(|source| {
            ManualEntryError::Parse {
                path: path.display().to_string(),
                source,
            }
        })?;
        debug!(path = %path.display(), sections = entries.entries.len(), "Manual entries loaded");

        Ok(entries)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Both providers' records for `section`.
    pub fn records(&self, section: Section) -> ProviderRecords {
        let entered = self.entries.get(&section);

        Provider::ALL
            .iter()
            .map(|&provider| {
                let record = entered.and_then(|e| e.get(&provider)).cloned();
                if record.is_none() {
                    warn!(%section, %provider, "No manual entry, using empty record");
                }
                (provider, record.unwrap_or_default())
            })
            .collect()
    }

    /// The sample figures offered as defaults in the manual-entry form.
    pub fn sample() -> Self {
        const SAMPLE: [(Section, Provider, [&str; 4], [u64; 4]); 6] = [
            (
                Section::AvlHub,
                Provider::Solusof,
                ["00:01:04", "00:02:33", "00:06:55", "00:59:43"],
                [20965, 5317, 159, 351],
            ),
            (
                Section::AvlHub,
                Provider::Sistech,
                ["00:00:40", "00:03:09", "00:06:34", "01:23:24"],
                [34765, 3767, 100, 78],
            ),
            (
                Section::HubSimon,
                Provider::Solusof,
                ["00:00:19", "00:00:00", "00:00:00", "00:00:00"],
                [26792, 0, 0, 0],
            ),
            (
                Section::HubSimon,
                Provider::Sistech,
                ["00:00:19", "00:00:00", "00:00:00", "00:00:00"],
                [38711, 0, 0, 0],
            ),
            (
                Section::AvlSimon,
                Provider::Solusof,
                ["00:01:15", "00:02:40", "00:06:49", "00:59:52"],
                [18216, 8027, 197, 352],
            ),
            (
                Section::AvlSimon,
                Provider::Sistech,
                ["00:00:55", "00:03:09", "00:06:13", "01:03:35"],
                [33353, 5118, 158, 82],
            ),
        ];

        let mut entries: BTreeMap<Section, BTreeMap<Provider, ProviderRecord>> = BTreeMap::new();
        for (section, provider, averages, counts) in SAMPLE {
            let record = ProviderRecord::new(averages.map(String::from), counts);
            entries.entry(section).or_default().insert(provider, record);
        }

        Self { entries }
    }
}
