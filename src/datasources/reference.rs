use super::ReferenceData;
use crate::config::ReferenceConfig;
use crate::error::{HarvestError, Result};
use crate::logic::groundwater::groundwater_depth;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_SOIL_TYPE: &str = "Loamy";
pub const DEFAULT_TARIFF_CLASS: &str = "Typical urban slab";

#[derive(Debug, Deserialize)]
struct SoilRow {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Soil Type")]
    soil_type: String,
}

#[derive(Debug, Deserialize)]
struct GroundwaterRow {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Estimated Groundwater Depth (m bgl)", default)]
    depth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClassificationRow {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Classification")]
    classification: String,
}

/// District reference tables, loaded once and read-only afterwards.
/// Keys are trimmed, lower-cased district names; the first row for a
/// district wins.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    soil: HashMap<String, String>,
    groundwater: HashMap<String, Option<String>>,
    classification: HashMap<String, String>,
}

impl ReferenceTables {
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let tables = Self::from_readers(
            open_table(&config.soil_table)?,
            open_table(&config.groundwater_table)?,
            open_table(&config.classification_table)?,
        )?;

        tracing::info!(
            "Loaded reference tables: {} soil, {} groundwater, {} classification rows",
            tables.soil.len(),
            tables.groundwater.len(),
            tables.classification.len()
        );

        Ok(tables)
    }

    pub fn from_readers(
        soil: impl Read,
        groundwater: impl Read,
        classification: impl Read,
    ) -> Result<Self> {
        let soil = read_rows::<SoilRow, _>(soil)?
            .into_iter()
            .map(|r| (r.district, r.soil_type));
        let groundwater = read_rows::<GroundwaterRow, _>(groundwater)?
            .into_iter()
            .map(|r| (r.district, r.depth));
        let classification = read_rows::<ClassificationRow, _>(classification)?
            .into_iter()
            .map(|r| (r.district, r.classification));

        Ok(Self {
            soil: index_by_district(soil),
            groundwater: index_by_district(groundwater),
            classification: index_by_district(classification),
        })
    }

    /// Row counts as (soil, groundwater, classification)
    pub fn row_counts(&self) -> (usize, usize, usize) {
        (
            self.soil.len(),
            self.groundwater.len(),
            self.classification.len(),
        )
    }
}

impl ReferenceData for ReferenceTables {
    fn lookup_soil(&self, district: &str) -> String {
        match self.soil.get(&district_key(district)) {
            Some(soil) => soil.clone(),
            None => {
                tracing::debug!(
                    "No soil data for '{}', assuming {}",
                    district,
                    DEFAULT_SOIL_TYPE
                );
                DEFAULT_SOIL_TYPE.to_string()
            }
        }
    }

    fn lookup_groundwater_depth(&self, district: &str) -> Option<f64> {
        let descriptor = match self.groundwater.get(&district_key(district)) {
            Some(Some(d)) => d,
            Some(None) => return None,
            None => {
                tracing::debug!("No groundwater data for '{}'", district);
                return None;
            }
        };

        let depth = groundwater_depth(descriptor);
        if depth.is_none() {
            tracing::debug!(
                "Groundwater descriptor '{}' for '{}' has no usable depth",
                descriptor,
                district
            );
        }
        depth
    }

    fn lookup_tariff_class(&self, district: &str) -> String {
        match self.classification.get(&district_key(district)) {
            Some(class) => class.clone(),
            None => {
                tracing::debug!(
                    "No tariff classification for '{}', assuming {}",
                    district,
                    DEFAULT_TARIFF_CLASS
                );
                DEFAULT_TARIFF_CLASS.to_string()
            }
        }
    }
}

fn district_key(district: &str) -> String {
    district.trim().to_lowercase()
}

fn index_by_district<V>(rows: impl Iterator<Item = (String, V)>) -> HashMap<String, V> {
    let mut index = HashMap::new();
    for (district, value) in rows {
        index.entry(district_key(&district)).or_insert(value);
    }
    index
}

fn open_table(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        HarvestError::Config(format!(
            "Required data file not found: {} ({})",
            path.display(),
            e
        ))
    })
}

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
