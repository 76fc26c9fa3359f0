//! Code for reading [`Exposure`]s from a CSV file.
use super::*;
use crate::exposures::{Exposure, ExposureID, ExposuresMetadata};
use crate::units::Money;
use anyhow::Result;
use serde::Deserialize;

const EXPOSURES_FILE_NAME: &str = "exposures.csv";
const ENTITY_METADATA_FILE_NAME: &str = "entity.toml";

#[derive(Debug, Deserialize, PartialEq)]
struct ExposureRaw {
    id: ExposureID,
    latitude: f64,
    longitude: f64,
    value: Money,
    deductible: Option<Money>,
    cover: Option<Money>,
    impact_id: u32,
    category_id: Option<u32>,
    region_id: Option<u32>,
}

/// Read exposures CSV file from the entity folder.
///
/// # Arguments
///
/// * `folder` - Folder containing entity files
///
/// # Returns
///
/// The exposures in file order or an error
pub fn read_exposures<F: InputFolder + ?Sized>(folder: &F) -> Result<Vec<Exposure>> {
    let exposures_csv = read_csv(folder, EXPOSURES_FILE_NAME)?;
    Ok(read_exposures_from_iter(exposures_csv.into_iter()).collect())
}

/// Read the exposures metadata from the entity folder, using defaults if the file is absent
pub fn read_exposures_metadata<F: InputFolder + ?Sized>(folder: &F) -> Result<ExposuresMetadata> {
    Ok(read_toml_optional(folder, ENTITY_METADATA_FILE_NAME)?.unwrap_or_default())
}

/// Convert raw exposure records, filling in default deductibles and covers.
///
/// An absent deductible is zero and an absent cover is the full value.
fn read_exposures_from_iter<I>(iter: I) -> impl Iterator<Item = Exposure>
where
    I: Iterator<Item = ExposureRaw>,
{
    iter.map(|raw| Exposure {
        id: raw.id,
        latitude: raw.latitude,
        longitude: raw.longitude,
        value: raw.value,
        deductible: raw.deductible.unwrap_or_default(),
        cover: raw.cover.unwrap_or(raw.value),
        impact_id: raw.impact_id,
        category_id: raw.category_id,
        region_id: raw.region_id,
    })
}
