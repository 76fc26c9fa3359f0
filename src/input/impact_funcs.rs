//! Code for reading [`ImpactFunc`]s from a CSV file.
use super::*;
use crate::impact_funcs::{HazardType, ImpactFunc};
use anyhow::{Result, ensure};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Deserialize;

const IMPACT_FUNCS_FILE_NAME: &str = "impact_funcs.csv";

/// One point of an impact function, as it appears in the CSV file
#[derive(Debug, Deserialize, PartialEq)]
struct ImpactFuncPointRaw {
    haz_type: HazardType,
    id: u32,
    name: String,
    intensity_unit: String,
    intensity: f64,
    mdd: f64,
    paa: f64,
}

/// Read impact functions from the entity folder.
///
/// # Arguments
///
/// * `folder` - Folder containing entity files
///
/// # Returns
///
/// The impact functions, in the order in which they first appear in the file, or an error
pub fn read_impact_funcs<F: InputFolder + ?Sized>(folder: &F) -> Result<Vec<ImpactFunc>> {
    let file_path = folder.file_path(IMPACT_FUNCS_FILE_NAME);
    let points = read_csv(folder, IMPACT_FUNCS_FILE_NAME)?;
    read_impact_funcs_from_iter(points.into_iter()).with_context(|| input_err_msg(&file_path))
}

/// Group impact function points into functions.
///
/// Rows with the same hazard type and ID make up one function. Their points are kept in file
/// order. The name and intensity unit must be the same for every row of a function.
fn read_impact_funcs_from_iter<I>(iter: I) -> Result<Vec<ImpactFunc>>
where
    I: Iterator<Item = ImpactFuncPointRaw>,
{
    let mut funcs: IndexMap<(HazardType, u32), ImpactFunc> = IndexMap::new();
    for point in iter {
        match funcs.entry((point.haz_type.clone(), point.id)) {
            Entry::Vacant(entry) => {
                entry.insert(ImpactFunc {
                    haz_type: point.haz_type,
                    id: point.id,
                    name: point.name,
                    intensity_unit: point.intensity_unit,
                    intensity: vec![point.intensity],
                    mdd: vec![point.mdd],
                    paa: vec![point.paa],
                });
            }
            Entry::Occupied(mut entry) => {
                let func = entry.get_mut();
                ensure!(
                    func.name == point.name && func.intensity_unit == point.intensity_unit,
                    "Impact function {} ({}) has inconsistent names or intensity units",
                    func.id,
                    func.haz_type
                );
                func.intensity.push(point.intensity);
                func.mdd.push(point.mdd);
                func.paa.push(point.paa);
            }
        }
    }

    Ok(funcs.into_values().collect())
}
