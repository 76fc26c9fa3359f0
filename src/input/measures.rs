//! Code for reading [`Measure`]s from a CSV file.
use super::*;
use crate::impact_funcs::HazardType;
use crate::measures::{Measure, MeasureID, Modifier};
use crate::units::{Dimensionless, Money};
use anyhow::Result;
use serde::Deserialize;

const MEASURES_FILE_NAME: &str = "measures.csv";

#[derive(Debug, Deserialize, PartialEq)]
struct MeasureRaw {
    name: MeasureID,
    haz_type: HazardType,
    cost: Money,
    hazard_freq_cutoff: Option<f64>,
    hazard_intensity_mult: Option<f64>,
    hazard_intensity_add: Option<f64>,
    mdd_mult: Option<f64>,
    mdd_add: Option<f64>,
    paa_mult: Option<f64>,
    paa_add: Option<f64>,
    risk_transf_attach: Option<Money>,
    risk_transf_cover: Option<Money>,
}

/// Read measures from the entity folder.
///
/// # Arguments
///
/// * `folder` - Folder containing entity files
///
/// # Returns
///
/// The measures in file order or an error
pub fn read_measures<F: InputFolder + ?Sized>(folder: &F) -> Result<Vec<Measure>> {
    let measures_csv = read_csv(folder, MEASURES_FILE_NAME)?;
    Ok(read_measures_from_iter(measures_csv.into_iter()).collect())
}

/// Build a [`Modifier`] from optional columns, with missing values leaving the input unchanged
fn modifier(mult: Option<f64>, add: Option<f64>) -> Modifier {
    Modifier {
        mult: Dimensionless(mult.unwrap_or(1.0)),
        add: add.unwrap_or(0.0),
    }
}

/// Convert raw measure records, filling in neutral defaults for absent columns
fn read_measures_from_iter<I>(iter: I) -> impl Iterator<Item = Measure>
where
    I: Iterator<Item = MeasureRaw>,
{
    iter.map(|raw| Measure {
        id: raw.name,
        haz_type: raw.haz_type,
        cost: raw.cost,
        hazard_freq_cutoff: Dimensionless(raw.hazard_freq_cutoff.unwrap_or(0.0)),
        hazard_intensity: modifier(raw.hazard_intensity_mult, raw.hazard_intensity_add),
        mdd_impact: modifier(raw.mdd_mult, raw.mdd_add),
        paa_impact: modifier(raw.paa_mult, raw.paa_add),
        risk_transf_attach: raw.risk_transf_attach.unwrap_or_default(),
        risk_transf_cover: raw.risk_transf_cover.unwrap_or_default(),
    })
}
