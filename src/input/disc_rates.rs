//! Code for reading discount rates from a CSV file.
use super::*;
use crate::disc_rates::DiscRate;
use anyhow::Result;

const DISC_RATES_FILE_NAME: &str = "disc_rates.csv";

/// Read discount rates from the entity folder.
///
/// # Arguments
///
/// * `folder` - Folder containing entity files
///
/// # Returns
///
/// The discount rates in file order or an error
pub fn read_disc_rates<F: InputFolder + ?Sized>(folder: &F) -> Result<Vec<DiscRate>> {
    read_csv(folder, DISC_RATES_FILE_NAME)
}
