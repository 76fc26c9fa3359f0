//! Exposures are the assets or values at risk from a hazard.
use crate::id::{define_id_getter, define_id_type, find_duplicate_id};
use crate::input::exposures::{read_exposures, read_exposures_metadata};
use crate::input::{EntityCollection, InputFolder};
use crate::tag::Tag;
use crate::units::Money;
use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::warn;
use serde::Deserialize;

define_id_type! {ExposureID}

/// The reference year used when none is given
const DEFAULT_REF_YEAR: u32 = 2018;

/// The value unit used when none is given
const DEFAULT_VALUE_UNIT: &str = "USD";

fn default_ref_year() -> u32 {
    DEFAULT_REF_YEAR
}

fn default_value_unit() -> String {
    DEFAULT_VALUE_UNIT.to_string()
}

/// A single asset at a geographical location
#[derive(Debug, Clone, PartialEq)]
pub struct Exposure {
    /// Unique identifier for the exposure (e.g. "house1")
    pub id: ExposureID,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// The value of the asset
    pub value: Money,
    /// The part of a loss borne by the owner
    pub deductible: Money,
    /// The maximum insured loss
    pub cover: Money,
    /// ID of the impact function which applies to this exposure
    pub impact_id: u32,
    /// Optional category (e.g. building type)
    pub category_id: Option<u32>,
    /// Optional region code (e.g. ISO 3166 numeric country code)
    pub region_id: Option<u32>,
}
define_id_getter! {Exposure, ExposureID}

impl Exposure {
    /// Check that the exposure's location and monetary values are valid
    fn check(&self) -> Result<()> {
        ensure!(
            (-90.0..=90.0).contains(&self.latitude),
            "Latitude must be between -90 and 90 (got {})",
            self.latitude
        );
        ensure!(
            (-180.0..=180.0).contains(&self.longitude),
            "Longitude must be between -180 and 180 (got {})",
            self.longitude
        );

        for (name, value) in [
            ("value", self.value),
            ("deductible", self.deductible),
            ("cover", self.cover),
        ] {
            ensure!(
                value.is_finite_non_negative(),
                "{name} must be a finite, non-negative number (got {value})"
            );
        }

        ensure!(
            self.deductible <= self.value,
            "Deductible ({}) cannot exceed value ({})",
            self.deductible,
            self.value
        );

        Ok(())
    }
}

/// Metadata shared by all exposures read from the same file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExposuresMetadata {
    /// The year the values refer to
    #[serde(default = "default_ref_year")]
    pub ref_year: u32,
    /// The unit of the exposure values (e.g. "USD")
    #[serde(default = "default_value_unit")]
    pub value_unit: String,
}

impl Default for ExposuresMetadata {
    fn default() -> Self {
        Self {
            ref_year: DEFAULT_REF_YEAR,
            value_unit: default_value_unit(),
        }
    }
}

/// A collection of exposures
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exposures {
    exposures: Vec<Exposure>,
    metadata: ExposuresMetadata,
    tag: Tag,
}

impl Exposures {
    /// Create an empty collection of exposures
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from the given exposures and metadata
    pub fn from_exposures(exposures: Vec<Exposure>, metadata: ExposuresMetadata) -> Self {
        Self {
            exposures,
            metadata,
            tag: Tag::default(),
        }
    }

    /// Iterate over the exposures
    pub fn iter(&self) -> impl Iterator<Item = &Exposure> {
        self.exposures.iter()
    }

    /// Get the exposure with the given ID, if present
    pub fn get(&self, id: &str) -> Option<&Exposure> {
        self.exposures.iter().find(|exposure| &*exposure.id.0 == id)
    }

    /// Add an exposure to the collection
    pub fn push(&mut self, exposure: Exposure) {
        self.exposures.push(exposure);
    }

    /// The year the values refer to
    pub fn ref_year(&self) -> u32 {
        self.metadata.ref_year
    }

    /// The unit of the exposure values
    pub fn value_unit(&self) -> &str {
        &self.metadata.value_unit
    }

    /// The sum of the values of all exposures
    pub fn total_value(&self) -> Money {
        self.exposures.iter().map(|exposure| exposure.value).sum()
    }

    /// The IDs of the impact functions referred to by the exposures, sorted and deduplicated
    pub fn impact_ids(&self) -> Vec<u32> {
        self.exposures
            .iter()
            .map(|exposure| exposure.impact_id)
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

impl EntityCollection for Exposures {
    const NAME: &'static str = "exposures";

    fn read_folder<F: InputFolder + ?Sized>(folder: &F) -> Result<Self> {
        Ok(Self::from_exposures(
            read_exposures(folder)?,
            read_exposures_metadata(folder)?,
        ))
    }

    fn append(&mut self, other: Self) {
        if self.tag.is_empty() && self.exposures.is_empty() {
            self.metadata = other.metadata;
        } else if self.metadata != other.metadata {
            warn!(
                "Appending exposures with different metadata ({} {} vs {} {}); keeping the first",
                self.metadata.ref_year,
                self.metadata.value_unit,
                other.metadata.ref_year,
                other.metadata.value_unit
            );
        }

        self.exposures.extend(other.exposures);
        self.tag.append(other.tag);
    }

    fn check(&self) -> Result<()> {
        ensure!(!self.exposures.is_empty(), "No exposures provided");
        ensure!(
            !self.metadata.value_unit.trim().is_empty(),
            "Value unit cannot be empty"
        );

        if let Some(id) = find_duplicate_id(&self.exposures) {
            bail!("Duplicate exposure ID: {id}");
        }

        for exposure in &self.exposures {
            exposure
                .check()
                .with_context(|| format!("Invalid exposure {}", exposure.id))?;
        }

        Ok(())
    }

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    fn len(&self) -> usize {
        self.exposures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, exposure, exposures};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    fn test_check_valid(exposures: Exposures) {
        assert!(exposures.check().is_ok());
    }

    #[test]
    fn test_check_empty() {
        assert_error!(Exposures::new().check(), "No exposures provided");
    }

    #[rstest]
    fn test_check_duplicate_id(exposure: Exposure) {
        let exposures = Exposures::from_exposures(
            vec![exposure.clone(), exposure],
            ExposuresMetadata::default(),
        );
        assert_error!(exposures.check(), "Duplicate exposure ID: house1");
    }

    #[rstest]
    fn test_check_empty_value_unit(exposure: Exposure) {
        let metadata = ExposuresMetadata {
            ref_year: 2018,
            value_unit: " ".into(),
        };
        let exposures = Exposures::from_exposures(vec![exposure], metadata);
        assert_error!(exposures.check(), "Value unit cannot be empty");
    }

    #[rstest]
    #[case::latitude(Exposure { latitude: 91.0, ..exposure() })]
    #[case::longitude(Exposure { longitude: -180.5, ..exposure() })]
    #[case::negative_value(Exposure { value: Money(-1.0), ..exposure() })]
    #[case::nan_cover(Exposure { cover: Money(f64::NAN), ..exposure() })]
    #[case::deductible_exceeds_value(Exposure { deductible: Money(2000.0), ..exposure() })]
    fn test_check_invalid_exposure(#[case] exposure: Exposure) {
        let exposures = Exposures::from_exposures(vec![exposure], ExposuresMetadata::default());
        assert_error!(exposures.check(), "Invalid exposure house1");
    }

    #[rstest]
    fn test_total_value(exposures: Exposures) {
        assert_approx_eq!(Money, exposures.total_value(), Money(3000.0));
    }

    #[rstest]
    fn test_get(exposures: Exposures) {
        assert_eq!(exposures.get("house2").unwrap().value, Money(2000.0));
        assert!(exposures.get("house3").is_none());
    }

    #[rstest]
    fn test_impact_ids(exposure: Exposure) {
        let exposures = Exposures::from_exposures(
            vec![
                Exposure {
                    id: "a".into(),
                    impact_id: 3,
                    ..exposure.clone()
                },
                Exposure {
                    id: "b".into(),
                    impact_id: 1,
                    ..exposure.clone()
                },
                Exposure {
                    id: "c".into(),
                    impact_id: 3,
                    ..exposure
                },
            ],
            ExposuresMetadata::default(),
        );
        assert_eq!(exposures.impact_ids(), [1, 3]);
    }

    #[rstest]
    fn test_append_keeps_first_metadata(exposure: Exposure) {
        let mut first = Exposures::new();
        first.append(Exposures::from_exposures(
            vec![exposure.clone()],
            ExposuresMetadata {
                ref_year: 2020,
                value_unit: "EUR".into(),
            },
        ));
        assert_eq!(first.ref_year(), 2020);

        first.append(Exposures::from_exposures(
            vec![Exposure {
                id: "house2".into(),
                ..exposure
            }],
            ExposuresMetadata::default(),
        ));
        assert_eq!(first.len(), 2);
        assert_eq!(first.ref_year(), 2020);
        assert_eq!(first.value_unit(), "EUR");
    }

    #[test]
    fn test_from_default() {
        let exposures = Exposures::from_default();
        assert!(!exposures.is_empty());
        assert!(exposures.check().is_ok());
        assert_eq!(exposures.tag().file_names(), [std::path::PathBuf::from("entity_template")]);
    }
}
