//! Measures are interventions which reduce the risk posed by a hazard.
use crate::id::{define_id_getter, define_id_type, find_duplicate_id};
use crate::impact_funcs::{HazardType, ImpactFunc};
use crate::input::measures::read_measures;
use crate::input::{EntityCollection, InputFolder};
use crate::tag::Tag;
use crate::units::{Dimensionless, Money};
use anyhow::{Context, Result, bail, ensure};

define_id_type! {MeasureID}

/// A linear change `x * mult + add` applied to a quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifier {
    /// Multiplicative factor
    pub mult: Dimensionless,
    /// Additive term, applied after the factor
    pub add: f64,
}

impl Default for Modifier {
    /// The modifier which leaves values unchanged
    fn default() -> Self {
        Self {
            mult: Dimensionless(1.0),
            add: 0.0,
        }
    }
}

impl Modifier {
    /// Apply the modifier to a value
    pub fn apply(&self, value: f64) -> f64 {
        value * self.mult.0 + self.add
    }

    fn check(&self, what: &str) -> Result<()> {
        ensure!(
            self.mult.0.is_finite() && self.mult.0 >= 0.0,
            "{what} multiplier must be a finite, non-negative number (got {})",
            self.mult
        );
        ensure!(
            self.add.is_finite(),
            "{what} additive term must be finite (got {})",
            self.add
        );

        Ok(())
    }
}

/// A risk-mitigation intervention
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    /// Unique name of the measure (e.g. "Mangroves")
    pub id: MeasureID,
    /// The hazard type the measure acts on
    pub haz_type: HazardType,
    /// Cost of implementing the measure
    pub cost: Money,
    /// Hazard events with a frequency above this cutoff cause no damage
    pub hazard_freq_cutoff: Dimensionless,
    /// Change in hazard intensity
    pub hazard_intensity: Modifier,
    /// Change in mean damage degree
    pub mdd_impact: Modifier,
    /// Change in percentage of affected assets
    pub paa_impact: Modifier,
    /// Risk transfer attachment point
    pub risk_transf_attach: Money,
    /// Risk transfer cover
    pub risk_transf_cover: Money,
}
define_id_getter! {Measure, MeasureID}

impl Measure {
    /// Get the impact function which results from applying this measure to `func`.
    ///
    /// The modified function evaluated at intensity `i` gives the MDD and PAA of the original at
    /// the modified intensity `i * mult + add`. MDD is kept non-negative and PAA between 0 and 1.
    ///
    /// The measure should have passed [`Measures::check`](EntityCollection::check): a zero
    /// intensity multiplier gives infinite intensities.
    ///
    /// # Returns
    ///
    /// The modified function, or `None` if the measure is for a different hazard type.
    pub fn apply_to_impact_func(&self, func: &ImpactFunc) -> Option<ImpactFunc> {
        if self.haz_type != func.haz_type {
            return None;
        }

        let intensity = &self.hazard_intensity;
        Some(ImpactFunc {
            intensity: func
                .intensity
                .iter()
                .map(|x| (x - intensity.add) / intensity.mult.0)
                .collect(),
            mdd: func
                .mdd
                .iter()
                .map(|x| self.mdd_impact.apply(*x).max(0.0))
                .collect(),
            paa: func
                .paa
                .iter()
                .map(|x| self.paa_impact.apply(*x).clamp(0.0, 1.0))
                .collect(),
            ..func.clone()
        })
    }

    fn check(&self) -> Result<()> {
        ensure!(
            self.cost.is_finite_non_negative(),
            "Cost must be a finite, non-negative number (got {})",
            self.cost
        );
        ensure!(
            (0.0..=1.0).contains(&self.hazard_freq_cutoff.0),
            "Hazard frequency cutoff must be between 0 and 1 (got {})",
            self.hazard_freq_cutoff
        );
        self.hazard_intensity.check("Hazard intensity")?;
        ensure!(
            self.hazard_intensity.mult.0 > 0.0,
            "Hazard intensity multiplier must be positive"
        );
        self.mdd_impact.check("MDD")?;
        self.paa_impact.check("PAA")?;
        ensure!(
            self.risk_transf_attach.is_finite_non_negative()
                && self.risk_transf_cover.is_finite_non_negative(),
            "Risk transfer attachment and cover must be finite, non-negative numbers"
        );

        Ok(())
    }
}

/// A collection of measures
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measures {
    measures: Vec<Measure>,
    tag: Tag,
}

impl Measures {
    /// Create an empty collection of measures
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from the given measures
    pub fn from_measures(measures: Vec<Measure>) -> Self {
        Self {
            measures,
            tag: Tag::default(),
        }
    }

    /// Add a measure to the collection
    pub fn push(&mut self, measure: Measure) {
        self.measures.push(measure);
    }

    /// Get the measure with the given name, if present
    pub fn get(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|measure| &*measure.id.0 == name)
    }

    /// Iterate over the measures
    pub fn iter(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter()
    }

    /// Iterate over the measures for the given hazard type
    pub fn for_haz_type<'a>(&'a self, haz_type: &'a str) -> impl Iterator<Item = &'a Measure> {
        self.measures
            .iter()
            .filter(move |measure| &*measure.haz_type.0 == haz_type)
    }
}

impl EntityCollection for Measures {
    const NAME: &'static str = "measures";

    fn read_folder<F: InputFolder + ?Sized>(folder: &F) -> Result<Self> {
        Ok(Self::from_measures(read_measures(folder)?))
    }

    fn append(&mut self, other: Self) {
        self.measures.extend(other.measures);
        self.tag.append(other.tag);
    }

    fn check(&self) -> Result<()> {
        if let Some(id) = find_duplicate_id(&self.measures) {
            bail!("Duplicate measure name: {id}");
        }

        for measure in &self.measures {
            measure
                .check()
                .with_context(|| format!("Invalid measure {}", measure.id))?;
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
        self.measures.len()
    }
}
