//! An entity bundles the exposures, impact functions, measures and discount rates used in a risk
//! assessment.
//!
//! The entity itself does no parsing or validation of its own: it delegates reading and checking
//! to each of its collections.
use crate::disc_rates::DiscRates;
use crate::exposures::Exposures;
use crate::impact_funcs::ImpactFuncs;
pub use crate::input::{Description, EntitySource};
use crate::input::EntityCollection;
use crate::measures::Measures;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};

/// Exposures, impact functions, measures and discount rates
///
/// Each collection can only be replaced by a value of its own type:
///
/// ```compile_fail
/// use climada_entity::entity::Entity;
/// use climada_entity::measures::Measures;
///
/// let mut entity = Entity::new();
/// entity.set_exposures(Measures::new());
/// ```
///
/// ```compile_fail
/// use climada_entity::entity::Entity;
/// use climada_entity::exposures::Exposures;
///
/// let mut entity = Entity::new();
/// entity.set_disc_rates(Exposures::new());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    exposures: Exposures,
    impact_funcs: ImpactFuncs,
    measures: Measures,
    disc_rates: DiscRates,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Create an entity from the packaged default data
    pub fn new() -> Self {
        Self {
            exposures: Exposures::from_default(),
            impact_funcs: ImpactFuncs::from_default(),
            measures: Measures::from_default(),
            disc_rates: DiscRates::from_default(),
        }
    }

    /// Create an entity from the given collections
    pub fn from_parts(
        exposures: Exposures,
        impact_funcs: ImpactFuncs,
        measures: Measures,
        disc_rates: DiscRates,
    ) -> Self {
        Self {
            exposures,
            impact_funcs,
            measures,
            disc_rates,
        }
    }

    /// Create an entity from the given folder(s), or from the packaged default data if `source` is
    /// `None`.
    ///
    /// # Arguments
    ///
    /// * `source` - Folder(s) containing entity files
    /// * `description` - One description for all folders or one per folder
    pub fn load(source: Option<&EntitySource>, description: Option<&Description>) -> Result<Self> {
        match source {
            None => Ok(Self::new()),
            Some(source) => Self::from_source(source, description),
        }
    }

    /// Read an entity from the given folder(s).
    ///
    /// # Arguments
    ///
    /// * `source` - Folder(s) containing entity files
    /// * `description` - One description for all folders or one per folder
    pub fn from_source(source: &EntitySource, description: Option<&Description>) -> Result<Self> {
        let (exposures, disc_rates, impact_funcs, measures) =
            read_all_collections(source, description)?;

        Ok(Self {
            exposures,
            impact_funcs,
            measures,
            disc_rates,
        })
    }

    /// Replace every collection with fresh data read from the given folder(s).
    ///
    /// If any collection fails to be read, the entity is left unchanged.
    ///
    /// # Arguments
    ///
    /// * `source` - Folder(s) containing entity files
    /// * `description` - One description for all folders or one per folder
    pub fn read(&mut self, source: &EntitySource, description: Option<&Description>) -> Result<()> {
        *self = Self::from_source(source, description)?;
        Ok(())
    }

    /// Check every collection, in the order discount rates, exposures, impact functions,
    /// measures.
    ///
    /// Stops at the first invalid collection and returns its error.
    pub fn check(&self) -> Result<()> {
        check_collection(&self.disc_rates)?;
        check_collection(&self.exposures)?;
        check_collection(&self.impact_funcs)?;
        check_collection(&self.measures)?;

        Ok(())
    }

    /// The exposures
    pub fn exposures(&self) -> &Exposures {
        &self.exposures
    }

    /// Mutable access to the exposures
    pub fn exposures_mut(&mut self) -> &mut Exposures {
        &mut self.exposures
    }

    /// Replace the exposures
    pub fn set_exposures(&mut self, exposures: Exposures) {
        self.exposures = exposures;
    }

    /// The impact functions
    pub fn impact_funcs(&self) -> &ImpactFuncs {
        &self.impact_funcs
    }

    /// Mutable access to the impact functions
    pub fn impact_funcs_mut(&mut self) -> &mut ImpactFuncs {
        &mut self.impact_funcs
    }

    /// Replace the impact functions
    pub fn set_impact_funcs(&mut self, impact_funcs: ImpactFuncs) {
        self.impact_funcs = impact_funcs;
    }

    /// The measures
    pub fn measures(&self) -> &Measures {
        &self.measures
    }

    /// Mutable access to the measures
    pub fn measures_mut(&mut self) -> &mut Measures {
        &mut self.measures
    }

    /// Replace the measures
    pub fn set_measures(&mut self, measures: Measures) {
        self.measures = measures;
    }

    /// The discount rates
    pub fn disc_rates(&self) -> &DiscRates {
        &self.disc_rates
    }

    /// Mutable access to the discount rates
    pub fn disc_rates_mut(&mut self) -> &mut DiscRates {
        &mut self.disc_rates
    }

    /// Replace the discount rates
    pub fn set_disc_rates(&mut self, disc_rates: DiscRates) {
        self.disc_rates = disc_rates;
    }
}

/// Read the four collections, in the order exposures, discount rates, impact functions, measures
fn read_all_collections(
    source: &EntitySource,
    description: Option<&Description>,
) -> Result<(Exposures, DiscRates, ImpactFuncs, Measures)> {
    info!(
        "Reading entity from {}",
        source.paths().iter().map(|path| path.display()).join(", ")
    );

    Ok((
        read_one(source, description)?,
        read_one(source, description)?,
        read_one(source, description)?,
        read_one(source, description)?,
    ))
}

/// Read a single collection from `source`
fn read_one<C: EntityCollection>(
    source: &EntitySource,
    description: Option<&Description>,
) -> Result<C> {
    let mut collection = C::default();
    collection
        .read(source, description)
        .with_context(|| format!("Failed to read {}", C::NAME))?;
    debug!("Read {} {}", collection.len(), C::NAME);

    Ok(collection)
}

/// Check a single collection, naming it in any error
fn check_collection<C: EntityCollection>(collection: &C) -> Result<()> {
    debug!("Checking {}", C::NAME);
    collection
        .check()
        .with_context(|| format!("Invalid {}", C::NAME))
}
