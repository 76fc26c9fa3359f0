//! Impact functions describe the vulnerability of exposures to a hazard.
//!
//! Each function maps hazard intensity to a mean damage degree (MDD) and a percentage of affected
//! assets (PAA). Their product is the mean damage ratio (MDR).
use crate::id::define_id_type;
use crate::input::impact_funcs::read_impact_funcs;
use crate::input::{EntityCollection, InputFolder};
use crate::tag::Tag;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::warn;

define_id_type! {HazardType}

/// A vulnerability curve for one hazard type
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactFunc {
    /// The hazard type the function applies to (e.g. "TC")
    pub haz_type: HazardType,
    /// Identifier of the function within its hazard type
    pub id: u32,
    /// Name of the function
    pub name: String,
    /// Unit of the hazard intensity (e.g. "m/s")
    pub intensity_unit: String,
    /// Hazard intensities, in increasing order
    pub intensity: Vec<f64>,
    /// Mean damage degree for each intensity
    pub mdd: Vec<f64>,
    /// Percentage of affected assets for each intensity, as a fraction
    pub paa: Vec<f64>,
}

impl ImpactFunc {
    /// Calculate the mean damage ratio for the given intensity.
    ///
    /// MDD and PAA are linearly interpolated between points and held constant beyond the first
    /// and last intensities.
    ///
    /// # Panics
    ///
    /// Panics if there are no points or if `mdd` or `paa` is shorter than `intensity`. Use
    /// [`ImpactFuncs::check`](EntityCollection::check) to validate functions first.
    pub fn calc_mdr(&self, intensity: f64) -> f64 {
        interpolate(&self.intensity, &self.mdd, intensity)
            * interpolate(&self.intensity, &self.paa, intensity)
    }

    /// Check that the function's points are valid
    fn check(&self) -> Result<()> {
        ensure!(!self.intensity.is_empty(), "No points provided");
        ensure!(
            self.mdd.len() == self.intensity.len() && self.paa.len() == self.intensity.len(),
            "Got {} intensities, {} MDD values and {} PAA values",
            self.intensity.len(),
            self.mdd.len(),
            self.paa.len()
        );
        ensure!(
            self.intensity.iter().all(|x| x.is_finite()),
            "Intensities must be finite"
        );
        ensure!(
            self.intensity.windows(2).all(|w| w[0] < w[1]),
            "Intensities must be strictly increasing"
        );
        ensure!(
            self.mdd.iter().all(|x| x.is_finite() && *x >= 0.0),
            "MDD values must be finite and non-negative"
        );
        ensure!(
            self.paa.iter().all(|x| (0.0..=1.0).contains(x)),
            "PAA values must be between 0 and 1"
        );

        Ok(())
    }
}

/// Piecewise-linear interpolation of `ys` over `xs`, clamped at both ends.
///
/// `xs` must be non-empty, increasing and the same length as `ys`.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let upper = xs.partition_point(|xi| *xi < x);
    if upper == 0 {
        return ys[0];
    }
    if upper == xs.len() {
        return ys[ys.len() - 1];
    }

    let (x0, x1) = (xs[upper - 1], xs[upper]);
    let (y0, y1) = (ys[upper - 1], ys[upper]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// A collection of impact functions, grouped by hazard type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactFuncs {
    funcs: IndexMap<HazardType, IndexMap<u32, ImpactFunc>>,
    tag: Tag,
}

impl ImpactFuncs {
    /// Create an empty collection of impact functions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an impact function, replacing any existing one with the same hazard type and ID
    pub fn add_func(&mut self, func: ImpactFunc) {
        let by_id = self.funcs.entry(func.haz_type.clone()).or_default();
        if let Some(old) = by_id.insert(func.id, func) {
            warn!(
                "Existing impact function {} ({}) has been overwritten",
                old.id, old.haz_type
            );
        }
    }

    /// Remove the impact function with the given hazard type and ID, returning it if present
    pub fn remove_func(&mut self, haz_type: &str, id: u32) -> Option<ImpactFunc> {
        let by_id = self.funcs.get_mut(haz_type)?;
        let func = by_id.shift_remove(&id);
        if by_id.is_empty() {
            self.funcs.shift_remove(haz_type);
        }

        func
    }

    /// Get the impact function with the given hazard type and ID
    pub fn get_func(&self, haz_type: &str, id: u32) -> Option<&ImpactFunc> {
        self.funcs.get(haz_type)?.get(&id)
    }

    /// The hazard types for which there are impact functions
    pub fn haz_types(&self) -> impl Iterator<Item = &HazardType> {
        self.funcs.keys()
    }

    /// The IDs of the impact functions for the given hazard type
    pub fn ids(&self, haz_type: &str) -> Vec<u32> {
        self.funcs
            .get(haz_type)
            .map(|by_id| by_id.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate over all impact functions
    pub fn iter(&self) -> impl Iterator<Item = &ImpactFunc> {
        self.funcs.values().flat_map(IndexMap::values)
    }
}

impl EntityCollection for ImpactFuncs {
    const NAME: &'static str = "impact functions";

    fn read_folder<F: InputFolder + ?Sized>(folder: &F) -> Result<Self> {
        let mut funcs = Self::new();
        for func in read_impact_funcs(folder)? {
            funcs.add_func(func);
        }

        Ok(funcs)
    }

    fn append(&mut self, other: Self) {
        for func in other.funcs.into_values().flat_map(IndexMap::into_values) {
            self.add_func(func);
        }
        self.tag.append(other.tag);
    }

    fn check(&self) -> Result<()> {
        for func in self.iter() {
            func.check().with_context(|| {
                format!("Invalid impact function {} ({})", func.id, func.haz_type)
            })?;
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
        self.funcs.values().map(IndexMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, impact_func, impact_funcs};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    fn test_check_valid(impact_funcs: ImpactFuncs) {
        assert!(impact_funcs.check().is_ok());
    }

    #[test]
    fn test_check_empty_collection() {
        assert!(ImpactFuncs::new().check().is_ok());
    }

    #[rstest]
    #[case::no_points(ImpactFunc { intensity: vec![], mdd: vec![], paa: vec![], ..impact_func() })]
    #[case::length_mismatch(ImpactFunc { mdd: vec![0.0], ..impact_func() })]
    #[case::not_increasing(ImpactFunc { intensity: vec![0.0, 50.0, 50.0], ..impact_func() })]
    #[case::infinite_intensity(ImpactFunc { intensity: vec![0.0, 50.0, f64::INFINITY], ..impact_func() })]
    #[case::negative_mdd(ImpactFunc { mdd: vec![0.0, -0.5, 1.0], ..impact_func() })]
    #[case::paa_above_one(ImpactFunc { paa: vec![0.0, 1.5, 1.0], ..impact_func() })]
    fn test_check_invalid(#[case] func: ImpactFunc) {
        let mut funcs = ImpactFuncs::new();
        funcs.add_func(func);
        assert_error!(funcs.check(), "Invalid impact function 1 (TC)");
    }

    #[rstest]
    #[case(-10.0, 0.0)] // Below first point
    #[case(0.0, 0.0)]
    #[case(25.0, 0.125)] // mdd 0.25, paa 0.5
    #[case(50.0, 0.5)]
    #[case(75.0, 0.75)] // mdd 0.75, paa 1.0
    #[case(100.0, 1.0)]
    #[case(200.0, 1.0)] // Above last point
    fn test_calc_mdr(impact_func: ImpactFunc, #[case] intensity: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, impact_func.calc_mdr(intensity), expected, epsilon = 1e-12);
    }

    #[rstest]
    #[should_panic]
    fn test_calc_mdr_mismatched_points(impact_func: ImpactFunc) {
        let func = ImpactFunc {
            mdd: vec![0.0],
            ..impact_func
        };
        func.calc_mdr(75.0);
    }

    #[rstest]
    fn test_add_func_replaces(impact_func: ImpactFunc) {
        let mut funcs = ImpactFuncs::new();
        funcs.add_func(impact_func.clone());
        funcs.add_func(ImpactFunc {
            name: "Replacement".into(),
            ..impact_func
        });
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs.get_func("TC", 1).unwrap().name, "Replacement");
    }

    #[rstest]
    fn test_remove_func(mut impact_funcs: ImpactFuncs) {
        assert!(impact_funcs.remove_func("TC", 3).is_none());
        assert!(impact_funcs.remove_func("FL", 1).is_some());
        assert!(impact_funcs.get_func("FL", 1).is_none());
        assert_eq!(impact_funcs.haz_types().collect::<Vec<_>>(), [&HazardType::new("TC")]);
    }

    #[rstest]
    fn test_ids(impact_funcs: ImpactFuncs) {
        assert_eq!(impact_funcs.ids("TC"), [1, 2]);
        assert!(impact_funcs.ids("EQ").is_empty());
    }

    #[rstest]
    fn test_append(impact_func: ImpactFunc) {
        let mut funcs = ImpactFuncs::new();
        funcs.add_func(impact_func.clone());

        let mut other = ImpactFuncs::new();
        other.add_func(ImpactFunc {
            id: 5,
            ..impact_func
        });
        funcs.append(other);

        assert_eq!(funcs.ids("TC"), [1, 5]);
    }

    #[test]
    fn test_from_default() {
        let funcs = ImpactFuncs::from_default();
        assert!(!funcs.is_empty());
        assert!(funcs.check().is_ok());
    }
}
