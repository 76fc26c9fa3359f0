//! Discount rates are used to bring future costs and benefits to present value.
use crate::input::disc_rates::read_disc_rates;
use crate::input::{EntityCollection, InputFolder};
use crate::tag::Tag;
use crate::units::{Dimensionless, Money};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// The discount rate applying to a single year
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct DiscRate {
    /// The year to which the rate applies
    pub year: u32,
    /// The discount rate for the year (e.g. 0.02)
    pub rate: Dimensionless,
}

/// Discount rates for a range of years
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscRates {
    rates: Vec<DiscRate>,
    tag: Tag,
}

impl DiscRates {
    /// Create an empty set of discount rates
    pub fn new() -> Self {
        Self::default()
    }

    /// Create discount rates from an iterator of `(year, rate)` pairs
    pub fn from_rates<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(year, rate)| DiscRate {
                    year,
                    rate: Dimensionless(rate),
                })
                .collect(),
            tag: Tag::default(),
        }
    }

    /// Iterate over the discount rates in year order
    pub fn iter(&self) -> impl Iterator<Item = &DiscRate> {
        self.rates.iter()
    }

    /// Iterate over the years covered
    pub fn years(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.iter().map(|rate| rate.year)
    }

    /// Add a discount rate for another year
    pub fn push(&mut self, year: u32, rate: Dimensionless) {
        self.rates.push(DiscRate { year, rate });
    }

    /// Get the discount rate for the given year, if there is one
    pub fn rate_for(&self, year: u32) -> Option<Dimensionless> {
        self.rates
            .iter()
            .find(|rate| rate.year == year)
            .map(|rate| rate.rate)
    }

    /// Compute the net present value of a series of yearly values.
    ///
    /// The values are discounted back to `ini_year`, starting from the last year and working
    /// backwards, i.e. `npv = v_end` then `npv = v_t + npv / (1 + r_t)` for each earlier year.
    ///
    /// # Arguments
    ///
    /// * `ini_year` - First year of the series
    /// * `end_year` - Last year of the series (inclusive)
    /// * `values` - One value for each year from `ini_year` to `end_year`
    pub fn net_present_value(&self, ini_year: u32, end_year: u32, values: &[Money]) -> Result<Money> {
        ensure!(
            ini_year <= end_year,
            "Initial year {ini_year} is after end year {end_year}"
        );
        let num_years = usize::try_from(end_year - ini_year)
            .ok()
            .and_then(|n| n.checked_add(1))
            .with_context(|| format!("Too many years from {ini_year} to {end_year}"))?;
        ensure!(
            values.len() == num_years,
            "Got {} values for the {num_years} years from {ini_year} to {end_year}",
            values.len()
        );

        let rates = (ini_year..=end_year)
            .map(|year| {
                self.rate_for(year)
                    .with_context(|| format!("No discount rate given for year {year}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let (last, earlier) = values.split_last().context("No values provided")?;
        let npv = earlier
            .iter()
            .zip(&rates)
            .rev()
            .fold(*last, |npv, (value, rate)| {
                *value + npv / (Dimensionless(1.0) + *rate)
            });

        Ok(npv)
    }
}

impl EntityCollection for DiscRates {
    const NAME: &'static str = "discount rates";

    fn read_folder<F: InputFolder + ?Sized>(folder: &F) -> Result<Self> {
        Ok(Self {
            rates: read_disc_rates(folder)?,
            tag: Tag::default(),
        })
    }

    fn append(&mut self, other: Self) {
        self.rates.extend(other.rates);
        self.tag.append(other.tag);
    }

    fn check(&self) -> Result<()> {
        ensure!(!self.rates.is_empty(), "No discount rates provided");

        for rate in &self.rates {
            ensure!(
                rate.rate.0.is_finite() && rate.rate.0 > -1.0,
                "Invalid discount rate for year {}: {}",
                rate.year,
                rate.rate
            );
        }

        for (prev, next) in self.rates.iter().zip(self.rates.iter().skip(1)) {
            ensure!(
                prev.year < next.year,
                "Discount rate years must be unique and in order (got {} then {})",
                prev.year,
                next.year
            );
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
        self.rates.len()
    }
}
