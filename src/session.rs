//! Exploration session state.
//!
//! A session owns the unfiltered base table for one city and the filtered
//! view derived from it. Changing the filter rebuilds the view from the
//! base; changing the city reloads both.

use crate::error::Result;
use crate::filter::apply_filter;
use crate::models::{City, FilterSpec, LoadSummary, TripRecord, TripTable};
use crate::registry::DatasetRegistry;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Session {
    filter: FilterSpec,
    base: TripTable,
    view: TripTable,
    summary: LoadSummary,
}

impl Session {
    /// Load `city` from the registry and apply `filter`
    pub fn open(registry: &DatasetRegistry, city: City, filter: FilterSpec) -> Result<Self> {
        let (base, summary) = registry.load(city)?;
        Ok(Self::from_table(base, summary, filter))
    }

    /// Session over an already loaded table
    pub fn from_table(base: TripTable, summary: LoadSummary, filter: FilterSpec) -> Self {
        let view = apply_filter(&base, &filter);
        Self {
            filter,
            base,
            view,
            summary,
        }
    }

    /// Replace the filtered view
    pub fn apply_filter(&mut self, filter: FilterSpec) {
        self.view = apply_filter(&self.base, &filter);
        self.filter = filter;
        info!(
            "Filter month={} day={} selects {} of {} trips",
            filter.month,
            filter.day,
            self.view.len(),
            self.base.len()
        );
    }

    /// Load a different city, keeping the session untouched on failure
    pub fn change_city(
        &mut self,
        registry: &DatasetRegistry,
        city: City,
        filter: FilterSpec,
    ) -> Result<()> {
        *self = Self::open(registry, city, filter)?;
        Ok(())
    }

    pub fn city(&self) -> City {
        self.base.city
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn base(&self) -> &TripTable {
        &self.base
    }

    pub fn view(&self) -> &TripTable {
        &self.view
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Up to `rows` records of the view starting at `offset`
    pub fn page(&self, offset: usize, rows: usize) -> &[TripRecord] {
        let records = &self.view.records;
        let start = offset.min(records.len());
        let end = start.saturating_add(rows).min(records.len());
        &records[start..end]
    }

    /// The final `rows` records of the view
    pub fn tail(&self, rows: usize) -> &[TripRecord] {
        let records = &self.view.records;
        &records[records.len().saturating_sub(rows)..]
    }
}
