use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::course::{Course, SlotCode, TimetableCode};
use crate::export::{self, Artifact, ExportContext, ExportError, ExportFormat};
use crate::filter::{self, FilterField, FilterState};
use crate::grid::ScheduleGrid;
use crate::persistence::{self, KeyValueStore};
use crate::selection::{Selection, ToggleOutcome};
use std::sync::Arc;

/// A catalog course offered for a clicked cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub course: Arc<Course>,
    pub selected: bool,
}

/// Owns the user-facing state: filters, selection and the grid derived from
/// it. Every mutation is written to the store and the grid rebuilt before the
/// call returns.
pub struct Session {
    catalog: Arc<Catalog>,
    filters: FilterState,
    selection: Selection,
    grid: ScheduleGrid,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Restore filters and selection from `store`. Unreadable entries fall
    /// back to `default_filters` and an empty selection.
    pub fn restore(
        catalog: Arc<Catalog>,
        store: Box<dyn KeyValueStore>,
        default_filters: FilterState,
    ) -> Self {
        let filters = match persistence::load_filter_state(store.as_ref()) {
            Ok(Some(filters)) => filters,
            Ok(None) => default_filters,
            Err(err) => {
                log::warn!("could not read stored filters, using defaults: {err}");
                default_filters
            }
        };

        let codes = persistence::load_selected_codes(store.as_ref()).unwrap_or_else(|err| {
            log::warn!("could not read stored selection, starting empty: {err}");
            Vec::new()
        });
        let selection = Selection::from_codes(&catalog, &codes);
        if selection.len() != codes.len() {
            log::info!(
                "restored {} of {} stored course(s)",
                selection.len(),
                codes.len()
            );
        }
        let grid = ScheduleGrid::build(selection.iter());

        Self {
            catalog,
            filters,
            selection,
            grid,
            store,
        }
    }

    pub fn with_config(
        catalog: Arc<Catalog>,
        store: Box<dyn KeyValueStore>,
        config: &TimetableConfig,
    ) -> Self {
        Self::restore(catalog, store, config.default_filters.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub fn unique_values(&self, field: FilterField) -> Vec<String> {
        self.catalog.unique_values(field)
    }

    /// Filtered courses for the cell at `day`, `period`, flagged when already
    /// placed in that cell.
    pub fn candidates(&self, day: usize, period: usize) -> Vec<Candidate> {
        let placed = self.grid.cell(period, day);
        filter::candidates(&self.catalog, &self.filters, SlotCode::new(day, period))
            .into_iter()
            .map(|course| Candidate {
                selected: placed
                    .iter()
                    .any(|c| c.timetable_code == course.timetable_code),
                course,
            })
            .collect()
    }

    pub fn toggle(&mut self, code: TimetableCode) -> Option<ToggleOutcome> {
        let course = Arc::clone(self.catalog.find(code)?);
        let mut next = self.selection.clone();
        let outcome = next.toggle(course);
        self.commit_selection(next);
        Some(outcome)
    }

    pub fn add(&mut self, code: TimetableCode) -> bool {
        let Some(course) = self.catalog.find(code).cloned() else {
            return false;
        };
        let mut next = self.selection.clone();
        if !next.add(course) {
            return false;
        }
        self.commit_selection(next);
        true
    }

    pub fn remove(&mut self, code: TimetableCode) -> bool {
        let mut next = self.selection.clone();
        if !next.remove(code) {
            return false;
        }
        self.commit_selection(next);
        true
    }

    /// Apply `change` to a copy of the filters and swap it in.
    pub fn update_filters<F>(&mut self, change: F)
    where
        F: FnOnce(&mut FilterState, &Catalog),
    {
        let mut next = self.filters.clone();
        change(&mut next, &self.catalog);
        if next == self.filters {
            return;
        }
        self.filters = next;
        if let Err(err) = persistence::save_filter_state(self.store.as_ref(), &self.filters) {
            log::warn!("failed to persist filters: {err}");
        }
    }

    pub fn export(
        &self,
        format: ExportFormat,
        ctx: &ExportContext<'_>,
    ) -> Result<Artifact, ExportError> {
        export::export(format, self.selection.courses(), ctx)
    }

    fn commit_selection(&mut self, next: Selection) {
        self.selection = next;
        self.grid = ScheduleGrid::build(self.selection.iter());
        if let Err(err) = persistence::save_selected_codes(self.store.as_ref(), &self.selection.codes())
        {
            log::warn!("failed to persist selection: {err}");
        }
    }
}
