use std::path::Path;

use crate::color::ColorMap;
use crate::data::export::export_to_path;
use crate::data::filter::{filtered_indices, FilterCriteria, SimpleCriteria, TechnicalCriteria};
use crate::data::model::{Property, SteelDataset, SteelRecord};
use crate::data::score::{rank, score_record, Requirements, ScoreResult};

/// Most grades the comparison chart accepts.
pub const MAX_COMPARED: usize = 3;

/// Rows offered as closest alternatives when the technical filter is empty.
pub const CLOSEST_MATCHES: usize = 3;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Workspace flavour chosen on the selector page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Simple,
    Technical,
    Explore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Landing,
    ModeSelector,
    Workspace(Mode),
}

/// User actions that move between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Start,
    ChooseMode(Mode),
    ChangeMode,
}

/// Next page after `action`. Actions that make no sense on `page` leave it
/// unchanged.
pub fn transition(page: Page, action: NavAction) -> Page {
    match (page, action) {
        (Page::Landing, NavAction::Start) => Page::ModeSelector,
        (Page::ModeSelector, NavAction::ChooseMode(mode)) => Page::Workspace(mode),
        (Page::Workspace(_), NavAction::ChangeMode) => Page::ModeSelector,
        (page, _) => page,
    }
}

// ---------------------------------------------------------------------------
// Explore-mode selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExploreTab {
    #[default]
    PropertiesVsCarbon,
    Treatments,
    Comparison,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreState {
    pub tab: ExploreTab,
    /// Property shown in the per-treatment box plot.
    pub property: Property,
    /// Grades in the comparison chart, in selection order.
    pub compared: Vec<String>,
}

impl Default for ExploreState {
    fn default() -> Self {
        Self {
            tab: ExploreTab::default(),
            property: Property::Uts,
            compared: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session dataset, read-only once loaded.
    pub dataset: SteelDataset,

    pub page: Page,

    /// Guided-mode form.
    pub simple: SimpleCriteria,

    /// Indices of the last guided search; `None` until the user searches.
    pub simple_results: Option<Vec<usize>>,

    /// Technical-mode sliders and treatment selection.
    pub technical: TechnicalCriteria,

    /// Indices of records passing `technical` (cached).
    pub technical_results: Vec<usize>,

    pub explore: ExploreState,

    /// Colours per simplified treatment.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: SteelDataset) -> Self {
        let technical = TechnicalCriteria::from_dataset(&dataset);
        let technical_results = (0..dataset.len()).collect();
        let color_map = ColorMap::new(&dataset.treatments);
        let mut state = Self {
            dataset,
            page: Page::default(),
            simple: SimpleCriteria::default(),
            simple_results: None,
            technical,
            technical_results,
            explore: ExploreState::default(),
            color_map,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Replace the session dataset and reset every selection derived from it.
    pub fn set_dataset(&mut self, dataset: SteelDataset) {
        let page = self.page;
        *self = Self::new(dataset);
        self.page = page;
    }

    pub fn navigate(&mut self, action: NavAction) {
        self.page = transition(self.page, action);
    }

    // -- simple mode --

    /// Run the guided search with the current form.
    pub fn search_simple(&mut self) {
        let criteria = FilterCriteria::Simple(self.simple.clone());
        let found = filtered_indices(&self.dataset.records, &criteria);
        log::debug!("Guided search {:?} → {} records", self.simple, found.len());
        self.simple_results = Some(found);
    }

    // -- technical mode --

    /// Recompute `technical_results` after a criteria change.
    pub fn refilter(&mut self) {
        let criteria = FilterCriteria::Technical(self.technical.clone());
        self.technical_results = filtered_indices(&self.dataset.records, &criteria);
    }

    /// Toggle one treatment in the technical selection.
    pub fn toggle_treatment(&mut self, treatment: &str) {
        if !self.technical.treatments.remove(treatment) {
            self.technical.treatments.insert(treatment.to_string());
        }
        self.refilter();
    }

    pub fn select_all_treatments(&mut self) {
        self.technical.treatments = self.dataset.treatments.clone();
        self.refilter();
    }

    pub fn select_no_treatments(&mut self) {
        self.technical.treatments.clear();
        self.refilter();
    }

    /// Reset sliders and treatments to the full dataset.
    pub fn reset_technical(&mut self) {
        self.technical = TechnicalCriteria::from_dataset(&self.dataset);
        self.refilter();
    }

    pub fn technical_records(&self) -> impl Iterator<Item = &SteelRecord> + '_ {
        self.technical_results
            .iter()
            .map(move |&i| &self.dataset.records[i])
    }

    /// Soft requirements implied by the technical sliders.
    pub fn soft_requirements(&self) -> Requirements {
        Requirements {
            uts_min: self.technical.uts.map(|r| r.min),
            elongation_min: self.technical.elongation.map(|r| r.min),
            treatments: Some(self.technical.treatments.clone()),
        }
    }

    pub fn score_of(&self, index: usize) -> ScoreResult {
        score_record(&self.dataset.records[index], &self.soft_requirements())
    }

    /// Best-scoring rows of the whole dataset against the soft requirements.
    pub fn closest_matches(&self) -> Vec<(usize, ScoreResult)> {
        let mut ranked = rank(&self.dataset.records, &self.soft_requirements());
        ranked.truncate(CLOSEST_MATCHES);
        ranked
    }

    /// Write the technical results to `path` and report the outcome in the
    /// status line.
    pub fn export_technical(&mut self, path: &Path) {
        match export_to_path(path, self.technical_records()) {
            Ok(()) => {
                log::info!(
                    "Exported {} records to {}",
                    self.technical_results.len(),
                    path.display()
                );
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    // -- explore mode --

    /// Add or remove a grade from the comparison, up to [`MAX_COMPARED`].
    pub fn toggle_compared(&mut self, grade: &str) {
        if let Some(pos) = self.explore.compared.iter().position(|g| g == grade) {
            self.explore.compared.remove(pos);
        } else if self.explore.compared.len() < MAX_COMPARED {
            self.explore.compared.push(grade.to_string());
        }
    }
}
