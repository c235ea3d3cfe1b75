use crate::analytics::{
    correlation_matrix, kpis, price_histogram, region_names, scatter_points, search_regions,
    top_n, Bin, CorrelationMatrix, Kpis, ScatterPoint, CORRELATION_METRICS,
};
use crate::config::Config;
use crate::data::{Dataset, RegionRecord};
use crate::tui::theme::ThemeColors;
use ratatui::widgets::{ListState, TableState};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Correlation,
    Distribution,
    Region,
    Scatter,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Correlation,
        Tab::Distribution,
        Tab::Region,
        Tab::Scatter,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Correlation => "Correlation",
            Tab::Distribution => "Distribution",
            Tab::Region => "Region",
            Tab::Scatter => "Scatter",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Help,
    ScoreBreakdown,
}

pub struct App {
    pub dataset: Dataset,
    pub config: Config,
    pub theme: ThemeColors,
    /// Shown in the title bar (file name and sheet)
    pub source: String,

    // Derived once at startup, the dataset never changes afterwards
    pub kpis: Kpis,
    pub top: Vec<RegionRecord>,
    pub correlation: CorrelationMatrix,
    pub histogram: Vec<Bin>,
    pub scatter: Vec<ScatterPoint>,
    pub regions: Vec<String>,

    pub current_tab: Tab,
    pub input_mode: InputMode,
    pub table_state: TableState,
    pub region_state: ListState,
    pub search_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(dataset: Dataset, config: Config, theme: ThemeColors, source: String) -> Self {
        let kpis = kpis(&dataset);
        let top: Vec<RegionRecord> = top_n(&dataset, config.dashboard.top_n)
            .into_iter()
            .cloned()
            .collect();
        let correlation = correlation_matrix(&dataset, &CORRELATION_METRICS);
        let histogram = price_histogram(&dataset, config.dashboard.histogram_bins);
        let scatter = scatter_points(&dataset);
        let regions: Vec<String> = region_names(&dataset)
            .into_iter()
            .map(String::from)
            .collect();

        let mut table_state = TableState::default();
        if !top.is_empty() {
            table_state.select(Some(0));
        }
        let mut region_state = ListState::default();
        if !regions.is_empty() {
            region_state.select(Some(0));
        }

        Self {
            dataset,
            config,
            theme,
            source,
            kpis,
            top,
            correlation,
            histogram,
            scatter,
            regions,
            current_tab: Tab::Overview,
            input_mode: InputMode::Normal,
            table_state,
            region_state,
            search_input: String::new(),
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn next_tab(&mut self) {
        let next = (self.current_tab.index() + 1) % Tab::ALL.len();
        self.current_tab = Tab::ALL[next];
    }

    pub fn previous_tab(&mut self) {
        let len = Tab::ALL.len();
        let previous = (self.current_tab.index() + len - 1) % len;
        self.current_tab = Tab::ALL[previous];
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::ALL.get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn next_row(&mut self) {
        match self.current_tab {
            Tab::Region => {
                let selected = wrap_next(self.region_state.selected(), self.regions.len());
                self.region_state.select(selected);
            }
            _ => {
                let selected = wrap_next(self.table_state.selected(), self.top.len());
                self.table_state.select(selected);
            }
        }
    }

    pub fn previous_row(&mut self) {
        match self.current_tab {
            Tab::Region => {
                let selected = wrap_previous(self.region_state.selected(), self.regions.len());
                self.region_state.select(selected);
            }
            _ => {
                let selected = wrap_previous(self.table_state.selected(), self.top.len());
                self.table_state.select(selected);
            }
        }
    }

    /// Region highlighted in the top-N table
    pub fn selected_top(&self) -> Option<&RegionRecord> {
        self.table_state.selected().and_then(|i| self.top.get(i))
    }

    /// Region picked in the region list (the "sidebar" selection)
    pub fn selected_region(&self) -> Option<&RegionRecord> {
        let name = self.region_state.selected().and_then(|i| self.regions.get(i))?;
        self.dataset.records.iter().find(|r| &r.id == name)
    }

    /// Region the score breakdown popup describes for the current tab
    pub fn breakdown_target(&self) -> Option<&RegionRecord> {
        match self.current_tab {
            Tab::Overview => self.selected_top(),
            _ => self.selected_region(),
        }
    }

    /// Select a region by exact identifier and return whether it exists
    pub fn select_region(&mut self, name: &str) -> bool {
        match self.regions.iter().position(|r| r == name) {
            Some(i) => {
                self.region_state.select(Some(i));
                true
            }
            None => false,
        }
    }

    /// Jump from the top-N table to the detail tab of the highlighted region
    pub fn open_selected(&mut self) {
        let name = match self.selected_top() {
            Some(record) => record.id.clone(),
            None => return,
        };
        if self.select_region(&name) {
            self.current_tab = Tab::Region;
        }
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input.clear();
    }

    /// Select the first region whose name contains the query
    pub fn confirm_search(&mut self) {
        let query = self.search_input.trim().to_string();
        self.input_mode = InputMode::Normal;
        self.search_input.clear();

        if query.is_empty() {
            return;
        }

        let found = search_regions(&self.dataset, &query)
            .first()
            .map(|name| name.to_string());
        match found {
            Some(name) => {
                self.select_region(&name);
                self.current_tab = Tab::Region;
                self.show_flash(format!("Selected: {}", name));
            }
            None => self.show_flash(format!("No region matches '{}'", query)),
        }
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_score_breakdown(&mut self) {
        if self.breakdown_target().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Highest score in the dataset, for scaling score bars
    pub fn max_score(&self) -> f64 {
        self.top
            .iter()
            .filter_map(|r| r.investment_score)
            .fold(0.0_f64, f64::max)
    }
}

fn wrap_next(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

fn wrap_previous(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    })
}
