use eframe::egui;

use crate::data::model::SteelDataset;
use crate::state::{AppState, Mode, Page};
use crate::ui::{pages, panels, plot, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AcerosApp {
    pub state: AppState,
}

impl AcerosApp {
    pub fn new(dataset: SteelDataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for AcerosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: credits ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            pages::footer(ui);
        });

        match self.state.page {
            Page::Landing => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    pages::landing(ui, &mut self.state);
                });
            }
            Page::ModeSelector => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    pages::mode_selector(ui, &mut self.state);
                });
            }
            Page::Workspace(mode) => {
                // ---- Left side panel: mode inputs ----
                egui::SidePanel::left("input_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::side_panel(ui, &mut self.state, mode);
                    });

                // ---- Central panel: results or charts ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    match mode {
                        Mode::Simple => results::simple_results(ui, &self.state),
                        Mode::Technical => results::technical_results(ui, &mut self.state),
                        Mode::Explore => plot::explore(ui, &self.state),
                    }
                });
            }
        }
    }
}
