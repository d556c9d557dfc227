use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{UseCase, WeldNeed};
use crate::data::model::Property;
use crate::state::{AppState, ExploreTab, Mode, NavAction, Page, MAX_COMPARED};

// ---------------------------------------------------------------------------
// Left side panel – mode inputs
// ---------------------------------------------------------------------------

/// Render the left input panel of the workspace.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, mode: Mode) {
    if ui.button("⬅ Cambiar Modo").clicked() {
        state.navigate(NavAction::ChangeMode);
        return;
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match mode {
            Mode::Simple => simple_inputs(ui, state),
            Mode::Technical => technical_inputs(ui, state),
            Mode::Explore => explore_inputs(ui, state),
        });
}

fn simple_inputs(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🏠 MODO SIMPLE");
    ui.separator();

    ui.strong("PASO 1 DE 3");
    ui.label("¿Para qué lo usarás?");
    for use_case in UseCase::ALL {
        ui.radio_value(&mut state.simple.use_case, use_case, use_case.label());
    }
    ui.separator();

    ui.strong("PASO 2 DE 3");
    ui.label("¿Necesitas soldarlo?");
    for weld in WeldNeed::ALL {
        ui.radio_value(&mut state.simple.weld, weld, weld.label());
    }
    ui.separator();

    ui.strong("PASO 3 DE 3");
    ui.label("¿Qué tan duro debe ser?");
    ui.add(egui::Slider::new(&mut state.simple.hardness_level, 1..=5).text("Dureza"));
    ui.separator();

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui.button(RichText::new("🔍 BUSCAR ACEROS").strong()).clicked() {
            state.search_simple();
        }
    });
}

fn technical_inputs(ui: &mut Ui, state: &mut AppState) {
    ui.heading("⚙ MODO TÉCNICO");
    ui.separator();

    let mut changed = false;
    for property in Property::MECHANICAL {
        let Some((lo, hi)) = state.dataset.bounds(property) else {
            continue;
        };
        let Some(range) = state.technical.range_mut(property) else {
            continue;
        };
        ui.strong(property.label());
        let min_moved = ui
            .add(egui::Slider::new(&mut range.min, lo..=hi).text("mín"))
            .changed();
        let max_moved = ui
            .add(egui::Slider::new(&mut range.max, lo..=hi).text("máx"))
            .changed();
        // the dragged slider stops at the other one
        if min_moved {
            range.clamp_min();
        }
        if max_moved {
            range.clamp_max();
        }
        changed |= min_moved || max_moved;
        ui.add_space(4.0);
    }
    if changed {
        state.refilter();
    }

    ui.separator();
    ui.strong("Tratamientos Disponibles");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Todos").clicked() {
            state.select_all_treatments();
        }
        if ui.small_button("Ninguno").clicked() {
            state.select_no_treatments();
        }
    });

    let treatments: Vec<String> = state.dataset.treatments.iter().cloned().collect();
    for treatment in &treatments {
        let mut checked = state.technical.treatments.contains(treatment);
        let text = RichText::new(treatment).color(state.color_map.color_for(treatment));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_treatment(treatment);
        }
    }

    ui.separator();
    if ui.button("Restablecer filtros").clicked() {
        state.reset_technical();
    }
}

fn explore_inputs(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📊 MODO EXPLORAR");
    ui.separator();

    ui.selectable_value(
        &mut state.explore.tab,
        ExploreTab::PropertiesVsCarbon,
        "Propiedades vs %C",
    );
    ui.selectable_value(&mut state.explore.tab, ExploreTab::Treatments, "Tratamientos");
    ui.selectable_value(&mut state.explore.tab, ExploreTab::Comparison, "Comparación");
    ui.separator();

    match state.explore.tab {
        ExploreTab::PropertiesVsCarbon => {
            ui.label("Dureza se muestra ×4 y elongación ×20 para compartir el eje.");
        }
        ExploreTab::Treatments => {
            ui.label("Selecciona propiedad:");
            egui::ComboBox::from_id_salt("box_property")
                .selected_text(state.explore.property.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for property in Property::MECHANICAL {
                        ui.selectable_value(&mut state.explore.property, property, property.label());
                    }
                });
        }
        ExploreTab::Comparison => {
            ui.label(format!("Selecciona hasta {MAX_COMPARED} aceros para comparar:"));
            let grades = state.dataset.grades.clone();
            for grade in &grades {
                let mut checked = state.explore.compared.contains(grade);
                let enabled = checked || state.explore.compared.len() < MAX_COMPARED;
                let response =
                    ui.add_enabled(enabled, egui::Checkbox::new(&mut checked, format!("SAE {grade}")));
                if response.changed() {
                    state.toggle_compared(grade);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} aceros cargados", state.dataset.len()));

        if let Page::Workspace(Mode::Technical) = state.page {
            ui.separator();
            ui.label(format!("{} visibles", state.technical_results.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir tabla de aceros")
        .add_filter("Archivos soportados", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} steel records with treatments {:?}",
                    dataset.len(),
                    dataset.treatments
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn save_export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar a CSV")
        .set_file_name(crate::data::export::DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_technical(&path);
    }
}
