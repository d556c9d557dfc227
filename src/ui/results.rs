use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SteelRecord;
use crate::state::AppState;
use crate::ui::{fmt_value, panels};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const RANK_LABELS: [&str; 3] = ["MEJOR OPCIÓN", "ALTERNATIVA", "OTRA OPCIÓN"];

const WARNING: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

// Full-scale values of the guided-mode bars.
const UTS_SCALE: f64 = 1000.0;
const HARDNESS_SCALE: f64 = 400.0;
const ELONGATION_SCALE: f64 = 40.0;

// ---------------------------------------------------------------------------
// Simple mode
// ---------------------------------------------------------------------------

/// Recommendation cards of the last guided search.
pub fn simple_results(ui: &mut Ui, state: &AppState) {
    let Some(found) = &state.simple_results else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Responde las tres preguntas y pulsa «BUSCAR ACEROS»");
        });
        return;
    };

    ui.heading("RECOMENDACIONES PARA TU PROYECTO");

    if found.is_empty() {
        ui.label(
            RichText::new(
                "No se encontraron aceros con estos criterios. Intenta ajustar tus requisitos.",
            )
            .color(WARNING),
        );
        return;
    }

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        for (rank, &idx) in found.iter().enumerate().take(MEDALS.len()) {
            recommendation_card(ui, rank, &state.dataset.records[idx]);
        }
    });
}

fn recommendation_card(ui: &mut Ui, rank: usize, record: &SteelRecord) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.heading(format!(
            "{} {}: SAE {} ({})",
            MEDALS[rank],
            RANK_LABELS[rank],
            record.grade,
            record.condition_simple.as_deref().unwrap_or("—"),
        ));

        ui.columns(2, |cols| {
            cols[0].label("✓ Características principales");
            bar(
                &mut cols[0],
                record.uts,
                UTS_SCALE,
                format!("💪 Resistencia: {} MPa", fmt_value(record.uts, 0)),
            );
            bar(
                &mut cols[0],
                record.hardness,
                HARDNESS_SCALE,
                format!("🔨 Dureza: {} HB", fmt_value(record.hardness, 0)),
            );
            bar(
                &mut cols[0],
                record.elongation,
                ELONGATION_SCALE,
                format!("🌊 Flexibilidad: {}%", fmt_value(record.elongation, 0)),
            );

            cols[1].label("Carbono");
            cols[1].label(
                RichText::new(format!("{}%", fmt_value(record.carbon_avg, 2)))
                    .size(20.0)
                    .strong(),
            );
            cols[1].label("Límite Elástico");
            cols[1].label(
                RichText::new(format!("{} MPa", fmt_value(record.yield_strength, 0)))
                    .size(20.0)
                    .strong(),
            );
        });
    });
    ui.add_space(8.0);
}

fn bar(ui: &mut Ui, value: Option<f64>, scale: f64, text: String) {
    let fraction = value.map_or(0.0, |v| (v / scale).clamp(0.0, 1.0)) as f32;
    ui.add(egui::ProgressBar::new(fraction).text(text));
}

// ---------------------------------------------------------------------------
// Technical mode
// ---------------------------------------------------------------------------

const TABLE_HEADERS: [&str; 8] = [
    "SAE Grade",
    "Tratamiento",
    "UTS (MPa)",
    "YS (MPa)",
    "Hardness (HB)",
    "Elongation (%)",
    "C_avg",
    "Coincidencia",
];

/// Result table of the technical filter with export, or the closest
/// alternatives when nothing matches.
pub fn technical_results(ui: &mut Ui, state: &mut AppState) {
    let n = state.technical_results.len();
    ui.heading(format!("RESULTADOS ({n} aceros coinciden)"));

    if n == 0 {
        ui.label(
            RichText::new("No se encontraron aceros con estos criterios. Ajusta los filtros.")
                .color(WARNING),
        );
        closest_matches(ui, state);
        return;
    }

    if ui.button("📥 Exportar a CSV").clicked() {
        panels::save_export_dialog(state);
    }
    ui.add_space(6.0);

    let rows: Vec<(&SteelRecord, String)> = state
        .technical_results
        .iter()
        .map(|&i| (&state.dataset.records[i], state.score_of(i).stars))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(70.0), TABLE_HEADERS.len())
        .header(22.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (record, stars) in &rows {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&record.grade);
                    });
                    row.col(|ui: &mut Ui| {
                        let treatment = record.condition_simple.as_deref().unwrap_or("—");
                        ui.label(RichText::new(treatment).color(state.color_map.color_for(treatment)));
                    });
                    for value in [record.uts, record.yield_strength, record.hardness, record.elongation] {
                        row.col(|ui: &mut Ui| {
                            ui.label(fmt_value(value, 0));
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_value(record.carbon_avg, 3));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(stars);
                    });
                });
            }
        });
}

fn closest_matches(ui: &mut Ui, state: &AppState) {
    let closest = state.closest_matches();
    if closest.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.strong("Alternativas más cercanas:");
    for (idx, result) in closest {
        let record = &state.dataset.records[idx];
        ui.label(format!(
            "{}  SAE {} ({}) · {} MPa · {}%",
            result.stars,
            record.grade,
            record.condition_simple.as_deref().unwrap_or("—"),
            fmt_value(record.uts, 0),
            fmt_value(record.elongation, 0),
        ));
    }
}
