use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::model::{Property, SteelRecord};
use crate::data::stats::summary_by_treatment;
use crate::state::{AppState, ExploreTab};

const PLOT_HEIGHT: f32 = 500.0;
const BAR_WIDTH: f64 = 0.25;

/// Series of the properties-vs-carbon chart: property, scale factor, colour.
const CARBON_SERIES: [(Property, f64, &str, Color32); 4] = [
    (Property::Uts, 1.0, "UTS", Color32::from_rgb(0x3B, 0x82, 0xF6)),
    (Property::YieldStrength, 1.0, "YS", Color32::from_rgb(0x10, 0xB9, 0x81)),
    (Property::Hardness, 4.0, "Dureza (×4)", Color32::from_rgb(0xEF, 0x44, 0x44)),
    (Property::Elongation, 20.0, "Elongación (×20)", Color32::from_rgb(0xF5, 0x9E, 0x0B)),
];

// ---------------------------------------------------------------------------
// Explore mode (central panel)
// ---------------------------------------------------------------------------

/// Render the chart of the selected explore tab.
pub fn explore(ui: &mut Ui, state: &AppState) {
    ui.heading("📊 EXPLORACIÓN DE DATOS");

    if state.dataset.is_empty() {
        ui.label("El dataset está vacío.");
        return;
    }

    match state.explore.tab {
        ExploreTab::PropertiesVsCarbon => properties_vs_carbon(ui, &state.dataset.records),
        ExploreTab::Treatments => treatment_boxes(ui, state),
        ExploreTab::Comparison => comparison_bars(ui, state),
    }
}

/// Points `(carbon_avg, value × factor)` of records defining both, sorted by
/// carbon content.
pub fn carbon_series(records: &[SteelRecord], property: Property, factor: f64) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = records
        .iter()
        .filter_map(|r| Some([Property::CarbonAvg.value(r)?, property.value(r)? * factor]))
        .collect();
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    points
}

fn properties_vs_carbon(ui: &mut Ui, records: &[SteelRecord]) {
    ui.strong("Propiedades Mecánicas vs Contenido de Carbono");

    Plot::new("properties_vs_carbon")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(Property::CarbonAvg.label())
        .y_axis_label("Valor")
        .show(ui, |plot_ui| {
            for (property, factor, name, color) in CARBON_SERIES {
                let points = carbon_series(records, property, factor);
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(name)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

fn treatment_boxes(ui: &mut Ui, state: &AppState) {
    let property = state.explore.property;
    ui.strong(format!("Distribución de {property} por Tratamiento"));

    let summaries = summary_by_treatment(&state.dataset.records, property);
    if summaries.is_empty() {
        ui.label("Sin valores definidos para esta propiedad.");
        return;
    }

    Plot::new("treatment_boxes")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Tratamiento")
        .y_axis_label(property.label())
        .show(ui, |plot_ui| {
            for (i, (treatment, s)) in summaries.iter().enumerate() {
                let color = state.color_map.color_for(treatment);
                let elem = BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                    .name(treatment)
                    .fill(color.linear_multiply(0.3))
                    .stroke(Stroke::new(1.5, color))
                    .box_width(0.6);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(treatment).color(color));
            }
        });
}

fn comparison_bars(ui: &mut Ui, state: &AppState) {
    ui.strong("Comparación Directa de Aceros");

    let compared: Vec<&SteelRecord> = state
        .explore
        .compared
        .iter()
        .filter_map(|g| state.dataset.first_of_grade(g))
        .collect();
    if compared.is_empty() {
        ui.label("Selecciona aceros en el panel izquierdo.");
        return;
    }

    let axis: Vec<String> = Property::MECHANICAL
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{i} = {}", p.label()))
        .collect();
    ui.label(axis.join("   "));

    let colors = generate_palette(compared.len());
    let center = (compared.len() as f64 - 1.0) / 2.0;

    Plot::new("comparison_bars")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_label("Valor")
        .show(ui, |plot_ui| {
            for (gi, (record, color)) in compared.iter().zip(colors).enumerate() {
                let offset = (gi as f64 - center) * BAR_WIDTH;
                let bars: Vec<Bar> = Property::MECHANICAL
                    .iter()
                    .enumerate()
                    .filter_map(|(pi, p)| {
                        let value = p.value(record)?;
                        Some(Bar::new(pi as f64 + offset, value).width(BAR_WIDTH).name(p.label()))
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(format!("SAE {}", record.grade))
                        .color(color),
                );
            }
        });
}
