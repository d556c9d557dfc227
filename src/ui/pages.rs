use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Property;
use crate::state::{AppState, Mode, NavAction};

const LOGO: &str = r"
 █████╗  ██████╗███████╗██████╗  ██████╗ ███████╗
██╔══██╗██╔════╝██╔════╝██╔══██╗██╔═══██╗██╔════╝
███████║██║     █████╗  ██████╔╝██║   ██║███████╗
██╔══██║██║     ██╔══╝  ██╔══██╗██║   ██║╚════██║
██║  ██║╚██████╗███████╗██║  ██║╚██████╔╝███████║
╚═╝  ╚═╝ ╚═════╝╚══════╝╚═╝  ╚═╝ ╚═════╝ ╚══════╝
              F I S
   INGENIERÍA EN MATERIALES
   UNAM - Facultad de Ingeniería
";

const ACCENT: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);

// ---------------------------------------------------------------------------
// Landing page
// ---------------------------------------------------------------------------

pub fn landing(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(12.0);
        ui.label(RichText::new(LOGO).monospace().size(11.0));
        ui.heading(RichText::new("🔩 Selector de Aceros al Carbono").strong());
        ui.label("Encuentra el acero adecuado para tu proyecto basándote en datos técnicos reales");
    });
    ui.add_space(16.0);

    let n_records = state.dataset.len().to_string();
    let n_treatments = state.dataset.treatments.len().to_string();
    let n_properties = Property::MECHANICAL.len().to_string();

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Aceros Analizados", &n_records, "Dataset cargado");
        metric(&mut cols[1], "Tratamientos", &n_treatments, "Térmicos y mecánicos");
        metric(
            &mut cols[2],
            "Propiedades",
            &n_properties,
            "UTS, YS, Dureza, Elongación",
        );
    });

    ui.separator();
    ui.vertical_centered_justified(|ui: &mut Ui| {
        let button = egui::Button::new(RichText::new("🚀 COMENZAR SELECCIÓN").strong())
            .fill(ACCENT)
            .min_size(egui::vec2(0.0, 40.0));
        if ui.add(button).clicked() {
            state.navigate(NavAction::Start);
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str, caption: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(28.0).strong());
        ui.label(RichText::new(caption).small().color(Color32::from_rgb(0x10, 0xB9, 0x81)));
    });
}

// ---------------------------------------------------------------------------
// Mode selector
// ---------------------------------------------------------------------------

struct ModeCard {
    mode: Mode,
    title: &'static str,
    audience: &'static str,
    pitch: &'static str,
    perks: [&'static str; 2],
    button: &'static str,
}

const MODE_CARDS: [ModeCard; 3] = [
    ModeCard {
        mode: Mode::Simple,
        title: "🏠 MODO SIMPLE",
        audience: "Para todos",
        pitch: "Necesito algo resistente para...",
        perks: ["✓ Sin términos técnicos", "✓ Guiado paso a paso"],
        button: "Seleccionar Simple",
    },
    ModeCard {
        mode: Mode::Technical,
        title: "⚙ MODO TÉCNICO",
        audience: "Para ingenieros",
        pitch: "Conozco las propiedades que necesito",
        perks: ["✓ Control fino", "✓ Filtros avanzados"],
        button: "Seleccionar Técnico",
    },
    ModeCard {
        mode: Mode::Explore,
        title: "📊 MODO EXPLORAR",
        audience: "Para análisis",
        pitch: "Quiero ver tendencias y datos",
        perks: ["✓ Visualizaciones", "✓ Gráficas interactivas"],
        button: "Seleccionar Explorar",
    },
];

pub fn mode_selector(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("¿Qué tipo de proyecto tienes?");
    });
    ui.add_space(12.0);

    let mut chosen = None;
    ui.columns(MODE_CARDS.len(), |cols| {
        for (col, card) in cols.iter_mut().zip(MODE_CARDS.iter()) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.heading(card.title);
                    ui.strong(card.audience);
                    ui.label(card.pitch);
                    for perk in card.perks {
                        ui.label(perk);
                    }
                    if ui.button(card.button).clicked() {
                        chosen = Some(card.mode);
                    }
                });
            });
        }
    });

    if let Some(mode) = chosen {
        log::debug!("Mode selected: {mode:?}");
        state.navigate(NavAction::ChooseMode(mode));
    }
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(
                "Aceros FIS - Desarrollado por Fernando Alfaro, Samuel Estrada, Israel González",
            )
            .small()
            .strong(),
        );
        ui.label(
            RichText::new("UNAM - Facultad de Ingeniería | Ingeniería de Materiales 2026-1")
                .small()
                .color(Color32::from_rgb(0x6B, 0x72, 0x80)),
        );
    });
}
