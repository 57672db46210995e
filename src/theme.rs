//! Dark theme for the viewer chrome (the simulation canvas brings its own colors)

use egui::Color32;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);
    pub const BG_PANEL: Color32 = Color32::from_rgb(17, 17, 17);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(28, 28, 28);
    pub const BG_HOVER: Color32 = Color32::from_rgb(40, 40, 40);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 90, 90);

    pub const BORDER: Color32 = Color32::from_rgb(48, 48, 48);

    // === Connection status ===
    pub const STATUS_OK: Color32 = Color32::from_rgb(0, 255, 0);
    pub const STATUS_PENDING: Color32 = Color32::from_rgb(255, 255, 0);
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(255, 0, 0);
}

/// Status indicator color for a connection state
pub fn status_color(state: &crate::ws_state::WsState) -> Color32 {
    use crate::ws_state::WsState;
    match state {
        WsState::Connected => colors::STATUS_OK,
        WsState::Error(_) => colors::STATUS_ERROR,
        WsState::Connecting | WsState::Reconnecting { .. } => colors::STATUS_PENDING,
    }
}

/// Create dark egui Visuals
pub fn viewer_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;

    visuals.widgets.active.bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.selection.bg_fill = Color32::from_rgb(60, 60, 60);
    visuals.selection.stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    // Flat
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
