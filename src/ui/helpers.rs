// src/ui/helpers.rs
use egui::{Button, Color32, Frame, Margin, RichText, Stroke, Ui, Vec2};

pub const BUTTON_HEIGHT: f32 = 36.0;

pub fn big_button(ui: &mut Ui, label: &str, width: f32, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        Button::new(label).min_size(Vec2::new(width, BUTTON_HEIGHT)),
    )
    .clicked()
}

/// Botón de opción a ancho completo, resaltado si es la elegida.
pub fn option_button(ui: &mut Ui, text: &str, selected: bool) -> bool {
    let width = ui.available_width();
    ui.add(
        Button::new(text)
            .selected(selected)
            .min_size(Vec2::new(width, 30.0)),
    )
    .clicked()
}

pub fn error_box(ui: &mut Ui, message: &str, files: &[String]) {
    Frame::group(ui.style())
        .stroke(Stroke::new(1.5, Color32::from_rgb(0xD0, 0x40, 0x40)))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("🚫 {message}"))
                    .color(Color32::from_rgb(0xE0, 0x50, 0x50))
                    .strong(),
            );
            for file in files {
                ui.label(format!("  • {file}"));
            }
        });
}

/// Tarjeta con borde verde (correcta) o rojo (incorrecta).
pub fn verdict_card(ui: &mut Ui, is_correct: bool, inner: impl FnOnce(&mut Ui)) {
    let color = if is_correct {
        Color32::from_rgb(0x3C, 0xA0, 0x50)
    } else {
        Color32::from_rgb(0xD0, 0x40, 0x40)
    };
    Frame::group(ui.style())
        .stroke(Stroke::new(1.5, color))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            inner(ui);
        });
}
