use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Stroke, Ui};

pub const BACKGROUND: Color32 = Color32::from_rgb(10, 20, 40);
pub const STRIPE: Color32 = Color32::from_rgb(20, 30, 70);
pub const TITLE: Color32 = Color32::from_rgb(255, 255, 0);
pub const HUD_TEXT: Color32 = Color32::WHITE;
pub const OBSTACLE: Color32 = Color32::from_rgb(70, 70, 70);
pub const SPEED_BOOST: Color32 = Color32::from_rgb(0, 255, 255);
pub const SLOW_DOWN: Color32 = Color32::from_rgb(255, 0, 255);

const STRIPE_STEP: f32 = 60.0;
const STRIPE_WIDTH: f32 = 15.0;

/// Dark blue backdrop with soft diagonal stripes, shared by every screen.
pub fn paint_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, CornerRadius::ZERO, BACKGROUND);

    let mut x = rect.min.x - rect.height();
    while x < rect.max.x {
        painter.line_segment(
            [
                Pos2::new(x, rect.min.y),
                Pos2::new(x + rect.height(), rect.max.y),
            ],
            Stroke::new(STRIPE_WIDTH, STRIPE),
        );
        x += STRIPE_STEP;
    }

    // Soften the stripes with a translucent overlay.
    painter.rect_filled(
        rect,
        CornerRadius::ZERO,
        Color32::from_rgba_unmultiplied(10, 20, 40, 80),
    );
}

/// A menu-sized button, so every screen gets the same footprint.
pub fn menu_button(ui: &mut Ui, label: &str) -> egui::Response {
    ui.add_sized(
        [300.0, 48.0],
        egui::Button::new(egui::RichText::new(label).size(22.0)),
    )
}
