use common::persistence::ScoreEntry;
use egui::{Color32, CornerRadius, FontId, Sense, Vec2};

use crate::skins::{FRUIT_SKINS, SNAKE_SKINS, snake_segment_color};
use crate::theme;

const PREVIEW_CELL: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    OpenSkins,
    OpenInstructions,
    OpenLeaderboard,
    ResetLeaderboard,
    Exit,
}

pub fn show_main_menu(
    ctx: &egui::Context,
    snake_skin_idx: usize,
    fruit_skin_idx: usize,
    best: Option<&ScoreEntry>,
) -> Option<MenuAction> {
    let mut action = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            theme::paint_background(ui.painter(), ui.max_rect());

            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    egui::RichText::new("Snake Arcade")
                        .size(56.0)
                        .strong()
                        .color(theme::TITLE),
                );
                ui.add_space(20.0);

                draw_selection_previews(ui, snake_skin_idx, fruit_skin_idx);
                ui.add_space(8.0);

                match best {
                    Some(entry) => ui.label(
                        egui::RichText::new(format!("High Score: {}", entry.score))
                            .size(20.0)
                            .color(theme::HUD_TEXT),
                    ),
                    None => ui.label(
                        egui::RichText::new("No High Score yet. Be the first!")
                            .size(20.0)
                            .color(theme::HUD_TEXT),
                    ),
                };
                ui.add_space(24.0);

                let buttons = [
                    ("Start", MenuAction::StartGame),
                    ("Skins", MenuAction::OpenSkins),
                    ("Instructions", MenuAction::OpenInstructions),
                    ("Leaderboard", MenuAction::OpenLeaderboard),
                    ("Reset scores", MenuAction::ResetLeaderboard),
                    ("Exit", MenuAction::Exit),
                ];
                for (label, button_action) in buttons {
                    if theme::menu_button(ui, label).clicked() {
                        action = Some(button_action);
                    }
                    ui.add_space(10.0);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = Some(MenuAction::Exit);
    }

    action
}

fn draw_selection_previews(ui: &mut egui::Ui, snake_skin_idx: usize, fruit_skin_idx: usize) {
    ui.horizontal(|ui| {
        let total_width = 2.0 * 150.0 + 30.0;
        let pad = (ui.available_width() - total_width).max(0.0) / 2.0;
        ui.add_space(pad);

        ui.vertical(|ui| {
            ui.label(egui::RichText::new("Snake Skin").color(theme::HUD_TEXT));
            paint_snake_preview(ui, snake_skin_idx, false);
        });
        ui.add_space(30.0);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new("Fruit Skin").color(theme::HUD_TEXT));
            paint_fruit_preview(ui, fruit_skin_idx, false);
        });
    });
}

/// A four-segment snake swatch. Returns true when clicked.
pub fn paint_snake_preview(ui: &mut egui::Ui, skin_idx: usize, selectable: bool) -> bool {
    let sense = if selectable { Sense::click() } else { Sense::hover() };
    let (response, painter) = ui.allocate_painter(Vec2::new(150.0, 40.0), sense);
    let rect = response.rect;

    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_rgb(50, 50, 50));
    for segment in 0..4 {
        let x = rect.min.x + 12.0 + segment as f32 * (PREVIEW_CELL + 4.0);
        let y = rect.center().y - PREVIEW_CELL / 2.0;
        painter.rect_filled(
            egui::Rect::from_min_size(egui::pos2(x, y), Vec2::splat(PREVIEW_CELL)),
            CornerRadius::same(4),
            snake_segment_color(skin_idx, segment, 0.0),
        );
    }

    selectable && response.clicked()
}

pub fn paint_fruit_preview(ui: &mut egui::Ui, skin_idx: usize, selectable: bool) -> bool {
    let sense = if selectable { Sense::click() } else { Sense::hover() };
    let (response, painter) = ui.allocate_painter(Vec2::new(150.0, 40.0), sense);
    let rect = response.rect;

    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_rgb(50, 50, 50));
    painter.circle_filled(rect.center(), PREVIEW_CELL / 2.0 + 4.0, Color32::WHITE);
    painter.circle_filled(rect.center(), PREVIEW_CELL / 2.0, FRUIT_SKINS[skin_idx].color);

    selectable && response.clicked()
}

/// Returns true when the player wants to go back to the menu.
pub fn show_skin_picker(
    ctx: &egui::Context,
    snake_skin_idx: &mut usize,
    fruit_skin_idx: &mut usize,
) -> bool {
    let mut back = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            theme::paint_background(ui.painter(), ui.max_rect());

            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(
                    egui::RichText::new("Select Your Skins")
                        .size(44.0)
                        .strong()
                        .color(theme::TITLE),
                );
                ui.add_space(30.0);

                ui.label(egui::RichText::new("Snake Skins").size(22.0).color(theme::HUD_TEXT));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let pad = (ui.available_width() - skin_row_width(SNAKE_SKINS.len())).max(0.0) / 2.0;
                    ui.add_space(pad);
                    for (idx, skin) in SNAKE_SKINS.iter().enumerate() {
                        ui.vertical(|ui| {
                            if paint_snake_preview(ui, idx, true) {
                                *snake_skin_idx = idx;
                            }
                            if ui
                                .selectable_label(*snake_skin_idx == idx, skin.name)
                                .clicked()
                            {
                                *snake_skin_idx = idx;
                            }
                        });
                    }
                });

                ui.add_space(30.0);
                ui.label(egui::RichText::new("Fruit Skins").size(22.0).color(theme::HUD_TEXT));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let pad = (ui.available_width() - skin_row_width(FRUIT_SKINS.len())).max(0.0) / 2.0;
                    ui.add_space(pad);
                    for (idx, skin) in FRUIT_SKINS.iter().enumerate() {
                        ui.vertical(|ui| {
                            if paint_fruit_preview(ui, idx, true) {
                                *fruit_skin_idx = idx;
                            }
                            if ui
                                .selectable_label(*fruit_skin_idx == idx, skin.name)
                                .clicked()
                            {
                                *fruit_skin_idx = idx;
                            }
                        });
                    }
                });

                ui.add_space(40.0);
                if theme::menu_button(ui, "Back").clicked() {
                    back = true;
                }
            });
        });

    back
}

fn skin_row_width(count: usize) -> f32 {
    count as f32 * 150.0 + (count as f32 - 1.0) * 8.0
}

pub fn show_instructions(ctx: &egui::Context) -> bool {
    let mut back = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    let lines = [
        "Use arrow keys or WASD to move the snake.",
        "Eat fruit to grow and increase your score.",
        "Avoid hitting walls, obstacles and yourself.",
        "Pause with P. In the pause menu: Resume, Restart, or Quit.",
        "Power-ups appear randomly: speed boost (cyan) & slow down (magenta).",
        "Save with F5 and load with F9 during gameplay.",
        "Use the Skins menu to customize snake and fruit appearance.",
        "Press ESC anytime to exit to the main menu.",
        "Enjoy the colorful snake adventure!",
    ];

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            theme::paint_background(ui.painter(), ui.max_rect());

            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(
                    egui::RichText::new("Instructions")
                        .size(44.0)
                        .strong()
                        .color(theme::TITLE),
                );
                ui.add_space(30.0);

                for line in lines {
                    ui.label(egui::RichText::new(line).size(20.0).color(theme::HUD_TEXT));
                    ui.add_space(8.0);
                }

                ui.add_space(30.0);
                if theme::menu_button(ui, "Back").clicked() {
                    back = true;
                }
            });
        });

    back
}

pub fn show_leaderboard(ctx: &egui::Context, entries: &[ScoreEntry]) -> bool {
    let mut back = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            theme::paint_background(ui.painter(), ui.max_rect());

            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(
                    egui::RichText::new("Leaderboard (Top 5)")
                        .size(44.0)
                        .strong()
                        .color(theme::TITLE),
                );
                ui.add_space(30.0);

                if entries.is_empty() {
                    ui.label(
                        egui::RichText::new("No scores yet. Play to set a record!")
                            .size(22.0)
                            .color(theme::HUD_TEXT),
                    );
                } else {
                    for (rank, entry) in entries.iter().enumerate() {
                        ui.label(
                            egui::RichText::new(format!(
                                "{}. {} - {}",
                                rank + 1,
                                entry.name,
                                entry.score
                            ))
                            .font(FontId::monospace(24.0))
                            .color(theme::HUD_TEXT),
                        );
                        ui.add_space(10.0);
                    }
                }

                ui.add_space(30.0);
                if theme::menu_button(ui, "Back").clicked() {
                    back = true;
                }
            });
        });

    back
}
