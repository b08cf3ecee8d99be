use crate::theme;

pub struct NameEntryState {
    pub score: u32,
    name: String,
    focus_requested: bool,
}

impl NameEntryState {
    pub fn new(score: u32) -> Self {
        Self {
            score,
            name: String::new(),
            focus_requested: false,
        }
    }
}

/// Returns the submitted name once the player confirms. Empty input is
/// allowed; sanitizing (and the placeholder) happens in the leaderboard.
pub fn show_name_entry(ctx: &egui::Context, state: &mut NameEntryState) -> Option<String> {
    let mut submitted = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            theme::paint_background(ui.painter(), ui.max_rect());

            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.25);
                ui.label(
                    egui::RichText::new(format!("Your Score: {}", state.score))
                        .size(52.0)
                        .strong()
                        .color(theme::TITLE),
                );
                ui.add_space(30.0);

                ui.label(
                    egui::RichText::new("Enter your name (letters/numbers/spaces only):")
                        .size(20.0)
                        .color(theme::HUD_TEXT),
                );
                ui.add_space(12.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.name)
                        .hint_text("Name")
                        .font(egui::TextStyle::Heading)
                        .desired_width(300.0),
                );

                if !state.focus_requested {
                    response.request_focus();
                    state.focus_requested = true;
                }

                let enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(20.0);
                let button_clicked = theme::menu_button(ui, "Submit").clicked();

                if enter_pressed || button_clicked {
                    submitted = Some(state.name.clone());
                }
            });
        });

    submitted
}
