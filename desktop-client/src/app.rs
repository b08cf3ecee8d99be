use std::path::Path;

use common::log;
use common::persistence::{self, ScoreEntry};

use crate::audio::Sfx;
use crate::config::Config;
use crate::game_ui::{self, PlayingAction, PlayingState};
use crate::menu_ui::{self, MenuAction};
use crate::name_entry::{self, NameEntryState};

enum Screen {
    Menu,
    SkinPicker,
    Instructions,
    Leaderboard,
    Playing(Box<PlayingState>),
    NameEntry(NameEntryState),
}

pub struct ArcadeApp {
    config: Config,
    audio: Sfx,
    screen: Screen,
    snake_skin_idx: usize,
    fruit_skin_idx: usize,
    /// Cached leaderboard, refreshed whenever a menu screen is entered.
    leaderboard: Vec<ScoreEntry>,
}

impl ArcadeApp {
    pub fn new(config: Config) -> Self {
        let audio = Sfx::new(config.audio.volume, config.audio.music_enabled);
        let leaderboard = persistence::load_leaderboard(Path::new(&config.data.leaderboard_file));
        Self {
            config,
            audio,
            screen: Screen::Menu,
            snake_skin_idx: 0,
            fruit_skin_idx: 0,
            leaderboard,
        }
    }

    fn leaderboard_path(&self) -> &Path {
        Path::new(&self.config.data.leaderboard_file)
    }

    fn go_to_menu(&mut self) {
        self.leaderboard = persistence::load_leaderboard(self.leaderboard_path());
        self.screen = Screen::Menu;
    }
}

impl eframe::App for ArcadeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut next_screen: Option<Screen> = None;

        match &mut self.screen {
            Screen::Menu => {
                let best = self.leaderboard.first();
                match menu_ui::show_main_menu(ctx, self.snake_skin_idx, self.fruit_skin_idx, best) {
                    Some(MenuAction::StartGame) => {
                        next_screen = Some(Screen::Playing(Box::new(PlayingState::start(
                            &self.config,
                            self.snake_skin_idx,
                            self.fruit_skin_idx,
                        ))));
                    }
                    Some(MenuAction::OpenSkins) => next_screen = Some(Screen::SkinPicker),
                    Some(MenuAction::OpenInstructions) => next_screen = Some(Screen::Instructions),
                    Some(MenuAction::OpenLeaderboard) => {
                        self.leaderboard = persistence::load_leaderboard(self.leaderboard_path());
                        next_screen = Some(Screen::Leaderboard);
                    }
                    Some(MenuAction::ResetLeaderboard) => {
                        match persistence::reset_leaderboard(self.leaderboard_path()) {
                            Ok(()) => self.leaderboard.clear(),
                            Err(e) => log!("Failed to reset leaderboard: {}", e),
                        }
                    }
                    Some(MenuAction::Exit) => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    None => {}
                }
            }

            Screen::SkinPicker => {
                if menu_ui::show_skin_picker(ctx, &mut self.snake_skin_idx, &mut self.fruit_skin_idx)
                {
                    next_screen = Some(Screen::Menu);
                }
            }

            Screen::Instructions => {
                if menu_ui::show_instructions(ctx) {
                    next_screen = Some(Screen::Menu);
                }
            }

            Screen::Leaderboard => {
                if menu_ui::show_leaderboard(ctx, &self.leaderboard) {
                    next_screen = Some(Screen::Menu);
                }
            }

            Screen::Playing(state) => {
                match game_ui::show_game(ctx, state, &self.audio, &self.config) {
                    Some(PlayingAction::ExitToMenu) => {
                        // Non-scoring exit: straight back to the menu.
                        next_screen = Some(Screen::Menu);
                    }
                    Some(PlayingAction::GameOver(score)) => {
                        next_screen = Some(Screen::NameEntry(NameEntryState::new(score)));
                    }
                    None => {}
                }
            }

            Screen::NameEntry(state) => {
                if let Some(name) = name_entry::show_name_entry(ctx, state) {
                    let score = state.score;
                    let path = Path::new(&self.config.data.leaderboard_file);
                    if let Err(e) = persistence::record_score(path, &name, score) {
                        log!("Failed to record score: {}", e);
                    }
                    next_screen = Some(Screen::Menu);
                }
            }
        }

        if let Some(screen) = next_screen {
            match screen {
                Screen::Menu => self.go_to_menu(),
                other => self.screen = other,
            }
        }
    }
}
