use std::path::Path;
use std::time::{Duration, Instant};

use common::game::{Direction, GameSession, Point, PowerupKind};
use common::log;
use common::persistence;
use common::session_rng::SessionRng;
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, Vec2};

use crate::audio::Sfx;
use crate::config::Config;
use crate::skins::{FRUIT_SKINS, snake_segment_color};
use crate::theme;

const STATUS_DURATION: Duration = Duration::from_millis(2500);

/// Particle drift/shrink rates, in cell units per second.
const PARTICLE_RISE: f32 = 1.5;
const PARTICLE_SHRINK: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayingAction {
    ExitToMenu,
    GameOver(u32),
}

/// A burst fragment left behind by eaten fruit. Positions are in cell
/// coordinates so window resizes don't scatter them.
struct Particle {
    x: f32,
    y: f32,
    size: f32,
}

pub struct PlayingState {
    session: GameSession,
    rng: SessionRng,
    last_tick: Instant,
    particles: Vec<Particle>,
    status: Option<(String, Instant)>,
}

impl PlayingState {
    /// Starts a session from the menu: the save slot, if present and
    /// valid, is resumed; otherwise the game starts fresh.
    pub fn start(config: &Config, snake_skin_idx: usize, fruit_skin_idx: usize) -> Self {
        let settings = config.session_settings(snake_skin_idx, fruit_skin_idx);
        let mut rng = SessionRng::from_random();
        let save_path = Path::new(&config.data.save_file);

        let session = match persistence::load_game(save_path) {
            Ok(Some(doc)) => match GameSession::from_snapshot(&doc, &settings) {
                Ok(session) => {
                    log!("Resumed saved game (score {})", session.score);
                    session
                }
                Err(e) => {
                    log!("Saved game failed to validate ({}), starting fresh", e);
                    GameSession::new(settings, &mut rng)
                }
            },
            Ok(None) => GameSession::new(settings, &mut rng),
            Err(e) => {
                log!("Save slot is unreadable ({}), discarding it", e);
                if let Err(e) = persistence::discard_save(save_path) {
                    log!("Failed to discard corrupted save: {}", e);
                }
                GameSession::new(settings, &mut rng)
            }
        };

        Self::with_session(session, rng)
    }

    /// A brand-new session with the same settings, for restarts. The save
    /// slot is deliberately not consulted.
    fn restart(&mut self) {
        let settings = self.session.settings.clone();
        self.session = GameSession::new(settings, &mut self.rng);
        self.particles.clear();
        self.status = None;
        self.last_tick = Instant::now();
    }

    fn with_session(session: GameSession, rng: SessionRng) -> Self {
        Self {
            session,
            rng,
            last_tick: Instant::now(),
            particles: Vec::new(),
            status: None,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
    }

    fn save_game(&mut self, config: &Config) {
        let path = Path::new(&config.data.save_file);
        match persistence::save_game(path, &self.session.snapshot()) {
            Ok(()) => self.set_status("Game saved"),
            Err(e) => {
                log!("Failed to save game: {}", e);
                self.set_status("Save failed");
            }
        }
    }

    fn load_game(&mut self, config: &Config) {
        let path = Path::new(&config.data.save_file);
        match persistence::load_game(path) {
            Ok(Some(doc)) => match GameSession::from_snapshot(&doc, &self.session.settings) {
                Ok(session) => {
                    self.session = session;
                    self.particles.clear();
                    self.last_tick = Instant::now();
                    self.set_status("Game loaded");
                }
                Err(e) => {
                    // The file parsed but describes an impossible game;
                    // fall back to a clean session rather than guessing.
                    log!("Saved game failed to validate ({}), starting a new session", e);
                    self.restart();
                    self.set_status("Save was invalid - started a new game");
                }
            },
            Ok(None) => self.set_status("No saved game found"),
            Err(e) => {
                log!("Save slot is unreadable ({}), discarding it", e);
                if let Err(e) = persistence::discard_save(path) {
                    log!("Failed to discard corrupted save: {}", e);
                }
                self.set_status("Corrupted save discarded");
            }
        }
    }

    fn spawn_particles(&mut self, cell: Point) {
        let cx = cell.x as f32 + 0.5;
        let cy = cell.y as f32 + 0.5;
        for _ in 0..8 {
            self.particles.push(Particle {
                x: cx + self.rng.random_range(-0.5..0.5),
                y: cy + self.rng.random_range(-0.5..0.5),
                size: self.rng.random_range(0.1..0.2),
            });
        }
    }
}

struct FrameInput {
    escape: bool,
    pause: bool,
    save: bool,
    load: bool,
    turn: Option<Direction>,
    dt: f32,
    time: f64,
}

fn read_input(ctx: &egui::Context) -> FrameInput {
    ctx.input(|i| {
        let turn = if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
            Some(Direction::Up)
        } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
            Some(Direction::Down)
        } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
            Some(Direction::Left)
        } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
            Some(Direction::Right)
        } else {
            None
        };

        FrameInput {
            escape: i.key_pressed(egui::Key::Escape),
            pause: i.key_pressed(egui::Key::P),
            save: i.key_pressed(egui::Key::F5),
            load: i.key_pressed(egui::Key::F9),
            turn,
            dt: i.stable_dt,
            time: i.time,
        }
    })
}

pub fn show_game(
    ctx: &egui::Context,
    state: &mut PlayingState,
    sfx: &Sfx,
    config: &Config,
) -> Option<PlayingAction> {
    let input = read_input(ctx);

    if input.escape {
        sfx.resume_music();
        return Some(PlayingAction::ExitToMenu);
    }

    if input.pause {
        if state.session.toggle_pause() {
            sfx.pause_music();
        } else {
            sfx.resume_music();
            // Ticks do not accumulate while paused.
            state.last_tick = Instant::now();
        }
    }

    if state.session.is_running() {
        if let Some(direction) = input.turn {
            state.session.request_direction(direction);
        }
        if input.save {
            state.save_game(config);
        }
        if input.load {
            state.load_game(config);
        }
    }

    let mut ended = None;
    if state.session.is_running() && state.last_tick.elapsed() >= state.session.tick_interval() {
        state.last_tick = Instant::now();
        let report = state.session.advance_tick(&mut state.rng);

        if report.ate_food {
            sfx.play_eat();
            let head = state.session.snake.head();
            state.spawn_particles(head);
        }
        if let Some(reason) = report.ended {
            log!("Session over: {:?}, final score {}", reason, state.session.score);
            sfx.play_game_over();
            ended = Some(reason);
        }
    }

    draw_game(ctx, state, &input);

    if state.session.is_paused() {
        if let Some(action) = show_pause_menu(ctx, state, sfx) {
            return Some(action);
        }
        ctx.request_repaint_after(Duration::from_millis(100));
    } else {
        ctx.request_repaint_after(Duration::from_millis(16));
    }

    if ended.is_some() {
        return Some(PlayingAction::GameOver(state.session.score));
    }
    None
}

fn draw_game(ctx: &egui::Context, state: &mut PlayingState, input: &FrameInput) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let full = ui.max_rect();
            let painter = ui.painter();
            theme::paint_background(painter, full);

            let field = &state.session.settings.field;
            let cell = (full.width() / field.width as f32)
                .min(full.height() / field.height as f32);
            let board_size = Vec2::new(cell * field.width as f32, cell * field.height as f32);
            let board = Rect::from_center_size(full.center(), board_size);

            painter.rect_stroke(
                board,
                CornerRadius::ZERO,
                Stroke::new(1.0, Color32::from_gray(90)),
                egui::StrokeKind::Outside,
            );

            let cell_rect = |p: Point| {
                Rect::from_min_size(
                    Pos2::new(board.min.x + p.x as f32 * cell, board.min.y + p.y as f32 * cell),
                    Vec2::splat(cell),
                )
            };

            for obstacle in &state.session.obstacles {
                painter.rect_filled(
                    cell_rect(obstacle.position),
                    CornerRadius::same(4),
                    theme::OBSTACLE,
                );
            }

            for powerup in &state.session.powerups {
                let rect = cell_rect(powerup.position);
                let color = powerup_color(powerup.kind);
                painter.rect_filled(rect, CornerRadius::same(4), color);

                let c = rect.center();
                let arm = cell * 0.25;
                let stroke = Stroke::new(2.0, Color32::WHITE);
                painter.line_segment(
                    [Pos2::new(c.x - arm, c.y), Pos2::new(c.x + arm, c.y)],
                    stroke,
                );
                if powerup.kind == PowerupKind::SpeedBoost {
                    painter.line_segment(
                        [Pos2::new(c.x, c.y - arm), Pos2::new(c.x, c.y + arm)],
                        stroke,
                    );
                }
            }

            let fruit_color = FRUIT_SKINS[state.session.food.skin_idx].color;
            let food_center = cell_rect(state.session.food.position).center();
            painter.circle_filled(food_center, cell * 0.5, Color32::WHITE);
            painter.circle_filled(food_center, cell * 0.3, fruit_color);

            for particle in &mut state.particles {
                particle.y -= PARTICLE_RISE * input.dt;
                particle.size -= PARTICLE_SHRINK * input.dt;
                if particle.size > 0.0 {
                    painter.circle_filled(
                        Pos2::new(
                            board.min.x + particle.x * cell,
                            board.min.y + particle.y * cell,
                        ),
                        particle.size * cell,
                        fruit_color,
                    );
                }
            }
            state.particles.retain(|p| p.size > 0.0);

            let pulse = (input.time % 1.0) as f32;
            let skin_idx = state.session.snake.skin_idx;
            for (segment_idx, segment) in state.session.snake.body.iter().enumerate() {
                let rect = cell_rect(*segment).shrink(cell * 0.1);
                painter.rect_filled(
                    rect,
                    CornerRadius::same(5),
                    snake_segment_color(skin_idx, segment_idx, pulse),
                );
            }

            draw_hud(painter, full, state);
        });
}

fn draw_hud(painter: &egui::Painter, full: Rect, state: &PlayingState) {
    painter.text(
        full.min + Vec2::new(10.0, 10.0),
        Align2::LEFT_TOP,
        format!("Score: {}", state.session.score),
        FontId::monospace(24.0),
        theme::HUD_TEXT,
    );

    if let Some(effect) = state.session.active_effect {
        let seconds = state.session.active_effect_seconds().unwrap_or(0);
        painter.text(
            full.min + Vec2::new(10.0, 42.0),
            Align2::LEFT_TOP,
            format!("Powerup: {} ({}s)", effect.kind.display_name(), seconds),
            FontId::monospace(20.0),
            powerup_color(effect.kind),
        );
    }

    if let Some((message, since)) = &state.status {
        if since.elapsed() < STATUS_DURATION {
            painter.text(
                Pos2::new(full.min.x + 10.0, full.max.y - 10.0),
                Align2::LEFT_BOTTOM,
                message,
                FontId::proportional(18.0),
                theme::TITLE,
            );
        }
    }
}

fn show_pause_menu(
    ctx: &egui::Context,
    state: &mut PlayingState,
    sfx: &Sfx,
) -> Option<PlayingAction> {
    let mut action = None;

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("pause_dim"),
    ));
    let full = ctx.screen_rect();
    painter.rect_filled(full, CornerRadius::ZERO, Color32::from_black_alpha(180));
    painter.text(
        full.center() - Vec2::new(0.0, 110.0),
        Align2::CENTER_CENTER,
        "Paused",
        FontId::proportional(56.0),
        theme::TITLE,
    );

    egui::Area::new(egui::Id::new("pause_menu"))
        .anchor(Align2::CENTER_CENTER, Vec2::new(0.0, 40.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if theme::menu_button(ui, "Resume").clicked() {
                    state.session.resume();
                    sfx.resume_music();
                    state.last_tick = Instant::now();
                }
                ui.add_space(10.0);
                if theme::menu_button(ui, "Restart").clicked() {
                    state.restart();
                    sfx.resume_music();
                }
                ui.add_space(10.0);
                if theme::menu_button(ui, "Quit").clicked() {
                    sfx.resume_music();
                    action = Some(PlayingAction::ExitToMenu);
                }
            });
        });

    action
}

fn powerup_color(kind: PowerupKind) -> Color32 {
    match kind {
        PowerupKind::SpeedBoost => theme::SPEED_BOOST,
        PowerupKind::SlowDown => theme::SLOW_DOWN,
    }
}
