//! Terminal host state: the lake, the player and the engine driving them.

use angler::authority::RecordingAuthority;
use angler::config::FishingConstants;
use angler::core::Vec2;
use angler::fishing::{FishingEngine, Resolution};
use angler::world::{TileMap, WaterQuery};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::input::{Direction, HostAction};
use crate::ui::Viewport;

pub const MAP_WIDTH: usize = 60;
pub const MAP_HEIGHT: usize = 30;
pub const TILE_SIZE: f64 = 32.0;

/// Player walking step per key press (world units)
const WALK_STEP: f64 = 16.0;

/// Authority commands kept for the log panel
const LOG_LINES: usize = 8;

pub struct App {
    pub map: TileMap,
    pub player: Vec2,
    /// Last pointer position in world space, if it is over the map
    pub pointer: Option<Vec2>,
    pub engine: FishingEngine<RecordingAuthority>,
    pub status: String,
    pub should_quit: bool,
    rng: ChaCha8Rng,
}

impl App {
    pub fn new(constants: FishingConstants, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = TileMap::generate_lake(MAP_WIDTH, MAP_HEIGHT, TILE_SIZE, &mut rng);
        let player = map
            .find_shore_spawn()
            .unwrap_or_else(|| map.tile_center(0, 0));

        let mut engine = FishingEngine::new(constants, RecordingAuthority::new());
        engine.set_rod_equipped(true);
        log::info!(
            "Lake generated with seed {}, player at ({:.0}, {:.0})",
            seed,
            player.x,
            player.y
        );

        Self {
            map,
            player,
            pointer: None,
            engine,
            status: "Click open water to cast.".to_string(),
            should_quit: false,
            rng,
        }
    }

    pub fn handle(&mut self, action: HostAction, viewport: &Viewport) {
        match action {
            HostAction::PointerMoved { column, row } => {
                self.pointer = viewport.to_world(column, row);
                if let Some(pointer) = self.pointer {
                    self.engine.on_pointer_move(self.player, pointer, &self.map);
                }
            }
            HostAction::PrimaryClick { column, row } => {
                let Some(pointer) = viewport.to_world(column, row) else {
                    return;
                };
                self.pointer = Some(pointer);
                match self.engine.on_primary_click(self.player, pointer, &self.map) {
                    Ok(_) => self.status = "Waiting for a bite...".to_string(),
                    Err(e) => self.status = format!("Can't cast: {}", e),
                }
            }
            HostAction::Reel => {
                if self.engine.on_reel() {
                    self.status = "Reeling!".to_string();
                }
            }
            HostAction::Cancel => {
                if let Some(resolution) = self.engine.cancel() {
                    self.report(resolution);
                }
            }
            HostAction::ToggleRod => {
                let equip = !self.engine.rod_equipped();
                match self.engine.set_rod_equipped(equip) {
                    Some(resolution) => self.report(resolution),
                    None if equip => self.status = "Rod equipped.".to_string(),
                    None => self.status = "Rod put away.".to_string(),
                }
            }
            HostAction::Walk(direction) => self.walk(direction),
            HostAction::Quit => self.should_quit = true,
        }
    }

    /// Moves the player one step, staying on land inside the map.
    fn walk(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        let next = self.player + Vec2::new(dx, dy) * WALK_STEP;
        let bounds = self.map.world_size();
        if next.x < 0.0 || next.y < 0.0 || next.x >= bounds.x || next.y >= bounds.y {
            return;
        }
        if self.map.is_water_at(next) {
            return;
        }
        self.player = next;
    }

    /// Advances the engine by one host frame.
    pub fn tick(&mut self, dt_ms: u64) {
        let before = self.engine.phase();
        if let Some(resolution) = self
            .engine
            .update(dt_ms, self.player, &self.map, &mut self.rng)
        {
            self.report(resolution);
            return;
        }
        if before != self.engine.phase() && self.engine.phase().is_some() {
            self.status = "Fish on! Reel it in!".to_string();
        }
    }

    fn report(&mut self, resolution: Resolution) {
        self.status = match resolution.authority_error {
            Some(e) => format!("{} (server: {})", resolution.outcome.message(), e),
            None => resolution.outcome.message().to_string(),
        };
    }

    /// Most recent authority commands, oldest first.
    pub fn authority_log(&self) -> Vec<String> {
        let commands = &self.engine.authority().commands;
        let start = commands.len().saturating_sub(LOG_LINES);
        commands[start..].iter().map(|c| c.describe()).collect()
    }
}
