//! Frame presentation
//!
//! The simulation knows nothing about drawing. `present` walks a
//! `GameState` in a fixed paint order and calls into a `RenderSurface`,
//! which a host backend (canvas, terminal, test recorder) implements.

use glam::Vec2;

use crate::sim::{Ally, Enemy, GameState, Particle, ScorePopup};
use crate::tuning::Tuning;
use crate::util::format_score;

/// One drawing backend. Calls arrive back-to-front within a frame.
pub trait RenderSurface {
    /// Select the palette for this frame. `hidden_mode` is the
    /// easter-egg look.
    fn set_palette(&mut self, palette: usize, hidden_mode: bool);
    fn draw_background(&mut self);
    fn draw_wall(&mut self, remaining: f32);
    /// `armed` means no bullet is in flight, so the cannon shows loaded
    fn draw_player(&mut self, x: f32, armed: bool);
    fn draw_ally(&mut self, ally: &Ally);
    fn draw_enemy(&mut self, enemy: &Enemy);
    fn draw_bullet(&mut self, pos: Vec2);
    fn draw_particles(&mut self, particles: &[Particle]);
    fn draw_score(&mut self, text: &str);
    fn draw_combo(&mut self, combo: u32);
    fn draw_score_popup(&mut self, popup: &ScorePopup);
}

/// Paint one frame of `state` onto `surface`. The wall and the player
/// are skipped once the wall is destroyed; their debris particles carry
/// the death animation.
pub fn present(
    state: &GameState,
    tuning: &Tuning,
    hidden_mode: bool,
    surface: &mut impl RenderSurface,
) {
    surface.set_palette(tuning.palette(state.combo), hidden_mode);
    surface.draw_background();

    if state.wall_remaining > 0.0 {
        surface.draw_wall(state.wall_remaining);
        surface.draw_player(state.player_x, state.bullet.is_none());
    }
    for ally in &state.allies {
        surface.draw_ally(ally);
    }
    for enemy in &state.enemies {
        surface.draw_enemy(enemy);
    }
    if let Some(bullet) = &state.bullet {
        surface.draw_bullet(bullet.pos);
    }
    surface.draw_particles(&state.particles);

    surface.draw_score(&format_score(state.score));
    surface.draw_combo(state.combo);
    if let Some(popup) = &state.score_popup {
        surface.draw_score_popup(popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bullet;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn set_palette(&mut self, palette: usize, hidden_mode: bool) {
            self.calls.push(format!("palette:{palette}:{hidden_mode}"));
        }
        fn draw_background(&mut self) {
            self.calls.push("background".into());
        }
        fn draw_wall(&mut self, remaining: f32) {
            self.calls.push(format!("wall:{remaining}"));
        }
        fn draw_player(&mut self, _x: f32, armed: bool) {
            self.calls.push(format!("player:{armed}"));
        }
        fn draw_ally(&mut self, _ally: &Ally) {
            self.calls.push("ally".into());
        }
        fn draw_enemy(&mut self, _enemy: &Enemy) {
            self.calls.push("enemy".into());
        }
        fn draw_bullet(&mut self, _pos: Vec2) {
            self.calls.push("bullet".into());
        }
        fn draw_particles(&mut self, particles: &[Particle]) {
            self.calls.push(format!("particles:{}", particles.len()));
        }
        fn draw_score(&mut self, text: &str) {
            self.calls.push(format!("score:{text}"));
        }
        fn draw_combo(&mut self, combo: u32) {
            self.calls.push(format!("combo:{combo}"));
        }
        fn draw_score_popup(&mut self, _popup: &ScorePopup) {
            self.calls.push("popup".into());
        }
    }

    #[test]
    fn test_fresh_state_paint_order() {
        let state = GameState::new();
        let mut rec = Recorder::default();
        present(&state, &Tuning::default(), false, &mut rec);
        assert_eq!(
            rec.calls,
            vec![
                "palette:0:false",
                "background",
                "wall:100",
                "player:true",
                "particles:0",
                "score:00000",
                "combo:0",
            ]
        );
    }

    #[test]
    fn test_wall_and_player_hidden_after_destruction() {
        let mut state = GameState::new();
        state.wall_remaining = 0.0;
        let mut rec = Recorder::default();
        present(&state, &Tuning::default(), false, &mut rec);
        assert!(!rec.calls.iter().any(|c| c.starts_with("wall")));
        assert!(!rec.calls.iter().any(|c| c.starts_with("player")));
    }

    #[test]
    fn test_bullet_in_flight_unarms_player() {
        let mut state = GameState::new();
        state.bullet = Some(Bullet {
            pos: Vec2::new(500.0, 300.0),
        });
        let mut rec = Recorder::default();
        present(&state, &Tuning::default(), false, &mut rec);
        assert!(rec.calls.contains(&"player:false".to_string()));
        assert!(rec.calls.contains(&"bullet".to_string()));
    }

    #[test]
    fn test_palette_follows_combo() {
        let mut state = GameState::new();
        state.combo = 9;
        let mut rec = Recorder::default();
        present(&state, &Tuning::default(), true, &mut rec);
        assert_eq!(rec.calls[0], "palette:3:true");
    }
}
