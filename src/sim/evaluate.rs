//! Win/loss evaluation, run once per tick after all scoring

use log::info;

use super::state::{GameEvent, GamePhase, GameState};
use crate::hud::ScoreDisplay;

/// Refresh the score display and latch a win if the threshold is met
pub fn evaluate(state: &mut GameState) {
    state.display = ScoreDisplay::from_score(state.score);

    if state.phase == GamePhase::Playing && state.score >= state.rules.win_score {
        info!("score {} reached {}, game won", state.score, state.rules.win_score);
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_at_threshold() {
        let mut state = GameState::new(1);
        state.score = 99;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);

        state.score = 100;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.events, vec![GameEvent::Won { score: 100 }]);
    }

    #[test]
    fn test_game_over_is_not_overridden() {
        let mut state = GameState::new(1);
        state.score = 120;
        state.phase = GamePhase::GameOver;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_display_refreshed() {
        let mut state = GameState::new(1);
        state.score = -42;
        evaluate(&mut state);
        assert!(state.display.negative);
        assert_eq!((state.display.tens, state.display.units), (4, 2));
    }
}
