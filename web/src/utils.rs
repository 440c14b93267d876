use crate::game;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Instruction line above the board.
pub(crate) fn status_text(snapshot: &game::Snapshot) -> String {
    use game::GameState::*;
    match snapshot.state {
        Start => "Watch the squares flash, then click the ones you remember!".to_string(),
        Showing if snapshot.mistakes >= game::MAX_MISTAKES => "Out of tries, get ready...".to_string(),
        Showing => "Watch carefully! Memorize the flashing squares...".to_string(),
        Playing => format!(
            "Mistakes: {}/{} · Need to find: {} squares",
            snapshot.mistakes,
            game::MAX_MISTAKES,
            snapshot.target_count
        ),
        LevelComplete => "Level complete! Moving to next level...".to_string(),
        GameOver => format!("You reached level {}", snapshot.level),
    }
}

/// Clamp a delay to what `setTimeout` takes.
pub(crate) fn timeout_millis(delay: std::time::Duration) -> u32 {
    delay.as_millis().try_into().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn snapshot_in(state: game::GameState) -> game::Snapshot {
        let mut engine = game::PlayEngine::new(game::EngineConfig::default(), 1);
        engine.start_new_game();
        let mut snapshot = engine.snapshot();
        snapshot.state = state;
        snapshot
    }

    #[wasm_bindgen_test]
    fn status_mentions_counts_while_playing() {
        let text = status_text(&snapshot_in(game::GameState::Playing));
        assert_eq!(text, "Mistakes: 0/3 · Need to find: 3 squares");
    }

    #[wasm_bindgen_test]
    fn status_mentions_level_on_game_over() {
        let text = status_text(&snapshot_in(game::GameState::GameOver));
        assert_eq!(text, "You reached level 1");
    }

    #[wasm_bindgen_test]
    fn status_while_revealing() {
        let text = status_text(&snapshot_in(game::GameState::Showing));
        assert_eq!(text, "Watch carefully! Memorize the flashing squares...");
    }

    #[wasm_bindgen_test]
    fn status_while_waiting_for_retry() {
        let mut snapshot = snapshot_in(game::GameState::Showing);
        snapshot.mistakes = game::MAX_MISTAKES;
        assert_eq!(status_text(&snapshot), "Out of tries, get ready...");
    }

    #[wasm_bindgen_test]
    fn status_after_level_complete() {
        let text = status_text(&snapshot_in(game::GameState::LevelComplete));
        assert_eq!(text, "Level complete! Moving to next level...");
    }

    #[wasm_bindgen_test]
    fn timeout_saturates() {
        assert_eq!(timeout_millis(std::time::Duration::from_millis(250)), 250);
        assert_eq!(timeout_millis(std::time::Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
