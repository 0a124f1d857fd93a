//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, no-op natively)
//! - Frame scheduling (requestAnimationFrame)
//! - Score display (DOM text)

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Score line shown under the canvas
pub fn score_text(score: u64, is_game_over: bool, best: Option<u64>) -> String {
    if !is_game_over {
        return format!("Score: {}", score);
    }
    match best {
        Some(best) if best > 0 => {
            format!("Game Over! Score: {} (best {}). Tap to restart!", score, best)
        }
        _ => format!("Game Over! Score: {}. Tap to restart!", score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(3, false, Some(10)), "Score: 3");
        assert_eq!(
            score_text(0, true, None),
            "Game Over! Score: 0. Tap to restart!"
        );
        assert_eq!(
            score_text(4, true, Some(12)),
            "Game Over! Score: 4 (best 12). Tap to restart!"
        );
    }
}
