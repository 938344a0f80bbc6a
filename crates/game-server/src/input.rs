use game_core::engine::Move;

/// Map a browser `KeyboardEvent.key` name to a directional command.
///
/// Arrow keys and WASD (either case) land on the same four-direction
/// vocabulary the session consumes; anything else is not a game input.
pub fn direction_for_key(key: &str) -> Option<Move> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Move::Up),
        "ArrowDown" | "s" | "S" => Some(Move::Down),
        "ArrowLeft" | "a" | "A" => Some(Move::Left),
        "ArrowRight" | "d" | "D" => Some(Move::Right),
        _ => None,
    }
}
