use crate::game::GameSession;

/// Interface every opponent implementation exposes to the game driver.
pub trait Agent {
    /// Choose a column for the session's current player, or `None` when no
    /// legal move exists.
    fn select_action(&mut self, session: &GameSession) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
