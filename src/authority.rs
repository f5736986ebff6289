//! Remote authority port.
//!
//! The engine's simulation is client-predicted. The authority (normally a
//! game server) owns loot and persistence; the engine only tells it when a
//! line is cast and how the session ended.

use crate::error::AuthorityError;
use serde::{Deserialize, Serialize};

/// Commands the engine issues to the authority. Fire-and-forget: at most one
/// cast and one terminal command per session.
pub trait FishingAuthority {
    fn cast_fishing_line(&mut self, world_x: f64, world_y: f64) -> Result<(), AuthorityError>;

    /// `loot_hint` is advisory; the authority decides what is granted.
    fn finish_fishing(&mut self, success: bool, loot_hint: &[String])
        -> Result<(), AuthorityError>;

    fn cancel_fishing(&mut self) -> Result<(), AuthorityError>;
}

/// A single authority call, as recorded by [`RecordingAuthority`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AuthorityCommand {
    CastFishingLine { world_x: f64, world_y: f64 },
    FinishFishing { success: bool, loot_hint: Vec<String> },
    CancelFishing,
}

impl AuthorityCommand {
    /// True for the commands that close a session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthorityCommand::CastFishingLine { .. })
    }

    /// Short human-readable form for log panels.
    pub fn describe(&self) -> String {
        match self {
            AuthorityCommand::CastFishingLine { world_x, world_y } => {
                format!("castFishingLine({:.0}, {:.0})", world_x, world_y)
            }
            AuthorityCommand::FinishFishing { success, loot_hint } => {
                format!("finishFishing({}, {:?})", success, loot_hint)
            }
            AuthorityCommand::CancelFishing => "cancelFishing()".to_string(),
        }
    }
}

/// In-memory authority that records every command it receives.
///
/// Used by tests, the simulator and the terminal host. `fail_with` makes
/// every subsequent call return the given error (the command is still
/// recorded as attempted). A terminal command with no line out is rejected,
/// as a server would.
#[derive(Debug, Default, Clone)]
pub struct RecordingAuthority {
    pub commands: Vec<AuthorityCommand>,
    pub fail_with: Option<AuthorityError>,
}

impl RecordingAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of terminal commands (`finish_fishing` + `cancel_fishing`) seen.
    pub fn terminal_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_terminal()).count()
    }

    pub fn last(&self) -> Option<&AuthorityCommand> {
        self.commands.last()
    }

    /// Serializes the command history as JSON lines.
    pub fn to_json_lines(&self) -> String {
        self.commands
            .iter()
            .filter_map(|c| serde_json::to_string(c).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True while the most recent command is an unanswered cast.
    pub fn line_out(&self) -> bool {
        matches!(self.last(), Some(AuthorityCommand::CastFishingLine { .. }))
    }

    fn record(&mut self, command: AuthorityCommand) -> Result<(), AuthorityError> {
        let orphaned = command.is_terminal() && !self.line_out();
        self.commands.push(command);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        if orphaned {
            return Err(AuthorityError::Rejected("no line cast".to_string()));
        }
        Ok(())
    }
}

impl FishingAuthority for RecordingAuthority {
    fn cast_fishing_line(&mut self, world_x: f64, world_y: f64) -> Result<(), AuthorityError> {
        self.record(AuthorityCommand::CastFishingLine { world_x, world_y })
    }

    fn finish_fishing(
        &mut self,
        success: bool,
        loot_hint: &[String],
    ) -> Result<(), AuthorityError> {
        self.record(AuthorityCommand::FinishFishing {
            success,
            loot_hint: loot_hint.to_vec(),
        })
    }

    fn cancel_fishing(&mut self) -> Result<(), AuthorityError> {
        self.record(AuthorityCommand::CancelFishing)
    }
}
