//! New-game form validation.
//!
//! Errors are reported field by field and never reach the store.

use derive_getters::Getters;
use tracing::{debug, instrument};

use crate::game::{Difficulty, PlayerInfo};

/// Name given to the CPU seat.
pub const CPU_NAME: &str = "CPU";

/// Form field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// First player name.
    Player1,
    /// Second player name.
    Player2,
    /// CPU difficulty selector.
    Difficulty,
}

/// A single field error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", message)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// Message shown next to the field.
    pub message: &'static str,
}

/// Every error found in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    fn push(&mut self, field: FormField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Error for `field`, if any.
    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Returns true when the submission was valid.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message).collect();
        write!(f, "Invalid form: {}", messages.join(", "))
    }
}

impl std::error::Error for FormErrors {}

/// A validated request to start a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewGameRequest {
    player_info: PlayerInfo,
    difficulty: Option<Difficulty>,
}

impl NewGameRequest {
    /// Splits into the parts the dispatcher needs.
    pub fn into_parts(self) -> (PlayerInfo, Option<Difficulty>) {
        (self.player_info, self.difficulty)
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validates the two-player form.
#[instrument]
pub fn two_player(player_1: &str, player_2: &str) -> Result<NewGameRequest, FormErrors> {
    let mut errors = FormErrors::default();
    let first = required(player_1);
    let second = required(player_2);
    if first.is_none() {
        errors.push(FormField::Player1, "Player 1 name cannot be blank");
    }
    if second.is_none() {
        errors.push(FormField::Player2, "Player 2 name cannot be blank");
    }

    match (first, second) {
        (Some(first), Some(second)) => {
            debug!("Two-player form valid");
            Ok(NewGameRequest {
                player_info: PlayerInfo::new(first, second),
                difficulty: None,
            })
        }
        _ => Err(errors),
    }
}

/// Validates the vs-CPU form.
#[instrument]
pub fn versus_cpu(
    player_1: &str,
    difficulty: Option<&Difficulty>,
) -> Result<NewGameRequest, FormErrors> {
    let mut errors = FormErrors::default();
    let first = required(player_1);
    let level = difficulty.filter(|d| !d.as_str().trim().is_empty());
    if first.is_none() {
        errors.push(FormField::Player1, "Player 1 name cannot be blank");
    }
    if level.is_none() {
        errors.push(FormField::Difficulty, "Must select a difficulty");
    }

    match (first, level) {
        (Some(first), Some(level)) => {
            debug!(difficulty = %level, "CPU form valid");
            Ok(NewGameRequest {
                player_info: PlayerInfo::new(first, CPU_NAME.to_string()),
                difficulty: Some(level.clone()),
            })
        }
        _ => Err(errors),
    }
}
