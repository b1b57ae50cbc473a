use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A handler/dog team entered in a game.
///
/// Teams are identified by a generated id so that two entries with the same
/// handler and dog stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub handler: String,
    pub dog: String,
    /// Registration number (UTN).
    #[serde(default)]
    pub registration_id: String,
    #[serde(default)]
    pub jump_height: String,
    #[serde(default)]
    pub height_division: String,
}

impl Participant {
    pub fn new(handler: impl AsRef<str>, dog: impl AsRef<str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            handler: handler.as_ref().trim().to_string(),
            dog: dog.as_ref().trim().to_string(),
            registration_id: String::new(),
            jump_height: String::new(),
            height_division: String::new(),
        }
    }

    pub fn with_registration(mut self, registration_id: impl AsRef<str>) -> Self {
        self.registration_id = registration_id.as_ref().trim().to_string();
        self
    }

    pub fn with_jump_height(mut self, jump_height: impl AsRef<str>) -> Self {
        self.jump_height = jump_height.as_ref().trim().to_string();
        self
    }

    pub fn with_height_division(mut self, division: impl AsRef<str>) -> Self {
        self.height_division = division.as_ref().trim().to_string();
        self
    }

    /// "Handler & Dog" label for display.
    pub fn team_name(&self) -> String {
        format!("{} & {}", self.handler, self.dog)
    }

    /// Handler, dog and registration id, ignoring the generated id.
    pub fn same_team(&self, other: &Participant) -> bool {
        self.handler == other.handler
            && self.dog == other.dog
            && self.registration_id == other.registration_id
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.team_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_teams_have_distinct_ids() {
        let a = Participant::new("Alex", "Pixel");
        let b = Participant::new("Alex", "Pixel");
        assert_ne!(a, b);
        assert!(a.same_team(&b));
    }

    #[test]
    fn test_builder_trims() {
        let p = Participant::new(" Sam ", " Rocket ")
            .with_registration(" 123 ")
            .with_height_division("Medium");
        assert_eq!(p.handler, "Sam");
        assert_eq!(p.registration_id, "123");
        assert_eq!(p.team_name(), "Sam & Rocket");
    }
}
