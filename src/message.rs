use serde::{Deserialize, Serialize};

/// Audio cue names the client knows how to play.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Positive,
    Negative,
    Chime,
}

/// Side effect requested by a mutation method. The server layer dispatches
/// these: toasts and cues go out with the next update, Save rewrites the
/// save file. Game entities never touch audio, UI, or disk themselves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Effect {
    Toast(String),
    Cue(Cue),
    Save,
}

impl Effect {
    pub fn toast(text: impl Into<String>) -> Self {
        Effect::Toast(text.into())
    }

    /// The standard soft-failure pair: a message plus the negative cue.
    /// State is left unchanged by the caller.
    pub fn rejected(text: impl Into<String>) -> Vec<Effect> {
        vec![Effect::Toast(text.into()), Effect::Cue(Cue::Negative)]
    }
}

#[derive(Deserialize, Debug)]
pub struct PlayerCommand {
    pub action: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub slot: Option<usize>,  // Hotbar slot index for "activate"
    #[serde(default)]
    pub object: Option<String>,  // Item id for "apply_potion"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_pairs_toast_with_negative_cue() {
        let effects = Effect::rejected("no room");
        assert_eq!(
            effects,
            vec![Effect::Toast("no room".to_string()), Effect::Cue(Cue::Negative)]
        );
    }

    #[test]
    fn command_parses_with_optional_fields_missing() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"action":"click","x":10.0,"y":20.0}"#).unwrap();
        assert_eq!(cmd.action, "click");
        assert_eq!(cmd.x, Some(10.0));
        assert_eq!(cmd.slot, None);
        assert_eq!(cmd.object, None);
    }
}
