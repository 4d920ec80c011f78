//! Preview script and voice settings

use log::debug;

/// Default preview text
pub const DEFAULT_SCRIPT: &str = "Hello, how are you?";

/// Rate and pitch multipliers applied to every preview
///
/// Values are stored as given; range and step are enforced by the slider
/// that edits them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl VoiceSettings {
    pub fn set_rate(&mut self, rate: f32) {
        debug!("Rate set to {:.1}", rate);
        self.rate = rate;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        debug!("Pitch set to {:.1}", pitch);
        self.pitch = pitch;
    }

    /// Read the value behind a settings dialog field
    pub fn get(&self, field: SettingsField) -> f32 {
        match field {
            SettingsField::Rate => self.rate,
            SettingsField::Pitch => self.pitch,
        }
    }

    /// Commit a value to a settings dialog field
    pub fn set(&mut self, field: SettingsField, value: f32) {
        match field {
            SettingsField::Rate => self.set_rate(value),
            SettingsField::Pitch => self.set_pitch(value),
        }
    }
}

/// Field focused in the voice settings dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Rate,
    Pitch,
}

impl SettingsField {
    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Rate => "Rate",
            SettingsField::Pitch => "Pitch",
        }
    }

    /// The other field (the dialog has exactly two)
    pub fn toggle(self) -> Self {
        match self {
            SettingsField::Rate => SettingsField::Pitch,
            SettingsField::Pitch => SettingsField::Rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorState {
    Closed,
    Editing { draft: String },
}

/// Preview script with a staged-edit dialog
///
/// Opening copies the committed script into a draft. Edits touch only the
/// draft; `save` replaces the script with it and `cancel` throws it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEditor {
    script: String,
    state: EditorState,
}

impl Default for ScriptEditor {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT)
    }
}

impl ScriptEditor {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            state: EditorState::Closed,
        }
    }

    /// The committed script
    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// The draft, while the dialog is open
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing { draft } => Some(draft),
            EditorState::Closed => None,
        }
    }

    /// Open the dialog, seeding the draft from the committed script
    pub fn open(&mut self) {
        debug!("Script dialog opened");
        self.state = EditorState::Editing {
            draft: self.script.clone(),
        };
    }

    /// Replace the whole draft
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditorState::Editing { draft } = &mut self.state {
            *draft = text.into();
        }
    }

    pub fn insert(&mut self, ch: char) {
        if let EditorState::Editing { draft } = &mut self.state {
            draft.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let EditorState::Editing { draft } = &mut self.state {
            draft.pop();
        }
    }

    /// Commit the draft and close; no-op when closed
    pub fn save(&mut self) {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        if let EditorState::Editing { draft } = state {
            debug!("Script saved ({} chars)", draft.len());
            self.script = draft;
        }
    }

    /// Discard the draft and close
    pub fn cancel(&mut self) {
        if self.is_editing() {
            debug!("Script edit cancelled");
        }
        self.state = EditorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_editor_ignores_edits() {
        let mut editor = ScriptEditor::new("Hi");
        editor.insert('!');
        editor.set_draft("other");
        editor.save();
        assert_eq!(editor.script(), "Hi");
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_draft_editing() {
        let mut editor = ScriptEditor::new("Hi");
        editor.open();
        editor.backspace();
        editor.insert('o');
        assert_eq!(editor.draft(), Some("Ho"));
        assert_eq!(editor.script(), "Hi");
    }

    #[test]
    fn test_settings_field_access() {
        let mut settings = VoiceSettings::default();
        settings.set(SettingsField::Pitch, 1.3);
        assert_eq!(settings.get(SettingsField::Pitch), 1.3);
        assert_eq!(settings.get(SettingsField::Rate), 1.0);
        assert_eq!(SettingsField::Rate.toggle(), SettingsField::Pitch);
    }
}
