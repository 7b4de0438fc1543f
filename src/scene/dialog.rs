use std::fmt;

use super::list_scene::ListOp;

/// Longest text a dialog accepts
pub const MAX_INPUT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NotANumber(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "Nothing entered"),
            InputError::NotANumber(text) => write!(f, "'{}' is not a number", text),
        }
    }
}

/// Single-line numeric text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a printable ASCII character (space through `}`)
    ///
    /// Returns false when the character was rejected or the field is full.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(' '..='}').contains(&c) || self.text.len() >= MAX_INPUT_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse the text as an integer and clear the field
    ///
    /// On error the text is kept so it can be corrected.
    pub fn submit(&mut self) -> Result<i32, InputError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }

        let value = trimmed
            .parse()
            .map_err(|_| InputError::NotANumber(self.text.clone()))?;
        self.text.clear();
        Ok(value)
    }
}

/// Which list operation a dialog collects input for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Insert,
    AddAfter,
    Update,
    Search,
    Delete,
}

impl DialogKind {
    /// Add and update first ask for the node to act on
    fn needs_destination(self) -> bool {
        matches!(self, DialogKind::AddAfter | DialogKind::Update)
    }
}

/// Progress of a two-stage dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Destination,
    Value { destination: Option<i32> },
}

/// An open input dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    kind: DialogKind,
    stage: Stage,
    input: TextInput,
}

impl Dialog {
    pub fn new(kind: DialogKind) -> Self {
        let stage = if kind.needs_destination() {
            Stage::Destination
        } else {
            Stage::Value { destination: None }
        };

        Dialog {
            kind,
            stage,
            input: TextInput::default(),
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn caption(&self) -> &'static str {
        match (self.kind, self.stage) {
            (DialogKind::AddAfter, Stage::Destination) => "Dest:",
            (DialogKind::Update, Stage::Destination) => "Target:",
            (DialogKind::AddAfter | DialogKind::Update, Stage::Value { .. }) => "New Value:",
            (DialogKind::Insert, _) => "Enter Value:",
            (DialogKind::Search, _) => "Search value:",
            (DialogKind::Delete, _) => "Delete value:",
        }
    }

    /// Submit the current field
    ///
    /// `Ok(None)` means the dialog moved on to its second field,
    /// `Ok(Some(op))` means it is complete and should close.
    pub fn submit(&mut self) -> Result<Option<ListOp>, InputError> {
        let value = self.input.submit()?;

        let op = match (self.kind, self.stage) {
            (_, Stage::Destination) => {
                self.stage = Stage::Value {
                    destination: Some(value),
                };
                return Ok(None);
            }
            (DialogKind::Insert, _) => ListOp::Insert(value),
            (DialogKind::Search, _) => ListOp::Search(value),
            (DialogKind::Delete, _) => ListOp::Delete(value),
            (DialogKind::AddAfter, Stage::Value { destination }) => ListOp::AddAfter {
                dest: destination.unwrap_or_default(),
                value,
            },
            (DialogKind::Update, Stage::Value { destination }) => ListOp::Update {
                dest: destination.unwrap_or_default(),
                value,
            },
        };
        Ok(Some(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in text.chars() {
            input.push_char(c);
        }
        input
    }

    #[test]
    fn test_accepts_printable_ascii_only() {
        let mut input = TextInput::default();

        assert!(input.push_char('4'));
        assert!(input.push_char(' '));
        assert!(input.push_char('}'));
        assert!(!input.push_char('~'));
        assert!(!input.push_char('\n'));
        assert!(!input.push_char('é'));
        assert_eq!(input.text(), "4 }");
    }

    #[test]
    fn test_length_limit() {
        let input = typed("123456789012");
        assert_eq!(input.text(), "1234567890");
    }

    #[test]
    fn test_backspace() {
        let mut input = typed("12");
        input.backspace();
        assert_eq!(input.text(), "1");

        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_submit_parses_and_clears() {
        let mut input = typed("-42");

        assert_eq!(input.submit(), Ok(-42));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_malformed_input_is_kept() {
        let mut input = typed("12a");

        assert_eq!(input.submit(), Err(InputError::NotANumber("12a".to_string())));
        assert_eq!(input.text(), "12a");
        assert_eq!(TextInput::default().submit(), Err(InputError::Empty));
    }

    #[test]
    fn test_single_stage_dialog() {
        let mut dialog = Dialog::new(DialogKind::Search);
        assert_eq!(dialog.caption(), "Search value:");

        dialog.input_mut().push_char('7');
        assert_eq!(dialog.submit(), Ok(Some(ListOp::Search(7))));
    }

    #[test]
    fn test_two_stage_dialog() {
        let mut dialog = Dialog::new(DialogKind::AddAfter);
        assert_eq!(dialog.stage(), Stage::Destination);
        assert_eq!(dialog.caption(), "Dest:");

        dialog.input_mut().push_char('3');
        assert_eq!(dialog.submit(), Ok(None));
        assert_eq!(dialog.stage(), Stage::Value { destination: Some(3) });
        assert_eq!(dialog.caption(), "New Value:");

        dialog.input_mut().push_char('x');
        assert!(dialog.submit().is_err());
        assert_eq!(dialog.input().text(), "x");

        dialog.input_mut().backspace();
        dialog.input_mut().push_char('9');
        assert_eq!(dialog.submit(), Ok(Some(ListOp::AddAfter { dest: 3, value: 9 })));
    }
}
