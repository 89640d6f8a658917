/// The city search field.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    disabled: bool,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled while a request is outstanding.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn can_submit(&self) -> bool {
        !self.disabled && !self.text.trim().is_empty()
    }

    /// The trimmed city name, or `None` when there is nothing to submit.
    pub fn submit(&self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        Some(self.text.trim().to_string())
    }
}
