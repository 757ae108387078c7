#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TextError {
    #[error("Unreadable input: {0}")]
    UnreadableInput(String),
}

impl TextError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::UnreadableInput(reason.into())
    }
}
