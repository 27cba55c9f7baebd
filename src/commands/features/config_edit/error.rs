use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub(super) enum SetCommandError {
    #[error("usage: /set <field> <value>")]
    Usage,
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{0} is managed by the poller and cannot be set")]
    ReadOnly(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl SetCommandError {
    pub(super) fn user_message(&self) -> String {
        match self {
            Self::Usage | Self::UnknownField(_) => format!(
                "{}\n\nEditable fields:\n{}",
                self,
                super::parser::EDITABLE_FIELDS.join("\n")
            ),
            _ => self.to_string(),
        }
    }
}
