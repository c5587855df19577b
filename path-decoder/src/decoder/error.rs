use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No request target was supplied at all.
    #[error("request target is missing")]
    NullInput,

    /// Authority-form (`host:port`, used with CONNECT) or anything else that is
    /// neither origin-form nor absolute-form.
    #[error("unsupported request target form: {0:?}")]
    UnsupportedForm(String),
}

impl DecodeError {
    /// Short label for metrics / log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::NullInput => "missing_target",
            DecodeError::UnsupportedForm(_) => "unsupported_form",
        }
    }
}
