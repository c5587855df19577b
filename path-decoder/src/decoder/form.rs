use std::borrow::Cow;

use super::absolute::path_from_absolute_form;
use super::error::DecodeError;
use super::origin::normalize_origin_form;

/// Request-target forms, RFC 7230 §5.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetForm {
    Empty,
    /// `OPTIONS *`
    Asterisk,
    /// `/path?query`
    Origin,
    /// `http://host/path?query`
    Absolute,
    /// `host:port`, or anything else we can't take a path from.
    Authority,
}

impl TargetForm {
    pub fn classify(raw_target: &str) -> Self {
        if raw_target.is_empty() {
            TargetForm::Empty
        } else if raw_target == "*" {
            TargetForm::Asterisk
        } else if raw_target.starts_with('/') {
            TargetForm::Origin
        } else if raw_target.starts_with("http://") || raw_target.starts_with("https://") {
            TargetForm::Absolute
        } else {
            TargetForm::Authority
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetForm::Empty => "empty",
            TargetForm::Asterisk => "asterisk",
            TargetForm::Origin => "origin",
            TargetForm::Absolute => "absolute",
            TargetForm::Authority => "authority",
        }
    }

    /// Path of `raw_target`, which must be the target this form was classified from.
    pub fn decode(self, raw_target: &str) -> Result<Cow<'_, str>, DecodeError> {
        match self {
            TargetForm::Empty => Ok(Cow::Borrowed(raw_target)),
            TargetForm::Asterisk => Ok(Cow::Borrowed("")),
            TargetForm::Origin => Ok(normalize_origin_form(raw_target)),
            TargetForm::Absolute => Ok(path_from_absolute_form(raw_target)),
            TargetForm::Authority => Err(DecodeError::UnsupportedForm(raw_target.to_string())),
        }
    }
}

/// Extract and normalize the path from the raw request target.
///
/// `None` means the transport had no target to give us.
///
/// ```
/// use path_decoder::decoder::get_path_from_raw_target;
///
/// assert_eq!(get_path_from_raw_target(Some("/a/%2E%2E/b?x")).unwrap(), "/b");
/// assert_eq!(get_path_from_raw_target(Some("*")).unwrap(), "");
/// assert!(get_path_from_raw_target(None).is_err());
/// ```
pub fn get_path_from_raw_target(raw_target: Option<&str>) -> Result<Cow<'_, str>, DecodeError> {
    let raw_target = raw_target.ok_or(DecodeError::NullInput)?;
    decode_target(raw_target)
}

/// Same as [`get_path_from_raw_target`] for a target that is known to be present.
pub fn decode_target(raw_target: &str) -> Result<Cow<'_, str>, DecodeError> {
    TargetForm::classify(raw_target).decode(raw_target)
}
