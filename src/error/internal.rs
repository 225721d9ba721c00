// Copyright 2021-2022 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Module containing InternalError implementation.

use std::error;
use std::fmt;

/// An error which is returned for reasons internal to the function.
///
/// This error is produced when a failure occurred within the function but the
/// failure is due to an internal implementation detail of the function. There
/// is generally no specific information that would help the caller recover or
/// otherwise take action.
pub struct InternalError {
    message: Option<String>,
    source: Option<Box<dyn error::Error>>,
}

impl InternalError {
    /// Constructs a new `InternalError` from a specified source error.
    ///
    /// The implementation of `std::fmt::Display` for this error will pass
    /// through the display of the source unmodified.
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            source: Some(source),
        }
    }

    /// Constructs a new `InternalError` from a specified source error and
    /// message string.
    ///
    /// The implementation of `std::fmt::Display` for this error will be the
    /// message string provided.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            source: Some(source),
        }
    }

    /// Constructs a new `InternalError` with a specified message string.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(m), _) => write!(f, "{}", m),
            (None, Some(s)) => write!(f, "{}", s),
            (None, None) => write!(f, "InternalError"),
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(m), Some(s)) => write!(
                f,
                "InternalError {{ message: {:?}, source: {:?} }}",
                m, s
            ),
            (Some(m), None) => write!(f, "InternalError {{ message: {:?} }}", m),
            (None, Some(s)) => write!(f, "InternalError {{ source: {:?} }}", s),
            (None, None) => write!(f, "InternalError"),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Tests that an error constructed with `InternalError::with_message`
    /// returns the message as the display string.
    #[test]
    fn test_display_with_message() {
        let msg = "test message";
        let err = InternalError::with_message(msg.to_string());
        assert_eq!(format!("{}", err), msg);
    }

    /// Tests that an error constructed with `InternalError::from_source`
    /// passes through the source's display string.
    #[test]
    fn test_display_from_source() {
        let msg = "test message";
        let err =
            InternalError::from_source(Box::new(InternalError::with_message(msg.to_string())));
        assert_eq!(format!("{}", err), msg);
    }

    /// Tests that an error constructed with
    /// `InternalError::from_source_with_message` displays the message, not
    /// the source.
    #[test]
    fn test_display_from_source_with_message() {
        let err = InternalError::from_source_with_message(
            Box::new(InternalError::with_message("unused".to_string())),
            "shown".to_string(),
        );
        assert_eq!(format!("{}", err), "shown");
    }
}
