// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for bloomsim operations

use std::fmt;

/// ErrorKind is all kinds of Error of bloomsim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The filter size is zero or larger than the addressable maximum.
    InvalidSize,
    /// A hash function index does not exist in the hash family.
    HashIndexOutOfRange,
    /// The filter was already fixed to a different number of hash functions.
    ConfigurationMismatch,
    /// The argument provided is invalid.
    InvalidArgument,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidSize => "InvalidSize",
            ErrorKind::HashIndexOutOfRange => "HashIndexOutOfRange",
            ErrorKind::ConfigurationMismatch => "ConfigurationMismatch",
            ErrorKind::InvalidArgument => "InvalidArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all bloomsim functions.
///
/// # Examples
///
/// ```
/// # use bloomsim::error::Error;
/// # use bloomsim::error::ErrorKind;
/// let err = Error::new(ErrorKind::InvalidSize, "size must be positive");
/// assert_eq!(err.kind(), ErrorKind::InvalidSize);
/// assert_eq!(err.message(), "size must be positive");
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the value recorded for a context key, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Convenient constructors used within bloomsim crate.
impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, msg)
    }

    pub(crate) fn invalid_size(size: u64, max: u64) -> Self {
        Self::new(
            ErrorKind::InvalidSize,
            format!("filter size must be in [1, {max}]"),
        )
        .with_context("size", size)
    }

    pub(crate) fn hash_index_out_of_range(index: usize, family_size: usize) -> Self {
        Self::new(
            ErrorKind::HashIndexOutOfRange,
            format!("hash function index {index} is outside a family of {family_size}"),
        )
        .with_context("index", index)
        .with_context("family_size", family_size)
    }

    pub(crate) fn configuration_mismatch(expected: u16, actual: u16) -> Self {
        Self::new(
            ErrorKind::ConfigurationMismatch,
            format!("filter uses {expected} hash functions, got {actual}"),
        )
        .with_context("expected", expected)
        .with_context("actual", actual)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            for (i, (k, v)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", k, v)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_format_invalid_size() {
        let err = Error::invalid_size(0, 1 << 32);
        assert_snapshot!(err, @"InvalidSize, context: { size: 0 } => filter size must be in [1, 4294967296]");
    }

    #[test]
    fn test_format_hash_index_out_of_range() {
        let err = Error::hash_index_out_of_range(9, 9);
        assert_snapshot!(err, @"HashIndexOutOfRange, context: { index: 9, family_size: 9 } => hash function index 9 is outside a family of 9");
    }

    #[test]
    fn test_context_lookup() {
        let err = Error::configuration_mismatch(3, 5);
        assert_eq!(err.kind(), ErrorKind::ConfigurationMismatch);
        assert_eq!(err.context("expected"), Some("3"));
        assert_eq!(err.context("actual"), Some("5"));
        assert_eq!(err.context("missing"), None);
    }

    #[test]
    fn test_format_without_context() {
        let err = Error::new(ErrorKind::InvalidArgument, "something went wrong");
        assert_snapshot!(err, @"InvalidArgument => something went wrong");
    }
}
