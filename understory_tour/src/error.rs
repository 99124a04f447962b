// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while resolving a walkthrough step against the host.

use thiserror::Error;

use crate::host::ElementId;

/// Why a geometry query or configuration value could not be used.
///
/// None of these abort a step. The session logs them and skips the affected update.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum TourError {
    /// The target element is not part of the view tree.
    #[error("target element {0:?} is not attached")]
    DetachedTarget(ElementId),
    /// The target element is attached but has no location or size yet.
    #[error("target element {0:?} has not been measured")]
    UnmeasuredTarget(ElementId),
    /// A builder received a value it cannot honor.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        let e = TourError::DetachedTarget(ElementId(7));
        assert_eq!(e.to_string(), "target element ElementId(7) is not attached");
        let e = TourError::InvalidConfiguration("negative width");
        assert_eq!(e.to_string(), "invalid configuration: negative width");
    }
}
