// Copyright 2025 eraflo
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

//! Error types shared by every registry in the crate.
//!
//! These are contract violations (using a registry incorrectly), never
//! transient failures, so nothing in the crate retries on them.

/// An error raised by a registry operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An instance of the same concrete type is already registered.
    #[error("an item of type `{type_name}` is already registered")]
    DuplicateRegistration {
        /// The concrete type that was registered twice.
        type_name: &'static str,
    },
    /// No entry exists for the requested type.
    #[error("no item of type `{type_name}` is registered")]
    NotFound {
        /// The type that was looked up.
        type_name: &'static str,
    },
    /// An index-based operation was given an invalid index.
    #[error("index {index} is out of range for a registry of length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The registry length at the time of the call.
        len: usize,
    },
}

impl RegistryError {
    /// Convenience constructor for a missing entry of type `T`.
    pub fn not_found<T: ?Sized>() -> Self {
        RegistryError::NotFound {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// An error raised when reaching the session-scoped services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No session is active on the current thread.
    #[error("no session is active on this thread")]
    NoActiveSession,
    /// A session is already active on the current thread.
    #[error("a session is already active on this thread")]
    AlreadyActive,
    /// The session is already borrowed by an enclosing `with` call.
    #[error("the session services are already borrowed")]
    Busy,
}
