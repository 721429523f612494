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

//! An explicitly scoped, thread-local [`ServiceManager`].
//!
//! Nothing is installed until [`begin`] is called, and the manager is torn
//! down when the returned [`SessionGuard`] is dropped. Code that cannot be
//! handed a reference reaches the active manager through [`with`].
//!
//! ```rust
//! use kestrel_core::service::session;
//! use kestrel_core::{Service, ServiceManager};
//!
//! struct Score(u32);
//! impl Service for Score {}
//!
//! let guard = session::begin(ServiceManager::new()).unwrap();
//! session::with(|services| services.local_mut().register(Score(0)).map(|_| ()))
//!     .unwrap()
//!     .unwrap();
//! let score = session::with(|services| services.resolve::<Score>().map(|s| s.0)).unwrap();
//! assert_eq!(score, Ok(0));
//!
//! drop(guard);
//! assert!(!session::is_active());
//! ```

use super::manager::ServiceManager;
use crate::error::SessionError;
use std::cell::RefCell;
use std::marker::PhantomData;

/// What the thread-local slot currently holds.
enum Slot {
    Idle,
    Active(ServiceManager),
    /// The manager is lent out to a running `with` call.
    Lent {
        end_requested: bool,
    },
}

thread_local! {
    static ACTIVE: RefCell<Slot> = const { RefCell::new(Slot::Idle) };
}

/// Keeps the session alive. Dropping it tears the session down.
///
/// The guard is tied to the thread that created it. Dropping it inside a
/// [`with`] callback ends the session as soon as that callback returns.
#[must_use = "the session ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SessionGuard {
    _not_send: PhantomData<*const ()>,
}

impl SessionGuard {
    /// Ends the session now and hands back its manager.
    ///
    /// Returns `None` when called inside [`with`]: the manager is in use
    /// and is dropped once the callback returns.
    pub fn end(self) -> Option<ServiceManager> {
        take_active()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        take_active();
    }
}

fn take_active() -> Option<ServiceManager> {
    let taken = ACTIVE
        .try_with(|cell| {
            let Ok(mut slot) = cell.try_borrow_mut() else {
                log::warn!("session: slot is borrowed, cannot end the session.");
                return None;
            };
            match std::mem::replace(&mut *slot, Slot::Idle) {
                Slot::Active(manager) => Some(manager),
                Slot::Lent { .. } => {
                    *slot = Slot::Lent {
                        end_requested: true,
                    };
                    log::debug!("session: end deferred until the services are returned.");
                    None
                }
                Slot::Idle => None,
            }
        })
        .ok()
        .flatten();
    if taken.is_some() {
        log::info!("session: ended.");
    }
    taken
}

/// Hands a lent manager back to the slot, or drops it if the session was
/// ended meanwhile. Runs on unwind too.
struct Lease {
    manager: ServiceManager,
}

impl Drop for Lease {
    fn drop(&mut self) {
        let manager = std::mem::take(&mut self.manager);
        let ended = ACTIVE
            .try_with(|cell| {
                let Ok(mut slot) = cell.try_borrow_mut() else {
                    log::warn!("session: slot is borrowed, dropping the returned services.");
                    return Some(manager);
                };
                let keep = matches!(
                    *slot,
                    Slot::Lent {
                        end_requested: false
                    }
                );
                if keep {
                    *slot = Slot::Active(manager);
                    None
                } else {
                    *slot = Slot::Idle;
                    Some(manager)
                }
            })
            .ok()
            .flatten();
        if ended.is_some() {
            log::info!("session: ended.");
        }
    }
}

/// Installs `manager` as this thread's active session.
///
/// Fails with [`SessionError::AlreadyActive`] if a session is already
/// running; `manager` is dropped in that case.
pub fn begin(manager: ServiceManager) -> Result<SessionGuard, SessionError> {
    ACTIVE.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| SessionError::Busy)?;
        if !matches!(*slot, Slot::Idle) {
            log::warn!("session: begin rejected, a session is already active.");
            return Err(SessionError::AlreadyActive);
        }
        *slot = Slot::Active(manager);
        Ok(())
    })?;
    log::info!("session: started.");
    Ok(SessionGuard {
        _not_send: PhantomData,
    })
}

/// Runs `f` on the active manager.
///
/// Fails with [`SessionError::NoActiveSession`] outside a session and with
/// [`SessionError::Busy`] when called from inside another `with`.
pub fn with<R>(f: impl FnOnce(&mut ServiceManager) -> R) -> Result<R, SessionError> {
    let manager = ACTIVE.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| SessionError::Busy)?;
        match std::mem::replace(
            &mut *slot,
            Slot::Lent {
                end_requested: false,
            },
        ) {
            Slot::Active(manager) => Ok(manager),
            other => {
                let err = if matches!(other, Slot::Lent { .. }) {
                    SessionError::Busy
                } else {
                    SessionError::NoActiveSession
                };
                *slot = other;
                Err(err)
            }
        }
    })?;
    let mut lease = Lease { manager };
    Ok(f(&mut lease.manager))
}

/// Returns `true` while a session is active on this thread and has not
/// been asked to end.
pub fn is_active() -> bool {
    ACTIVE.with(|cell| {
        cell.try_borrow().map_or(true, |slot| {
            matches!(
                *slot,
                Slot::Active(_)
                    | Slot::Lent {
                        end_requested: false
                    }
            )
        })
    })
}
