// Copyright (c) 2024 Mike Tsao

//! Unique identifiers for modules in a rack, and a factory that keeps them
//! unique.

use core::sync::atomic::{AtomicUsize, Ordering};
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Identifies one module instance within a rack. Uid zero is never issued.
#[derive(Synonym, Serialize, Deserialize, Eq, PartialEq)]
// See
// https://doc.rust-lang.org/stable/std/marker/trait.StructuralPartialEq.html
// for explanation why we derive PartialEq rather than letting Synonym do it.
#[synonym(skip(PartialEq))]
#[serde(rename_all = "kebab-case")]
pub struct Uid(pub usize);

/// Generates unique [Uid]s.
#[derive(Debug)]
pub struct UidFactory {
    next_uid_value: AtomicUsize,
}
impl Default for UidFactory {
    fn default() -> Self {
        Self::new(Self::FIRST_UID)
    }
}
impl UidFactory {
    /// The first [Uid] handed out by a default factory.
    pub const FIRST_UID: usize = 1;

    /// Creates a new [UidFactory] starting with the given value.
    pub fn new(first_uid: usize) -> Self {
        Self {
            next_uid_value: AtomicUsize::new(first_uid),
        }
    }

    /// Generates the next unique uid.
    pub fn mint_next(&self) -> Uid {
        Uid(self.next_uid_value.fetch_add(1, Ordering::Relaxed))
    }

    /// Notifies the factory that a uid exists that was created elsewhere (for
    /// example, while loading a patch), so that it never mints a duplicate.
    pub fn notify_externally_minted_uid(&self, uid: Uid) {
        if uid.0 >= self.next_uid_value.load(Ordering::Relaxed) {
            self.next_uid_value.store(uid.0 + 1, Ordering::Relaxed);
        }
    }
}
