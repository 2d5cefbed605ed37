//! Effort-tracking policy consumed by descriptor builders.

use std::cell::Cell;
use std::rc::Rc;

use crate::settings::TrackerSettings;

/// Source of the server's effort-tracking flag.
///
/// Builders query this on every build, so implementations backed by mutable
/// state are observed as they change.
pub trait EffortTracking {
    fn track_effort(&self) -> bool;
}

impl EffortTracking for TrackerSettings {
    fn track_effort(&self) -> bool {
        self.track_effort
    }
}

impl EffortTracking for bool {
    fn track_effort(&self) -> bool {
        *self
    }
}

impl EffortTracking for Cell<bool> {
    fn track_effort(&self) -> bool {
        self.get()
    }
}

impl<T: EffortTracking + ?Sized> EffortTracking for Rc<T> {
    fn track_effort(&self) -> bool {
        (**self).track_effort()
    }
}

impl<T: EffortTracking + ?Sized> EffortTracking for &T {
    fn track_effort(&self) -> bool {
        (**self).track_effort()
    }
}
