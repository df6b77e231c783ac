use std::sync::{Arc, Mutex};

/// Carries a move-only value inside a `Clone` message.
///
/// The first [`Handoff::take`] gets the value; later calls get `None`.
pub struct Handoff<T> {
    data: Arc<Mutex<Option<T>>>,
}

impl<T> Handoff<T> {
    pub fn new(value: T) -> Self {
        Handoff {
            data: Arc::new(Mutex::new(Some(value))),
        }
    }

    pub fn take(&self) -> Option<T> {
        self.data.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl<T> Clone for Handoff<T> {
    fn clone(&self) -> Self {
        Handoff {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> std::fmt::Debug for Handoff<T> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let pending = self.data.lock().map(|slot| slot.is_some()).unwrap_or(false);
        write!(fmt, "Handoff<{}>({})", std::any::type_name::<T>(), if pending { "pending" } else { "taken" })
    }
}
