use chrono::{DateTime, SecondsFormat, Utc};
use gloo::storage::{LocalStorage, Storage};
use minigames_core::{KeyValueStore, StorageError};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> SmallRng {
    let seed = seed.unwrap_or_else(js_random_seed);
    log::debug!("rng seed: {}", seed);
    SmallRng::seed_from_u64(seed)
}

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// ISO-8601 with milliseconds, matching `Date.prototype.toISOString`.
pub(crate) fn iso_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `localStorage` behind the core store seam.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to read {}: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError(format!("{:?}", err)))
    }
}

/// Slot for the one timer or frame loop a round runs. Replacing the handle
/// drops, and so cancels, the previous one before the new one is created.
#[derive(Debug)]
pub(crate) struct LoopHandle<H>(Option<H>);

impl<H> Default for LoopHandle<H> {
    fn default() -> Self {
        Self(None)
    }
}

impl<H> LoopHandle<H> {
    pub(crate) fn restart(&mut self, start: impl FnOnce() -> H) {
        self.0 = None;
        self.0 = Some(start());
    }

    pub(crate) fn stop(&mut self) {
        self.0 = None;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Counts how many handles are alive at once.
    struct Tracked(Rc<Cell<i32>>);

    impl Tracked {
        fn new(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self(live.clone())
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn restarting_keeps_a_single_live_handle() {
        let live = Rc::new(Cell::new(0));
        let mut handle = LoopHandle::default();
        assert!(!handle.is_running());

        handle.restart(|| Tracked::new(&live));
        handle.restart(|| {
            // the old handle is gone before the new one starts
            assert_eq!(live.get(), 0);
            Tracked::new(&live)
        });
        assert_eq!(live.get(), 1);
        assert!(handle.is_running());

        handle.stop();
        assert_eq!(live.get(), 0);
        assert!(!handle.is_running());
    }

    #[test]
    fn iso_date_matches_js_format() {
        let at = DateTime::<Utc>::from_timestamp_millis(1_714_557_600_123).unwrap();
        assert_eq!(iso_date(at), "2024-05-01T10:00:00.123Z");
    }
}
