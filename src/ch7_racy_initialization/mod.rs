/*
 * Lazy construction under concurrency, twice:
 * - LazyCell: double-checked locking. A flag read outside the lock lets
 *   initialized callers skip the lock entirely; the lock serializes the
 *   rest; a second check under the lock collapses the racers that all saw
 *   the flag down. Exactly one construction, one shared instance.
 * - RacyCell: the same surface with the inner check missing. Kept broken
 *   on purpose - the whole point is watching it build several instances.
 */

use std::cell::UnsafeCell;
use std::env;
use std::sync::atomic::{
    AtomicBool, AtomicUsize,
    Ordering::{Acquire, Relaxed, Release},
};
use std::sync::{Arc, Mutex};
use std::thread::{scope, sleep};
use std::time::Duration;

pub struct LazyCell<Y> {
    initialized: AtomicBool,
    init_lock: Mutex<()>,
    slot: UnsafeCell<Option<Arc<Y>>>,
}

// UnsafeCell kills the auto Sync; the flag/lock discipline around the slot
// makes sharing sound again as long as Y itself can cross threads
unsafe impl<Y: Send + Sync> Sync for LazyCell<Y> {}

impl<Y> LazyCell<Y> {
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(()),
            slot: UnsafeCell::new(None),
        }
    }

    /// Exactly one factory run no matter how many callers race in;
    /// every caller walks away with the same instance.
    pub fn get_or_create(&self, factory: impl FnOnce() -> Y) -> Arc<Y> {
        // fast path: once the flag is up nobody touches the lock again
        if !self.initialized.load(Acquire) {
            let _region = self.init_lock.lock().unwrap();
            // the double check: racers that saw the flag down arrive here
            // one by one, only the first finds it still down
            if !self.initialized.load(Acquire) {
                let instance = Arc::new(factory());
                // SAFETY: writes happen only here, inside the lock region,
                // before the flag goes up => no concurrent reader or writer
                unsafe { *self.slot.get() = Some(instance) };
                self.initialized.store(true, Release);
            }
        }
        // SAFETY: the flag is raised after the slot is filled and the slot
        // is never written again, so this read can't race
        unsafe { (*self.slot.get()).as_ref().map(Arc::clone).unwrap() }
    }

    /// Same discipline for a factory that can fail: an Err publishes
    /// nothing, the flag stays down and a later caller retries.
    pub fn try_get_or_create<E>(
        &self,
        factory: impl FnOnce() -> Result<Y, E>,
    ) -> Result<Arc<Y>, E> {
        if !self.initialized.load(Acquire) {
            let _region = self.init_lock.lock().unwrap();
            if !self.initialized.load(Acquire) {
                // the ? returns before anything is stored => no caller can
                // ever see a half-initialized instance
                let instance = Arc::new(factory()?);
                // SAFETY: same single-writer-under-lock argument as above
                unsafe { *self.slot.get() = Some(instance) };
                self.initialized.store(true, Release);
            }
        }
        // SAFETY: reachable only with the flag up => the slot is filled
        Ok(unsafe { (*self.slot.get()).as_ref().map(Arc::clone).unwrap() })
    }
}

impl<Y> Default for LazyCell<Y> {
    fn default() -> Self {
        Self::new()
    }
}

/*
 * The unguarded variant. The flag is consulted once, before a slow
 * construction - every caller that saw it down builds its own instance and
 * the publications race, last writer wins. The lock below only keeps the
 * slot itself from tearing, it does nothing for the check-then-act gap.
 */
pub struct RacyCell<Y> {
    present: AtomicBool,
    slot: Mutex<Option<Arc<Y>>>,
}

impl<Y> RacyCell<Y> {
    pub const fn new() -> Self {
        Self {
            present: AtomicBool::new(false),
            slot: Mutex::new(None),
        }
    }

    pub fn get_or_create(&self, factory: impl FnOnce() -> Y) -> Arc<Y> {
        if !self.present.load(Acquire) {
            // any number of callers fit between the check above and the
            // store below, and each of them runs the factory
            let instance = Arc::new(factory());
            *self.slot.lock().unwrap() = Some(Arc::clone(&instance));
            self.present.store(true, Release);
            return instance;
        }
        Arc::clone(self.slot.lock().unwrap().as_ref().unwrap())
    }
}

impl<Y> Default for RacyCell<Y> {
    fn default() -> Self {
        Self::new()
    }
}

static NEXT_DB_ID: AtomicUsize = AtomicUsize::new(1);

pub struct Database {
    pub id: usize,
    pub dsn: String,
}

impl Database {
    // slow on purpose so concurrent callers pile into the race window
    pub fn connect() -> Self {
        sleep(Duration::from_millis(10));
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("DB_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5432);
        let name = env::var("DB_NAME").unwrap_or_else(|_| "app".to_string());
        let id = NEXT_DB_ID.fetch_add(1, Relaxed);
        println!("Database created with ID: {id}");
        Self {
            id,
            dsn: format!("{host}:{port}/{name}"),
        }
    }
}

const WORKERS: usize = 5;

pub fn run() {
    println!("UNGUARDED - RACE CONDITION");
    let racy = RacyCell::new();
    let racy_ids = connect_from_workers(|| racy.get_or_create(Database::connect));
    report(&racy_ids, "more than 1 expected, the check-then-act gap is wide open");

    println!("\nGUARDED - DOUBLE-CHECKED LOCKING");
    let lazy = LazyCell::new();
    let lazy_ids = connect_from_workers(|| lazy.get_or_create(Database::connect));
    report(&lazy_ids, "exactly 1 expected");

    println!("\nFALLIBLE FACTORY - NOTHING PUBLISHED ON FAILURE");
    let flaky: LazyCell<Database> = LazyCell::new();
    let attempt = flaky.try_get_or_create(|| -> Result<Database, String> {
        Err("connection refused".to_string())
    });
    println!("first attempt: {:?}", attempt.err());
    // the failed attempt left the cell empty => this one constructs
    let db = flaky
        .try_get_or_create(|| Ok::<Database, String>(Database::connect()))
        .unwrap();
    println!("second attempt connected, id {} ({})", db.id, db.dsn);
}

// spawn WORKERS concurrent construction attempts and collect the ids they saw
fn connect_from_workers(get: impl Fn() -> Arc<Database> + Sync) -> Vec<usize> {
    let mut ids = Vec::new();
    scope(|s| {
        let handles: Vec<_> = (0..WORKERS).map(|_| s.spawn(|| get().id)).collect();
        for handle in handles {
            ids.push(handle.join().unwrap());
        }
    });
    ids
}

fn report(ids: &[usize], expectation: &str) {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    println!("unique instances: {} ({expectation})", unique.len());
}

#[cfg(test)]
mod test {
    use std::sync::Barrier;

    use super::*;

    // N concurrent construction attempts yield exactly 1 instance
    #[test]
    fn test_guarded_single_construction() {
        let cell = LazyCell::new();
        let constructions = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        let mut instances = Vec::new();
        scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cell.get_or_create(|| {
                            constructions.fetch_add(1, Relaxed);
                            Database::connect()
                        })
                    })
                })
                .collect();
            for handle in handles {
                instances.push(handle.join().unwrap());
            }
        });

        assert_eq!(1, constructions.load(Relaxed));
        let first = &instances[0];
        assert!(instances.iter().all(|i| Arc::ptr_eq(first, i)));
    }

    #[test]
    fn test_guarded_sequential_identity() {
        let cell = LazyCell::new();
        let a = cell.get_or_create(Database::connect);
        let b = cell.get_or_create(Database::connect);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.id, b.id);
        assert_eq!("localhost:5432/app", a.dsn);
    }

    // the negative property: the unguarded cell is permitted to (and with a
    // widened window, does) construct more than one instance
    #[test]
    fn test_unguarded_races_to_multiple_instances() {
        let cell = RacyCell::new();
        let barrier = Barrier::new(8);

        let mut ids = Vec::new();
        scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        // everyone passes the check before anyone publishes
                        cell.get_or_create(Database::connect).id
                    })
                })
                .collect();
            for handle in handles {
                ids.push(handle.join().unwrap());
            }
        });

        ids.sort_unstable();
        ids.dedup();
        assert!(ids.len() > 1);
    }

    // a failing factory publishes nothing and a later call retries
    #[test]
    fn test_failure_publishes_nothing() {
        let cell: LazyCell<Database> = LazyCell::new();

        let failed = cell.try_get_or_create(|| Err::<Database, String>("boom".to_string()));
        assert_eq!(Some("boom".to_string()), failed.err());

        let constructions = AtomicUsize::new(0);
        let recovered = cell
            .try_get_or_create(|| -> Result<Database, String> {
                constructions.fetch_add(1, Relaxed);
                Ok(Database::connect())
            })
            .unwrap();
        assert_eq!(1, constructions.load(Relaxed));

        // and the published instance is now the one everybody sees
        let again = cell
            .try_get_or_create(|| Err::<Database, String>("never called".to_string()))
            .unwrap();
        assert!(Arc::ptr_eq(&recovered, &again));
    }

    #[test]
    fn test_mixed_fallible_and_infallible_access() {
        let cell = LazyCell::new();
        let via_try = cell
            .try_get_or_create(|| Ok::<Database, String>(Database::connect()))
            .unwrap();
        let via_plain = cell.get_or_create(Database::connect);
        assert!(Arc::ptr_eq(&via_try, &via_plain));
    }
}
