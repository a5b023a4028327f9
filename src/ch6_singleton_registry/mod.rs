/*
 * The per-class instance map, minus the metaclass. Interception at type
 * construction isn't a thing here, so the map is owned by a plain value:
 * TypeId keys, type-erased Arc values, one factory run per type.
 *
 * The cautionary tale this replaces: wrapping a class in a function-valued
 * decorator turns the class into a callable, and subclassing a callable
 * blows up. Nothing below ever replaces a type with a value - the types
 * stay types, a constructor fn lives alongside, and "inheritance" is plain
 * composition.
 */

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

pub struct SingletonRegistry {
    instances: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self {
            instances: Mutex::new(HashMap::new()),
        }
    }

    // first call per type runs the factory, every later call gets a clone
    // of the stored Arc
    pub fn get_or_init<Y, F>(&self, factory: F) -> Arc<Y>
    where
        Y: Send + Sync + 'static,
        F: FnOnce() -> Y,
    {
        let mut instances = self.instances.lock().unwrap();
        let entry = instances
            .entry(TypeId::of::<Y>())
            .or_insert_with(|| Arc::new(factory()) as Arc<dyn Any + Send + Sync>);
        // the entry under Y's TypeId only ever holds a Y
        Arc::clone(entry).downcast::<Y>().unwrap()
    }

    pub fn len(&self) -> usize {
        self.instances.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.lock().unwrap().is_empty()
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// the process-wide access point for the registry itself
pub fn registry() -> &'static SingletonRegistry {
    static REGISTRY: OnceLock<SingletonRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SingletonRegistry::new)
}

pub struct Logger {
    pub name: String,
}

impl Logger {
    pub fn new(name: &str) -> Self {
        println!("Created {name}");
        Self {
            name: name.to_string(),
        }
    }

    pub fn log(&self, message: &str) -> String {
        format!("[{}] {}", self.name, message)
    }
}

// extension by composition: FileLogger is its own type with its own
// registry slot, and it still is a type - nothing wrapped it away
pub struct FileLogger {
    pub inner: Logger,
    pub filename: String,
}

impl FileLogger {
    pub fn new(filename: &str) -> Self {
        Self {
            inner: Logger::new(&format!("FileLogger({filename})")),
            filename: filename.to_string(),
        }
    }

    pub fn log(&self, message: &str) -> String {
        format!("{} -> {}", self.inner.log(message), self.filename)
    }
}

pub fn run() {
    let file1 = registry().get_or_init(|| FileLogger::new("app.log"));
    // the second factory never runs - app.log won the slot for this type
    let file2 = registry().get_or_init(|| FileLogger::new("other.log"));
    println!("same FileLogger instance: {}", Arc::ptr_eq(&file1, &file2));
    println!("filename: {}", file2.filename);

    // a different type gets a different singleton
    let base = registry().get_or_init(|| Logger::new("base"));
    println!("{}", base.log("hello"));
    println!("{}", file1.log("hello"));
    println!("registered types: {}", registry().len());
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_one_instance_per_type() {
        let registry = SingletonRegistry::new();
        let first = registry.get_or_init(|| FileLogger::new("app.log"));
        let second = registry.get_or_init(|| FileLogger::new("other.log"));
        assert!(Arc::ptr_eq(&first, &second));
        // the losing factory never ran
        assert_eq!("app.log", second.filename);
    }

    #[test]
    fn test_distinct_types_distinct_instances() {
        let registry = SingletonRegistry::new();
        assert!(registry.is_empty());
        let logger = registry.get_or_init(|| Logger::new("base"));
        let file = registry.get_or_init(|| FileLogger::new("app.log"));
        assert_eq!(2, registry.len());
        assert_eq!("base", logger.name);
        assert_eq!("FileLogger(app.log)", file.inner.name);
    }

    #[test]
    fn test_factory_runs_once_per_type() {
        use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

        let registry = SingletonRegistry::new();
        let runs = AtomicUsize::new(0);
        for name in ["counted", "counted again", "and again"] {
            registry.get_or_init(|| {
                runs.fetch_add(1, Relaxed);
                Logger::new(name)
            });
        }
        assert_eq!(1, runs.load(Relaxed));
    }

    #[test]
    fn test_composed_logging() {
        let file = FileLogger::new("audit.log");
        assert_eq!(
            "[FileLogger(audit.log)] disk full -> audit.log",
            file.log("disk full")
        );
    }
}
