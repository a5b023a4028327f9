/*
 * Singleton access the std way: a static OnceLock behind an accessor fn.
 * The factory runs once, every caller gets the same &'static, and there's
 * no type-level interception machinery to emulate - the accessor IS the
 * policy.
 *
 * Two pitfalls tag along:
 * - the constructor stays public => anyone can mint a second instance past
 *   the accessor
 * - guarding construction but not initialization => the shared instance is
 *   unique, yet the expensive load step re-runs on every access
 */

use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};
use std::sync::{Mutex, OnceLock};

use rand::Rng;

// counts ConfigManager::from_env runs; the demo also prints a random tag
// per construction - two different constructions, two different tags
static LOADS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

pub struct ConfigManager {
    values: HashMap<String, ConfigValue>,
}

impl ConfigManager {
    // public on purpose - see the bypass part of run()
    pub fn from_env() -> Self {
        LOADS.fetch_add(1, Relaxed);
        println!(
            "loading config, instance tag {}",
            rand::thread_rng().gen_range(1..=100)
        );
        Self {
            values: load_values(),
        }
    }

    pub fn global() -> &'static ConfigManager {
        static INSTANCE: OnceLock<ConfigManager> = OnceLock::new();
        INSTANCE.get_or_init(ConfigManager::from_env)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }
}

fn load_values() -> HashMap<String, ConfigValue> {
    let mut values = HashMap::new();
    values.insert(
        "api_key".to_string(),
        ConfigValue::Str(env::var("API_KEY").unwrap_or_else(|_| "default_key".to_string())),
    );
    values.insert(
        "debug_mode".to_string(),
        ConfigValue::Bool(
            env::var("DEBUG")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        ),
    );
    values.insert(
        "max_connections".to_string(),
        ConfigValue::Int(
            env::var("MAX_CONN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        ),
    );
    values
}

// counts ReloadingConfig load steps
static RELOADS: AtomicUsize = AtomicUsize::new(0);

/*
 * The construction/initialization split, reproduced: the instance behind
 * the accessor is created once, but the accessor re-runs the load step on
 * every call. Identity is shared, the side effect isn't guarded.
 */
pub struct ReloadingConfig {
    values: Mutex<HashMap<String, ConfigValue>>,
}

impl ReloadingConfig {
    pub fn global() -> &'static ReloadingConfig {
        static INSTANCE: OnceLock<ReloadingConfig> = OnceLock::new();
        let config = INSTANCE.get_or_init(|| ReloadingConfig {
            values: Mutex::new(HashMap::new()),
        });
        // same instance every time, yet this runs again and again
        RELOADS.fetch_add(1, Relaxed);
        *config.values.lock().unwrap() = load_values();
        config
    }

    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

/*
 * The alternative that needs no global at all: build the one instance at
 * startup and thread a reference through whoever needs it.
 */
pub struct ConnectionPool<'a> {
    config: &'a ConfigManager,
}

impl<'a> ConnectionPool<'a> {
    pub fn new(config: &'a ConfigManager) -> Self {
        Self { config }
    }

    pub fn budget(&self) -> i64 {
        match self.config.get("max_connections") {
            Some(ConfigValue::Int(n)) => *n,
            _ => 0,
        }
    }
}

pub fn run() {
    println!("--- accessor: one construction, one instance ---");
    let c1 = ConfigManager::global();
    let c2 = ConfigManager::global();
    // both point at the very same allocation
    println!("same instance: {}", std::ptr::eq(c1, c2));
    println!("api_key: {:?}", c1.get("api_key"));
    println!("debug_mode: {:?}", c1.get("debug_mode"));
    println!("max_connections: {:?}", c1.get("max_connections"));

    println!("--- the bypass: a public constructor mints a fresh instance ---");
    let rogue = ConfigManager::from_env();
    println!(
        "rogue bypasses the accessor: {}",
        !std::ptr::eq(c1, &rogue)
    );
    println!("constructions so far: {}", LOADS.load(Relaxed));

    println!("--- guarded construction, unguarded initialization ---");
    let before = RELOADS.load(Relaxed);
    let r1 = ReloadingConfig::global();
    let r2 = ReloadingConfig::global();
    println!("same instance: {}", std::ptr::eq(r1, r2));
    println!("max_connections: {:?}", r1.get("max_connections"));
    println!(
        "load steps for two accesses: {} (1 would mean it's guarded)",
        RELOADS.load(Relaxed) - before
    );

    println!("--- no global: thread the instance through parameters ---");
    let config = ConfigManager::from_env();
    let pool = ConnectionPool::new(&config);
    println!("pool budget: {}", pool.budget());
}
