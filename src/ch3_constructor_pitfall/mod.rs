/*
 * The classic multiple-inheritance trap: several ancestors contribute an
 * initializer, a single super-call chain runs exactly one of them, and the
 * parts the skipped initializers were supposed to fill stay at their
 * defaults. The fix over there is to invoke each ancestor initializer by
 * name. Both halves translate below, plus the shape that makes the whole
 * problem impossible.
 */

// two "ancestors", both contributing a same-named initializer
pub trait SetupA {
    fn setup(&mut self);
}

pub trait SetupB {
    fn setup(&mut self);
}

pub struct Widget {
    pub a_ready: bool,
    pub b_ready: bool,
}

impl SetupA for Widget {
    fn setup(&mut self) {
        println!("SetupA init");
        self.a_ready = true;
    }
}

impl SetupB for Widget {
    fn setup(&mut self) {
        println!("SetupB init");
        self.b_ready = true;
    }
}

impl Widget {
    // the single-path chain: one call, one ancestor runs, the other is
    // silently skipped
    pub fn new_chained() -> Self {
        let mut widget = Widget {
            a_ready: false,
            b_ready: false,
        };
        // widget.setup(); - doesn't even resolve, both traits donate a setup()
        SetupA::setup(&mut widget);
        widget
    }

    // the recommended escape: every ancestor initializer invoked
    // explicitly by name
    pub fn new_explicit() -> Self {
        let mut widget = Widget {
            a_ready: false,
            b_ready: false,
        };
        SetupA::setup(&mut widget);
        SetupB::setup(&mut widget);
        widget
    }
}

/*
 * The composition shape removes the trap instead of patching it: each
 * capability owns its state in a plain struct, the combined type holds one
 * field per capability, and a struct literal with a missing field doesn't
 * compile. There is nothing to forget.
 */

pub struct Named {
    pub name: String,
}

impl Named {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

pub struct Stamped {
    pub timestamp: u64,
}

impl Stamped {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

pub struct RecordA {
    pub named: Named,
    pub a_value: i64,
}

impl RecordA {
    pub fn new(name: &str, a_value: i64) -> Self {
        Self {
            named: Named::new(name),
            a_value,
        }
    }
}

pub struct RecordB {
    pub named: Named,
    pub b_value: i64,
}

impl RecordB {
    pub fn new(name: &str, b_value: i64) -> Self {
        Self {
            named: Named::new(name),
            b_value,
        }
    }
}

// two capabilities with required arguments - the signature grows, but every
// part is initialized exactly once or the literal is rejected
pub struct RecordC {
    pub named: Named,
    pub stamped: Stamped,
    pub c_value: i64,
}

impl RecordC {
    pub fn new(name: &str, timestamp: u64, c_value: i64) -> Self {
        Self {
            named: Named::new(name),
            stamped: Stamped::new(timestamp),
            c_value,
        }
    }
}

pub fn run() {
    println!("--- one ancestor initializer runs under a single-path chain ---");
    let chained = Widget::new_chained();
    println!(
        "chained: a_ready={}, b_ready={} (SetupB never ran)",
        chained.a_ready, chained.b_ready
    );

    println!("--- each ancestor initializer invoked explicitly by name ---");
    let explicit = Widget::new_explicit();
    println!(
        "explicit: a_ready={}, b_ready={}",
        explicit.a_ready, explicit.b_ready
    );

    println!("--- composition: a field per capability, nothing to skip ---");
    let a = RecordA::new("Alice", 123);
    let b = RecordB::new("Bob", 456);
    println!("RecordA: name={}, a_value={}", a.named.name, a.a_value);
    println!("RecordB: name={}, b_value={}", b.named.name, b.b_value);

    let c = RecordC::new("Carol", 1234567890, 789);
    println!(
        "RecordC: name={}, timestamp={}, c_value={}",
        c.named.name, c.stamped.timestamp, c.c_value
    );
}
