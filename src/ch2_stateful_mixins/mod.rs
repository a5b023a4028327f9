/*
 * Mixins get interesting when they mutate state they don't own.
 * In the inheritance world every mixin writes into the same attribute
 * namespace. Here the shared state is a field of the concrete type and
 * every mixin reaches it through the accessor pair of the base trait.
 */

pub trait Toppings {
    fn toppings(&self) -> &[String];
    fn toppings_mut(&mut self) -> &mut Vec<String>;

    fn show_toppings(&self) -> String {
        if self.toppings().is_empty() {
            "Toppings: none".to_string()
        } else {
            format!("Toppings: {}", self.toppings().join(", "))
        }
    }
}

// one mixin per topping; each writes through toppings_mut()
// => what one mixin pushes, every other method sees
pub trait AddOlives: Toppings {
    fn add_olives(&mut self) {
        println!("Adding olives!");
        self.toppings_mut().push("olives".to_string());
    }
}

pub trait AddCheese: Toppings {
    fn add_cheese(&mut self) {
        println!("Adding cheese!");
        self.toppings_mut().push("cheese".to_string());
    }
}

pub trait AddPepperoni: Toppings {
    fn add_pepperoni(&mut self) {
        println!("Adding pepperoni!");
        self.toppings_mut().push("pepperoni".to_string());
    }
}

pub struct DeluxePizza {
    toppings: Vec<String>,
}

impl DeluxePizza {
    pub fn new() -> Self {
        Self {
            toppings: Vec::new(),
        }
    }

    pub fn prepare(&mut self) {
        self.add_olives();
        self.add_cheese();
        self.add_pepperoni();
    }
}

impl Default for DeluxePizza {
    fn default() -> Self {
        Self::new()
    }
}

impl Toppings for DeluxePizza {
    fn toppings(&self) -> &[String] {
        &self.toppings
    }

    fn toppings_mut(&mut self) -> &mut Vec<String> {
        &mut self.toppings
    }
}

impl AddOlives for DeluxePizza {}
impl AddCheese for DeluxePizza {}
impl AddPepperoni for DeluxePizza {}

pub struct VeggiePizza {
    toppings: Vec<String>,
}

impl VeggiePizza {
    pub fn new() -> Self {
        Self {
            toppings: Vec::new(),
        }
    }

    pub fn prepare(&mut self) {
        self.add_olives();
        self.add_cheese();
    }
}

impl Default for VeggiePizza {
    fn default() -> Self {
        Self::new()
    }
}

impl Toppings for VeggiePizza {
    fn toppings(&self) -> &[String] {
        &self.toppings
    }

    fn toppings_mut(&mut self) -> &mut Vec<String> {
        &mut self.toppings
    }
}

impl AddOlives for VeggiePizza {}
impl AddCheese for VeggiePizza {}

pub fn run() {
    let mut deluxe = DeluxePizza::new();
    deluxe.prepare();
    println!("DeluxePizza: {}", deluxe.show_toppings());

    let mut veggie = VeggiePizza::new();
    veggie.prepare();
    println!("VeggiePizza: {}", veggie.show_toppings());
}
