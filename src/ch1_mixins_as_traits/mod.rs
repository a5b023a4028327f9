/*
 * A mixin is a class that donates methods into whatever inherits it.
 * Rust has no inheritance => a capability becomes a trait:
 * - the required surface is tiny (here just name())
 * - the donated behavior lives in provided methods
 * - a concrete type opts in with an empty impl block per capability
 */

// the "base class" every capability builds on
pub trait Animal {
    fn name(&self) -> &str;

    fn speak(&self) -> String {
        format!("{} makes a sound.", self.name())
    }
}

// capabilities assume name() exists => the supertrait bound states the
// assumption instead of leaving it to runtime luck
pub trait Fly: Animal {
    fn fly(&self) -> String {
        format!("{} is flying!", self.name())
    }
}

pub trait Walk: Animal {
    fn walk(&self) -> String {
        format!("{} is walking.", self.name())
    }
}

pub trait Swim: Animal {
    fn swim(&self) -> String {
        format!("{} is swimming.", self.name())
    }
}

pub struct Duck {
    name: String,
}

impl Duck {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Animal for Duck {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        format!("{} says quack!", self.name)
    }
}

// each empty impl mixes one more capability in
impl Fly for Duck {}
impl Walk for Duck {}
impl Swim for Duck {}

pub struct Dog {
    name: String,
}

impl Dog {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Animal for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        format!("{} says woof!", self.name)
    }
}

impl Walk for Dog {}
impl Swim for Dog {}

pub struct Eagle {
    name: String,
}

impl Eagle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Animal for Eagle {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        format!("{} screeches!", self.name)
    }
}

impl Fly for Eagle {}
impl Walk for Eagle {}

pub struct Fish {
    name: String,
}

impl Fish {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Animal for Fish {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        format!("{} blubs.", self.name)
    }
}

impl Swim for Fish {}

// bounds compose too: this only accepts types that mixed both capabilities in
pub fn amphibious_intro<Y: Walk + Swim>(animal: &Y) -> String {
    format!("{} {}", animal.walk(), animal.swim())
}

pub fn run() {
    let duck = Duck::new("Daffy");
    println!("{}", duck.speak());
    println!("{}", duck.fly());
    println!("{}", duck.walk());
    println!("{}", duck.swim());

    let dog = Dog::new("Rex");
    println!("{}", dog.speak());
    println!("{}", dog.walk());
    println!("{}", dog.swim());

    let eagle = Eagle::new("Eddie");
    println!("{}", eagle.speak());
    println!("{}", eagle.fly());
    println!("{}", eagle.walk());

    let fish = Fish::new("Nemo");
    println!("{}", fish.speak());
    println!("{}", fish.swim());

    // ducks and dogs qualify, eagles don't swim:
    // amphibious_intro(&eagle); - the trait bound `Eagle: Swim` is not satisfied
    println!("{}", amphibious_intro(&duck));
    println!("{}", amphibious_intro(&dog));
}

#[cfg(test)]
mod test {
    use super::*;

    // a composed type exposes the union of what its capabilities donate
    #[test]
    fn test_duck_has_all_capabilities() {
        let duck = Duck::new("Daffy");
        assert_eq!("Daffy says quack!", duck.speak());
        assert_eq!("Daffy is flying!", duck.fly());
        assert_eq!("Daffy is walking.", duck.walk());
        assert_eq!("Daffy is swimming.", duck.swim());
    }

    #[test]
    fn test_partial_compositions() {
        let dog = Dog::new("Rex");
        assert_eq!("Rex says woof!", dog.speak());
        assert_eq!("Rex is walking.", dog.walk());
        assert_eq!("Rex is swimming.", dog.swim());

        let fish = Fish::new("Nemo");
        assert_eq!("Nemo blubs.", fish.speak());
        assert_eq!("Nemo is swimming.", fish.swim());
    }

    // provided methods fall back to the base trait default unless overridden
    #[test]
    fn test_default_speak() {
        struct Sloth;
        impl Animal for Sloth {
            fn name(&self) -> &str {
                "Sid"
            }
        }
        assert_eq!("Sid makes a sound.", Sloth.speak());
    }

    #[test]
    fn test_composed_bounds() {
        assert_eq!(
            "Daffy is walking. Daffy is swimming.",
            amphibious_intro(&Duck::new("Daffy"))
        );
    }
}
