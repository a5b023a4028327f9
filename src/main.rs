use std::env::args;
use std::str::FromStr;
use std::string::ToString;

use strum::IntoEnumIterator;
use strum_macros::{self, Display, EnumIter, EnumString};

fn main() -> Result<(), String> {
    args()
        .nth(1)
        .ok_or(format!(
            "no chapter supplied, use one of {} or see unit tests",
            Chapter::iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(",")
        ))
        .and_then(|selector| {
            Chapter::from_str(&selector)
                .map(|chapter| match chapter {
                    Chapter::One => mixins_n_singletons::ch1_mixins_as_traits::run(),
                    Chapter::Two => mixins_n_singletons::ch2_stateful_mixins::run(),
                    Chapter::Three => mixins_n_singletons::ch3_constructor_pitfall::run(),
                    Chapter::Four => mixins_n_singletons::ch4_conversion_mixins::run(),
                    Chapter::Five => mixins_n_singletons::ch5_lazy_singletons::run(),
                    Chapter::Six => mixins_n_singletons::ch6_singleton_registry::run(),
                    Chapter::Seven => mixins_n_singletons::ch7_racy_initialization::run(),
                })
                .map_err(|e| e.to_string())
        })
}

#[derive(EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
enum Chapter {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
}
