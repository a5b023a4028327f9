pub mod ch1_mixins_as_traits;
pub mod ch2_stateful_mixins;
pub mod ch3_constructor_pitfall;
pub mod ch4_conversion_mixins;
pub mod ch5_lazy_singletons;
pub mod ch6_singleton_registry;
pub mod ch7_racy_initialization;
