pub mod collision_tests;
pub mod config_loader_tests;
pub mod spawner_tests;
pub mod ui_tests;

pub mod test_utils;
