#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::loader::{
        CONFIG_ENV_VAR, ConfigError, get_config_file_path, load_config_from_path,
        save_config_to_path,
    };
    use crate::config::{Config, Settings};
    use crate::progression::Difficulty;
    use crate::shapes::ShapeFamily;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    // Helper function to create a test config path inside a fresh temp directory
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("phasefall.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Loading a non-existent config should create a default one
        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, Config::default());
        assert_eq!(config.board.rows, 20);
        assert_eq!(config.board.cols, 10);
        assert_eq!(config.game.difficulty, Difficulty::Normal);
        assert_eq!(config.game.block_family, ShapeFamily::Tetromino);
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.board.rows = 24;
        config.game.difficulty = Difficulty::Hard;
        config.game.block_family = ShapeFamily::Pentomino;
        config.timing.fast_drop_ms = 30;

        save_config_to_path(&config, &config_path).expect("Failed to save config");
        let loaded_config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(
            &config_path,
            "[game]\ndifficulty = \"easy\"\nblock_family = \"tromino\"\n",
        )
        .expect("Failed to write config");

        let config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(config.game.difficulty, Difficulty::Easy);
        assert_eq!(config.game.block_family, ShapeFamily::Tromino);
        assert_eq!(config.board, Config::default().board);
        assert_eq!(config.timing, Config::default().timing);
    }

    #[test]
    fn test_malformed_config() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();

        // Write invalid TOML
        fs::write(&config_path, "invalid toml content ! @ #")
            .expect("Failed to write invalid config");

        match load_config_from_path(&config_path) {
            Err(ConfigError::Parse(_)) => {}
            Ok(_) => panic!("Expected error when loading invalid config"),
            Err(e) => panic!("Unexpected error type: {e:?}"),
        }
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[game]\ndifficulty = \"nightmare\"\n").unwrap();

        assert!(matches!(
            load_config_from_path(&config_path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_var_overrides_path() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Only this test touches the variable
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, &config_path);
        }
        let resolved = get_config_file_path();
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        assert_eq!(resolved, config_path);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.timing.move_repeat_ms = 80;
        let settings = config.settings();

        assert_eq!(settings.rows, 20);
        assert_eq!(settings.cols, 10);
        assert_eq!(settings.fast_drop_interval, Duration::from_millis(50));
        assert_eq!(settings.move_repeat_interval, Duration::from_millis(80));
        assert_eq!(settings.rotate_repeat_interval, Duration::from_millis(150));
        settings.validate();
    }

    #[test]
    #[should_panic(expected = "columns wide")]
    fn test_board_too_narrow_for_pentominoes() {
        let settings = Settings {
            cols: 4,
            ..Settings::default()
        };
        settings.validate();
    }

    #[test]
    #[should_panic(expected = "at most 100x100 is supported")]
    fn test_oversized_board_rejected() {
        let settings = Settings {
            cols: 70_000,
            ..Settings::default()
        };
        settings.validate();
    }

    #[test]
    fn test_largest_board_accepted() {
        let settings = Settings {
            rows: 100,
            cols: 100,
            ..Settings::default()
        };
        settings.validate();
    }

    #[test]
    #[should_panic(expected = "input intervals must be non-zero")]
    fn test_zero_interval_rejected() {
        let settings = Settings {
            fast_drop_interval: Duration::ZERO,
            ..Settings::default()
        };
        settings.validate();
    }
}
