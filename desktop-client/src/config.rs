use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::game::{FieldSize, SessionSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "snake_arcade_config.yaml";

pub type ClientConfigManager =
    ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager() -> ClientConfigManager {
    ConfigManager::from_yaml_file(CONFIG_FILE)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: GameConfig,
    pub audio: AudioConfig,
    pub data: DataConfig,
    pub fullscreen: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub field_width: u32,
    pub field_height: u32,
    pub ticks_per_second: u32,
    pub powerup_spawn_probability: f32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    pub volume: f32,
    pub music_enabled: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DataConfig {
    pub leaderboard_file: String,
    pub save_file: String,
}

impl Config {
    /// Session settings for a new game with the currently picked skins.
    pub fn session_settings(&self, snake_skin_idx: usize, fruit_skin_idx: usize) -> SessionSettings {
        SessionSettings {
            field: FieldSize::new(self.game.field_width as usize, self.game.field_height as usize),
            ticks_per_second: self.game.ticks_per_second,
            powerup_spawn_probability: self.game.powerup_spawn_probability,
            snake_skin_idx,
            fruit_skin_idx,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.audio.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        // Reuse the engine-side range checks instead of restating them.
        SessionSettings {
            field: FieldSize::new(self.field_width as usize, self.field_height as usize),
            ticks_per_second: self.ticks_per_second,
            powerup_spawn_probability: self.powerup_spawn_probability,
            snake_skin_idx: 0,
            fruit_skin_idx: 0,
        }
        .validate()
    }
}

impl Validate for AudioConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err("volume must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

impl Validate for DataConfig {
    fn validate(&self) -> Result<(), String> {
        if self.leaderboard_file.is_empty() {
            return Err("leaderboard_file must not be empty".to_string());
        }
        if self.save_file.is_empty() {
            return Err("save_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                field_width: 40,
                field_height: 30,
                ticks_per_second: 15,
                powerup_spawn_probability: 0.2,
            },
            audio: AudioConfig {
                volume: 0.8,
                music_enabled: true,
            },
            data: DataConfig {
                leaderboard_file: "leaderboard.json".to_string(),
                save_file: "savegame.json".to_string(),
            },
            fullscreen: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_arcade_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();

        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_round_trips_through_manager() {
        let mut config = Config::default();
        config.game.ticks_per_second = 20;
        config.audio.music_enabled = false;

        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        let manager = ClientConfigManager::new(provider, YamlConfigSerializer::new());

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_missing_config_file_yields_default() {
        let manager = ClientConfigManager::from_yaml_file("this_config_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let invalid_content = r#"
            game:
              field_width: 40
              field_height: 30
              ticks_per_second: 0
              powerup_spawn_probability: 0.2
            audio:
              volume: 0.8
              music_enabled: true
            data:
              leaderboard_file: leaderboard.json
              save_file: savegame.json
            fullscreen: true
        "#;

        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        provider.set_config_content(invalid_content).unwrap();

        let manager = ClientConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());

        std::fs::remove_file(&file_path).unwrap();
    }
}
