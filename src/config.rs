use serde::{Deserialize, Serialize};

use crate::error::{MatterError, Result};

/// ゲームオブジェクト構築時の既定値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameObjectConfig {
    /// 既定の原点（0.0〜1.0、中心が既定）
    pub default_origin: (f64, f64),

    /// 既定のレンダリングパイプライン名
    pub default_pipeline: String,
}

impl Default for GameObjectConfig {
    fn default() -> Self {
        Self {
            default_origin: (0.5, 0.5),
            default_pipeline: "TextureTintPipeline".to_string(),
        }
    }
}

impl GameObjectConfig {
    /// JSON文字列から読み込む（省略したフィールドは既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MatterError::InvalidConfig(e.to_string()))
    }
}

/// 物理ワールドの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// 重力の向き
    pub gravity: (f64, f64),

    /// 重力のスケール
    pub gravity_scale: f64,

    /// 動きの小さい剛体をスリープさせるか
    pub enable_sleeping: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: (0.0, 1.0),
            gravity_scale: 0.001,
            enable_sleeping: false,
        }
    }
}

impl WorldConfig {
    /// JSON文字列から読み込む（省略したフィールドは既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MatterError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameObjectConfig::default();
        assert_eq!(config.default_origin, (0.5, 0.5));
        assert_eq!(config.default_pipeline, "TextureTintPipeline");

        let world = WorldConfig::default();
        assert_eq!(world.gravity, (0.0, 1.0));
        assert!(!world.enable_sleeping);
    }

    #[test]
    fn test_partial_json() {
        let config = GameObjectConfig::from_json(r#"{ "default_origin": [0.0, 1.0] }"#).unwrap();
        assert_eq!(config.default_origin, (0.0, 1.0));
        assert_eq!(config.default_pipeline, "TextureTintPipeline");

        let world = WorldConfig::from_json(r#"{ "enable_sleeping": true }"#).unwrap();
        assert!(world.enable_sleeping);
        assert_eq!(world.gravity_scale, 0.001);
    }

    #[test]
    fn test_invalid_json() {
        let result = WorldConfig::from_json("{ gravity: }");
        assert!(matches!(result, Err(MatterError::InvalidConfig(_))));
    }
}
