//! エラー定義
//!
//! ゲームオブジェクトの構築、剛体の差し替え、能力の合成で発生するエラーです。
//! 呼び出し側の入力不正を表すため、自動的なリトライは行いません。

use thiserror::Error;

use crate::physics::BodyHandle;

/// Matterスプライトのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatterError {
    /// テクスチャまたはフレームが見つからない
    #[error("texture '{texture}' has no frame '{frame}'")]
    ResourceNotFound { texture: String, frame: String },

    /// 剛体ファクトリが形状記述子を解釈できない
    #[error("invalid shape descriptor: {0}")]
    InvalidShapeDescriptor(String),

    /// 能力の合成で操作名が重複した
    #[error("capability invariant violated: {0}")]
    InvariantViolation(String),

    /// ワールドに存在しない剛体
    #[error("body {0} not found in world")]
    BodyNotFound(BodyHandle),

    /// 登録中、またはゲームオブジェクトに紐付いている剛体は解放できない
    #[error("body {0} is still in use")]
    BodyInUse(BodyHandle),

    /// 登録されていないアニメーション
    #[error("animation '{0}' not found")]
    AnimationNotFound(String),

    /// 設定の読み込みに失敗
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// このクレートの結果型
pub type Result<T> = std::result::Result<T, MatterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MatterError::ResourceNotFound {
            texture: "hero".to_string(),
            frame: "walk_3".to_string(),
        };
        assert_eq!(err.to_string(), "texture 'hero' has no frame 'walk_3'");

        let err = MatterError::InvalidShapeDescriptor("unknown type 'blob'".to_string());
        assert!(err.to_string().contains("blob"));
    }
}
