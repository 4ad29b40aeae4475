//! レンダリングパイプライン
//!
//! ゲームオブジェクトと名前付きの描画手法を関連付けます。描画命令そのものは扱いません。

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::ecs::EntityId;

/// 既定のパイプライン名
pub const TEXTURE_TINT_PIPELINE: &str = "TextureTintPipeline";

/// パイプラインレジストリ
#[derive(Debug)]
pub struct PipelineRegistry {
    /// 登録済みのパイプライン名
    pipelines: HashSet<String>,
    /// ゲームオブジェクトごとのパイプライン
    bindings: HashMap<EntityId, String>,
}

impl PipelineRegistry {
    /// 既定のパイプラインだけを持つレジストリを作成
    pub fn new() -> Self {
        let mut registry = Self {
            pipelines: HashSet::new(),
            bindings: HashMap::new(),
        };
        registry.register(TEXTURE_TINT_PIPELINE);
        registry
    }

    /// パイプラインを登録
    pub fn register(&mut self, name: &str) -> &mut Self {
        self.pipelines.insert(name.to_string());
        self
    }

    /// パイプラインが登録されているか
    pub fn has(&self, name: &str) -> bool {
        self.pipelines.contains(name)
    }

    /// ゲームオブジェクトにパイプラインを関連付ける
    ///
    /// 未登録のパイプラインは関連付けず `false` を返します。
    pub fn bind(&mut self, entity: EntityId, name: &str) -> bool {
        if !self.has(name) {
            warn!("pipeline '{}' is not registered, {} renders without one", name, entity);
            return false;
        }

        self.bindings.insert(entity, name.to_string());
        true
    }

    /// 関連付けを解除
    pub fn unbind(&mut self, entity: EntityId) -> bool {
        self.bindings.remove(&entity).is_some()
    }

    /// ゲームオブジェクトのパイプライン
    pub fn pipeline_of(&self, entity: EntityId) -> Option<&str> {
        self.bindings.get(&entity).map(String::as_str)
    }
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_default_pipeline() {
        let mut registry = PipelineRegistry::new();
        let entity = EntityId::from_raw(1);

        assert!(registry.bind(entity, TEXTURE_TINT_PIPELINE));
        assert_eq!(registry.pipeline_of(entity), Some(TEXTURE_TINT_PIPELINE));

        assert!(registry.unbind(entity));
        assert_eq!(registry.pipeline_of(entity), None);
    }

    #[test]
    fn test_unknown_pipeline_is_not_bound() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut registry = PipelineRegistry::new();
        let entity = EntityId::from_raw(1);

        assert!(!registry.bind(entity, "Light2D"));
        assert_eq!(registry.pipeline_of(entity), None);

        registry.register("Light2D");
        assert!(registry.bind(entity, "Light2D"));
    }
}
