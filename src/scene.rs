//! シーン
//!
//! ゲームオブジェクトを構築する文脈です。共有の物理ワールド、テクスチャ、
//! アニメーション、パイプライン、エンティティIDの割り当て、既定値の設定を持ちます。

use std::rc::Rc;

use crate::config::{GameObjectConfig, WorldConfig};
use crate::ecs::EntityManager;
use crate::error::Result;
use crate::game_objects::{MatterSprite, MatterSpriteOptions};
use crate::physics::{MatterWorld, SharedWorld, WorldEvent};
use crate::rendering::{AnimationManager, FrameKey, PipelineRegistry, TextureManager};

/// シーン
pub struct Scene {
    /// 物理ワールド
    world: SharedWorld,
    /// テクスチャマネージャー
    pub textures: TextureManager,
    /// アニメーションマネージャー
    pub anims: AnimationManager,
    /// パイプラインレジストリ
    pub pipelines: PipelineRegistry,
    /// エンティティマネージャー
    entities: EntityManager,
    /// ゲームオブジェクトの既定値
    config: GameObjectConfig,
}

impl Scene {
    /// 新しいシーンを作成
    pub fn new(config: GameObjectConfig, world_config: WorldConfig) -> Self {
        Self {
            world: MatterWorld::new_shared(world_config),
            textures: TextureManager::new(),
            anims: AnimationManager::new(),
            pipelines: PipelineRegistry::new(),
            entities: EntityManager::new(),
            config,
        }
    }

    /// 物理ワールド
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// 物理ワールドの共有ハンドルを複製
    pub fn world_handle(&self) -> SharedWorld {
        Rc::clone(&self.world)
    }

    pub fn config(&self) -> &GameObjectConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// Matterスプライトを追加
    pub fn add_sprite(
        &mut self,
        x: f64,
        y: f64,
        texture: &str,
        frame: Option<FrameKey>,
        options: MatterSpriteOptions,
    ) -> Result<MatterSprite> {
        MatterSprite::new(self, x, y, texture, frame, options)
    }

    /// 物理ワールドを1ステップ進め、発生したイベントを返す（`delta` はミリ秒）
    pub fn step(&mut self, delta: f64) -> Vec<WorldEvent> {
        let mut world = self.world.borrow_mut();
        world.step(delta);
        world.drain_events()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(GameObjectConfig::default(), WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{HasBody, Sleep, Transform};

    #[test]
    fn test_add_sprite() {
        let mut scene = Scene::default();
        scene.textures.add_image("crate", 32.0, 48.0);

        let sprite = scene
            .add_sprite(100.0, 200.0, "crate", None, MatterSpriteOptions::default())
            .unwrap();

        assert_eq!((sprite.x(), sprite.y()), (100.0, 200.0));
        assert_eq!(scene.entities().entity_count(), 1);
        assert_eq!(scene.world().borrow().body_count(), 1);
    }

    #[test]
    fn test_step_returns_world_events() {
        let mut scene = Scene::default();
        scene.textures.add_image("crate", 10.0, 10.0);
        let mut sprite = scene
            .add_sprite(0.0, 0.0, "crate", None, MatterSpriteOptions::default())
            .unwrap();

        sprite.set_sleep_events(true, false).set_to_sleep();
        let events = scene.step(16.0);

        assert_eq!(events.len(), 1);
        assert_eq!(scene.world().borrow().game_object_of(sprite.body_handle()), Some(sprite.id()));
    }
}
