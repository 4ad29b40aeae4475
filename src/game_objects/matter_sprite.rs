//! Matterスプライト
//!
//! テクスチャで描画され、アニメーションでき、物理ワールドが所有する剛体を1つ持つゲームオブジェクトです。
//! 物理の操作はすべて能力トレイトから提供され、スプライト自身は描画状態だけを持ちます。
//!
//! ```rust,ignore
//! let mut scene = Scene::default();
//! scene.textures.add_image("crate", 32.0, 48.0);
//!
//! let mut sprite = scene.add_sprite(100.0, 50.0, "crate", None, MatterSpriteOptions::default())?;
//! sprite.set_bounce(0.6).set_friction(0.05, None, None);
//! ```

use std::time::Duration;

use game_object_derive::GameObject;
use log::debug;
use serde_json::Value;

use crate::components::{CapabilityDescriptor, HasBody, SetBody, SetBodyOptions, Transform};
use crate::ecs::EntityId;
use crate::error::{MatterError, Result};
use crate::physics::{Bodies, BodyHandle, BodyOptions, ShapeDefaults, ShapeDescriptor, SharedWorld};
use crate::rendering::{
    AnimationState, BlendMode, FrameKey, RenderState, RenderTransform, TextureManager,
};
use crate::scene::Scene;
use crate::utils::math::Vec2;

/// スプライト自身が提供する描画の操作
pub const RENDERABLE: CapabilityDescriptor = CapabilityDescriptor {
    name: "Renderable",
    operations: &[
        "id",
        "render",
        "render_transform",
        "anims",
        "pipeline",
        "spawn_position",
        "width",
        "height",
        "set_texture",
        "set_frame",
        "set_size_to_frame",
        "set_origin",
        "set_tint",
        "set_alpha",
        "set_visible",
        "set_depth",
        "set_blend_mode",
        "set_flip",
        "set_flip_x",
        "set_flip_y",
        "play",
        "stop",
        "update",
        "sync_from_body",
        "destroy",
    ],
};

/// Matterスプライトの構築オプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatterSpriteOptions {
    /// 剛体の形状（省略時は描画サイズの長方形）
    pub shape: Option<ShapeDescriptor>,

    /// ワールドへの登録と剛体のオプション
    pub options: SetBodyOptions,
}

impl MatterSpriteOptions {
    /// JSONから読み込む
    ///
    /// `shape` は形状記述子です。種類名だけの文字列の場合は `radius` などの形状のキーを
    /// 同じ階層に書けます。その他のキーは剛体のオプションです。
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| MatterError::InvalidConfig(e.to_string()))?;

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(MatterError::InvalidConfig(format!(
                    "sprite options must be an object, got {}",
                    other
                )))
            }
        };

        let shape = match object.remove("shape") {
            None | Some(Value::Null) => None,
            Some(shape) => Some(ShapeDescriptor::from_options(shape, &mut object)?),
        };
        let options = serde_json::from_value(Value::Object(object))
            .map_err(|e| MatterError::InvalidConfig(e.to_string()))?;

        Ok(Self { shape, options })
    }

    /// 形状を指定
    pub fn with_shape(mut self, shape: ShapeDescriptor) -> Self {
        self.shape = Some(shape);
        self
    }

    /// ワールドに登録するか指定
    pub fn with_add_to_world(mut self, add_to_world: bool) -> Self {
        self.options.add_to_world = Some(add_to_world);
        self
    }

    /// 剛体のオプションを指定
    pub fn with_body(mut self, body: BodyOptions) -> Self {
        self.options.body = body;
        self
    }
}

/// Matterスプライト
#[derive(GameObject)]
#[capabilities(
    Bounce, Collision, Force, Friction, Gravity, Mass, Sensor, SetBody, Sleep, Static, Transform,
    Velocity, self::RENDERABLE
)]
pub struct MatterSprite {
    /// エンティティID（剛体の逆参照）
    id: EntityId,
    /// 剛体を所有するワールド
    world: SharedWorld,
    /// 現在の剛体
    body: BodyHandle,
    /// 描画状態
    render: RenderState,
    /// アニメーションの再生状態
    anims: AnimationState,
    /// 剛体から同期した変形
    transform: RenderTransform,
    /// 描画パイプライン
    pipeline: Option<String>,
    /// 生成位置（剛体を差し替えるときの既定位置）
    spawn_position: Vec2,
}

impl MatterSprite {
    /// シーンにMatterスプライトを構築
    ///
    /// テクスチャかフレームが見つからない場合、または形状記述子が不正な場合は
    /// 何も作らずにエラーを返します。
    pub fn new(
        scene: &mut Scene,
        x: f64,
        y: f64,
        texture: &str,
        frame: Option<FrameKey>,
        options: MatterSpriteOptions,
    ) -> Result<Self> {
        let id = scene.entities_mut().create_entity();

        match Self::build(scene, id, x, y, texture, frame, &options) {
            Ok(sprite) => Ok(sprite),
            Err(err) => {
                scene.entities_mut().destroy_entity(id);
                Err(err)
            }
        }
    }

    fn build(
        scene: &mut Scene,
        id: EntityId,
        x: f64,
        y: f64,
        texture: &str,
        frame: Option<FrameKey>,
        options: &MatterSpriteOptions,
    ) -> Result<Self> {
        let anims = AnimationState::new();

        let frame = scene.textures.resolve_frame(texture, frame.as_ref())?;
        let mut render = RenderState::new(frame);
        render.set_size_to_frame();
        let (origin_x, origin_y) = scene.config().default_origin;
        render.set_origin(origin_x, origin_y);

        // 形状の省略時は描画サイズの長方形（大きさが0のフレームはエラー）
        let defaults = ShapeDefaults {
            position: (x, y),
            width: render.width,
            height: render.height,
        };
        let shape = options
            .shape
            .clone()
            .unwrap_or_else(|| ShapeDescriptor::rectangle(render.width, render.height));
        let body = Bodies::from_descriptor(&shape, &defaults, &options.options.body)?;

        let world = scene.world_handle();

        let handle = {
            let mut world = world.borrow_mut();
            let handle = world.insert(body);
            world.set_game_object(handle, Some(id))?;
            if options.options.add_to_world() {
                world.add(handle);
            }
            handle
        };

        let mut sprite = Self {
            id,
            world,
            body: handle,
            render,
            anims,
            transform: RenderTransform::default(),
            pipeline: None,
            spawn_position: (x, y),
        };

        sprite.set_position(x, y);
        sprite.sync_from_body();

        let pipeline = scene.config().default_pipeline.clone();
        if scene.pipelines.bind(id, &pipeline) {
            sprite.pipeline = Some(pipeline);
        }

        debug!("{} created with {}", id, handle);
        Ok(sprite)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// 描画状態
    pub fn render(&self) -> &RenderState {
        &self.render
    }

    /// 剛体から同期した変形
    pub fn render_transform(&self) -> &RenderTransform {
        &self.transform
    }

    /// アニメーションの再生状態
    pub fn anims(&self) -> &AnimationState {
        &self.anims
    }

    /// 描画パイプライン名
    pub fn pipeline(&self) -> Option<&str> {
        self.pipeline.as_deref()
    }

    /// 生成位置
    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn width(&self) -> f64 {
        self.render.width
    }

    pub fn height(&self) -> f64 {
        self.render.height
    }

    /// テクスチャとフレームを変更（大きさはフレームに合わせる）
    pub fn set_texture(
        &mut self,
        textures: &TextureManager,
        key: &str,
        frame: Option<FrameKey>,
    ) -> Result<&mut Self> {
        let frame = textures.resolve_frame(key, frame.as_ref())?;
        self.render.set_frame(frame, true);
        Ok(self)
    }

    /// 同じテクスチャの別のフレームに変更
    pub fn set_frame(&mut self, textures: &TextureManager, frame: FrameKey) -> Result<&mut Self> {
        let frame = textures.resolve_frame(&self.render.texture, Some(&frame))?;
        self.render.set_frame(frame, true);
        Ok(self)
    }

    /// 大きさを現在のフレームに合わせる（剛体は変わらない）
    pub fn set_size_to_frame(&mut self) -> &mut Self {
        self.render.set_size_to_frame();
        self
    }

    pub fn set_origin(&mut self, x: f64, y: f64) -> &mut Self {
        self.render.set_origin(x, y);
        self
    }

    pub fn set_tint(&mut self, tint: u32) -> &mut Self {
        self.render.tint = tint;
        self
    }

    pub fn set_alpha(&mut self, alpha: f64) -> &mut Self {
        self.render.set_alpha(alpha);
        self
    }

    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.render.visible = visible;
        self
    }

    pub fn set_depth(&mut self, depth: f64) -> &mut Self {
        self.render.depth = depth;
        self
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) -> &mut Self {
        self.render.blend_mode = blend_mode;
        self
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) -> &mut Self {
        self.render.set_flip(flip_x, flip_y);
        self
    }

    pub fn set_flip_x(&mut self, flip_x: bool) -> &mut Self {
        self.render.flip_x = flip_x;
        self
    }

    pub fn set_flip_y(&mut self, flip_y: bool) -> &mut Self {
        self.render.flip_y = flip_y;
        self
    }

    /// アニメーションを再生
    pub fn play(&mut self, scene: &Scene, key: &str) -> Result<&mut Self> {
        let animation = scene.anims.get(key)?;
        let first = self.anims.play(animation).cloned();
        if let Some(first) = first {
            let frame = scene.textures.resolve_frame(&first.texture, Some(&first.frame))?;
            self.render.set_frame(frame, true);
        }
        Ok(self)
    }

    /// アニメーションを停止
    pub fn stop(&mut self) -> &mut Self {
        self.anims.stop();
        self
    }

    /// アニメーションを進める
    pub fn update(&mut self, scene: &Scene, delta: Duration) -> Result<()> {
        if let Some(next) = self.anims.update(delta).cloned() {
            let frame = scene.textures.resolve_frame(&next.texture, Some(&next.frame))?;
            self.render.set_frame(frame, true);
        }
        Ok(())
    }

    /// 剛体の位置、回転、スケールを描画用の変形に反映
    pub fn sync_from_body(&mut self) -> &mut Self {
        let (position, rotation, scale) =
            self.with_body(|body| (body.position(), body.angle(), body.scale()));

        self.transform = RenderTransform {
            x: position.0,
            y: position.1,
            rotation,
            scale_x: scale.0,
            scale_y: scale.1,
        };
        self
    }

    /// スプライトを破棄
    ///
    /// 剛体の逆参照を外して登録を解除し、ワールドに解放させます。
    pub fn destroy(self, scene: &mut Scene) -> Result<()> {
        {
            let mut world = self.world.borrow_mut();
            world.set_game_object(self.body, None)?;
            world.remove(self.body);
            world.dispose(self.body)?;
        }

        scene.pipelines.unbind(self.id);
        scene.entities_mut().destroy_entity(self.id);
        debug!("{} destroyed", self.id);
        Ok(())
    }
}

impl SetBody for MatterSprite {
    fn body_defaults(&self) -> ShapeDefaults {
        ShapeDefaults {
            position: self.spawn_position,
            width: self.render.width,
            height: self.render.height,
        }
    }
}

impl std::fmt::Debug for MatterSprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatterSprite")
            .field("id", &self.id)
            .field("body", &self.body)
            .field("texture", &self.render.texture)
            .field("frame", &self.render.frame.name)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}
