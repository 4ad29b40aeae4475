//! Matter物理スプライト
//!
//! テクスチャで描画され、物理ワールドが所有する剛体を持ち、
//! 独立した物理能力（反発、摩擦、重力、スリープなど）を合成したゲームオブジェクトを提供します。

use wasm_bindgen::prelude::*;

// 派生マクロが `::matter_sprite::...` を参照できるようにする
extern crate self as matter_sprite;

// モジュール宣言
pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod game_objects;
pub mod physics;
pub mod rendering;
pub mod scene;
pub mod utils;

pub use components::*;
pub use config::{GameObjectConfig, WorldConfig};
pub use error::{MatterError, Result};
pub use game_objects::{MatterSprite, MatterSpriteOptions};
pub use physics::{BodyHandle, BodyOptions, MatterWorld, ShapeDescriptor, SharedWorld};
pub use rendering::{FrameKey, TextureManager};
pub use scene::Scene;

pub mod prelude {
    pub use crate::components::*;
    pub use game_object_derive::GameObject;
}

// 初期化用のエントリーポイント
#[wasm_bindgen(start)]
pub fn start() {
    // エラーをコンソールにパニックフックとして表示
    console_error_panic_hook::set_once();

    // ロガーの初期化
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("matter_sprite module initialized");
}

// ロガー初期化用のエクスポート関数
#[wasm_bindgen]
pub fn wasm_logger_init() {
    wasm_logger::init(wasm_logger::Config::default());
}
