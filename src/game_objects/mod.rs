//! ゲームオブジェクト

pub mod matter_sprite;

pub use matter_sprite::{MatterSprite, MatterSpriteOptions, RENDERABLE};
