//! 物理エンジンモジュール
//!
//! 剛体、剛体ファクトリ、剛体を所有する物理ワールドを提供します。
//! 数値計算は最小限（オイラー積分と重力、スリープ）で、衝突応答は扱いません。

pub mod body;
pub mod factory;
pub mod vertices;
pub mod world;

pub use body::{Body, BodyHandle, BodyShape, CollisionFilter};
pub use factory::{Bodies, BodyOptions, ShapeDefaults, ShapeDescriptor};
pub use world::{MatterWorld, SharedWorld, WorldEvent};
