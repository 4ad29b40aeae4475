//! 物理能力コンポーネント
//!
//! 剛体を持つゲームオブジェクトに、反発、衝突フィルター、力、摩擦、重力、質量、
//! センサー、剛体の差し替え、スリープ、静的化、変形、速度の各能力を与えるトレイト群です。
//!
//! 各トレイトは [`HasBody`] を実装したすべての型に対して一度だけ実装され、
//! 独自の状態を持たずにワールド内の剛体を直接読み書きします。

pub mod bounce;
pub mod capability;
pub mod collision;
pub mod force;
pub mod friction;
pub mod gravity;
pub mod mass;
pub mod sensor;
pub mod set_body;
pub mod sleep;
pub mod static_body;
pub mod transform;
pub mod velocity;

use crate::ecs::EntityId;
use crate::physics::{Body, BodyHandle, SharedWorld};

pub use bounce::Bounce;
pub use capability::{CapabilityDescriptor, CapabilitySet};
pub use collision::Collision;
pub use force::Force;
pub use friction::Friction;
pub use gravity::Gravity;
pub use mass::Mass;
pub use sensor::Sensor;
pub use set_body::{SetBody, SetBodyOptions};
pub use sleep::Sleep;
pub use static_body::Static;
pub use transform::Transform;
pub use velocity::Velocity;

/// 能力の記述子
///
/// `#[capabilities(SetBody)]` は `descriptors::SET_BODY` に解決されます。
pub mod descriptors {
    pub use super::bounce::BOUNCE;
    pub use super::collision::COLLISION;
    pub use super::force::FORCE;
    pub use super::friction::FRICTION;
    pub use super::gravity::GRAVITY;
    pub use super::mass::MASS;
    pub use super::sensor::SENSOR;
    pub use super::set_body::SET_BODY;
    pub use super::sleep::SLEEP;
    pub use super::static_body::STATIC;
    pub use super::transform::TRANSFORM;
    pub use super::velocity::VELOCITY;
}

/// ワールドが所有する剛体を1つ持つゲームオブジェクト
///
/// 通常は `#[derive(GameObject)]` で実装します。
pub trait HasBody {
    /// ゲームオブジェクトのID（剛体の逆参照に使用）
    fn game_object_id(&self) -> EntityId;

    /// 剛体を所有するワールド
    fn world(&self) -> &SharedWorld;

    /// 現在の剛体
    fn body_handle(&self) -> BodyHandle;

    /// 剛体ハンドルを差し替え、以前のハンドルを返す
    ///
    /// ワールドへの登録や逆参照は変更しません。通常は [`SetBody`] 経由で使用します。
    fn replace_body_handle(&mut self, handle: BodyHandle) -> BodyHandle;

    /// 現在の剛体を読む
    fn with_body<R>(&self, f: impl FnOnce(&Body) -> R) -> R {
        let world = self.world().borrow();
        let body = world
            .body(self.body_handle())
            .expect("game object body must be owned by its world");
        f(body)
    }

    /// 現在の剛体を書き換える
    fn with_body_mut<R>(&self, f: impl FnOnce(&mut Body) -> R) -> R {
        let mut world = self.world().borrow_mut();
        let body = world
            .body_mut(self.body_handle())
            .expect("game object body must be owned by its world");
        f(body)
    }
}
