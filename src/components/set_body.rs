//! 剛体の差し替え
//!
//! 新しい剛体を作ってから古い剛体と交換します。作成に失敗した場合は何も変わりません。
//! 交換は1回の呼び出しの中で完了し、古い剛体は登録解除の後にワールドが解放します。

use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::error::{MatterError, Result};
use crate::physics::{Bodies, BodyHandle, BodyOptions, ShapeDefaults, ShapeDescriptor};

/// 剛体を差し替えるときのオプション
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetBodyOptions {
    /// ワールドに登録するか（省略時は登録する）
    pub add_to_world: Option<bool>,

    /// 剛体のオプション
    #[serde(flatten)]
    pub body: BodyOptions,
}

impl SetBodyOptions {
    /// ワールドに登録しない
    pub fn detached() -> Self {
        Self {
            add_to_world: Some(false),
            ..Default::default()
        }
    }

    pub fn add_to_world(&self) -> bool {
        self.add_to_world.unwrap_or(true)
    }
}

/// 剛体を差し替える能力
///
/// 形状記述子で省略された値は [`SetBody::body_defaults`] から補われます。
pub trait SetBody: HasBody {
    /// 省略時の位置と大きさ（通常は生成位置と描画サイズ）
    fn body_defaults(&self) -> ShapeDefaults;

    /// 形状記述子から剛体を作り、現在の剛体と差し替える
    fn set_body(&mut self, shape: &ShapeDescriptor, options: &SetBodyOptions) -> Result<&mut Self> {
        let body = Bodies::from_descriptor(shape, &self.body_defaults(), &options.body)?;
        let handle = self.world().borrow_mut().insert(body);
        self.set_existing_body(handle, options.add_to_world())
    }

    /// ワールドに挿入済みの剛体と差し替える
    ///
    /// 古い剛体は逆参照を外し、登録を解除してから解放されます。
    fn set_existing_body(&mut self, handle: BodyHandle, add_to_world: bool) -> Result<&mut Self> {
        let id = self.game_object_id();
        let world = Rc::clone(self.world());
        let mut world = world.borrow_mut();

        let owner = world
            .body(handle)
            .ok_or(MatterError::BodyNotFound(handle))?
            .game_object();
        if owner.map_or(false, |owner| owner != id) {
            return Err(MatterError::BodyInUse(handle));
        }

        let old = self.body_handle();
        if old != handle {
            self.replace_body_handle(handle);

            if world.contains(old) {
                world.set_game_object(old, None)?;
                world.remove(old);
                world.dispose(old)?;
            }
            debug!("{} body replaced: {} -> {}", id, old, handle);
        }

        // 同じ剛体を渡された場合も登録状態は `add_to_world` に従う
        world.set_game_object(handle, Some(id))?;
        if add_to_world {
            world.add(handle);
        } else {
            world.remove(handle);
        }

        Ok(self)
    }

    /// 長方形の剛体に差し替える
    fn set_rectangle(&mut self, width: f64, height: f64, options: &SetBodyOptions) -> Result<&mut Self> {
        self.set_body(&ShapeDescriptor::rectangle(width, height), options)
    }

    /// 円の剛体に差し替える
    fn set_circle(&mut self, radius: f64, options: &SetBodyOptions) -> Result<&mut Self> {
        self.set_body(&ShapeDescriptor::circle(radius), options)
    }

    /// 正多角形の剛体に差し替える
    fn set_polygon(&mut self, radius: f64, sides: u32, options: &SetBodyOptions) -> Result<&mut Self> {
        self.set_body(&ShapeDescriptor::polygon(sides, radius), options)
    }

    /// 台形の剛体に差し替える
    fn set_trapezoid(
        &mut self,
        width: f64,
        height: f64,
        slope: f64,
        options: &SetBodyOptions,
    ) -> Result<&mut Self> {
        self.set_body(&ShapeDescriptor::trapezoid(width, height, slope), options)
    }
}

pub const SET_BODY: CapabilityDescriptor = CapabilityDescriptor {
    name: "SetBody",
    operations: &[
        "body_defaults",
        "set_body",
        "set_existing_body",
        "set_rectangle",
        "set_circle",
        "set_polygon",
        "set_trapezoid",
    ],
};
