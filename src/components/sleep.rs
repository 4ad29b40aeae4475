//! スリープ

use std::rc::Rc;

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// スリープの閾値とイベントを設定する能力
///
/// スリープ状態は常に現在の剛体から読み出します。
/// イベントを有効にすると、状態の変化がワールドのイベントキューに積まれます。
pub trait Sleep: HasBody {
    /// スリープに入るまでのステップ数を設定（既定値60）
    fn set_sleep_threshold(&mut self, value: u32) -> &mut Self {
        self.with_body_mut(|body| body.sleep_threshold = value);
        self
    }

    fn sleep_threshold(&self) -> u32 {
        self.with_body(|body| body.sleep_threshold)
    }

    /// スリープ開始/終了イベントをまとめて設定
    fn set_sleep_events(&mut self, start: bool, end: bool) -> &mut Self {
        self.with_body_mut(|body| {
            body.emit_sleep_start = start;
            body.emit_sleep_end = end;
        });
        self
    }

    fn set_sleep_start_event(&mut self, value: bool) -> &mut Self {
        self.with_body_mut(|body| body.emit_sleep_start = value);
        self
    }

    fn set_sleep_end_event(&mut self, value: bool) -> &mut Self {
        self.with_body_mut(|body| body.emit_sleep_end = value);
        self
    }

    fn is_sleeping(&self) -> bool {
        self.with_body(|body| body.is_sleeping())
    }

    /// スリープから起こす
    fn set_awake(&mut self) -> &mut Self {
        set_sleeping(&*self, false);
        self
    }

    /// スリープさせる
    fn set_to_sleep(&mut self) -> &mut Self {
        set_sleeping(&*self, true);
        self
    }
}

impl<T: HasBody> Sleep for T {}

fn set_sleeping<T: HasBody + ?Sized>(object: &T, value: bool) {
    let world = Rc::clone(object.world());
    world
        .borrow_mut()
        .set_sleeping(object.body_handle(), value)
        .expect("game object body must be owned by its world");
}

pub const SLEEP: CapabilityDescriptor = CapabilityDescriptor {
    name: "Sleep",
    operations: &[
        "set_sleep_threshold",
        "sleep_threshold",
        "set_sleep_events",
        "set_sleep_start_event",
        "set_sleep_end_event",
        "is_sleeping",
        "set_awake",
        "set_to_sleep",
    ],
};
