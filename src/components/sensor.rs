//! センサー

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// 剛体をセンサーにする能力
///
/// センサーは衝突を検出しますが、衝突応答は受けません。
pub trait Sensor: HasBody {
    fn set_sensor(&mut self, value: bool) -> &mut Self {
        self.with_body_mut(|body| body.is_sensor = value);
        self
    }

    fn is_sensor(&self) -> bool {
        self.with_body(|body| body.is_sensor)
    }
}

impl<T: HasBody> Sensor for T {}

pub const SENSOR: CapabilityDescriptor = CapabilityDescriptor {
    name: "Sensor",
    operations: &["set_sensor", "is_sensor"],
};
