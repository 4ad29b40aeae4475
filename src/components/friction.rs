//! 摩擦

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// 摩擦、空気抵抗、静止摩擦を設定する能力
pub trait Friction: HasBody {
    /// 摩擦を設定（`air` と `static_friction` は指定した場合のみ変更）
    fn set_friction(&mut self, friction: f64, air: Option<f64>, static_friction: Option<f64>) -> &mut Self {
        self.with_body_mut(|body| {
            body.friction = friction;
            if let Some(air) = air {
                body.friction_air = air;
            }
            if let Some(static_friction) = static_friction {
                body.friction_static = static_friction;
            }
        });
        self
    }

    /// 空気抵抗を設定
    fn set_friction_air(&mut self, value: f64) -> &mut Self {
        self.with_body_mut(|body| body.friction_air = value);
        self
    }

    /// 静止摩擦を設定
    fn set_friction_static(&mut self, value: f64) -> &mut Self {
        self.with_body_mut(|body| body.friction_static = value);
        self
    }

    fn friction(&self) -> f64 {
        self.with_body(|body| body.friction)
    }

    fn friction_air(&self) -> f64 {
        self.with_body(|body| body.friction_air)
    }

    fn friction_static(&self) -> f64 {
        self.with_body(|body| body.friction_static)
    }
}

impl<T: HasBody> Friction for T {}

pub const FRICTION: CapabilityDescriptor = CapabilityDescriptor {
    name: "Friction",
    operations: &[
        "set_friction",
        "set_friction_air",
        "set_friction_static",
        "friction",
        "friction_air",
        "friction_static",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    #[test]
    fn test_set_friction_keeps_unspecified_values() {
        let mut probe = Probe::spawn();
        probe.set_friction(0.3, None, None);

        assert_eq!(probe.friction(), 0.3);
        assert_eq!(probe.friction_air(), 0.01);
        assert_eq!(probe.friction_static(), 0.5);

        probe.set_friction(0.2, Some(0.05), Some(0.8));
        assert_eq!(probe.friction_air(), 0.05);
        assert_eq!(probe.friction_static(), 0.8);
    }

    #[test]
    fn test_air_friction_slows_body() {
        let mut probe = Probe::spawn();
        probe.set_friction_air(0.5);
        probe.with_body_mut(|body| {
            body.ignore_gravity = true;
            body.set_velocity((10.0, 0.0));
        });

        probe.world.borrow_mut().step(16.0);
        assert_eq!(probe.with_body(|body| body.velocity()), (5.0, 0.0));
    }
}
