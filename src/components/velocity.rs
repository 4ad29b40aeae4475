//! 速度

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::utils::math::Vec2;

/// 剛体の速度を設定する能力
pub trait Velocity: HasBody {
    fn set_velocity(&mut self, x: f64, y: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_velocity((x, y)));
        self
    }

    /// 水平方向の速度だけを設定
    fn set_velocity_x(&mut self, x: f64) -> &mut Self {
        self.with_body_mut(|body| {
            let (_, y) = body.velocity();
            body.set_velocity((x, y));
        });
        self
    }

    /// 垂直方向の速度だけを設定
    fn set_velocity_y(&mut self, y: f64) -> &mut Self {
        self.with_body_mut(|body| {
            let (x, _) = body.velocity();
            body.set_velocity((x, y));
        });
        self
    }

    fn set_angular_velocity(&mut self, velocity: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_angular_velocity(velocity));
        self
    }

    fn velocity(&self) -> Vec2 {
        self.with_body(|body| body.velocity())
    }

    fn angular_velocity(&self) -> f64 {
        self.with_body(|body| body.angular_velocity())
    }
}

impl<T: HasBody> Velocity for T {}

pub const VELOCITY: CapabilityDescriptor = CapabilityDescriptor {
    name: "Velocity",
    operations: &[
        "set_velocity",
        "set_velocity_x",
        "set_velocity_y",
        "set_angular_velocity",
        "velocity",
        "angular_velocity",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    #[test]
    fn test_set_velocity_components() {
        let mut probe = Probe::spawn();
        probe.set_velocity(1.0, 2.0).set_velocity_x(3.0);
        assert_eq!(probe.velocity(), (3.0, 2.0));

        probe.set_velocity_y(-4.0).set_angular_velocity(0.1);
        assert_eq!(probe.velocity(), (3.0, -4.0));
        assert_eq!(probe.angular_velocity(), 0.1);
    }

    #[test]
    fn test_velocity_moves_body() {
        let mut probe = Probe::spawn();
        probe.with_body_mut(|body| {
            body.ignore_gravity = true;
            body.friction_air = 0.0;
        });
        probe.set_velocity(2.0, 1.0);

        probe.world.borrow_mut().step(16.0);
        assert_eq!(probe.with_body(|body| body.position()), (2.0, 1.0));
    }
}
