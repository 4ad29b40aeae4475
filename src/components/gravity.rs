//! 重力

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::utils::math::Vec2;

/// ワールドの重力の影響を調整する能力
pub trait Gravity: HasBody {
    /// 重力を無視するか設定
    fn set_ignore_gravity(&mut self, value: bool) -> &mut Self {
        self.with_body_mut(|body| body.ignore_gravity = value);
        self
    }

    fn ignores_gravity(&self) -> bool {
        self.with_body(|body| body.ignore_gravity)
    }

    /// 軸ごとの重力のスケールを設定
    fn set_gravity_scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.with_body_mut(|body| body.gravity_scale = (x, y));
        self
    }

    fn gravity_scale(&self) -> Vec2 {
        self.with_body(|body| body.gravity_scale)
    }
}

impl<T: HasBody> Gravity for T {}

pub const GRAVITY: CapabilityDescriptor = CapabilityDescriptor {
    name: "Gravity",
    operations: &[
        "set_ignore_gravity",
        "ignores_gravity",
        "set_gravity_scale",
        "gravity_scale",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    fn y_after_step(probe: &Probe) -> f64 {
        probe.world.borrow_mut().step(16.0);
        probe.with_body(|body| body.position().1)
    }

    #[test]
    fn test_ignore_gravity() {
        let mut probe = Probe::spawn();
        probe.set_ignore_gravity(true);

        assert!(probe.ignores_gravity());
        assert_eq!(y_after_step(&probe), 0.0);
    }

    #[test]
    fn test_gravity_scale() {
        let falling = Probe::spawn();
        let mut floating = Probe::spawn_in(falling.world.clone(), 2);
        floating.set_gravity_scale(1.0, -1.0);
        assert_eq!(floating.gravity_scale(), (1.0, -1.0));

        falling.world.borrow_mut().step(16.0);
        let down = falling.with_body(|body| body.position().1);
        let up = floating.with_body(|body| body.position().1);

        assert!(down > 0.0);
        assert!((up + down).abs() < 1e-12);
    }
}
