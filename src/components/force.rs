//! 力と推進

use std::f64::consts::{FRAC_PI_2, PI};

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::utils::math::{self, Vec2};

/// 剛体に力を加える能力
///
/// 力は次のステップで積分され、その後クリアされます。
pub trait Force: HasBody {
    /// 重心に力を加える
    fn apply_force(&mut self, force: Vec2) -> &mut Self {
        self.with_body_mut(|body| {
            let position = body.position();
            body.apply_force(position, force);
        });
        self
    }

    /// ワールド座標 `position` から力を加える（重心から外れるとトルクが生じる）
    fn apply_force_from(&mut self, position: Vec2, force: Vec2) -> &mut Self {
        self.with_body_mut(|body| body.apply_force(position, force));
        self
    }

    /// 向いている方向に推進
    fn thrust(&mut self, speed: f64) -> &mut Self {
        thrust_at(&*self, 0.0, speed);
        self
    }

    /// 左方向に推進
    fn thrust_left(&mut self, speed: f64) -> &mut Self {
        thrust_at(&*self, -FRAC_PI_2, speed);
        self
    }

    /// 右方向に推進
    fn thrust_right(&mut self, speed: f64) -> &mut Self {
        thrust_at(&*self, FRAC_PI_2, speed);
        self
    }

    /// 後方に推進
    fn thrust_back(&mut self, speed: f64) -> &mut Self {
        thrust_at(&*self, -PI, speed);
        self
    }
}

impl<T: HasBody> Force for T {}

fn thrust_at<T: HasBody + ?Sized>(object: &T, offset: f64, speed: f64) {
    object.with_body_mut(|body| {
        let force = math::from_angle(body.angle() + offset, speed);
        let position = body.position();
        body.apply_force(position, force);
    });
}

pub const FORCE: CapabilityDescriptor = CapabilityDescriptor {
    name: "Force",
    operations: &[
        "apply_force",
        "apply_force_from",
        "thrust",
        "thrust_left",
        "thrust_right",
        "thrust_back",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    fn force_of(probe: &Probe) -> Vec2 {
        probe.with_body(|body| body.force())
    }

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-12 && (actual.1 - expected.1).abs() < 1e-12,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_apply_force_accumulates() {
        let mut probe = Probe::spawn();
        probe.apply_force((1.0, 0.0)).apply_force((0.0, 2.0));

        assert_eq!(force_of(&probe), (1.0, 2.0));
        assert_eq!(probe.with_body(|body| body.torque()), 0.0);
    }

    #[test]
    fn test_apply_force_from_offset_creates_torque() {
        let mut probe = Probe::spawn();
        probe.apply_force_from((0.0, -5.0), (1.0, 0.0));

        assert_eq!(probe.with_body(|body| body.torque()), 5.0);
    }

    #[test]
    fn test_thrust_directions() {
        let mut probe = Probe::spawn();

        probe.thrust(1.0);
        assert_close(force_of(&probe), (1.0, 0.0));
        probe.with_body_mut(|body| body.force = (0.0, 0.0));

        probe.thrust_left(1.0);
        assert_close(force_of(&probe), (0.0, -1.0));
        probe.with_body_mut(|body| body.force = (0.0, 0.0));

        probe.thrust_right(1.0);
        assert_close(force_of(&probe), (0.0, 1.0));
        probe.with_body_mut(|body| body.force = (0.0, 0.0));

        probe.thrust_back(1.0);
        assert_close(force_of(&probe), (-1.0, 0.0));
    }

    #[test]
    fn test_thrust_follows_body_angle() {
        let mut probe = Probe::spawn();
        probe.with_body_mut(|body| body.set_angle(FRAC_PI_2));

        probe.thrust(2.0);
        assert_close(force_of(&probe), (0.0, 2.0));
    }
}
