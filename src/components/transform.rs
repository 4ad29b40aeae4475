//! 変形
//!
//! 位置、回転、スケールを剛体経由で読み書きします。
//! 描画側の変形は [`MatterSprite::sync_from_body`](crate::game_objects::MatterSprite::sync_from_body) で同期します。

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::utils::math;

/// 剛体の位置、回転、スケールを操作する能力
pub trait Transform: HasBody {
    fn x(&self) -> f64 {
        self.with_body(|body| body.position().0)
    }

    fn set_x(&mut self, x: f64) -> &mut Self {
        self.with_body_mut(|body| {
            let (_, y) = body.position();
            body.set_position((x, y));
        });
        self
    }

    fn y(&self) -> f64 {
        self.with_body(|body| body.position().1)
    }

    fn set_y(&mut self, y: f64) -> &mut Self {
        self.with_body_mut(|body| {
            let (x, _) = body.position();
            body.set_position((x, y));
        });
        self
    }

    fn set_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_position((x, y)));
        self
    }

    /// 回転（ラジアン）
    fn rotation(&self) -> f64 {
        self.with_body(|body| body.angle())
    }

    /// 回転を設定（ラジアン）
    fn set_rotation(&mut self, radians: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_angle(radians));
        self
    }

    /// 回転（度）
    fn angle(&self) -> f64 {
        math::radians_to_degrees(self.rotation())
    }

    /// 回転を設定（度）
    fn set_angle(&mut self, degrees: f64) -> &mut Self {
        self.set_rotation(math::degrees_to_radians(degrees))
    }

    fn scale_x(&self) -> f64 {
        self.with_body(|body| body.scale().0)
    }

    fn scale_y(&self) -> f64 {
        self.with_body(|body| body.scale().1)
    }

    /// スケールを設定（剛体の頂点と質量も変わる）
    fn set_scale(&mut self, x: f64, y: f64) -> &mut Self {
        // 0倍にすると元のスケールに戻せなくなる
        if x == 0.0 || y == 0.0 || !x.is_finite() || !y.is_finite() {
            log::warn!("ignoring degenerate scale ({}, {})", x, y);
            return self;
        }

        self.with_body_mut(|body| {
            let (current_x, current_y) = body.scale();
            body.scale_by((x / current_x, y / current_y));
        });
        self
    }

    /// 回転しないよう慣性を無限大にする
    fn set_fixed_rotation(&mut self) -> &mut Self {
        self.with_body_mut(|body| body.set_inertia(f64::INFINITY));
        self
    }
}

impl<T: HasBody> Transform for T {}

pub const TRANSFORM: CapabilityDescriptor = CapabilityDescriptor {
    name: "Transform",
    operations: &[
        "x",
        "set_x",
        "y",
        "set_y",
        "set_position",
        "rotation",
        "set_rotation",
        "angle",
        "set_angle",
        "scale_x",
        "scale_y",
        "set_scale",
        "set_fixed_rotation",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;
    use crate::components::Force;

    #[test]
    fn test_position() {
        let mut probe = Probe::spawn();
        probe.set_position(10.0, 20.0).set_x(15.0);

        assert_eq!((probe.x(), probe.y()), (15.0, 20.0));
        probe.set_y(-3.0);
        assert_eq!(probe.y(), -3.0);
    }

    #[test]
    fn test_angle_and_rotation() {
        let mut probe = Probe::spawn();
        probe.set_angle(90.0);

        assert!((probe.rotation() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((probe.angle() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_scale_is_absolute() {
        let mut probe = Probe::spawn();
        probe.set_scale(2.0, 3.0);
        probe.set_scale(2.0, 3.0);

        assert_eq!((probe.scale_x(), probe.scale_y()), (2.0, 3.0));
        let size = probe.with_body(|body| body.size());
        assert!((size.0 - 20.0).abs() < 1e-9 && (size.1 - 30.0).abs() < 1e-9);

        probe.set_scale(0.0, 1.0);
        assert_eq!(probe.scale_x(), 2.0);
    }

    #[test]
    fn test_fixed_rotation() {
        let mut probe = Probe::spawn();
        probe.set_fixed_rotation();
        probe.apply_force_from((0.0, -5.0), (1.0, 0.0));
        probe.world.borrow_mut().step(16.0);

        assert_eq!(probe.rotation(), 0.0);
        assert_eq!(probe.with_body(|body| body.inverse_inertia()), 0.0);
    }
}
