//! 静的剛体

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// 剛体を静的/動的に切り替える能力
///
/// 静的状態は常に現在の剛体から読み出します。
pub trait Static: HasBody {
    /// 静的にすると質量と慣性は無限大になり、動的に戻すと元の値が復元されます
    fn set_static(&mut self, value: bool) -> &mut Self {
        self.with_body_mut(|body| body.set_static(value));
        self
    }

    fn is_static(&self) -> bool {
        self.with_body(|body| body.is_static())
    }
}

impl<T: HasBody> Static for T {}

pub const STATIC: CapabilityDescriptor = CapabilityDescriptor {
    name: "Static",
    operations: &["set_static", "is_static"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;
    use crate::components::Mass;

    #[test]
    fn test_static_round_trip() {
        let mut probe = Probe::spawn();
        let mass = probe.mass();

        probe.set_static(true);
        assert!(probe.is_static());
        assert!(probe.mass().is_infinite());

        probe.set_static(false);
        assert!(!probe.is_static());
        assert_eq!(probe.mass(), mass);
    }

    #[test]
    fn test_static_bodies_do_not_move() {
        let mut probe = Probe::spawn();
        probe.set_static(true);

        probe.world.borrow_mut().step(16.0);
        assert_eq!(probe.world.borrow().body(probe.body).unwrap().position(), (0.0, 0.0));
    }
}
