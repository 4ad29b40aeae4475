//! 反発

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// 反発係数を設定する能力
pub trait Bounce: HasBody {
    /// 反発係数を設定（0.0で反発なし、1.0で完全反発）
    fn set_bounce(&mut self, restitution: f64) -> &mut Self {
        self.with_body_mut(|body| body.restitution = restitution);
        self
    }

    /// 反発係数
    fn bounce(&self) -> f64 {
        self.with_body(|body| body.restitution)
    }
}

impl<T: HasBody> Bounce for T {}

pub const BOUNCE: CapabilityDescriptor = CapabilityDescriptor {
    name: "Bounce",
    operations: &["set_bounce", "bounce"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    #[test]
    fn test_set_bounce() {
        let mut probe = Probe::spawn();
        assert_eq!(probe.bounce(), 0.0);

        probe.set_bounce(0.9);
        assert_eq!(probe.bounce(), 0.9);
    }
}
