//! 質量と密度

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;

/// 質量と密度を設定する能力
pub trait Mass: HasBody {
    /// 質量を設定（密度は面積から再計算）
    fn set_mass(&mut self, mass: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_mass(mass));
        self
    }

    /// 密度を設定（質量は面積から再計算）
    fn set_density(&mut self, density: f64) -> &mut Self {
        self.with_body_mut(|body| body.set_density(density));
        self
    }

    fn mass(&self) -> f64 {
        self.with_body(|body| body.mass())
    }

    fn density(&self) -> f64 {
        self.with_body(|body| body.density())
    }
}

impl<T: HasBody> Mass for T {}

pub const MASS: CapabilityDescriptor = CapabilityDescriptor {
    name: "Mass",
    operations: &["set_mass", "set_density", "mass", "density"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    #[test]
    fn test_mass_and_density() {
        let mut probe = Probe::spawn();
        assert!((probe.mass() - 0.1).abs() < 1e-12);

        probe.set_mass(4.0);
        assert_eq!(probe.mass(), 4.0);
        assert!((probe.density() - 0.04).abs() < 1e-12);

        probe.set_density(0.002);
        assert!((probe.mass() - 0.2).abs() < 1e-12);
        assert_eq!(probe.density(), 0.002);
    }
}
