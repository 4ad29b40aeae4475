//! 衝突フィルター

use crate::components::capability::CapabilityDescriptor;
use crate::components::HasBody;
use crate::physics::CollisionFilter;

/// 衝突カテゴリ、マスク、グループを設定する能力
///
/// カテゴリは [`MatterWorld::next_category`](crate::physics::MatterWorld::next_category) で割り当てます。
pub trait Collision: HasBody {
    /// 衝突カテゴリを設定
    fn set_collision_category(&mut self, category: u32) -> &mut Self {
        self.with_body_mut(|body| body.collision_filter.category = category);
        self
    }

    /// 衝突グループを設定
    ///
    /// 同じ正のグループ同士は常に衝突し、同じ負のグループ同士は衝突しません。
    fn set_collision_group(&mut self, group: i32) -> &mut Self {
        self.with_body_mut(|body| body.collision_filter.group = group);
        self
    }

    /// 衝突対象のカテゴリを設定（マスクはカテゴリの論理和）
    fn set_collides_with(&mut self, categories: &[u32]) -> &mut Self {
        let mask = categories.iter().fold(0, |mask, category| mask | category);
        self.with_body_mut(|body| body.collision_filter.mask = mask);
        self
    }

    fn collision_filter(&self) -> CollisionFilter {
        self.with_body(|body| body.collision_filter)
    }
}

impl<T: HasBody> Collision for T {}

pub const COLLISION: CapabilityDescriptor = CapabilityDescriptor {
    name: "Collision",
    operations: &[
        "set_collision_category",
        "set_collision_group",
        "set_collides_with",
        "collision_filter",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Probe;

    #[test]
    fn test_collision_filter() {
        let mut probe = Probe::spawn();
        let (player, enemy) = {
            let mut world = probe.world.borrow_mut();
            (world.next_category().unwrap(), world.next_category().unwrap())
        };

        probe
            .set_collision_category(player)
            .set_collides_with(&[enemy, 0x0001])
            .set_collision_group(-2);

        let filter = probe.collision_filter();
        assert_eq!(filter.category, 0x0002);
        assert_eq!(filter.mask, 0x0005);
        assert_eq!(filter.group, -2);
    }

    #[test]
    fn test_filters_decide_collisions() {
        let mut a = Probe::spawn();
        let mut b = Probe::spawn_in(a.world.clone(), 2);

        a.set_collision_category(0x0002).set_collides_with(&[0x0004]);
        b.set_collision_category(0x0004).set_collides_with(&[0x0002]);
        assert!(a.collision_filter().can_collide(&b.collision_filter()));

        b.set_collides_with(&[]);
        assert!(!a.collision_filter().can_collide(&b.collision_filter()));
    }
}
