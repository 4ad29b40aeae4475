use std::collections::HashSet;
use std::fmt;

/// エンティティの一意な識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// 生の値からIDを作成
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// 生の値を取得
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// エンティティの生成と削除を管理する構造体
#[derive(Debug)]
pub struct EntityManager {
    active_entities: HashSet<EntityId>,
    next_id: u64,
}

impl EntityManager {
    /// 新しいエンティティマネージャーを作成
    pub fn new() -> Self {
        Self {
            active_entities: HashSet::new(),
            next_id: 1,
        }
    }

    /// 新しいエンティティを作成
    pub fn create_entity(&mut self) -> EntityId {
        let entity = EntityId(self.next_id);
        self.next_id += 1;
        self.active_entities.insert(entity);
        entity
    }

    /// エンティティを削除
    pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
        self.active_entities.remove(&entity)
    }

    /// エンティティが有効かどうかを確認
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.active_entities.contains(&entity)
    }

    /// アクティブなエンティティの数を取得
    pub fn entity_count(&self) -> usize {
        self.active_entities.len()
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
