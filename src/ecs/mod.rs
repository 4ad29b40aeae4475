//! エンティティ管理
//!
//! ゲームオブジェクトに一意のIDを割り当てます。
//! 剛体はこのIDを逆参照として保持し、衝突イベントなどからゲームオブジェクトを引き当てます。

pub mod entity;

pub use entity::{EntityId, EntityManager};
