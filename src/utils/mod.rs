//! ユーティリティモジュール
//!
//! このモジュールには、クレート全体で使用される一般的なユーティリティ関数が含まれています。

pub mod math;

pub use math::Vec2;
