//! 能力の合成
//!
//! 各能力トレイトは操作名の一覧を [`CapabilityDescriptor`] として公開します。
//! 複数の能力を1つの型に合成するとき、操作名が重複していれば失敗します。
//! 定数文脈では [`CapabilitySet::compose_const`] がパニックしてビルドを止め、
//! 実行時には [`CapabilitySet::compose`] がエラーを返します。

use std::collections::HashMap;

use crate::error::{MatterError, Result};

/// 能力の記述子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    /// 能力名
    pub name: &'static str,
    /// この能力が提供する操作名
    pub operations: &'static [&'static str],
}

impl CapabilityDescriptor {
    /// 操作を提供しているか
    pub fn provides(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| *op == operation)
    }
}

/// 操作名の重複がないことを確認済みの能力の集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: &'static [CapabilityDescriptor],
}

impl CapabilitySet {
    /// 定数文脈で能力を合成（重複があればパニック）
    pub const fn compose_const(capabilities: &'static [CapabilityDescriptor]) -> Self {
        let mut ci = 0;
        while ci < capabilities.len() {
            let mut cj = ci + 1;
            while cj < capabilities.len() {
                if str_eq(capabilities[ci].name, capabilities[cj].name) {
                    panic!("capability listed more than once");
                }
                cj += 1;
            }

            let operations = capabilities[ci].operations;
            let mut oi = 0;
            while oi < operations.len() {
                let mut oj = oi + 1;
                while oj < operations.len() {
                    if str_eq(operations[oi], operations[oj]) {
                        panic!("capability declares the same operation twice");
                    }
                    oj += 1;
                }

                let mut cj = ci + 1;
                while cj < capabilities.len() {
                    let others = capabilities[cj].operations;
                    let mut ok = 0;
                    while ok < others.len() {
                        if str_eq(operations[oi], others[ok]) {
                            panic!("operation name collision between composed capabilities");
                        }
                        ok += 1;
                    }
                    cj += 1;
                }
                oi += 1;
            }
            ci += 1;
        }

        Self { capabilities }
    }

    /// 実行時に能力を合成
    pub fn compose(capabilities: &'static [CapabilityDescriptor]) -> Result<Self> {
        let mut owners: HashMap<&'static str, &'static str> = HashMap::new();

        for (i, capability) in capabilities.iter().enumerate() {
            if capabilities[..i].iter().any(|c| c.name == capability.name) {
                return Err(MatterError::InvariantViolation(format!(
                    "capability '{}' is listed more than once",
                    capability.name
                )));
            }

            for &operation in capability.operations {
                if let Some(owner) = owners.insert(operation, capability.name) {
                    return Err(MatterError::InvariantViolation(format!(
                        "operation '{}' is provided by both '{}' and '{}'",
                        operation, owner, capability.name
                    )));
                }
            }
        }

        Ok(Self { capabilities })
    }

    /// 合成された能力
    pub fn capabilities(&self) -> &'static [CapabilityDescriptor] {
        self.capabilities
    }

    /// 能力を含んでいるか
    pub fn has(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c.name == name)
    }

    /// 操作を提供している能力名
    pub fn provider_of(&self, operation: &str) -> Option<&'static str> {
        self.capabilities
            .iter()
            .find(|c| c.provides(operation))
            .map(|c| c.name)
    }

    /// 操作の総数
    pub fn operation_count(&self) -> usize {
        self.capabilities.iter().map(|c| c.operations.len()).sum()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }

    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVE: CapabilityDescriptor = CapabilityDescriptor {
        name: "Move",
        operations: &["set_speed", "speed"],
    };

    const JUMP: CapabilityDescriptor = CapabilityDescriptor {
        name: "Jump",
        operations: &["jump", "set_jump_height"],
    };

    const FAST: CapabilityDescriptor = CapabilityDescriptor {
        name: "Fast",
        operations: &["speed"],
    };

    const COMPOSED: CapabilitySet = CapabilitySet::compose_const(&[MOVE, JUMP]);

    #[test]
    fn test_const_composition() {
        assert!(COMPOSED.has("Move"));
        assert!(COMPOSED.has("Jump"));
        assert_eq!(COMPOSED.operation_count(), 4);
        assert_eq!(COMPOSED.provider_of("jump"), Some("Jump"));
        assert_eq!(COMPOSED.provider_of("fly"), None);
    }

    #[test]
    fn test_runtime_composition_detects_collision() {
        let err = CapabilitySet::compose(&[MOVE, FAST]).unwrap_err();
        assert_eq!(
            err,
            MatterError::InvariantViolation(
                "operation 'speed' is provided by both 'Move' and 'Fast'".to_string()
            )
        );

        assert!(CapabilitySet::compose(&[MOVE, JUMP]).is_ok());
        assert!(CapabilitySet::compose(&[JUMP, JUMP]).is_err());
    }

    #[test]
    #[should_panic(expected = "operation name collision")]
    fn test_const_composition_panics_at_runtime_too() {
        // 定数文脈以外で呼ぶと通常のパニックになる
        CapabilitySet::compose_const(&[MOVE, FAST]);
    }
}
