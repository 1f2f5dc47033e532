//! 树骨架（Shape）：只记录结构与路径、不含叶子值的扁平索引
//!
//! 两棵树骨架相等当且仅当节点种类、对象键集与键序、数组长度、嵌套深度全部一致
//! 供测试断言保形性质，也为运行前统计待翻译叶子数量服务

use serde_json::Value;

/// JSON 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeNode {
    /// 节点在父级中的键名或索引的字符串形式
    pub name: String,
    /// RFC 9535 JSONPath（用于精确寻址）
    pub path: String,
    /// 节点类型
    pub kind: NodeKind,
    /// 子元素数量（对象字段数 / 数组长度）
    pub children: u32,
    /// 节点深度
    pub depth: u32,
}

fn kind_of(v: &Value) -> NodeKind {
    match v {
        Value::Object(_) => NodeKind::Object,
        Value::Array(_) => NodeKind::Array,
        Value::String(_) => NodeKind::String,
        Value::Number(_) => NodeKind::Number,
        Value::Bool(_) => NodeKind::Bool,
        Value::Null => NodeKind::Null,
    }
}

/// 从根 Value 构建全树骨架索引（深度优先，对象按键插入序）
pub fn shape_of(root: &Value) -> Vec<ShapeNode> {
    fn push_node(out: &mut Vec<ShapeNode>, name: String, path: String, v: &Value, depth: u32) {
        let children = match v {
            Value::Object(m) => m.len() as u32,
            Value::Array(a) => a.len() as u32,
            _ => 0,
        };
        out.push(ShapeNode {
            name,
            path,
            kind: kind_of(v),
            children,
            depth,
        });
    }
    fn walk(out: &mut Vec<ShapeNode>, v: &Value, path: &str, name: &str, depth: u32) {
        push_node(out, name.to_string(), path.to_string(), v, depth);
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    // JSONPath 字段含特殊字符时使用 bracket-notation
                    let field_path = if k.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        format!("{}.{}", path, k)
                    } else {
                        format!("{}['{}']", path, k.replace('\'', "\\'"))
                    };
                    walk(out, child, &field_path, k, depth + 1);
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, idx);
                    walk(out, child, &item_path, &format!("[{}]", idx), depth + 1);
                }
            }
            _ => {}
        }
    }

    let mut out = Vec::with_capacity(64);
    walk(&mut out, root, "$", "$", 0);
    out
}

/// 统计树中字符串叶子的数量（即一次翻译运行的模型调用次数）
pub fn string_leaf_count(root: &Value) -> usize {
    shape_of(root)
        .iter()
        .filter(|n| n.kind == NodeKind::String)
        .count()
}
