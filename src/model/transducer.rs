//! 保形树变换：对任意JSON树做结构不变的重建，字符串叶子经 leaf 函数替换
//!
//! 采用显式工作栈而非朴素递归，深层嵌套文档不会耗尽调用栈

use serde_json::{Map, Value};

/// 工作栈帧：保存半成品容器与尚未处理的剩余子节点
enum Frame {
    /// `key` 是当前正在处理的子值在父对象中的键名
    Object {
        done: Map<String, Value>,
        rest: serde_json::map::IntoIter,
        key: String,
    },
    Array {
        done: Vec<Value>,
        rest: std::vec::IntoIter<Value>,
    },
}

/// 对 `root` 做保形变换
///
/// - 对象：键集与键序不变，每个值递归变换
/// - 数组：长度不变，按索引序逐元素变换
/// - 字符串：替换为 `leaf(s)` 的结果
/// - 数字/布尔/null：原样透传
///
/// 遍历顺序为深度优先：对象按键插入序，数组按索引序；`leaf` 对每个
/// 字符串叶子恰好调用一次。`leaf` 返回的第一个错误立即中止遍历并向上传播。
pub fn transform<F, E>(root: Value, mut leaf: F) -> Result<Value, E>
where
    F: FnMut(String) -> Result<String, E>,
{
    let mut frames: Vec<Frame> = Vec::new();
    let mut input = root;

    loop {
        // 下行：沿首个未处理的子节点深入，直到产出一个叶子或空容器
        let mut output = loop {
            match input {
                Value::Object(map) => {
                    let mut rest = map.into_iter();
                    match rest.next() {
                        Some((key, child)) => {
                            frames.push(Frame::Object {
                                done: Map::new(),
                                rest,
                                key,
                            });
                            input = child;
                        }
                        None => break Value::Object(Map::new()),
                    }
                }
                Value::Array(arr) => {
                    let mut rest = arr.into_iter();
                    match rest.next() {
                        Some(child) => {
                            frames.push(Frame::Array {
                                done: Vec::new(),
                                rest,
                            });
                            input = child;
                        }
                        None => break Value::Array(Vec::new()),
                    }
                }
                Value::String(s) => break Value::String(leaf(s)?),
                // 非字符串标量不经过 leaf
                Value::Number(n) => break Value::Number(n),
                Value::Bool(b) => break Value::Bool(b),
                Value::Null => break Value::Null,
            }
        };

        // 上行：把产物交还父帧；父帧还有兄弟节点则转回下行，否则封口继续上行
        loop {
            match frames.pop() {
                None => return Ok(output),
                Some(Frame::Object {
                    mut done,
                    mut rest,
                    key,
                }) => {
                    done.insert(key, output);
                    if let Some((next_key, child)) = rest.next() {
                        frames.push(Frame::Object {
                            done,
                            rest,
                            key: next_key,
                        });
                        input = child;
                        break;
                    }
                    output = Value::Object(done);
                }
                Some(Frame::Array { mut done, mut rest }) => {
                    done.push(output);
                    if let Some(child) = rest.next() {
                        frames.push(Frame::Array { done, rest });
                        input = child;
                        break;
                    }
                    output = Value::Array(done);
                }
            }
        }
    }
}
