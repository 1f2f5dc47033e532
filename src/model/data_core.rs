//! AppState：文档生命周期（加载 → 翻译 → 保存）与统一错误类型

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::model::shape::string_leaf_count;
use crate::model::transducer::transform;
use crate::utils::fs::{read_json_file, write_json_file};

#[derive(Debug, Default)]
pub struct AppState {
    pub source_path: Option<PathBuf>,
    pub dom: Option<Value>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("模型加载失败: {0}")]
    ModelSetup(String),
    #[error("翻译推理失败: {0}")]
    Inference(String),
    #[error("状态错误: {0}")]
    State(String),
}

impl AppState {
    /// 加载JSON文件
    pub fn load_file(&mut self, p: &Path) -> Result<(), AppError> {
        let dom = read_json_file(p)?;
        self.source_path = Some(p.to_path_buf());
        self.dom = Some(dom);
        Ok(())
    }

    /// 当前文档中待翻译的字符串叶子数量
    pub fn pending_leaves(&self) -> Result<usize, AppError> {
        let dom = self
            .dom
            .as_ref()
            .ok_or_else(|| AppError::State("DOM尚未加载".into()))?;
        Ok(string_leaf_count(dom))
    }

    /// 对整棵文档做保形翻译：每个字符串叶子经 `leaf` 替换，结构不变
    ///
    /// `leaf` 的首个错误会中止整次运行并向上传播；此时DOM已被消耗，
    /// 调用方不应再尝试保存（一次性管线，出错即整体放弃）
    pub fn translate_with<F>(&mut self, leaf: F) -> Result<(), AppError>
    where
        F: FnMut(String) -> Result<String, AppError>,
    {
        let dom = self
            .dom
            .take()
            .ok_or_else(|| AppError::State("DOM尚未加载".into()))?;
        self.dom = Some(transform(dom, leaf)?);
        Ok(())
    }

    /// 将当前DOM保存到指定路径
    pub fn save_to_file(&self, path: &Path) -> Result<(), AppError> {
        let dom = self
            .dom
            .as_ref()
            .ok_or_else(|| AppError::State("DOM尚未加载".into()))?;
        write_json_file(path, dom)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// 创建临时JSON文件用于测试
    fn create_test_json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(content.as_bytes()).expect("写入临时文件失败");
        file
    }

    #[test]
    fn test_load_simple_json() {
        let temp_file = create_test_json_file(r#"{"name": "test", "value": 42}"#);

        let mut state = AppState::default();
        let result = state.load_file(temp_file.path());

        assert!(result.is_ok(), "加载简单JSON应该成功");
        assert!(state.dom.is_some(), "DOM应该被加载");
        assert_eq!(state.pending_leaves().unwrap(), 1, "只有一个字符串叶子");
    }

    #[test]
    fn test_load_invalid_json_content() {
        let temp_file = create_test_json_file(r#"{"invalid": json content}"#);

        let mut state = AppState::default();
        let result = state.load_file(temp_file.path());

        assert!(result.is_err(), "无效JSON应该返回错误");
        assert!(matches!(result.unwrap_err(), AppError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let mut state = AppState::default();
        let result = state.load_file(Path::new("/不存在/的/文件.json"));
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_translate_and_save_roundtrip() {
        let temp_file =
            create_test_json_file(r#"{"greeting": "你好", "nested": {"items": ["a", 1, null]}}"#);

        let mut state = AppState::default();
        state.load_file(temp_file.path()).expect("加载文件失败");

        state
            .translate_with(|s| Ok(format!("[{}]", s)))
            .expect("翻译应该成功");

        let out_file = NamedTempFile::new().expect("创建输出文件失败");
        state.save_to_file(out_file.path()).expect("保存应该成功");

        // 重新加载并校验内容与结构
        let mut reloaded = AppState::default();
        reloaded.load_file(out_file.path()).expect("回读文件失败");
        let dom = reloaded.dom.unwrap();
        assert_eq!(dom["greeting"], "[你好]");
        assert_eq!(dom["nested"]["items"][0], "[a]");
        assert_eq!(dom["nested"]["items"][1], 1);
        assert_eq!(dom["nested"]["items"][2], serde_json::Value::Null);
    }

    #[test]
    fn test_translate_error_propagates() {
        let temp_file = create_test_json_file(r#"{"a": "好", "b": "坏", "c": "未到"}"#);

        let mut state = AppState::default();
        state.load_file(temp_file.path()).expect("加载文件失败");

        let result = state.translate_with(|s| {
            if s == "坏" {
                Err(AppError::Inference("模拟的模型失败".into()))
            } else {
                Ok(s)
            }
        });
        assert!(matches!(result.unwrap_err(), AppError::Inference(_)));
    }

    #[test]
    fn test_save_without_load_fails() {
        let state = AppState::default();
        let out_file = NamedTempFile::new().expect("创建输出文件失败");
        let result = state.save_to_file(out_file.path());
        assert!(matches!(result.unwrap_err(), AppError::State(_)), "未加载时保存应报状态错误");
    }

    #[test]
    fn test_translate_without_load_fails() {
        let mut state = AppState::default();
        let result = state.translate_with(|s| Ok(s));
        assert!(matches!(result.unwrap_err(), AppError::State(_)));
    }

    #[test]
    fn test_saved_output_is_pretty_utf8() {
        let temp_file = create_test_json_file(r#"{"msg": "中文"}"#);

        let mut state = AppState::default();
        state.load_file(temp_file.path()).expect("加载文件失败");

        let out_file = NamedTempFile::new().expect("创建输出文件失败");
        state.save_to_file(out_file.path()).expect("保存应该成功");

        let raw = std::fs::read_to_string(out_file.path()).expect("读取输出失败");
        assert!(raw.contains("中文"), "非ASCII字符应以UTF-8字面量输出而非转义");
        assert!(raw.contains('\n'), "输出应为带缩进的多行格式");
    }
}
