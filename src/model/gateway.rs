//! 模型网关：按命名约定解析并加载 Helsinki-NLP 的 MarianMT 预训练模型
//!
//! 对外只暴露一个操作：translate(text) -> String，由遍历层逐叶子调用

use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use rust_bert::resources::RemoteResource;
use tch::Device;

use crate::model::data_core::AppError;

const HUB_BASE: &str = "https://huggingface.co";

/// 按命名约定拼出 Marian 模型仓库名，如 en+fr -> "Helsinki-NLP/opus-mt-en-fr"
pub fn marian_model_name(source_lang: &str, target_lang: &str) -> String {
    format!("Helsinki-NLP/opus-mt-{}-{}", source_lang, target_lang)
}

/// 多目标模型（如斯拉夫语族）需要在句首注入目标子标签标记
pub fn mark_target_text(text: &str, target_ext: Option<&str>) -> String {
    match target_ext {
        Some(ext) => format!(">>{}<< {}", ext, text),
        None => text.to_string(),
    }
}

fn hub_resource(repo: &str, file: &str) -> RemoteResource {
    RemoteResource::new(
        &format!("{}/{}/resolve/main/{}", HUB_BASE, repo, file),
        repo,
    )
}

pub struct MarianGateway {
    model: TranslationModel,
    source_lang: String,
    target_lang: String,
    target_ext: Option<String>,
}

impl MarianGateway {
    /// 解析并加载语言对对应的模型；未知语言对在此处失败（遍历开始之前）
    pub fn new(
        source_lang: &str,
        target_lang: &str,
        target_ext: Option<String>,
        device: Device,
    ) -> Result<Self, AppError> {
        let repo = marian_model_name(source_lang, target_lang);
        tracing::info!("正在加载模型: {}", repo);

        // 目标子标签由本网关在文本中注入，不向管线注册语言预设
        let config = TranslationConfig::new(
            ModelType::Marian,
            ModelResource::Torch(Box::new(hub_resource(&repo, "rust_model.ot"))),
            hub_resource(&repo, "config.json"),
            hub_resource(&repo, "vocab.json"),
            Some(hub_resource(&repo, "source.spm")),
            Vec::<Language>::new(),
            Vec::<Language>::new(),
            device,
        );
        let model = TranslationModel::new(config)
            .map_err(|e| AppError::ModelSetup(format!("{} ({})", repo, e)))?;

        Ok(Self {
            model,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            target_ext,
        })
    }

    /// 翻译单个字符串，每个字符串叶子调用一次
    pub fn translate(&self, text: &str) -> Result<String, AppError> {
        let marked = mark_target_text(text, self.target_ext.as_deref());
        let mut output = self
            .model
            .translate(&[marked.as_str()], None, None)
            .map_err(|e| AppError::Inference(e.to_string()))?;
        let translated = output
            .pop()
            .ok_or_else(|| AppError::Inference("模型未返回任何结果".into()))?;
        tracing::info!(
            "{}:{}:{}: {} -> {}",
            self.source_lang,
            self.target_lang,
            self.target_ext.as_deref().unwrap_or("-"),
            text,
            translated
        );
        Ok(translated)
    }
}
