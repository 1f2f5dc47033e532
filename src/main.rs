//! 程序入口：解析命令行、初始化日志、加载模型网关、执行保形翻译并回写

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tch::Device;
use tracing_subscriber::fmt::SubscriberBuilder;

use json_fanyi::{AppState, MarianGateway};

#[derive(Parser)]
#[command(
    name = "json_fanyi",
    version,
    about = "使用 MarianMT 模型翻译 JSON 文件中的所有字符串值，保持文档结构不变"
)]
struct Cli {
    /// 输入JSON文件路径
    input_file: PathBuf,
    /// 输出JSON文件路径
    output_file: PathBuf,
    /// 源语言代码（如 'en' 表示英语）
    source_lang: String,
    /// 目标语言代码（如 'fr' 表示法语）
    target_lang: String,
    /// 目标语言子标签（斯拉夫等多目标模型使用，如 'bs_Latn' 表示波斯尼亚语）
    target_ext: Option<String>,
}

fn main() -> ExitCode {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let cli = Cli::parse();

    let device = Device::cuda_if_available();
    tracing::info!("使用设备: {:?}", device);

    // 网关初始化失败属于启动期错误：打印诊断后退出，不写任何输出文件
    let gateway = match MarianGateway::new(
        &cli.source_lang,
        &cli.target_lang,
        cli.target_ext.clone(),
        device,
    ) {
        Ok(g) => g,
        Err(e) => {
            eprintln!(
                "错误: 未找到 {} 到 {} 的翻译模型，请检查语言代码（{}）",
                cli.source_lang, cli.target_lang, e
            );
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&cli, &gateway) {
        eprintln!("错误: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli, gateway: &MarianGateway) -> anyhow::Result<()> {
    let mut state = AppState::default();
    state
        .load_file(&cli.input_file)
        .with_context(|| format!("无法加载输入文件 {}", cli.input_file.display()))?;
    tracing::info!(
        "文件加载成功: {}，共 {} 个字符串叶子待翻译",
        cli.input_file.display(),
        state.pending_leaves()?
    );

    // 单线程同步执行：按遍历序逐叶子调用模型，任一失败立即中止且不写输出
    let start = Instant::now();
    state.translate_with(|text| gateway.translate(&text))?;
    tracing::info!("翻译完成，耗时: {:.2}s", start.elapsed().as_secs_f64());

    state
        .save_to_file(&cli.output_file)
        .with_context(|| format!("无法写入输出文件 {}", cli.output_file.display()))?;
    tracing::info!("翻译结果已保存到: {}", cli.output_file.display());
    Ok(())
}
