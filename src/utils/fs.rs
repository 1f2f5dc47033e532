//! IO helper: buffered read/write for JSON documents

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::model::data_core::AppError;
use serde_json::Value;

/// 从文件读取JSON数据（UTF-8）
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（两空格缩进，非ASCII字符按UTF-8字面量输出）
pub fn write_json_file(p: &Path, value: &Value) -> Result<(), AppError> {
    let f = File::create(p)?;
    let mut wtr = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut wtr, value)?;
    wtr.flush()?;
    Ok(())
}
