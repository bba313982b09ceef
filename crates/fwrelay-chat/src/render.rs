//! MarkdownV2 message templates
//!
//! Every vendor string passes through [`escape_or_na`] before it lands in a
//! template; the fixed template text is pre-escaped by hand.

use fwrelay_core::{ErrorKind, FlashPackage, LookupQuery, LookupResult, MachineInfo, OtaResult};

use crate::escape::{escape_code, escape_link_url, escape_markdown_v2, escape_or_na};

const RULE: &str = r"\-\-\-\-\-";

/// Reply to `/start` and `/help`
pub fn welcome() -> String {
    [
        "欢迎使用联想刷机包查询Bot！",
        "请发送 `/query 序列号 [当前固件版本]` 进行查询，",
        "或发送 `/mtm 产品型号 [当前固件版本]` 按 MTM 查询。",
        "",
        "例如：",
        r"1\. *查询完整包：* `/query HA29117A`",
        r"2\. *查询增量包：* `/query HA29117A TB710FU_CN_OPEN_USER_QSM8650_V_ZUI_17.0.04.279_ST_250808`",
        r"3\. *按 MTM 查询：* `/mtm 83HR`",
    ]
    .join("\n")
}

/// Reply to `/query` without arguments
pub fn sn_usage() -> String {
    "⚠️ 请提供序列号。格式: `/query 序列号 [当前固件版本]`".to_string()
}

/// Reply to `/mtm` without arguments
pub fn mtm_usage() -> String {
    "⚠️ 请提供产品型号 \\(MTM\\)。格式: `/mtm 产品型号 [当前固件版本]`".to_string()
}

/// Acknowledgement sent before the lookup starts
pub fn progress(query: &LookupQuery) -> String {
    match (query.sn.as_deref(), query.mtm.as_deref()) {
        (Some(sn), _) => format!(r"🔍 正在执行完整查询 SN: *{}*\.\.\.", escape_markdown_v2(sn)),
        (None, mtm) => format!(r"🔍 正在执行完整查询 MTM: *{}*\.\.\.", escape_or_na(mtm)),
    }
}

/// Progress line for the incremental-update step
pub fn ota_progress() -> String {
    r"⚙️ 正在执行第 3 步：查询增量包\.\.\.".to_string()
}

/// Render a finished lookup
pub fn lookup_result(query: &LookupQuery, result: &LookupResult) -> String {
    match result.full_package.as_ref() {
        Some(package) if result.success => success(query, result, package),
        _ => failure(query, result),
    }
}

fn failure(query: &LookupQuery, result: &LookupResult) -> String {
    match result.error_kind {
        Some(ErrorKind::NoMtm) => format!(
            r"❌ 抱歉，未能查询到序列号 *{}* 对应的产品型号 \(MTM\) 信息。",
            escape_or_na(query.sn.as_deref())
        ),
        Some(ErrorKind::NoPackage) => format!(
            "❌ 根据 MTM *{}* 未找到可用的完整刷机包下载链接。",
            escape_or_na(result.mtm().or(query.mtm.as_deref()))
        ),
        _ => format!(
            "系统发生错误，查询失败。错误信息: `{}`",
            escape_code(result.error.as_deref().unwrap_or("unknown error"))
        ),
    }
}

fn success(query: &LookupQuery, result: &LookupResult, package: &FlashPackage) -> String {
    let mut lines = vec![r"*✅ 完整查询成功\!*".to_string(), RULE.to_string()];
    lines.extend(product_section(query, result));
    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.extend(package_section(package));

    if let Some(version) = query.current_firmware_version.as_deref() {
        lines.push(RULE.to_string());
        lines.extend(ota_section(version, result.ota_package.as_ref()));
    }

    lines.join("\n")
}

fn product_section(query: &LookupQuery, result: &LookupResult) -> Vec<String> {
    let empty = MachineInfo::default();
    let info = result.machine_info.as_ref().unwrap_or(&empty);
    let field = |label: &str, value: Option<&String>| {
        format!("*{}:* {}", label, escape_or_na(value.map(String::as_str)))
    };

    vec![
        "*产品信息*".to_string(),
        field("序列号", query.sn.as_ref()),
        format!(r"*产品型号 \(MTM\):* {}", escape_or_na(result.mtm())),
        field("机器名称", info.machine_name.as_ref()),
        field("出厂日期", info.product_date.as_ref()),
        field("扫描日期", info.scan_date.as_ref()),
        field("销售区域", info.sale_area.as_ref()),
        field("产品系列", info.product_series.as_ref()),
        field("产品大类", info.product_big_class.as_ref()),
        field("产品小类", info.product_small_class.as_ref()),
    ]
}

fn package_section(package: &FlashPackage) -> Vec<String> {
    vec![
        "*完整包固件信息*".to_string(),
        format!("*固件版本:* {}", escape_or_na(package.latest_version.as_deref())),
        format!("*平台:* {}", escape_or_na(package.platform.as_deref())),
        format!("*产品名称:* {}", escape_or_na(package.product_name.as_deref())),
        format!("*📥 下载链接:* {}", link(package.download_url.as_deref())),
        RULE.to_string(),
        "*⚠️ 刷机方法:*".to_string(),
        escape_or_na(package.flashing_machine_method.as_deref()),
    ]
}

fn ota_section(current: &str, ota: Option<&OtaResult>) -> Vec<String> {
    let current = escape_markdown_v2(current);
    let mut lines = vec![
        r"*增量包 \(OTA\) 信息*".to_string(),
        format!("*当前版本:* {}", current),
    ];
    match ota {
        Some(ota) => {
            lines.push(format!("*目标版本:* {}", escape_or_na(Some(ota.version.as_str()))));
            lines.push(format!("*📥 增量包链接:* {}", link(Some(ota.url.as_str()))));
        }
        None => lines.push(format!(
            "*查询结果:* 未发现从版本 {} 可用的增量更新包。",
            current
        )),
    }
    lines
}

/// Inline link whose text is the URL itself; absent URLs point at `#`
fn link(url: Option<&str>) -> String {
    let target = match url {
        Some(u) if !u.is_empty() => escape_link_url(u),
        _ => "#".to_string(),
    };
    format!("[{}]({})", escape_or_na(url), target)
}
