// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 请求前预处理URL
///
/// 非 ASCII 主机名转换为 punycode，查询字符串中的 `&amp;` 只解码一次。
/// 路径保持原样，不会追加结尾斜杠。
pub fn preprocess_url(raw: &str) -> String {
    let url = punycode_host(raw);
    match url.split_once('?') {
        Some((base, query)) => format!("{}?{}", base, query.replace("&amp;", "&")),
        None => url,
    }
}

fn punycode_host(raw: &str) -> String {
    let Some((host_offset, host_len)) = host_span(raw) else {
        return raw.to_string();
    };
    let host = &raw[host_offset..host_offset + host_len];
    if host.is_ascii() {
        return raw.to_string();
    }

    let scheme = &raw[..raw.find("://").unwrap_or(0)];
    let ascii_host = match Url::parse(&format!("{}://{}/", scheme, host)) {
        Ok(parsed) => match parsed.host_str() {
            Some(ascii) => ascii.to_string(),
            None => return raw.to_string(),
        },
        Err(_) => return raw.to_string(),
    };

    format!(
        "{}{}{}",
        &raw[..host_offset],
        ascii_host,
        &raw[host_offset + host_len..]
    )
}

/// 主机名在原始字符串中的位置 `(偏移, 长度)`，不含用户信息和端口
fn host_span(raw: &str) -> Option<(usize, usize)> {
    let authority_start = raw.find("://")? + 3;
    let rest = &raw[authority_start..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_len];

    let host_start = authority.rfind('@').map(|i| i + 1).unwrap_or(0);
    let host_and_port = &authority[host_start..];
    let host_len = if host_and_port.starts_with('[') {
        host_and_port
            .find(']')
            .map(|i| i + 1)
            .unwrap_or(host_and_port.len())
    } else {
        host_and_port.rfind(':').unwrap_or(host_and_port.len())
    };

    Some((authority_start + host_start, host_len))
}

/// 原样返回URL中的主机名，不做小写或 punycode 转换
pub fn raw_host(raw: &str) -> Option<&str> {
    let (offset, len) = host_span(raw)?;
    let host = &raw[offset..offset + len];
    (!host.is_empty()).then_some(host)
}

/// 提取URL的主机名
pub fn extract_domain(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
}

/// 计算 robots.txt 的位置：`scheme://host[:port]/robots.txt`
pub fn robots_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}/robots.txt", url.scheme(), host, port),
        None => format!("{}://{}/robots.txt", url.scheme(), host),
    })
}
