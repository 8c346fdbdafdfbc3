// ==========================================
// PLG 线索评分门户 - HTTP/1.1 服务
// ==========================================
// 职责: 接收连接 → 解析请求行/请求头 → 交给 router 渲染 → 回写响应
// 约束:
// - 每个连接一个任务，响应后关闭 (Connection: close)
// - 请求头总长有上限，超限或格式错误返回 400
// - 渲染在阻塞线程池执行（SQLite 同步访问 + 线程内 SQL 计数）
// ==========================================

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::app::AppState;
use crate::web::router;

/// 请求行 + 请求头的总字节上限
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

/// 读取请求的超时
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

// ==========================================
// 请求 / 响应
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// 测试与 CLI 渲染用的 GET 请求
    pub fn get(path_with_query: &str) -> Self {
        let (path, query) = parse_path_query(path_with_query);
        Self {
            method: "GET".to_string(),
            path,
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body: body.into_bytes(),
        }
    }

    pub fn text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into_bytes(),
        }
    }

    /// JSON 响应；序列化失败时降级为 500 纯文本
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(e) => {
                tracing::error!(error = %e, "JSON 序列化失败");
                Self::text(500, http_reason_phrase(500).to_string())
            }
        }
    }

    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ==========================================
// 服务循环
// ==========================================

/// 绑定监听地址
pub async fn bind(addr: &str) -> io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// 持续服务直到进程退出
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> io::Result<()> {
    serve_with_shutdown(listener, state, std::future::pending()).await
}

/// 持续服务直到 shutdown 完成（已建立的连接任务自行结束）
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    tracing::info!(addr = %listener.local_addr()?, "HTTP 服务已启动");
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("收到关闭信号，停止接收新连接");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let state = state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, state).await {
                            tracing::debug!(peer = %peer, error = %e, "连接处理失败");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept 失败");
                }
            }
        }
    }
    Ok(())
}

async fn handle_connection(stream: TcpStream, state: Arc<AppState>) -> io::Result<()> {
    let started = Instant::now();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let parsed = match tokio::time::timeout(READ_TIMEOUT, read_http_request(&mut reader)).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "读取请求超时")),
    };

    let (method, path, response) = match parsed {
        Ok(Some(req)) => {
            let method = req.method.clone();
            let path = req.path.clone();
            let response = tokio::task::spawn_blocking(move || router::dispatch(&state, &req))
                .await
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "页面渲染任务异常");
                    HttpResponse::text(500, http_reason_phrase(500).to_string())
                });
            (method, path, response)
        }
        Ok(None) => return Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "请求解析失败");
            let response = HttpResponse::text(400, http_reason_phrase(400).to_string());
            ("-".to_string(), "-".to_string(), response)
        }
    };

    write_http_response(&mut write_half, &response).await?;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "HTTP 请求"
    );
    Ok(())
}

// ==========================================
// 解析 / 回写
// ==========================================

/// 读取一行，受剩余字节预算约束
async fn read_limited_line<R>(
    reader: &mut R,
    budget: &mut usize,
    line: &mut String,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let n = (&mut *reader).take(*budget as u64).read_line(line).await?;
    *budget = budget.saturating_sub(n);
    if n > 0 && !line.ends_with('\n') && *budget == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("请求头超过 {} 字节", MAX_HEADER_BYTES),
        ));
    }
    Ok(n)
}

/// 读取请求行与请求头（GET 不读取请求体）
///
/// # 返回
/// - Ok(None): 对端未发送任何数据即关闭
pub async fn read_http_request<R>(reader: &mut R) -> io::Result<Option<HttpRequest>>
where
    R: AsyncBufRead + Unpin,
{
    let mut budget = MAX_HEADER_BYTES;
    let mut line = String::new();
    if read_limited_line(reader, &mut budget, &mut line).await? == 0 {
        return Ok(None);
    }
    let first = line.trim_end_matches(['\r', '\n']);
    if first.is_empty() {
        return Ok(None);
    }

    let mut parts = first.split_whitespace();
    let Some(method) = parts.next() else {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "请求行缺少 method"));
    };
    let Some(target) = parts.next() else {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "请求行缺少 path"));
    };
    if !target.starts_with('/') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("不支持的请求目标: {}", target),
        ));
    }
    let method = method.to_ascii_uppercase();
    let (path, query) = parse_path_query(target);

    let mut headers = HashMap::new();
    loop {
        let mut header = String::new();
        if read_limited_line(reader, &mut budget, &mut header).await? == 0 {
            break;
        }
        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    Ok(Some(HttpRequest {
        method,
        path,
        query,
        headers,
    }))
}

pub async fn write_http_response<W>(writer: &mut W, response: &HttpResponse) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        http_reason_phrase(response.status),
        response.content_type,
        response.body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    writer.write_all(&response.body).await?;
    writer.flush().await
}

pub fn http_reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// 拆分路径与查询串；键值均做百分号解码，重复键保留最后一个
pub fn parse_path_query(raw: &str) -> (String, HashMap<String, String>) {
    let (path, query_str) = match raw.split_once('?') {
        Some((p, q)) => (p, q),
        None => (raw, ""),
    };
    let mut query = HashMap::new();
    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((k, v)) => query.insert(percent_decode(k), percent_decode(v)),
            None => query.insert(percent_decode(pair), String::new()),
        };
    }
    (percent_decode(path), query)
}

/// application/x-www-form-urlencoded 解码（'+' → 空格，非法 %XX 原样保留）
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_query_decodes() {
        let (path, query) =
            parse_path_query("/scenarios/ai-startup?users=2500&tier=pro&lang=zh%2DCN&q=a+b");
        assert_eq!(path, "/scenarios/ai-startup");
        assert_eq!(query.get("users").map(String::as_str), Some("2500"));
        assert_eq!(query.get("tier").map(String::as_str), Some("pro"));
        assert_eq!(query.get("lang").map(String::as_str), Some("zh-CN"));
        assert_eq!(query.get("q").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_percent_decode_keeps_invalid_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz1"), "%zz1");
        assert_eq!(percent_decode("%E7%83%AD"), "热");
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(http_reason_phrase(404), "Not Found");
        assert_eq!(http_reason_phrase(405), "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_read_http_request() {
        let raw = b"GET /api/leads?tier=hot HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n";
        let mut reader: &[u8] = raw;
        let req = read_http_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/leads");
        assert_eq!(req.query.get("tier").map(String::as_str), Some("hot"));
        assert_eq!(req.headers.get("host").map(String::as_str), Some("localhost"));
    }

    #[tokio::test]
    async fn test_read_http_request_empty_stream() {
        let mut reader: &[u8] = b"";
        assert!(read_http_request(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_http_request_rejects_oversized_headers() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(MAX_HEADER_BYTES * 2));
        raw.extend_from_slice(b"\r\n\r\n");
        let mut reader: &[u8] = &raw;
        let err = read_http_request(&mut reader).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_read_http_request_rejects_missing_path() {
        let mut reader: &[u8] = b"GET\r\n\r\n";
        assert!(read_http_request(&mut reader).await.is_err());
    }

    #[tokio::test]
    async fn test_write_http_response() {
        let mut out: Vec<u8> = Vec::new();
        let resp = HttpResponse::text(404, "Not Found".to_string());
        write_http_response(&mut out, &resp).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 9\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\nNot Found"));
    }
}
