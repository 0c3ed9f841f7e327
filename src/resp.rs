use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use maplit::hashmap;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Response {
    pub status: Status,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// The one error shape this server produces: plain text `404`,
    /// regardless of what went wrong with the file read.
    pub fn not_found() -> Self {
        let body = b"404".to_vec();

        Self {
            status: Status::NotFound,
            headers: hashmap! {
                "Content-Type".to_string() => "text/plain".to_string(),
                "Content-Length".to_string() => body.len().to_string(),
            },
            body,
        }
    }

    pub fn ok(content: Vec<u8>, content_type: &str) -> Self {
        Self {
            status: Status::Ok,
            headers: hashmap! {
                "Content-Type".to_string() => content_type.to_string(),
                "Content-Length".to_string() => content.len().to_string(),
            },
            body: content,
        }
    }

    pub fn status_and_headers(&self) -> String {
        let headers = self
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}\r\n", k, v))
            .collect::<Vec<_>>()
            .join("");

        format!("HTTP/1.1 {}\r\n{headers}\r\n", self.status)
    }

    pub async fn write<O: AsyncWrite + Unpin>(&self, stream: &mut O) -> anyhow::Result<()> {
        stream
            .write_all(self.status_and_headers().as_bytes())
            .await?;
        stream.write_all(&self.body).await?;
        stream.flush().await?;

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    Ok,
    NotFound,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "200 OK"),
            Status::NotFound => write!(f, "404 Not Found"),
        }
    }
}
