use std::net::SocketAddr;

use tokio::{
    io::{AsyncWrite, BufStream},
    net::{TcpListener, TcpStream},
    signal,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod args;
mod handler;
mod mime;
mod req;
mod resp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the default tracing subscriber.
    tracing_subscriber::fmt::init();

    let options = args::parse(std::env::args().skip(1));

    if options.help {
        args::print_help();
        return Ok(());
    }

    let handler = handler::StaticFileHandler::from_options(&options)?;

    // The port is still a string here; a value that does not name a
    // valid port fails at bind.
    let listener = TcpListener::bind(format!("{}:{}", options.host, options.port)).await?;

    info!("listening on {}:{}", options.host, options.port);

    let cancel_token = CancellationToken::new();

    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if let Ok(()) = signal::ctrl_c().await {
                info!("received Ctrl-C, shutting down");
                cancel_token.cancel();
            }
        }
    });

    let mut tasks = Vec::new();

    loop {
        let cancel_token = cancel_token.clone();

        tokio::select! {
            Ok((stream, addr)) = listener.accept() => {
                let handler = handler.clone();
                let client_task = tokio::spawn(async move {
                    if let Err(e) = handle_client(cancel_token, stream, addr, &handler).await {
                        error!(?e, "failed to handle client");
                    }
                });
                tasks.push(client_task);
            },
            _ = cancel_token.cancelled() => {
                info!("stop listening");
                break;
            }
        }
    }

    futures::future::join_all(tasks).await;

    Ok(())
}

async fn handle_client(
    cancel_token: CancellationToken,
    stream: TcpStream,
    addr: SocketAddr,
    handler: &handler::StaticFileHandler,
) -> anyhow::Result<()> {
    let mut stream = BufStream::new(stream);

    info!(?addr, "new connection");

    loop {
        tokio::select! {
            req = req::parse_request(&mut stream) => {
                match req {
                    Ok(req) => {
                        info!(?req, "incoming request");
                        let close_conn = handle_req(req, handler, &mut stream).await?;
                        if close_conn {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "failed to parse request");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                info!(?addr, "closing connection");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_req<S: AsyncWrite + Unpin>(
    req: req::Request,
    handler: &handler::StaticFileHandler,
    stream: &mut S,
) -> anyhow::Result<bool> {
    let close_connection = req.headers.get("Connection") == Some(&"close".to_string());

    let resp = handler.handle(&req).await;
    resp.write(stream).await?;

    Ok(close_connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use maplit::hashmap;

    use crate::handler::StaticFileHandler;

    async fn fixture_handler() -> StaticFileHandler {
        let dir = std::env::temp_dir().join(format!("static_server_main_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("index.html"), "<h1>hi</h1>")
            .await
            .unwrap();

        StaticFileHandler::from_options(&args::Options {
            app: dir.display().to_string(),
            ..args::Options::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn connection_close_ends_the_keep_alive_loop() {
        let handler = fixture_handler().await;
        let req = req::Request {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: None,
            headers: hashmap! { "Connection".to_string() => "close".to_string() },
        };

        let mut stream = Cursor::new(Vec::new());
        let close = handle_req(req, &handler, &mut stream).await.unwrap();

        assert!(close);
        let out = String::from_utf8(stream.into_inner()).unwrap();
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(out.ends_with("<h1>hi</h1>"));
    }

    #[tokio::test]
    async fn keep_alive_is_the_default() {
        let handler = fixture_handler().await;
        let req = req::Request {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: None,
            headers: hashmap! {},
        };

        let mut stream = Cursor::new(Vec::new());
        let close = handle_req(req, &handler, &mut stream).await.unwrap();

        assert!(!close);
    }
}
