use std::{env::current_dir, io, path::PathBuf};

use tracing::error;

use crate::args::Options;
use crate::mime;
use crate::req::Request;
use crate::resp::Response;

#[derive(Debug, Clone)]
pub struct StaticFileHandler {
    app_dir: PathBuf,
    index: String,
}

impl StaticFileHandler {
    /// An `app` value starting with `/` is taken as-is; anything else
    /// (including the empty default) is resolved against the server's
    /// own directory.
    pub fn from_options(options: &Options) -> io::Result<StaticFileHandler> {
        let app_dir = if options.app.starts_with('/') {
            PathBuf::from(&options.app)
        } else {
            current_dir()?.join(&options.app)
        };

        Ok(StaticFileHandler {
            app_dir,
            index: options.index.clone(),
        })
    }

    /// Resolves the request path to a file under the app directory and
    /// reads it whole. Requests for `/` serve the configured index
    /// file. The path is joined verbatim, with no normalization and no
    /// `..` guard. Every read failure collapses to the same 404.
    pub async fn handle(&self, request: &Request) -> Response {
        let path = if request.path == "/" {
            format!("/{}", self.index)
        } else {
            request.path.clone()
        };

        // The whole path when there is no dot, which maps to no
        // known type and thus to the text/html default.
        let extension = path
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let content_type = mime::from_extension(&extension).unwrap_or("text/html");

        let file_path = self.app_dir.join(path.trim_start_matches('/'));

        match tokio::fs::read(&file_path).await {
            Ok(content) => Response::ok(content, content_type),
            Err(e) => {
                error!(?e, path = %file_path.display(), "failed to read file");
                Response::not_found()
            }
        }
    }
}
