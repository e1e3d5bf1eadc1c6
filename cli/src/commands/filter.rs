//! Line-oriented navigation filter
//!
//! Reads one URL per line from stdin and writes, per line, the URL the
//! navigation should go to: the redirect target, or the input unchanged.

use anyhow::{Context, Result};
use smart_search_core::{NavigationRouter, RouteDecision};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::CliConfigLoader;

/// Run the navigation filter over stdin
pub async fn filter_command(config_loader: CliConfigLoader) -> Result<()> {
    // Unusable settings must not stop navigations: fall back to defaults
    let config = match config_loader.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to default settings: {:#}", e);
            Default::default()
        }
    };

    info!("Filtering navigations from stdin");
    let router = NavigationRouter::new(config);
    let routed = run_filter(&router, tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("Processed {} navigations", routed);

    Ok(())
}

/// Route every line of `input` to `output`, returning the number of lines
///
/// A line that is not valid UTF-8 is written back unchanged.
async fn run_filter<R, W>(router: &NavigationRouter, input: R, mut output: W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read navigation")?;
        if read == 0 {
            break;
        }

        let raw = buf.trim_ascii();
        if raw.is_empty() {
            continue;
        }

        let target = match std::str::from_utf8(raw).map(str::trim) {
            Ok(url) => match router.route(url) {
                RouteDecision::Redirect { url: target, .. } => target.into_bytes(),
                RouteDecision::Skip { reason } => {
                    debug!(%reason, "Passing navigation through");
                    url.as_bytes().to_vec()
                }
            },
            Err(e) => {
                warn!(error = %e, "Passing through navigation that is not UTF-8");
                raw.to_vec()
            }
        };

        output.write_all(&target).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_search_core::ClassifierConfig;

    #[tokio::test]
    async fn test_filter_routes_each_line() {
        let router = NavigationRouter::new(ClassifierConfig::default());
        let input: &[u8] = b"https://www.google.com/search?q=chat+hello\n\
                             \n\
                             garbage line\n\
                             https://www.google.com/search?q=\xff\xfe\n\
                             https://www.google.com/search?q=gpt+again\n\
                             https://www.google.com/search?q=rust&redirected_by_smart_search=true\n";
        let mut output = Vec::new();

        let count = run_filter(&router, input, &mut output).await.unwrap();
        let lines: Vec<&[u8]> = output.split(|&b| b == b'\n').collect();

        let expected: [&[u8]; 6] = [
            b"https://chatgpt.com/?q=hello&hints=search&ref=ext",
            b"garbage line",
            b"https://www.google.com/search?q=\xff\xfe",
            b"https://chatgpt.com/?q=again&hints=search&ref=ext",
            b"https://www.google.com/search?q=rust&redirected_by_smart_search=true",
            b"",
        ];

        assert_eq!(count, 5);
        assert_eq!(lines, expected);
    }
}
