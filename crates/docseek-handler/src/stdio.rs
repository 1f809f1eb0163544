//! Line-oriented JSON loop between the launcher and the plugin.

use docseek_core::RecollPlugin;
use docseek_core::backend::SearchBackend;
use docseek_core::protocol::{PluginInput, PluginResponse};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

/// Serve requests from stdin until EOF.
pub async fn run<B: SearchBackend>(plugin: &RecollPlugin<B>) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    serve(plugin, reader, &mut writer).await
}

/// Answer every non-blank input line with exactly one response line.
///
/// Lines that are not valid [`PluginInput`], including lines that are not
/// UTF-8, get an error response; the loop only stops on EOF or a broken
/// reader or writer.
pub async fn serve<B, R, W>(
    plugin: &RecollPlugin<B>,
    mut reader: R,
    writer: &mut W,
) -> anyhow::Result<()>
where
    B: SearchBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_slice::<PluginInput>(line) {
            Ok(input) => plugin.handle(input).await,
            Err(e) => {
                warn!(
                    "Invalid input: {e} - Raw: {}",
                    String::from_utf8_lossy(line)
                );
                PluginResponse::error("Invalid input", Some(e.to_string()))
            }
        };
        write_response(writer, &response).await?;
    }

    debug!("Input closed");
    Ok(())
}

/// Write one response frame and flush it.
pub async fn write_response<W>(writer: &mut W, response: &PluginResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = response.to_line()?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
