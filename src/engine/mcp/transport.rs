// CIGAM Bridge: MCP Stdio Transport
//
// Newline-delimited JSON-RPC over stdin/stdout. One message per line;
// stdout carries nothing else.

use crate::atoms::error::CigamResult;
use log::{debug, error};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Read the next non-blank line. `Ok(None)` on EOF.
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut BufReader<R>) -> CigamResult<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

/// Spawn the single writer task. Every message sent on the returned
/// channel is written as one line and flushed, so concurrent responders
/// never interleave output. The task ends when all senders are dropped
/// or the sink fails.
pub fn spawn_writer<W>(sink: W) -> (mpsc::Sender<Vec<u8>>, JoinHandle<std::io::Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(64);
    let handle = tokio::spawn(async move {
        let mut sink = sink;
        while let Some(mut msg) = rx.recv().await {
            msg.push(b'\n');
            if let Err(e) = sink.write_all(&msg).await {
                error!("[mcp] stdout write error: {}", e);
                return Err(e);
            }
            if let Err(e) = sink.flush().await {
                error!("[mcp] stdout flush error: {}", e);
                return Err(e);
            }
        }
        debug!("[mcp] Writer task exiting");
        Ok(())
    });
    (tx, handle)
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_read_message_basic() {
        let data = b"{\"test\":true}\n";
        let mut reader = BufReader::new(&data[..]);
        let result = read_message(&mut reader).await.unwrap().unwrap();
        assert_eq!(result, "{\"test\":true}");
    }

    #[tokio::test]
    async fn test_read_message_skips_blank_lines_and_crlf() {
        let data = b"\r\n\n{}\r\n";
        let mut reader = BufReader::new(&data[..]);
        assert_eq!(read_message(&mut reader).await.unwrap().as_deref(), Some("{}"));
        assert!(read_message(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_message_last_line_without_newline() {
        let data = b"{\"a\":1}";
        let mut reader = BufReader::new(&data[..]);
        assert_eq!(read_message(&mut reader).await.unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_writer_emits_one_line_per_message() {
        let (client, server) = tokio::io::duplex(1024);
        let (tx, handle) = spawn_writer(server);
        tx.send(b"{\"id\":1}".to_vec()).await.unwrap();
        tx.send(b"{\"id\":2}".to_vec()).await.unwrap();
        drop(tx);
        handle.await.unwrap().unwrap();

        let mut out = String::new();
        let mut client = client;
        client.read_to_string(&mut out).await.unwrap();
        assert_eq!(out, "{\"id\":1}\n{\"id\":2}\n");
    }
}
