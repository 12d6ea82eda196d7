mod handlers;
mod widgets;

pub use handlers::{handle, Command, HELP};
pub use widgets::{ConsoleGeolocator, ConsoleMap, ConsoleRouting};

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::engine::Navigator;
use crate::error::Error;

/// Reads commands from stdin until `quit` or end of input. Command errors are
/// printed and the loop carries on.
pub async fn serve(navigator: Navigator) -> Result<(), Error> {
    session(navigator, BufReader::new(io::stdin()), io::stdout()).await
}

pub async fn session<R, W>(mut navigator: Navigator, mut input: R, mut output: W) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    write_lines(&mut output, &["type `help` for commands".to_string()]).await;

    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed");
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(_) => {
                write_lines(&mut output, &[format!("unknown command: {}", line)]).await;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        let lines = match handle(&mut navigator, command).await {
            Ok(lines) => lines,
            Err(err) => {
                if err.is_internal() {
                    tracing::error!(error = %err, "command failed");
                }
                vec![format!("! {}", err.notice())]
            }
        };

        write_lines(&mut output, &lines).await;
    }

    tracing::info!("console closed");

    Ok(())
}

async fn write_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: &[String]) {
    for line in lines {
        if let Err(err) = output.write_all(format!("{}\n", line).as_bytes()).await {
            tracing::warn!(error = %err, "stdout write failed");
            return;
        }
    }
    let _ = output.flush().await;
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let (navigator, _) = crate::engine::fakes::started_navigator().await;
    let input: &[u8] = b"search volta\n\xff\xfe\nsearch commonwealth\nquit\nsearch great\n";
    let mut output = Vec::new();

    session(navigator, input, &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("Volta Hall"));
    assert!(printed.contains("unknown command: \u{fffd}\u{fffd}"));
    assert!(printed.contains("Commonwealth Hall"));
    assert!(!printed.contains("Great Hall"));
}
