//! Interactive focus session loop.
//!
//! Reads one command per line and forwards it to a running session while
//! printing session events as they arrive.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use super::display::Display;
use crate::session::{SessionError, SessionEvent, SessionHandle, SessionSnapshot};
use crate::tasks::TaskId;

/// A line of user input during a focus session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusInput {
    /// Start or pause the countdown
    Toggle,
    /// Back to a full, stopped Work phase
    Reset,
    /// End the running phase now
    Skip,
    /// Credit this task from now on
    Select(String),
    Status,
    Help,
    Quit,
}

impl FromStr for FocusInput {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_ascii_lowercase();

        let input = match command.as_str() {
            "s" | "p" | "start" | "pause" | "toggle" => FocusInput::Toggle,
            "r" | "reset" => FocusInput::Reset,
            "f" | "skip" | "ff" => FocusInput::Skip,
            "select" | "task" => match parts.next() {
                Some(id) => FocusInput::Select(id.to_string()),
                None => return Err("usage: select <task id>".to_string()),
            },
            "status" | "" => FocusInput::Status,
            "h" | "help" | "?" => FocusInput::Help,
            "q" | "quit" | "exit" => FocusInput::Quit,
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(input)
    }
}

/// Drives `handle` from `input` until quit or end of input.
///
/// Shuts the session down on exit and returns its final snapshot.
pub async fn run_focus<R>(
    handle: &SessionHandle,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    input: R,
) -> Result<SessionSnapshot, SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    Display::show_focus_help();
    Display::show_snapshot(&handle.snapshot().await?);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read input");
                        break;
                    }
                };

                match line.parse::<FocusInput>() {
                    Ok(FocusInput::Quit) => break,
                    Ok(FocusInput::Help) => Display::show_focus_help(),
                    Ok(command) => {
                        let snapshot = apply(handle, command).await?;
                        Display::show_snapshot(&snapshot);
                    }
                    Err(message) => Display::show_error(&message),
                }
            }
            Some(event) = events.recv() => Display::show_event(&event),
        }
    }

    let last = handle.shutdown().await?;
    while let Ok(event) = events.try_recv() {
        Display::show_event(&event);
    }
    Ok(last)
}

async fn apply(
    handle: &SessionHandle,
    command: FocusInput,
) -> Result<SessionSnapshot, SessionError> {
    match command {
        FocusInput::Toggle => handle.toggle().await,
        FocusInput::Reset => handle.reset().await,
        FocusInput::Skip => handle.fast_forward().await,
        FocusInput::Select(id) => handle.select_task(TaskId::from(id)).await,
        FocusInput::Status | FocusInput::Help | FocusInput::Quit => handle.snapshot().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("s".parse(), Ok(FocusInput::Toggle));
        assert_eq!("Pause".parse(), Ok(FocusInput::Toggle));
        assert_eq!("r".parse(), Ok(FocusInput::Reset));
        assert_eq!("skip".parse(), Ok(FocusInput::Skip));
        assert_eq!("".parse(), Ok(FocusInput::Status));
        assert_eq!("  q ".parse(), Ok(FocusInput::Quit));
        assert_eq!("?".parse(), Ok(FocusInput::Help));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            "select abc-123".parse(),
            Ok(FocusInput::Select("abc-123".to_string()))
        );
        assert!("select".parse::<FocusInput>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "launch".parse::<FocusInput>().unwrap_err();
        assert!(err.contains("launch"));
    }
}
