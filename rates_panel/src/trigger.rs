//! User trigger: turns keyboard input and Ctrl+C into panel events.
//!
//! Both producers only send on a channel; the main loop is the single consumer
//! and handles one event at a time. An activation that arrives while a
//! refresh is running waits in the channel until that refresh is done.
use crossbeam_channel::Sender;
use log::{info, warn};
use rates_common::{RateError, Result};
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

/// What the user asked the panel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Refresh the grid (the "button click").
    Activate,
    /// Stop the session.
    Quit,
}

impl PanelEvent {
    /// Map one input line to an event; unrecognised input maps to `None`.
    pub fn from_input(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "refresh" => Some(PanelEvent::Activate),
            "q" | "quit" | "exit" => Some(PanelEvent::Quit),
            _ => None,
        }
    }
}

/// Forward events read from `reader` until quit or end of input.
///
/// End of input counts as quit. Lines that are not valid UTF-8 are decoded
/// lossily and end up as unknown input.
pub fn forward_events<R: BufRead>(mut reader: R, tx: &Sender<PanelEvent>) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        match PanelEvent::from_input(&line) {
            Some(PanelEvent::Quit) => break,
            Some(event) => tx.send(event)?,
            None => warn!("Unknown input {:?}: Enter refreshes, q quits", line.trim()),
        }
    }
    tx.send(PanelEvent::Quit)?;
    Ok(())
}

/// Forward events from `reader`; if reading fails, still send `Quit` so the
/// consumer never waits on a dead producer.
pub fn run_trigger<R: BufRead>(reader: R, tx: &Sender<PanelEvent>) {
    if let Err(e) = forward_events(reader, tx) {
        warn!("Input trigger stopped: {}", e);
        let _ = tx.send(PanelEvent::Quit);
    }
}

/// Spawn a thread that reads stdin and forwards events to `tx`.
pub fn spawn_stdin_trigger(tx: Sender<PanelEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        run_trigger(stdin.lock(), &tx);
    })
}

/// Send `Quit` on Ctrl+C.
pub fn install_ctrlc(tx: Sender<PanelEvent>) -> Result<()> {
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down panel...");
        let _ = tx.send(PanelEvent::Quit);
    })
    .map_err(|e| RateError::Format(format!("Error setting Ctrl+C handler: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::{BufReader, Cursor, Read};

    /// Reader that yields one refresh line and then fails.
    struct BrokenPipe {
        sent: bool,
    }

    impl Read for BrokenPipe {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"));
            }
            self.sent = true;
            buf[..2].copy_from_slice(b"r\n");
            Ok(2)
        }
    }

    #[test]
    fn input_mapping() {
        assert_eq!(PanelEvent::from_input(""), Some(PanelEvent::Activate));
        assert_eq!(PanelEvent::from_input("  R "), Some(PanelEvent::Activate));
        assert_eq!(PanelEvent::from_input("refresh"), Some(PanelEvent::Activate));
        assert_eq!(PanelEvent::from_input("exit"), Some(PanelEvent::Quit));
        assert_eq!(PanelEvent::from_input("Q"), Some(PanelEvent::Quit));
        assert_eq!(PanelEvent::from_input("buy btc"), None);
    }

    #[test]
    fn forwards_until_quit_and_ignores_noise() {
        let (tx, rx) = unbounded();
        forward_events(Cursor::new("\nhello\nr\nq\nr\n"), &tx).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![PanelEvent::Activate, PanelEvent::Activate, PanelEvent::Quit]
        );
    }

    #[test]
    fn end_of_input_quits() {
        let (tx, rx) = unbounded();
        forward_events(Cursor::new("refresh\n"), &tx).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![PanelEvent::Activate, PanelEvent::Quit]);
    }

    #[test]
    fn invalid_utf8_line_is_skipped_and_later_input_still_arrives() {
        let (tx, rx) = unbounded();
        forward_events(Cursor::new(&b"r\n\xff\xfe\nr\n"[..]), &tx).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![PanelEvent::Activate, PanelEvent::Activate, PanelEvent::Quit]
        );
    }

    #[test]
    fn read_error_still_delivers_quit() {
        let (tx, rx) = unbounded();
        run_trigger(BufReader::new(BrokenPipe { sent: false }), &tx);
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![PanelEvent::Activate, PanelEvent::Quit]);
    }

    #[test]
    fn closed_receiver_is_a_channel_error() {
        let (tx, rx) = unbounded();
        drop(rx);
        let result = forward_events(Cursor::new("r\n"), &tx);
        assert!(matches!(result, Err(RateError::ChannelSend(_))));
    }
}
