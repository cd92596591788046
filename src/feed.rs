//! Line-oriented event feeds.
//!
//! A feed reads newline-delimited JSON from any byte stream on a background
//! thread and forwards decoded [`ChannelEvent`]s over an `mpsc` channel. The
//! stream's own lifetime is reported as lifecycle signals: `Connect` before
//! the first line, `Disconnect` on EOF or a read error. Undecodable lines are
//! logged and skipped. Reconnecting is left to whoever owns the stream.

use std::io::{BufRead, BufReader, Read};
use std::net::TcpStream;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use crate::error::FeedError;
use crate::events::ChannelEvent;

/// Where events come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    /// `host:port` of a server writing JSON lines.
    Tcp(String),
    /// Built-in synthetic patients.
    Simulate,
}

impl std::str::FromStr for FeedSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdin" | "-" => Ok(FeedSource::Stdin),
            "simulate" | "sim" => Ok(FeedSource::Simulate),
            _ => match s.strip_prefix("tcp://") {
                Some(addr) if !addr.is_empty() => Ok(FeedSource::Tcp(addr.to_owned())),
                _ => Err(format!(
                    "unknown source {s:?}; expected stdin, simulate or tcp://host:port"
                )),
            },
        }
    }
}

/// Read events from `reader` on a new thread named `name`.
pub fn spawn_reader<R>(name: &str, reader: R, tx: Sender<ChannelEvent>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    let name = name.to_owned();
    std::thread::spawn(move || {
        log::info!("{name}: feed started");
        if tx.send(ChannelEvent::Connect).is_err() {
            return;
        }
        if pump_lines(&name, BufReader::new(reader), &tx) {
            log::info!("{name}: feed ended");
            let _ = tx.send(ChannelEvent::Disconnect);
        }
    })
}

/// Forward every decodable line. Returns `false` if the receiver went away.
fn pump_lines<B: BufRead>(name: &str, reader: B, tx: &Sender<ChannelEvent>) -> bool {
    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::warn!("{name}: read error: {e}");
                return true;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match ChannelEvent::decode(trimmed) {
            Ok(evt) => {
                if tx.send(evt).is_err() {
                    log::debug!("{name}: receiver closed");
                    return false;
                }
            }
            Err(e) => log::warn!("{name}: skipping line {}: {e}", lineno + 1),
        }
    }
    true
}

/// Connect to `addr` and read events from the socket.
pub fn connect_tcp(addr: &str, tx: Sender<ChannelEvent>) -> Result<JoinHandle<()>, FeedError> {
    let stream = TcpStream::connect(addr).map_err(|source| FeedError::Connect {
        addr: addr.to_owned(),
        source,
    })?;
    Ok(spawn_reader(&format!("tcp {addr}"), stream, tx))
}

/// Read events from standard input.
pub fn spawn_stdin(tx: Sender<ChannelEvent>) -> JoinHandle<()> {
    spawn_reader("stdin", std::io::stdin(), tx)
}
