//! Remote sync channel.
//!
//! The client sends its filter on the `filter` topic as `{"name": "filter", "data":
//! <Filter>}`. The server answers with full snapshots `{filter, entries, first_id,
//! last_id}` that replace `remote` wholesale. The transport itself (websocket,
//! pipe, test double) sits behind [`RemoteChannel`] and a message receiver.

use crate::model::error::ChannelError;
use crate::model::Filter;
use crate::state::RemoteState;
use serde::Serialize;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, info, warn};

/// Topic of outgoing filter messages.
pub const FILTER_TOPIC: &str = "filter";

#[derive(Debug, Serialize)]
struct Outgoing<'a> {
    name: &'static str,
    data: &'a Filter,
}

/// Encode a filter push.
pub fn encode_filter(filter: &Filter) -> Result<String, ChannelError> {
    let message = Outgoing {
        name: FILTER_TOPIC,
        data: filter,
    };
    Ok(serde_json::to_string(&message)?)
}

/// Decode a server snapshot.
///
/// # Errors
///
/// Returns `ChannelError::Decode` when the payload is not a snapshot.
pub fn decode_remote_state(text: &str) -> Result<RemoteState, ChannelError> {
    Ok(serde_json::from_str(text)?)
}

/// Outgoing half of the remote channel.
pub trait RemoteChannel {
    /// Send the filter on the `filter` topic. Fire-and-forget: the answer, if
    /// any, arrives later as a snapshot.
    fn send_filter(&mut self, filter: &Filter) -> Result<(), ChannelError>;

    /// Server pushes received since the last call, oldest first.
    ///
    /// Channels fed from elsewhere (e.g. [`crate::app::App::on_remote_message`])
    /// keep the default, which never yields anything.
    fn poll_pushes(&mut self) -> Result<Vec<RemoteState>, ChannelError> {
        Ok(Vec::new())
    }
}

/// Channel backed by a `std::sync::mpsc` pair to a transport thread.
///
/// Outgoing messages are encoded JSON strings; incoming snapshots are raw JSON
/// strings decoded on [`SenderChannel::poll`].
#[derive(Debug)]
pub struct SenderChannel {
    outgoing: Sender<String>,
    incoming: Receiver<String>,
}

impl SenderChannel {
    /// Channel over an existing pair.
    pub fn new(outgoing: Sender<String>, incoming: Receiver<String>) -> Self {
        Self { outgoing, incoming }
    }

    /// Drain every pending server push.
    ///
    /// Non-blocking. Undecodable pushes are logged and skipped, so a later valid
    /// snapshot still gets through.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Disconnected` once the transport is gone and
    /// nothing is left to read.
    pub fn poll(&mut self) -> Result<Vec<RemoteState>, ChannelError> {
        let mut snapshots = Vec::new();
        loop {
            match self.incoming.try_recv() {
                Ok(text) => match decode_remote_state(&text) {
                    Ok(snapshot) => snapshots.push(snapshot),
                    Err(err) => warn!(%err, "dropping undecodable push"),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if snapshots.is_empty() => {
                    return Err(ChannelError::Disconnected);
                }
                Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(snapshots)
    }
}

impl RemoteChannel for SenderChannel {
    fn send_filter(&mut self, filter: &Filter) -> Result<(), ChannelError> {
        let text = encode_filter(filter)?;
        self.outgoing
            .send(text)
            .map_err(|_| ChannelError::Disconnected)?;
        debug!(topic = FILTER_TOPIC, "filter sent");
        Ok(())
    }

    fn poll_pushes(&mut self) -> Result<Vec<RemoteState>, ChannelError> {
        self.poll()
    }
}

/// Connect to a server speaking newline-delimited JSON over TCP.
///
/// Two threads bridge the socket to a [`SenderChannel`]: one writes each outgoing
/// message as a line, the other forwards every non-empty received line. Either
/// side closing shows up as `ChannelError::Disconnected` on the channel.
pub fn connect_tcp(addr: impl ToSocketAddrs) -> io::Result<SenderChannel> {
    let stream = TcpStream::connect(addr)?;
    let peer = stream.peer_addr()?;
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    let (out_tx, out_rx) = mpsc::channel::<String>();
    let (in_tx, in_rx) = mpsc::channel::<String>();

    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "socket read failed");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            if in_tx.send(line).is_err() {
                break;
            }
        }
        debug!("reader finished");
    });

    thread::spawn(move || {
        for message in out_rx {
            if let Err(err) = writeln!(writer, "{message}").and_then(|()| writer.flush()) {
                warn!(%err, "socket write failed");
                break;
            }
        }
        debug!("writer finished");
    });

    info!(%peer, "connected");
    Ok(SenderChannel::new(out_tx, in_rx))
}

/// In-memory channel that records every filter sent.
///
/// Useful for embedding the core without a server and for tests.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Vec<Filter>,
    failure: Option<String>,
}

impl RecordingChannel {
    /// Channel that accepts every send.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with `reason` (or succeed again on `None`).
    pub fn fail_with(&mut self, reason: Option<&str>) {
        self.failure = reason.map(str::to_owned);
    }

    /// Every filter sent, oldest first.
    pub fn sent(&self) -> &[Filter] {
        &self.sent
    }

    /// Most recent filter sent.
    pub fn last_sent(&self) -> Option<&Filter> {
        self.sent.last()
    }
}

impl RemoteChannel for RecordingChannel {
    fn send_filter(&mut self, filter: &Filter) -> Result<(), ChannelError> {
        if let Some(reason) = &self.failure {
            return Err(ChannelError::Send {
                topic: FILTER_TOPIC,
                reason: reason.clone(),
            });
        }
        self.sent.push(filter.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use std::sync::mpsc;

    #[test]
    fn encode_wraps_filter_under_topic() {
        let mut filter = Filter::default();
        filter.severity = Some(Severity::Error);

        let value: serde_json::Value = serde_json::from_str(&encode_filter(&filter).unwrap()).unwrap();

        assert_eq!(value["name"], "filter");
        assert_eq!(value["data"]["severity"], "ERROR");
        assert_eq!(value["data"]["max_results"], 50);
        assert!(value["data"]["last_id"].is_null());
    }

    #[test]
    fn decode_snapshot() {
        let text = r#"{
            "filter": {"max_results": 2, "last_id": null, "entry_timestamp_from": null,
                       "entry_timestamp_to": null, "facility": null, "severity": null,
                       "hostname": null, "app_name": null, "procid": null, "msgid": null,
                       "msg": null},
            "entries": [{"id": 3, "timestamp": 10.0, "msg": {"facility": "USER",
                "severity": "ERROR", "version": 1, "timestamp": null, "hostname": null,
                "app_name": null, "procid": null, "msgid": null, "data": null, "msg": "x"}}],
            "first_id": 1,
            "last_id": 3
        }"#;

        let remote = decode_remote_state(text).unwrap();

        assert_eq!(remote.entries.len(), 1);
        assert_eq!(remote.entries[0].id, 3);
        assert_eq!(remote.filter.max_results, Some(2));
        assert_eq!((remote.first_id, remote.last_id), (Some(1), Some(3)));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_remote_state("not json"),
            Err(ChannelError::Decode(_))
        ));
    }

    #[test]
    fn recording_channel_records_and_fails_on_demand() {
        let mut channel = RecordingChannel::new();
        channel.send_filter(&Filter::default()).unwrap();
        assert_eq!(channel.sent().len(), 1);

        channel.fail_with(Some("offline"));
        let err = channel.send_filter(&Filter::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to send filter message: offline");
        assert_eq!(channel.sent().len(), 1);
    }

    #[test]
    fn sender_channel_sends_encoded_filter() {
        let (out_tx, out_rx) = mpsc::channel();
        let (_in_tx, in_rx) = mpsc::channel();
        let mut channel = SenderChannel::new(out_tx, in_rx);

        channel.send_filter(&Filter::default()).unwrap();

        let text = out_rx.try_recv().unwrap();
        assert!(text.contains(r#""name":"filter""#));
    }

    #[test]
    fn sender_channel_reports_closed_transport() {
        let (out_tx, out_rx) = mpsc::channel();
        let (_in_tx, in_rx) = mpsc::channel::<String>();
        drop(out_rx);
        let mut channel = SenderChannel::new(out_tx, in_rx);

        assert!(matches!(
            channel.send_filter(&Filter::default()),
            Err(ChannelError::Disconnected)
        ));
    }

    #[test]
    fn poll_skips_bad_pushes_and_keeps_order() {
        let (out_tx, _out_rx) = mpsc::channel();
        let (in_tx, in_rx) = mpsc::channel();
        let mut channel = SenderChannel::new(out_tx, in_rx);
        let snapshot = |last: u64| {
            format!(
                r#"{{"filter": {{}}, "entries": [], "first_id": 1, "last_id": {last}}}"#
            )
        };

        in_tx.send(snapshot(5)).unwrap();
        in_tx.send("garbage".to_owned()).unwrap();
        in_tx.send(snapshot(6)).unwrap();

        let ids: Vec<_> = channel.poll().unwrap().iter().map(|r| r.last_id).collect();
        assert_eq!(ids, vec![Some(5), Some(6)]);
        assert!(channel.poll().unwrap().is_empty());

        drop(in_tx);
        assert!(matches!(channel.poll(), Err(ChannelError::Disconnected)));
    }

    #[test]
    fn tcp_channel_exchanges_lines() {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;
        use std::time::{Duration, Instant};

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(socket.try_clone().unwrap());
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            writeln!(socket).unwrap();
            writeln!(socket, r#"{{"filter": {{}}, "entries": [], "first_id": 1, "last_id": 9}}"#).unwrap();
            line
        });

        let mut channel = connect_tcp(addr).unwrap();
        channel.send_filter(&Filter::default()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut received = Vec::new();
        while received.is_empty() && Instant::now() < deadline {
            match channel.poll() {
                Ok(pushes) => received.extend(pushes),
                Err(ChannelError::Disconnected) => break,
                Err(err) => panic!("unexpected error: {err}"),
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        let sent = server.join().unwrap();
        assert!(sent.starts_with(r#"{"name":"filter","data":"#));
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].last_id, Some(9));
    }
}
