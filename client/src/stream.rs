//! Streaming replies of `send_message`.
//!
//! # Design
//! Both handles own the open connection and feed its bytes through one
//! `SseDecoder`. A handle moves `Connected -> Receiving -> Closed` and never
//! reopens, so iterating it a second time yields nothing. The connection is
//! released on exhaustion, on a read error, on `close()`, or when the handle
//! is dropped.
//!
//! A dropped connection and a finished answer look the same on the wire.
//! Neither is an error: `end()` reports `Finished` for a clean EOF and
//! `Interrupted` when the transport failed mid-read, and the caller decides
//! what a truncated answer means.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use customgpt_core::api::SendMessageOutcome;
use customgpt_core::{Response, SseDecoder, SseEvent};
use futures::stream::BoxStream;
use futures::{ready, Stream, StreamExt};
use tracing::{debug, warn};

const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Response head received, no event delivered yet.
    Connected,
    /// At least one event delivered.
    Receiving,
    /// Connection released; no further events.
    Closed,
}

/// Why a stream reached `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The server closed the connection cleanly.
    Finished,
    /// Reading failed; the answer may be truncated.
    Interrupted,
    ClosedByCaller,
}

/// What a streaming call returns.
#[derive(Debug)]
pub enum StreamReply<S> {
    /// 2xx reply: the event stream.
    Events(S),
    /// Non-2xx reply, classified like any other call.
    Rejected(Response<SendMessageOutcome>),
}

impl<S> StreamReply<S> {
    pub fn events(self) -> Option<S> {
        match self {
            StreamReply::Events(stream) => Some(stream),
            StreamReply::Rejected(_) => None,
        }
    }

    pub fn rejected(self) -> Option<Response<SendMessageOutcome>> {
        match self {
            StreamReply::Events(_) => None,
            StreamReply::Rejected(response) => Some(response),
        }
    }
}

/// Decoder plus lifecycle bookkeeping shared by both handles.
#[derive(Debug)]
struct Frames {
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    state: StreamState,
    end: Option<StreamEnd>,
}

impl Frames {
    fn new() -> Self {
        Self {
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            state: StreamState::Connected,
            end: None,
        }
    }

    fn feed(&mut self, chunk: &[u8]) {
        self.pending.extend(self.decoder.feed(chunk));
    }

    fn pop(&mut self) -> Option<SseEvent> {
        let event = self.pending.pop_front()?;
        if self.state == StreamState::Connected {
            self.state = StreamState::Receiving;
        }
        Some(event)
    }

    fn finish(&mut self, end: StreamEnd) {
        if self.decoder.has_pending() {
            debug!(?end, "dropping incomplete event frame");
        }
        if end == StreamEnd::ClosedByCaller {
            self.pending.clear();
        }
        self.state = StreamState::Closed;
        self.end.get_or_insert(end);
    }
}

/// Blocking event stream over an open response body.
pub struct MessageStream {
    reader: Option<Box<dyn Read + Send>>,
    frames: Frames,
}

impl MessageStream {
    pub fn new(reader: Box<dyn Read + Send>) -> Self {
        Self {
            reader: Some(reader),
            frames: Frames::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.frames.state
    }

    /// How the stream ended; `None` while still open.
    pub fn end(&self) -> Option<StreamEnd> {
        self.frames.end
    }

    /// Release the connection now. Events not yet yielded are discarded.
    pub fn close(&mut self) {
        self.reader = None;
        self.frames.finish(StreamEnd::ClosedByCaller);
    }
}

impl Iterator for MessageStream {
    type Item = SseEvent;

    fn next(&mut self) -> Option<SseEvent> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(event) = self.frames.pop() {
                return Some(event);
            }
            let reader = self.reader.as_mut()?;
            match reader.read(&mut buf) {
                Ok(0) => {
                    self.reader = None;
                    self.frames.finish(StreamEnd::Finished);
                }
                Ok(n) => self.frames.feed(&buf[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, "event stream interrupted");
                    self.reader = None;
                    self.frames.finish(StreamEnd::Interrupted);
                }
            }
        }
    }
}

impl std::fmt::Debug for MessageStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStream")
            .field("state", &self.frames.state)
            .field("end", &self.frames.end)
            .finish()
    }
}

/// Async event stream over an open response body.
pub struct AsyncMessageStream {
    body: Option<BoxStream<'static, Result<Bytes, reqwest::Error>>>,
    frames: Frames,
}

impl AsyncMessageStream {
    pub fn new<S>(body: S) -> Self
    where
        S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    {
        Self {
            body: Some(body.boxed()),
            frames: Frames::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.frames.state
    }

    pub fn end(&self) -> Option<StreamEnd> {
        self.frames.end
    }

    pub fn close(&mut self) {
        self.body = None;
        self.frames.finish(StreamEnd::ClosedByCaller);
    }

    /// Next event, or `None` once the stream is closed.
    pub async fn next_event(&mut self) -> Option<SseEvent> {
        self.next().await
    }
}

impl Stream for AsyncMessageStream {
    type Item = SseEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<SseEvent>> {
        let this = self.get_mut();
        loop {
            if let Some(event) = this.frames.pop() {
                return Poll::Ready(Some(event));
            }
            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };
            match ready!(body.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => this.frames.feed(&chunk),
                Some(Err(err)) => {
                    warn!(error = %err, "event stream interrupted");
                    this.body = None;
                    this.frames.finish(StreamEnd::Interrupted);
                }
                None => {
                    this.body = None;
                    this.frames.finish(StreamEnd::Finished);
                }
            }
        }
    }
}

impl std::fmt::Debug for AsyncMessageStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncMessageStream")
            .field("state", &self.frames.state)
            .field("end", &self.frames.end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    const BODY: &[u8] = b"data: {\"status\":\"progress\",\"message\":\"Hel\"}\n\n\
data: {\"status\":\"progress\",\"message\":\"lo\"}\n\n\
data: {\"status\":\"finish\",\"id\":3}\n\n";

    /// Yields `data` in `step`-sized reads, then fails if `fail` is set.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        fail: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos == self.data.len() {
                if self.fail {
                    return Err(io::Error::new(ErrorKind::ConnectionReset, "reset"));
                }
                return Ok(0);
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn messages(events: &[SseEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| e.json::<serde_json::Value>().unwrap()["status"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn yields_events_in_order_then_nothing() {
        let mut stream = MessageStream::new(Box::new(Cursor::new(BODY.to_vec())));
        assert_eq!(stream.state(), StreamState::Connected);

        let events: Vec<_> = stream.by_ref().collect();
        assert_eq!(messages(&events), ["progress", "progress", "finish"]);
        assert_eq!(stream.state(), StreamState::Closed);
        assert_eq!(stream.end(), Some(StreamEnd::Finished));

        assert_eq!(stream.by_ref().count(), 0);
    }

    #[test]
    fn frames_split_across_reads() {
        let reader = Trickle { data: BODY.to_vec(), pos: 0, step: 3, fail: false };
        let events: Vec<_> = MessageStream::new(Box::new(reader)).collect();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn read_error_ends_stream_as_interrupted() {
        let reader = Trickle {
            data: b"data: one\n\ndata: tw".to_vec(),
            pos: 0,
            step: 64,
            fail: true,
        };
        let mut stream = MessageStream::new(Box::new(reader));
        let events: Vec<_> = stream.by_ref().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "one");
        assert_eq!(stream.end(), Some(StreamEnd::Interrupted));
    }

    #[test]
    fn close_discards_the_rest() {
        let mut stream = MessageStream::new(Box::new(Cursor::new(BODY.to_vec())));
        assert!(stream.next().is_some());
        assert_eq!(stream.state(), StreamState::Receiving);

        stream.close();
        assert_eq!(stream.next(), None);
        assert_eq!(stream.end(), Some(StreamEnd::ClosedByCaller));
    }

    #[test]
    fn close_after_finish_keeps_finished() {
        let mut stream = MessageStream::new(Box::new(Cursor::new(BODY.to_vec())));
        stream.by_ref().for_each(drop);
        stream.close();
        assert_eq!(stream.end(), Some(StreamEnd::Finished));
    }

    #[test]
    fn async_stream_follows_the_same_lifecycle() {
        let chunks = BODY
            .chunks(7)
            .map(|c| Ok::<_, reqwest::Error>(Bytes::copy_from_slice(c)))
            .collect::<Vec<_>>();
        let mut stream = AsyncMessageStream::new(futures::stream::iter(chunks));

        futures::executor::block_on(async {
            let first = stream.next_event().await.unwrap();
            assert_eq!(first.event, "message");
            assert_eq!(stream.state(), StreamState::Receiving);

            let rest: Vec<_> = stream.by_ref().collect().await;
            assert_eq!(messages(&rest), ["progress", "finish"]);
            assert_eq!(stream.end(), Some(StreamEnd::Finished));
            assert!(stream.next_event().await.is_none());
        });
    }
}
