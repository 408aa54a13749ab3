//! Asynchronous leaf-count readback.
//!
//! Sampling texel 1 is the one point where the texture backend hands data
//! back to the driving side, and on real hardware it stalls the pipeline.
//! [`ReadbackQueue`] models it as an explicit request/complete channel so the
//! caller never blocks: issue a request, poll for completion on a later
//! frame, and keep drawing with the previous count until it lands.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use super::TextureCbt;

/// Identifies one in-flight readback request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RequestId(u64);

/// Queue of single-texel readback requests.
///
/// Completion is delivered through a channel rather than returned in place:
/// requests resolve no earlier than the next [`drain`](Self::drain) call,
/// which stands in for the pipeline flush a real readback waits on.
pub struct ReadbackQueue {
  tx: Sender<(RequestId, u32)>,
  rx: Receiver<(RequestId, u32)>,
  next_id: u64,
  in_flight: usize,
}

impl ReadbackQueue {
  pub fn new() -> Self {
    let (tx, rx) = unbounded();
    Self {
      tx,
      rx,
      next_id: 0,
      in_flight: 0,
    }
  }

  /// Enqueue a read of the root count texel.
  pub fn request(&mut self, cbt: &TextureCbt) -> RequestId {
    let id = RequestId(self.next_id);
    self.next_id += 1;
    self.in_flight += 1;
    // The count is captured at request time, as the copy on a real queue
    // would be; later tree updates do not affect an in-flight request.
    let _ = self.tx.send((id, cbt.leaf_count()));
    id
  }

  /// Collect every completed request.
  pub fn drain(&mut self) -> Vec<(RequestId, u32)> {
    let mut out = Vec::new();
    loop {
      match self.rx.try_recv() {
        Ok(done) => {
          self.in_flight -= 1;
          out.push(done);
        }
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
      }
    }
    out
  }

  /// True when no request is awaiting completion.
  pub fn is_idle(&self) -> bool {
    self.in_flight == 0
  }
}

impl Default for ReadbackQueue {
  fn default() -> Self {
    Self::new()
  }
}

/// Frame-oriented wrapper: one outstanding request, stale-count fallback.
///
/// `latest()` always answers immediately. While a request is pending the
/// previous frame's count is reused; the caller sizes draw submissions from
/// that and catches up one frame later.
pub struct LeafCountReadback {
  queue: ReadbackQueue,
  pending: Option<RequestId>,
  latest: u32,
}

impl LeafCountReadback {
  /// Start with a known initial count (1 for a fresh tree).
  pub fn new(initial: u32) -> Self {
    Self {
      queue: ReadbackQueue::new(),
      pending: None,
      latest: initial,
    }
  }

  /// Issue a request unless one is already outstanding.
  pub fn begin_frame(&mut self, cbt: &TextureCbt) {
    if self.pending.is_none() {
      self.pending = Some(self.queue.request(cbt));
    }
  }

  /// Resolve completed requests. Results from a canceled request are
  /// discarded; only the outstanding id updates the count.
  pub fn resolve(&mut self) {
    for (id, count) in self.queue.drain() {
      if self.pending == Some(id) {
        self.pending = None;
        self.latest = count;
      }
    }
  }

  /// Abandon the outstanding request; its eventual result is ignored.
  pub fn cancel(&mut self) {
    self.pending = None;
  }

  /// Most recent resolved count. Stale while a request is pending.
  #[inline]
  pub fn latest(&self) -> u32 {
    self.latest
  }

  /// True while a request is outstanding.
  #[inline]
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}

#[cfg(test)]
#[path = "readback_test.rs"]
mod readback_test;
