use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::{Error, Result};

/// A message together with the rank that sent it.
#[derive(Debug)]
pub struct Envelope<M> {
    pub source: usize,
    pub body: M,
}

/// Which sender a receive is willing to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Rank(usize),
    Any,
}

impl Source {
    fn matches(self, source: usize) -> bool {
        match self {
            Source::Rank(r) => r == source,
            Source::Any => true,
        }
    }
}

/// One rank's endpoint into a fixed group of `size` ranks.
///
/// Ranks share no memory; the only way to move data between them is
/// [`RankComm::send`] and [`RankComm::recv`]. Messages from one rank to another
/// arrive in the order they were sent. Nothing is promised about the order of
/// messages coming from different ranks.
///
/// The group is a star around rank 0: rank 0 can reach every rank and every
/// other rank can only reach rank 0.
pub struct RankComm<M> {
    rank: usize,
    size: usize,

    //outboxes[dest] feeds dest's inbox. No entry for our own rank and none
    //between two non-zero ranks, so once every rank that can reach us has
    //dropped its endpoint our inbox reports a hangup instead of blocking.
    outboxes: Vec<Option<Sender<Envelope<M>>>>,
    inbox: Receiver<Envelope<M>>,

    //Arrived but not yet matched by a receive
    pending: VecDeque<Envelope<M>>,
}

impl<M: Send> RankComm<M> {
    /// Wires up a star around rank 0 and returns the endpoints in rank order.
    pub fn world(size: usize) -> Vec<RankComm<M>> {
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..size).map(|_| channel()).unzip();

        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| {
                let outboxes = senders
                    .iter()
                    .enumerate()
                    .map(|(dest, tx)| {
                        if dest == rank || (rank != 0 && dest != 0) {
                            None
                        } else {
                            Some(tx.clone())
                        }
                    })
                    .collect();
                RankComm {
                    rank,
                    size,
                    outboxes,
                    inbox,
                    pending: VecDeque::new(),
                }
            })
            .collect()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn send(&self, dest: usize, body: M) -> Result<()> {
        let outbox = self
            .outboxes
            .get(dest)
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                Error::Protocol(format!(
                    "rank {} cannot send to rank {} in a group of {}",
                    self.rank, dest, self.size
                ))
            })?;

        outbox
            .send(Envelope {
                source: self.rank,
                body,
            })
            .map_err(|_| Error::Disconnected { rank: dest })
    }

    /// Blocks until a message from `source` is available.
    pub fn recv(&mut self, source: Source) -> Result<Envelope<M>> {
        if let Some(pos) = self.pending.iter().position(|env| source.matches(env.source)) {
            if let Some(env) = self.pending.remove(pos) {
                return Ok(env);
            }
        }

        loop {
            let env = self.inbox.recv().map_err(|_| match source {
                Source::Rank(rank) => Error::Disconnected { rank },
                Source::Any => Error::Hangup { rank: self.rank },
            })?;
            if source.matches(env.source) {
                return Ok(env);
            }
            self.pending.push_back(env);
        }
    }
}
