use std::{io::Write, time::Duration};

use log::*;
use replay_proto::{Phase, ReplayWindow, Snapshot, Transcript, LOOKBACK};

use crate::endpoint::Endpoint;

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub succeeded: usize,
    pub failed: usize,
}

/// Replays a window of a transcript against an endpoint: one `start`, one
/// `move` per turn of the window, one `end`.
///
/// Failed calls never stop the replay. Failed moves are reported on `out`
/// next to the successful ones; `start` and `end` failures only get logged.
/// Nothing is retried.
pub struct Driver<E, W> {
    endpoint: E,
    out: W,
    delay: Duration,
}

impl<E: Endpoint, W: Write> Driver<E, W> {
    /// `delay` is slept after every move call; zero disables it.
    pub fn new(endpoint: E, out: W, delay: Duration) -> Self {
        Self {
            endpoint,
            out,
            delay,
        }
    }

    pub async fn run(&mut self, transcript: &Transcript, window: ReplayWindow) -> ReplayStats {
        info!(
            "Replaying turns {}..={} against {} records",
            window.target().saturating_sub(LOOKBACK),
            window.target(),
            transcript.len()
        );

        let body = record(transcript, Phase::Start, window.start_offset());
        match self.endpoint.start(body).await {
            Ok(response) => debug!("start response: {response}"),
            Err(err) => error!("start request failed: {err:#}"),
        }

        let mut stats = ReplayStats::default();
        for step in window.moves() {
            let body = record(transcript, Phase::Move, step.offset);
            if log_enabled!(Level::Debug) {
                if let Some(snapshot) = Snapshot::peek(body) {
                    if i64::from(snapshot.turn) != step.turn {
                        debug!(
                            "turn {} is replayed from in-game turn {} of game {}",
                            step.turn, snapshot.turn, snapshot.game.id
                        );
                    }
                }
            }

            let line = match self.endpoint.get_move(body).await {
                Ok(response) => {
                    stats.succeeded += 1;
                    format!("turn: {} move: {}", step.turn, response.direction)
                }
                Err(err) => {
                    stats.failed += 1;
                    format!("turn: {} move request failed: {err:#}", step.turn)
                }
            };
            self.report(&line);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let body = record(transcript, Phase::End, window.end_offset());
        if let Err(err) = self.endpoint.end(body).await {
            warn!("end request failed: {err:#}");
        }

        info!(
            "Replay finished: {} moves answered, {} failed",
            stats.succeeded, stats.failed
        );
        stats
    }

    /// A broken `out` must not cut the replay short.
    fn report(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("failed to report {line:?}: {err}");
        }
    }
}

/// Missing records are sent as an empty body.
fn record(transcript: &Transcript, phase: Phase, offset: i64) -> &str {
    transcript.get(offset).unwrap_or_else(|| {
        warn!("no {phase} record at offset {offset}, sending an empty body");
        ""
    })
}

////////////////////////////////////////////////////////////////////////////////
