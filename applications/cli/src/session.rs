//! Simulated playback session
//!
//! Stands in for a platform player: `load` checks the locator exists, then a
//! tokio task advances a virtual clock and sends tick and finished reports.
//! Nothing is decoded.

use async_trait::async_trait;
use cadence_playback::{
    PlaybackError, PlaybackSession, ReportSender, Result, SessionHandle, TransportReport,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Shared transport of one simulated player
#[derive(Debug, Default)]
struct Transport {
    paused: AtomicBool,
    position_ms: AtomicU64,
    volume_bits: AtomicU32,
}

impl Transport {
    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }
}

struct Player {
    transport: Arc<Transport>,
    task: JoinHandle<()>,
}

/// Timing of simulated tracks
#[derive(Debug, Clone, Copy)]
pub struct SimulationTiming {
    pub track_length: Duration,
    pub tick_interval: Duration,
}

/// Player that plays silence on a virtual clock
pub struct SimulatedSession {
    reports: ReportSender,
    timing: SimulationTiming,
    next_handle: AtomicU64,
    players: Mutex<HashMap<SessionHandle, Player>>,
}

impl SimulatedSession {
    pub fn new(reports: ReportSender, timing: SimulationTiming) -> Self {
        Self {
            reports,
            timing,
            next_handle: AtomicU64::new(1),
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Number of sessions currently loaded
    pub async fn loaded(&self) -> usize {
        self.players.lock().await.len()
    }

    /// Volume last applied to `handle`
    pub async fn volume(&self, handle: SessionHandle) -> Option<f32> {
        self.players
            .lock()
            .await
            .get(&handle)
            .map(|p| p.transport.volume())
    }

    async fn transport(&self, handle: SessionHandle) -> Result<Arc<Transport>> {
        self.players
            .lock()
            .await
            .get(&handle)
            .map(|p| Arc::clone(&p.transport))
            .ok_or_else(|| PlaybackError::Session(format!("{} is not loaded", handle)))
    }
}

#[async_trait]
impl PlaybackSession for SimulatedSession {
    async fn load(&self, locator: &str, initial_volume: f32) -> Result<SessionHandle> {
        if let Err(e) = tokio::fs::metadata(locator).await {
            return Err(PlaybackError::unavailable(locator, e.to_string()));
        }

        let handle = SessionHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let transport = Arc::new(Transport::default());
        transport
            .volume_bits
            .store(initial_volume.to_bits(), Ordering::Relaxed);

        let task = tokio::spawn(run_clock(
            handle,
            Arc::clone(&transport),
            self.timing,
            self.reports.clone(),
        ));

        debug!(session = %handle, locator, "Loaded simulated session");
        self.players
            .lock()
            .await
            .insert(handle, Player { transport, task });
        Ok(handle)
    }

    async fn pause(&self, handle: SessionHandle) -> Result<()> {
        self.transport(handle)
            .await?
            .paused
            .store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn resume(&self, handle: SessionHandle) -> Result<()> {
        self.transport(handle)
            .await?
            .paused
            .store(false, Ordering::Relaxed);
        Ok(())
    }

    async fn seek(&self, handle: SessionHandle, position_ms: u64) -> Result<()> {
        self.transport(handle)
            .await?
            .position_ms
            .store(position_ms, Ordering::Relaxed);
        Ok(())
    }

    async fn set_volume(&self, handle: SessionHandle, volume: f32) -> Result<()> {
        self.transport(handle)
            .await?
            .volume_bits
            .store(volume.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    async fn unload(&self, handle: SessionHandle) -> Result<()> {
        match self.players.lock().await.remove(&handle) {
            Some(player) => {
                player.task.abort();
                debug!(session = %handle, "Unloaded simulated session");
                Ok(())
            }
            None => Err(PlaybackError::Session(format!("{} is not loaded", handle))),
        }
    }
}

/// Advance the virtual clock until the track ends or the task is aborted
async fn run_clock(
    handle: SessionHandle,
    transport: Arc<Transport>,
    timing: SimulationTiming,
    reports: ReportSender,
) {
    let length_ms = timing.track_length.as_millis() as u64;
    let step_ms = timing.tick_interval.as_millis() as u64;
    let mut interval = tokio::time::interval(timing.tick_interval);
    // First tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let paused = transport.paused.load(Ordering::Relaxed);
        let position = if paused {
            transport.position_ms.load(Ordering::Relaxed)
        } else {
            transport.position_ms.fetch_add(step_ms, Ordering::Relaxed) + step_ms
        };

        if position >= length_ms {
            trace!(session = %handle, "Simulated track finished");
            let _ = reports.send(TransportReport::finished(handle));
            return;
        }

        let tick = TransportReport::tick(handle, position, length_ms, !paused);
        if reports.send(tick).is_err() {
            // Host went away
            return;
        }
    }
}
