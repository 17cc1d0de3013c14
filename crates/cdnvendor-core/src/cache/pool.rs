//! Bounded worker pool for batch downloads.
//!
//! A fixed number of scoped threads pull asset indices from a shared queue
//! and send `(index, outcome)` back over a channel. Results are slotted by
//! index, so the returned list follows input order no matter which transfer
//! finishes first. A failing or panicking asset only affects its own slot.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use super::DownloadOutcome;
use crate::control::CancelToken;
use crate::error::AssetError;
use crate::registry::AssetDescriptor;

/// Run `task` for every asset with at most `workers` in flight.
/// `on_outcome` sees each outcome as it arrives (completion order).
/// A task that panics reports `AssetError::WorkerPanicked` for its asset and the
/// worker moves on. Assets never started because of cancellation report
/// `AssetError::Cancelled`.
pub(super) fn run_pool<F, C>(
    assets: &[AssetDescriptor],
    workers: usize,
    cancel: &CancelToken,
    task: F,
    mut on_outcome: C,
) -> Vec<DownloadOutcome>
where
    F: Fn(&AssetDescriptor, &CancelToken) -> DownloadOutcome + Sync,
    C: FnMut(&DownloadOutcome),
{
    let count = assets.len();
    if count == 0 {
        return Vec::new();
    }

    let work: Mutex<VecDeque<usize>> = Mutex::new((0..count).collect());
    let mut slots: Vec<Option<DownloadOutcome>> = (0..count).map(|_| None).collect();
    let num_workers = workers.clamp(1, count);
    let (tx, rx) = mpsc::channel::<(usize, DownloadOutcome)>();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            let task = &task;
            handles.push(scope.spawn(move || loop {
                if cancel.is_cancelled() {
                    break;
                }
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some(index) = next else {
                    break;
                };
                let asset = &assets[index];
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(asset, cancel)))
                    .unwrap_or_else(|_| {
                        tracing::error!(asset = %asset.name, "download task panicked");
                        DownloadOutcome::failed(
                            asset.clone(),
                            AssetError::WorkerPanicked,
                            Duration::ZERO,
                        )
                    });
                if tx.send((index, outcome)).is_err() {
                    break;
                }
            }));
        }
        drop(tx);

        for (index, outcome) in rx {
            on_outcome(&outcome);
            slots[index] = Some(outcome);
        }
        for h in handles {
            if h.join().is_err() {
                tracing::error!("download worker panicked");
            }
        }
    });

    slots
        .into_iter()
        .zip(assets)
        .map(|(slot, asset)| {
            // Empty slots are assets no worker started.
            slot.unwrap_or_else(|| {
                let err = if cancel.is_cancelled() {
                    AssetError::Cancelled
                } else {
                    AssetError::WorkerPanicked
                };
                let outcome = DownloadOutcome::failed(asset.clone(), err, Duration::ZERO);
                on_outcome(&outcome);
                outcome
            })
        })
        .collect()
}
