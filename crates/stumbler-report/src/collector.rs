//! Movement-gated device collector task.
//!
//! One instance runs per device kind. While the movement gate reads
//! `true` the collector holds a subscription to its raw source and
//! upserts every batch into its map slot; when the gate flips to
//! `false` the subscription is dropped. Buffered entries are left in
//! place; the builder's age filter deals with them at drain time.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, trace};

use stumbler_model::Observed;

use crate::device_map::{DeviceSlot, SharedDeviceMaps};
use crate::source::SampleSource;

/// Run one per-kind collector until the gate or the run is torn down.
///
/// `keep` is the kind-specific admission filter, applied to each
/// observation before it can reach the shared map. Filtering here is
/// irreversible: a discarded device never becomes part of any report.
pub(crate) async fn collect_devices<T>(
    kind: &'static str,
    mut moving: watch::Receiver<bool>,
    source: Arc<dyn SampleSource<Vec<T>>>,
    maps: Arc<SharedDeviceMaps>,
    keep: fn(&T) -> bool,
) where
    T: Observed + Send + 'static,
    SharedDeviceMaps: DeviceSlot<T>,
{
    loop {
        // Park until the gate reports movement.
        while !*moving.borrow_and_update() {
            if moving.changed().await.is_err() {
                return;
            }
        }

        let mut batches = source.subscribe();
        debug!(kind, "collector subscribed");

        let mut source_ended = false;
        loop {
            tokio::select! {
                changed = moving.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*moving.borrow_and_update() {
                        break;
                    }
                }
                batch = batches.next() => {
                    match batch {
                        Some(mut devices) => {
                            let seen = devices.len();
                            devices.retain(keep);
                            let discarded = seen - devices.len();
                            if discarded > 0 {
                                debug!(kind, discarded, "discarded non-collectable observations");
                            }
                            if !devices.is_empty() {
                                trace!(kind, count = devices.len(), "buffered observations");
                                maps.upsert_batch(devices);
                            }
                        }
                        None => {
                            source_ended = true;
                            break;
                        }
                    }
                }
            }
        }

        drop(batches);
        debug!(kind, "collector unsubscribed");

        if source_ended {
            // The feed terminated while still moving. Wait for a gate
            // edge before resubscribing so a dead source cannot spin
            // this task.
            if moving.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementGate;
    use crate::source::BroadcastSource;
    use std::time::Duration;
    use stumbler_model::{BluetoothBeacon, MacAddr};

    fn beacon(mac: [u8; 6], ts: u64) -> BluetoothBeacon {
        BluetoothBeacon {
            mac: MacAddr(mac),
            beacon_type: None,
            id1: None,
            id2: None,
            id3: None,
            signal_dbm: Some(-70),
            timestamp_ms: ts,
        }
    }

    async fn wait_for_subscribers<T: Clone + Send + 'static>(
        source: &BroadcastSource<Vec<T>>,
        expected: usize,
    ) {
        for _ in 0..200 {
            if source.subscriber_count() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("source never reached {expected} subscribers");
    }

    #[tokio::test]
    async fn collector_only_buffers_while_moving() {
        let gate = MovementGate::new(false);
        let source = Arc::new(BroadcastSource::<Vec<BluetoothBeacon>>::new(16));
        let maps = Arc::new(SharedDeviceMaps::new());

        let task = tokio::spawn(collect_devices(
            "bluetooth",
            gate.subscribe(),
            source.clone() as Arc<dyn SampleSource<Vec<BluetoothBeacon>>>,
            maps.clone(),
            |_| true,
        ));

        // Not moving: nothing is subscribed, publishes are dropped.
        source.publish(vec![beacon([1; 6], 100)]);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(maps.counts(), (0, 0, 0));

        // Moving: the batch lands in the map.
        gate.set_moving(true);
        wait_for_subscribers(&source, 1).await;
        source.publish(vec![beacon([2; 6], 200)]);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(maps.counts(), (0, 0, 1));

        // Stopped again: the subscription is dropped, new data is lost,
        // the buffered entry stays.
        gate.set_moving(false);
        wait_for_subscribers(&source, 0).await;
        source.publish(vec![beacon([3; 6], 300)]);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(maps.counts(), (0, 0, 1));

        task.abort();
    }

    #[tokio::test]
    async fn admission_filter_runs_before_the_map() {
        let gate = MovementGate::new(true);
        let source = Arc::new(BroadcastSource::<Vec<BluetoothBeacon>>::new(16));
        let maps = Arc::new(SharedDeviceMaps::new());

        let task = tokio::spawn(collect_devices(
            "bluetooth",
            gate.subscribe(),
            source.clone() as Arc<dyn SampleSource<Vec<BluetoothBeacon>>>,
            maps.clone(),
            |b| b.mac != MacAddr([0xee; 6]),
        ));

        wait_for_subscribers(&source, 1).await;
        source.publish(vec![beacon([0xee; 6], 100), beacon([0x01; 6], 100)]);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let drained = maps.drain_all();
        assert_eq!(drained.bluetooths.len(), 1);
        assert_eq!(drained.bluetooths[0].mac, MacAddr([0x01; 6]));

        task.abort();
    }
}
