use crate::chain::EventCallback;
use crate::decode::decode_event;
use crate::display;
use crate::error::Result;
use crate::events::EventKind;
use crate::router::EventRouter;
use std::sync::Arc;

/// Follow one concern live until Ctrl-C, printing decoded events
///
/// Raw events are handed off from the subscription callback to this task
/// through a channel, so decoding and printing never block the poller.
pub async fn execute(router: &EventRouter, kind: EventKind) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let callback: EventCallback = Arc::new(move |raw| {
        // Receiver only disappears at shutdown, when pending events no
        // longer matter
        let _ = tx.send(raw);
    });

    let id = router.subscribe_to(kind, callback).await?;
    tracing::info!("Following {kind} events (subscription {id}), Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(raw) = rx.recv() => match decode_event(kind, &raw) {
                Ok(event) => display::display_live_event(&event),
                Err(e) => tracing::warn!("Skipping undecodable event in block {}: {e}", raw.block_number),
            },
        }
    }

    tracing::info!("Stopping");
    router.shutdown().await;
    Ok(())
}
