//! Terminal dashboard for the `watch` command.
//!
//! The render loop redraws on any fleet, selector or channel-status change
//! and prints alerts inline. It ends when `stop` resolves or the fleet
//! writer goes away, and always tears the session down before returning.
//! Selector input is read by `read_selectors` on a plain thread, so a
//! blocked terminal read never holds up shutdown.

use std::future::Future;
use std::io::{self, BufRead, Write};

use tokio::sync::watch;

use crate::alert::AlertReceiver;
use crate::client::FleetSession;
use crate::view::{FilterSelector, FleetView, terminal};

/// Render until `stop` resolves, then shut the session down.
///
/// # Errors
///
/// Returns the first write error on `out`. The session is shut down either way.
pub async fn run<W: Write>(
    session: FleetSession,
    mut selectors: watch::Receiver<FilterSelector>,
    mut alerts: AlertReceiver,
    stop: impl Future<Output = ()>,
    out: &mut W,
) -> io::Result<()> {
    let result = render_until(&session, &mut selectors, &mut alerts, stop, out).await;
    session.shutdown().await;
    result
}

async fn render_until<W: Write>(
    session: &FleetSession,
    selectors: &mut watch::Receiver<FilterSelector>,
    alerts: &mut AlertReceiver,
    stop: impl Future<Output = ()>,
    out: &mut W,
) -> io::Result<()> {
    let mut fleet = session.fleet();
    let mut status = session.channel_status();
    tokio::pin!(stop);

    let mut alerts_open = true;
    let mut selectors_open = true;
    let mut status_open = true;

    loop {
        let view = FleetView::build(&fleet.latest(), *selectors.borrow_and_update());
        writeln!(out, "{}", terminal::render(&view, *status.borrow_and_update()))?;
        out.flush()?;

        tokio::select! {
            biased;
            () = &mut stop => return Ok(()),
            alive = fleet.changed() => {
                if !alive {
                    return Ok(());
                }
            }
            changed = selectors.changed(), if selectors_open => {
                selectors_open = changed.is_ok();
            }
            changed = status.changed(), if status_open => {
                status_open = changed.is_ok();
            }
            alert = alerts.recv(), if alerts_open => match alert {
                Some(alert) => writeln!(out, "\n*** ALERT: {} ***\n", alert.message)?,
                None => alerts_open = false,
            },
        }
    }
}

/// Switch the active selector from `input` lines until input ends or nobody
/// is listening. Unknown names are reported on `errors` and skipped.
pub fn read_selectors<R: BufRead, E: Write>(input: R, selectors: &watch::Sender<FilterSelector>, errors: &mut E) {
    for line in input.lines() {
        let Ok(line) = line else {
            return;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<FilterSelector>() {
            Ok(selector) => {
                if selectors.send(selector).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = writeln!(errors, "{e}");
            }
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
