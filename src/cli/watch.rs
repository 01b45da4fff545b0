use super::{rates, ui};
use crate::core::Language;
use crate::store::RateStore;
use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use tracing::debug;

/// Writes the rate table now and again every time a refresh publishes new
/// rates. Returns once `stop` resolves; updates already published are drawn first.
pub async fn watch_rates<W, F>(
    store: &RateStore,
    language: Language,
    out: &mut W,
    stop: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = std::io::Result<()>>,
{
    let mut updates = store.subscribe();
    let labels = ui::labels(language);

    let snapshot = updates.borrow_and_update().clone();
    writeln!(out, "{}", rates::display_rates(&snapshot, language))?;
    writeln!(
        out,
        "\n{}",
        ui::style_text(labels.watching, ui::StyleType::Subtle)
    )?;

    tokio::pin!(stop);

    loop {
        tokio::select! {
            biased;
            changed = updates.changed() => {
                changed.context("Rate store closed")?;
                let snapshot = updates.borrow_and_update().clone();
                writeln!(out, "\n{}", rates::display_rates(&snapshot, language))?;
            }
            result = &mut stop => {
                result.context("Failed to listen for Ctrl-C")?;
                debug!("Interrupted, leaving watch");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurrencyCode;
    use crate::store::tests::{MockRateSource, quote};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_watch_redraws_on_each_published_snapshot() {
        let store = RateStore::new(Arc::new(MockRateSource::new(vec![])));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut out = Vec::new();

        let watcher = watch_rates(&store, Language::English, &mut out, async {
            let _ = stop_rx.await;
            Ok(())
        });
        let publisher = async {
            // Let the watcher subscribe and draw the first table.
            tokio::task::yield_now().await;
            store.publish(&quote(&[(CurrencyCode::Brl, 5.4321)]));
            let _ = stop_tx.send(());
        };

        let (result, ()) = tokio::join!(watcher, publisher);
        result.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Exchange rates").count(), 2);
        assert!(output.contains("Watching for rate updates"));
        let (first, second) = output.split_once("Watching for rate updates").unwrap();
        assert!(!first.contains("5.4321"));
        assert!(second.contains("5.4321"));
    }

    #[tokio::test]
    async fn test_watch_stops_without_updates() {
        let store = RateStore::new(Arc::new(MockRateSource::new(vec![])));
        let mut out = Vec::new();

        watch_rates(&store, Language::Portuguese, &mut out, async { Ok(()) })
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Cotações").count(), 1);
    }
}
