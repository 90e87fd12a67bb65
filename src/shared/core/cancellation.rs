use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Runs `work` until it finishes or `cancel` fires, whichever comes first.
/// A cancelled future is dropped at its current suspension point.
pub async fn cancellable<F>(cancel: &CancellationToken, work: F) -> Result<F::Output, Cancelled>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        output = work => Ok(output),
    }
}

#[cfg(test)]
mod cancellation_tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_output_when_not_cancelled() {
        let cancel = CancellationToken::new();
        assert_eq!(cancellable(&cancel, async { 7 }).await, Ok(7));
    }

    #[rstest]
    #[tokio::test]
    async fn an_already_cancelled_token_wins_over_ready_work() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(cancellable(&cancel, async { 7 }).await, Err(Cancelled));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_abandon_work_in_flight() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        let result = cancellable(&cancel, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            7
        })
        .await;
        assert_eq!(result, Err(Cancelled));
    }
}
