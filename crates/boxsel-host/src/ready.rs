// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use async_io::Timer;
use futures_util::future::{select, Either};
use futures_util::task::AtomicWaker;

use crate::error::{HostError, Result};

pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

struct Shared<T> {
    value: Mutex<Option<T>>,
    waker: AtomicWaker,
}

/// Ready side, held by whatever finishes initializing the dependency.
pub struct ReadySignal<T> {
    shared: Arc<Shared<T>>,
}

/// Waiting side. Resolves once with the value passed to [`ReadySignal::fire`].
pub struct ReadyWaiter<T> {
    shared: Arc<Shared<T>>,
}

pub fn channel<T>() -> (ReadySignal<T>, ReadyWaiter<T>) {
    let shared = Arc::new(Shared {
        value: Mutex::new(None),
        waker: AtomicWaker::new(),
    });
    (
        ReadySignal {
            shared: shared.clone(),
        },
        ReadyWaiter { shared },
    )
}

impl<T> ReadySignal<T> {
    /// Consumes the signal, so it fires at most once.
    pub fn fire(self, value: T) {
        *self
            .shared
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(value);
        self.shared.waker.wake();
    }
}

impl<T> ReadyWaiter<T> {
    fn take(&self) -> Option<T> {
        self.shared
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Waits for the signal, failing with [`HostError::NotReady`] once
    /// `timeout` has elapsed.
    pub async fn wait(self, timeout: Duration) -> Result<T> {
        let started = Instant::now();

        match select(self, Timer::after(timeout)).await {
            Either::Left((value, _)) => Ok(value),
            Either::Right((_, _)) => Err(HostError::NotReady {
                waited: started.elapsed(),
            }),
        }
    }

    pub fn wait_blocking(self, timeout: Duration) -> Result<T> {
        async_io::block_on(self.wait(timeout))
    }
}

impl<T> Future for ReadyWaiter<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        // Register before checking so a concurrent fire() is never missed.
        self.shared.waker.register(cx.waker());
        match self.take() {
            Some(v) => Poll::Ready(v),
            None => Poll::Pending,
        }
    }
}
