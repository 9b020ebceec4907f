//! Background requests whose results are polled from the UI loop.

use futures::channel::oneshot;

/// Result of work running on a background thread
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<T>,
}

/// Run `work` on its own thread; the UI keeps drawing while it runs
pub fn spawn<T, F>(work: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    std::thread::spawn(move || {
        if sender.send(work()).is_err() {
            log::debug!("Background request finished after its caller went away");
        }
    });
    Pending { receiver }
}

/// What [`Pending::poll`] saw
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Waiting,
    /// The worker thread dropped its result (it panicked)
    Lost,
}

impl<T> Pending<T> {
    /// Check for a result without blocking
    pub fn poll(&mut self) -> Poll<T> {
        match self.receiver.try_recv() {
            Ok(Some(value)) => Poll::Ready(value),
            Ok(None) => Poll::Waiting,
            Err(oneshot::Canceled) => Poll::Lost,
        }
    }

    /// Block until the result arrives
    pub fn wait(self) -> Option<T> {
        futures::executor::block_on(self.receiver).ok()
    }
}
