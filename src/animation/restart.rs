use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Zero-argument restart trigger handed to the UI layer.
///
/// Cloneable and `Send`; activations are queued until the controller drains them.
#[derive(Clone, Debug)]
pub struct RestartSignal {
    tx: Sender<()>,
}

impl RestartSignal {
    /// Request a restart. Returns `false` once the controller is gone.
    pub fn fire(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Receiving end owned by the controller.
#[derive(Debug)]
pub(crate) struct RestartListener {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl RestartListener {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub(crate) fn subscribe(&self) -> RestartSignal {
        RestartSignal {
            tx: self.tx.clone(),
        }
    }

    /// Drain all queued activations; returns how many arrived.
    pub(crate) fn drain(&self) -> usize {
        let mut n = 0;
        loop {
            match self.rx.try_recv() {
                Ok(()) => n += 1,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return n,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/restart.rs"]
mod tests;
