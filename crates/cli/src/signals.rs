use crate::error::Error;
use flume::Sender;
use orchestrator::ControlEvent;
use tokio::signal::unix::{SignalKind, signal};

/// Indefinitely listens to signals and sends signal events to the provided channel.
pub async fn wait_for_signal(signal_event: &Sender<SignalEvent>) -> Result<(), Error> {
    let mut sigusr1 = signal(SignalKind::user_defined1()).map_err(Error::SignalHandler)?;
    let mut sigusr2 = signal(SignalKind::user_defined2()).map_err(Error::SignalHandler)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::SignalHandler)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::SignalHandler)?;

    loop {
        tokio::select! {
            _ = sigusr1.recv() => {
                signal_event.send_async(SignalEvent::SigUSR1).await?;
            }
            _ = sigusr2.recv() => {
                signal_event.send_async(SignalEvent::SigUSR2).await?;
            }
            _ = sigint.recv() => {
                signal_event.send_async(SignalEvent::SigINT).await?;
            }
            _ = sigterm.recv() => {
                signal_event.send_async(SignalEvent::SigTERM).await?;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    SigUSR1,
    SigUSR2,
    SigINT,
    SigTERM,
}

impl SignalEvent {
    /// Engine command for this signal. `None` asks for shutdown.
    pub fn control(self) -> Option<ControlEvent> {
        match self {
            SignalEvent::SigUSR1 => Some(ControlEvent::Refresh),
            SignalEvent::SigUSR2 => Some(ControlEvent::Dump),
            SignalEvent::SigINT | SignalEvent::SigTERM => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_signals_map_to_engine_commands() {
        assert_eq!(SignalEvent::SigUSR1.control(), Some(ControlEvent::Refresh));
        assert_eq!(SignalEvent::SigUSR2.control(), Some(ControlEvent::Dump));
        assert_eq!(SignalEvent::SigTERM.control(), None);
    }
}
