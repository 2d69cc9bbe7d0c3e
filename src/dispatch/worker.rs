use super::sink::{RemotePayload, RemoteSink};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
pub enum DispatchRequest {
    Submit {
        session_id: u64,
        payload: RemotePayload,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResponse {
    Delivered { session_id: u64 },
    Failed { session_id: u64, error: String },
}

impl DispatchResponse {
    pub fn session_id(&self) -> u64 {
        match self {
            DispatchResponse::Delivered { session_id } => *session_id,
            DispatchResponse::Failed { session_id, .. } => *session_id,
        }
    }
}

/// Runs remote submissions off the UI thread. Exits when the request
/// channel disconnects.
pub fn spawn_dispatch_worker(
    sink: Arc<dyn RemoteSink>,
    response_tx: Sender<DispatchResponse>,
    request_rx: Receiver<DispatchRequest>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("timed-quiz::dispatch_worker".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            let runtime = match runtime {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!(error = %e, "dispatch worker could not start a runtime");
                    for DispatchRequest::Submit { session_id, .. } in request_rx.iter() {
                        let _ = response_tx.send(DispatchResponse::Failed {
                            session_id,
                            error: format!("runtime unavailable: {}", e),
                        });
                    }
                    return;
                }
            };

            for request in request_rx.iter() {
                let DispatchRequest::Submit {
                    session_id,
                    payload,
                } = request;
                tracing::debug!(session = session_id, "worker received submission");

                let response = match runtime.block_on(sink.submit(&payload)) {
                    Ok(()) => DispatchResponse::Delivered { session_id },
                    Err(e) => {
                        tracing::warn!(session = session_id, error = %e, "remote submission failed");
                        DispatchResponse::Failed {
                            session_id,
                            error: e.to_string(),
                        }
                    }
                };

                if response_tx.send(response).is_err() {
                    break;
                }
            }
            tracing::debug!("dispatch worker channel disconnected, exiting");
        })
}
