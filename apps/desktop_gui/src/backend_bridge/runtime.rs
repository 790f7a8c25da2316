//! Prediction worker: owns the tokio runtime and the form controller.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, FormController, HttpPredictionClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ChannelView, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "failed to build prediction runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match HttpPredictionClient::from_settings(&settings) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!("{err:#}")));
                tracing::error!("failed to configure prediction client: {err:#}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Connected to {}",
            client.endpoint()
        )));

        let controller = Arc::new(FormController::new(client, ChannelView::new(ui_tx)));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Submit(input) => {
                    // Not awaited here: an overlapping submit reaches the
                    // controller and is rejected there.
                    let controller = Arc::clone(&controller);
                    runtime.spawn(async move {
                        controller.submit(input).await;
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; prediction worker exiting");
    });
}
