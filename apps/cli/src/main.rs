use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, ClientSettings, FormController, FormView, HttpPredictionClient, UiState,
};
use shared::{
    domain::{is_known_material, KNOWN_MATERIALS},
    form::FormInput,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Ask the metastructure service which lattice structure fits a part")]
struct Args {
    /// Overrides the configured prediction server.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the inputs and request a structure recommendation.
    Predict {
        #[arg(long, default_value = "")]
        stiffness: String,
        #[arg(long, default_value = "")]
        density: String,
        #[arg(long, default_value = "")]
        material: String,
    },
    /// Post a known-good sample request and report the outcome.
    Smoke,
    /// List materials the service accepts.
    Materials,
}

struct TerminalView;

impl FormView for TerminalView {
    fn render(&self, state: &UiState) {
        for line in render_lines(state) {
            println!("{line}");
        }
    }
}

fn render_lines(state: &UiState) -> Vec<String> {
    match state {
        UiState::Idle => Vec::new(),
        UiState::Submitting => vec![state.submit_label().text().to_string()],
        UiState::Result(view) => {
            let mut lines = vec![
                format!("Recommended structure: {}", view.structure),
                format!("Confidence: {}", view.confidence_text),
            ];
            if !view.description.is_empty() {
                lines.push(view.description.clone());
            }
            lines
        }
        UiState::Error(message) => vec![format!("Error: {message}")],
    }
}

fn resolve_settings(args: &Args) -> ClientSettings {
    let mut settings = load_settings();
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout);
    }
    settings
}

fn smoke_input() -> FormInput {
    FormInput::new("60", "20", "PLA")
}

async fn run_submission(settings: &ClientSettings, input: FormInput) -> Result<ExitCode> {
    let client = HttpPredictionClient::from_settings(settings)?;
    tracing::info!(endpoint = client.endpoint(), "using prediction endpoint");
    let controller = FormController::new(client, TerminalView);
    controller.submit(input).await;

    Ok(match controller.state() {
        UiState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args);

    match args.command {
        Command::Predict {
            stiffness,
            density,
            material,
        } => {
            if !material.is_empty() && !is_known_material(&material) {
                tracing::warn!(
                    "material {material:?} is not one of {}; the service may reject it",
                    KNOWN_MATERIALS.join(", ")
                );
            }
            run_submission(&settings, FormInput::new(stiffness, density, material)).await
        }
        Command::Smoke => {
            let input = smoke_input();
            println!(
                "POST {} with stiffness={} density={} material={}",
                settings.predict_endpoint()?,
                input.stiffness,
                input.density,
                input.material
            );
            run_submission(&settings, input).await
        }
        Command::Materials => {
            for material in KNOWN_MATERIALS {
                println!("{material}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::ResultView;

    #[test]
    fn result_lines_include_description_when_known() {
        let lines = render_lines(&UiState::Result(ResultView::new("Gyroid", 0.87)));
        assert_eq!(lines[0], "Recommended structure: Gyroid");
        assert_eq!(lines[1], "Confidence: 87%");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn unknown_structure_has_no_description_line() {
        let lines = render_lines(&UiState::Result(ResultView::new("Octet", 0.5)));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn submitting_and_error_lines() {
        assert_eq!(render_lines(&UiState::Submitting), vec!["Predicting..."]);
        assert_eq!(
            render_lines(&UiState::Error("model unavailable".into())),
            vec!["Error: model unavailable"]
        );
        assert!(render_lines(&UiState::Idle).is_empty());
    }

    #[test]
    fn smoke_payload_passes_validation() {
        let request = smoke_input().validate().expect("valid smoke payload");
        assert_eq!(request.stiffness, 60);
        assert_eq!(request.material, "PLA");
    }

    #[test]
    fn cli_parses_predict_flags() {
        let args = Args::try_parse_from([
            "metastructure-cli",
            "--server-url",
            "http://example.test:5000",
            "predict",
            "--stiffness",
            "50",
            "--density",
            "20",
            "--material",
            "PLA",
        ])
        .expect("parse");
        assert_eq!(args.server_url.as_deref(), Some("http://example.test:5000"));
        assert!(matches!(
            args.command,
            Command::Predict { ref stiffness, .. } if stiffness == "50"
        ));
    }
}
