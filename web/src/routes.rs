use crate::templates;
use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::{get, post},
    Form, Router,
};
use battery_sim_core::{ignition::IgnitionSystem, types::PredictionInput};
use std::{collections::HashMap, str::FromStr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    system: Arc<Mutex<IgnitionSystem>>,
}

impl AppState {
    pub(crate) fn new(system: IgnitionSystem) -> Self {
        Self {
            system: Arc::new(Mutex::new(system)),
        }
    }
}

pub(crate) fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/process_input", post(process_input))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(templates::index())
}

type FormFields = HashMap<String, String>;

async fn process_input(
    State(state): State<AppState>,
    form: Result<Form<FormFields>, FormRejection>,
) -> Html<String> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Rejected prediction form: {rejection}");
            return Html(templates::error(&rejection.body_text()));
        }
    };

    // Training is CPU bound, keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        let mut system = state.system.blocking_lock();
        predict(&mut system, &form)
    })
    .await
    .context("prediction task failed")
    .and_then(|outcome| outcome);

    match outcome {
        Ok((health, status)) => Html(templates::result(health, &status)),
        Err(e) => {
            warn!("Prediction request failed: {e:#}");
            Html(templates::error(&e.to_string()))
        }
    }
}

fn field<T>(form: &FormFields, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = form
        .get(name)
        .with_context(|| format!("Missing form field '{name}'"))?;

    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for '{name}': '{raw}'"))
}

/// Retrains on the recorded history, then predicts for the submitted usage.
fn predict(system: &mut IgnitionSystem, form: &FormFields) -> anyhow::Result<(i64, String)> {
    let input = PredictionInput {
        cycles: field(form, "cycles")?,
        temperature: field(form, "temperature")?,
        soc: field(form, "soc")?,
        kms: field(form, "kms")?,
        months_old: field(form, "months_old")?,
    };
    debug!("Prediction input: {input:?}");

    let battery = system.battery_mut();
    battery.train_life_prediction_model()?;
    let health = battery.predict_battery_health(&input)?;

    Ok((health, system.battery_status_message()))
}
