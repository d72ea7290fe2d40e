// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::integrations::manager::InstanceSummary;
use crate::integrations::IntegrationsManager;

pub type SharedState = Arc<IntegrationsManager>;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Collectors shell out to smartctl, so gathering runs on the blocking pool.
async fn gather(state: SharedState, name: Option<String>) -> Response {
    let result = tokio::task::spawn_blocking(move || state.gather(name.as_deref())).await;
    match result {
        Ok(body) => ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!("metrics collection task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn metrics_handler(State(state): State<SharedState>) -> Response {
    gather(state, None).await
}

pub async fn integration_metrics_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Response {
    if state.get(&name).is_empty() {
        return (
            StatusCode::NOT_FOUND,
            format!("integration {name:?} has no running instance\n"),
        )
            .into_response();
    }
    gather(state, Some(name)).await
}

pub async fn integrations_handler(State(state): State<SharedState>) -> Json<Vec<InstanceSummary>> {
    Json(state.summaries())
}
