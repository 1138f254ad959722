//! CLT Solver HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use clt_solver::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    /// Custom materials, added on top of the presets
    #[serde(default)]
    materials: Vec<MaterialData>,
    plies: Vec<PlyDefinition>,
    /// Mirror the ply list about the mid-plane
    #[serde(default)]
    symmetric: bool,
    #[serde(default)]
    loads: LoadState,
    #[serde(default)]
    failure: Option<FailureData>,
}

#[derive(Debug, Deserialize)]
struct MaterialData {
    name: String,
    e11_gpa: f64,
    e22_gpa: f64,
    nu12: f64,
    g12_gpa: f64,
    #[serde(default)]
    density: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FailureData {
    criterion: String,
    allowables: Vec<AllowablesData>,
}

/// Stress limits in MPa
#[derive(Debug, Deserialize)]
struct AllowablesData {
    xt: f64,
    xc: f64,
    yt: f64,
    yc: f64,
    s: f64,
    #[serde(default)]
    strain: Option<StrainAllowables>,
}

impl AllowablesData {
    fn to_allowables(&self) -> StrengthAllowables {
        let a = StrengthAllowables::from_mpa(self.xt, self.xc, self.yt, self.yc, self.s);
        match self.strain {
            Some(strain) => a.with_strain_limits(strain),
            None => a,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<LaminateReport>,
}

#[derive(Debug, Serialize)]
struct MaterialSummary {
    name: String,
    e11_gpa: f64,
    e22_gpa: f64,
    nu12: f64,
    g12_gpa: f64,
    density: f64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn materials() -> impl IntoResponse {
    let list: Vec<MaterialSummary> = MaterialLibrary::with_presets()
        .iter()
        .map(|(name, m)| MaterialSummary {
            name: name.to_string(),
            e11_gpa: m.e11 / 1e9,
            e22_gpa: m.e22 / 1e9,
            nu12: m.nu12,
            g12_gpa: m.g12 / 1e9,
            density: m.density,
        })
        .collect();
    Json(list)
}

async fn analyze(Json(request): Json<AnalysisRequest>) -> impl IntoResponse {
    match run_analysis(request) {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            log::warn!("Analysis rejected: {}", e);
            (
                status_for(&e),
                Json(AnalysisResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn status_for(err: &CltError) -> StatusCode {
    match err.kind() {
        ErrorKind::Numerical => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Validation | ErrorKind::Configuration | ErrorKind::Serialization => StatusCode::BAD_REQUEST,
    }
}

fn run_analysis(request: AnalysisRequest) -> CltResult<LaminateReport> {
    let mut options = AnalysisOptions::default();
    let mut model = LayupModel::with_presets();

    for mat in &request.materials {
        let material = Material::from_engineering_units(mat.e11_gpa, mat.e22_gpa, mat.nu12, mat.g12_gpa)?
            .with_density(mat.density.unwrap_or(options.default_density))?;
        model.add_material(&mat.name, material)?;
    }

    for ply in request.plies {
        model.add_ply(ply)?;
    }
    if request.symmetric {
        model.mirror();
    }

    let allowables: Vec<StrengthAllowables> = match &request.failure {
        Some(failure) => {
            options = options.with_criterion(failure.criterion.parse()?);
            failure.allowables.iter().map(AllowablesData::to_allowables).collect()
        }
        None => Vec::new(),
    };

    log::info!(
        "Analyzing {}-ply laminate (criterion: {})",
        model.plies.len(),
        options.criterion.map_or("none", |c| c.as_str())
    );

    model.analyze(&request.loads, &allowables, &options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/materials", get(materials))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors);

    let host = std::env::var("CLT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("CLT_PORT").unwrap_or_else(|_| "8086".to_string());
    let addr = format!("{}:{}", host, port);

    log::info!("CLT solver server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
