use crate::application::{ChartDataLoader, ChartExportUseCase, ExportOutcome, PreparedExport};
use crate::application::use_cases::chart_export::CSV_CONTENT_TYPE;
use crate::domain::backend_request::symptom_message;
use crate::domain::bmi::BmiReading;
use crate::domain::chart_data::ChartData;
use crate::domain::error::AppError;
use crate::domain::health_report::ProfileUpdate;
use crate::infrastructure::download::FileDownload;
use crate::infrastructure::healthmate_client::HealthMateApi;
use actix_cors::Cors;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct HttpState {
    pub export_use_case: ChartExportUseCase,
    pub downloads: FileDownload,
    pub chart_loader: ChartDataLoader,
    pub api: Arc<dyn HealthMateApi>,
    pub employee_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    #[serde(flatten)]
    pub reading: BmiReading,
    /// Whether the reading reached the backend
    pub saved: bool,
}

#[derive(Debug, Deserialize)]
pub struct SymptomRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SymptomResponse {
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub message: String,
}

fn notice(message: impl Into<String>) -> NoticeResponse {
    NoticeResponse {
        message: message.into(),
    }
}

fn error_response(context: &str, err: AppError) -> HttpResponse {
    match err {
        AppError::NothingToExport(message) => HttpResponse::UnprocessableEntity().json(notice(message)),
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(notice(err.to_string())),
        AppError::BackendError(_) => {
            error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(notice(err.to_string()))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(notice(other.to_string()))
        }
    }
}

fn attachment(prepared: PreparedExport) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(prepared.filename)],
        })
        .body(prepared.bytes)
}

fn export_attachment(state: &HttpState, data: ChartData) -> HttpResponse {
    let available = data.into_available_series();
    match state
        .export_use_case
        .prepare(&available, Utc::now().date_naive())
    {
        Ok(prepared) => attachment(prepared),
        Err(e) => error_response("Chart export failed", e),
    }
}

#[post("/export/charts")]
async fn export_charts(data: web::Data<HttpState>, req: web::Json<ChartData>) -> impl Responder {
    export_attachment(&data, req.into_inner())
}

#[post("/export/charts/file")]
async fn export_charts_file(
    data: web::Data<HttpState>,
    req: web::Json<ChartData>,
) -> impl Responder {
    let available = req.into_inner().into_available_series();
    let state = data.clone();
    let outcome = web::block(move || {
        state
            .export_use_case
            .export(&available, Utc::now().date_naive(), &state.downloads)
    })
    .await;

    match outcome {
        Ok(Ok(ExportOutcome::Delivered(receipt))) => HttpResponse::Ok().json(receipt),
        Ok(Ok(ExportOutcome::NothingToExport)) => HttpResponse::UnprocessableEntity()
            .json(notice(crate::domain::export::EmptyDocument.to_string())),
        Ok(Err(e)) => error_response("Saving chart export failed", e),
        Err(e) => error_response(
            "Saving chart export failed",
            AppError::Internal(format!("Export task did not complete: {}", e)),
        ),
    }
}

#[get("/export/charts/latest")]
async fn export_charts_latest(data: web::Data<HttpState>) -> impl Responder {
    info!(employee_id = %data.employee_id, "Exporting latest chart data");
    match data.chart_loader.load(&data.employee_id).await {
        Ok(chart_data) => export_attachment(&data, chart_data),
        Err(e) => error_response("Loading chart data failed", e),
    }
}

#[post("/bmi")]
async fn bmi(data: web::Data<HttpState>, req: web::Json<BmiRequest>) -> impl Responder {
    let Some(reading) = BmiReading::measure(req.weight_kg, req.height_cm) else {
        return HttpResponse::BadRequest().json(notice("Weight and height must be positive numbers"));
    };

    // The reading is still returned when saving fails.
    let saved = match data
        .api
        .save_bmi(&data.employee_id, Some(reading.bmi), req.weight_kg, req.height_cm)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!(employee_id = %data.employee_id, "Saving BMI failed: {}", e);
            false
        }
    };

    HttpResponse::Ok().json(BmiResponse { reading, saved })
}

#[get("/report")]
async fn health_report(data: web::Data<HttpState>) -> impl Responder {
    match data.api.health_report(&data.employee_id).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response("Loading health report failed", e),
    }
}

#[post("/symptom")]
async fn symptom(data: web::Data<HttpState>, req: web::Json<SymptomRequest>) -> impl Responder {
    let message = match symptom_message(&req.message) {
        Ok(message) => message,
        Err(e) => return error_response("Invalid symptom message", e),
    };
    match data.api.send_symptom(&data.employee_id, message).await {
        Ok(reply) => HttpResponse::Ok().json(SymptomResponse { reply }),
        Err(e) => error_response("Symptom request failed", e),
    }
}

/// Editable draft of the current profile
#[get("/profile")]
async fn profile_draft(data: web::Data<HttpState>) -> impl Responder {
    match data.api.health_report(&data.employee_id).await {
        Ok(report) => HttpResponse::Ok().json(ProfileUpdate::from_profile(report.profile.as_ref())),
        Err(e) => error_response("Loading profile failed", e),
    }
}

/// Saves the profile and answers with the refreshed report
#[put("/profile")]
async fn update_profile(
    data: web::Data<HttpState>,
    req: web::Json<ProfileUpdate>,
) -> impl Responder {
    if let Err(e) = data
        .api
        .update_profile(&data.employee_id, req.into_inner())
        .await
    {
        return error_response("Updating profile failed", e);
    }
    info!(employee_id = %data.employee_id, "Profile updated");
    match data.api.health_report(&data.employee_id).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response("Loading health report failed", e),
    }
}

/// Routes under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(export_charts)
            .service(export_charts_file)
            .service(export_charts_latest)
            .service(bmi)
            .service(health_report)
            .service(symptom)
            .service(profile_draft)
            .service(update_profile),
    );
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Dashboard runs on another origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    info!("HealthMate API listening on http://{}:{}/api", host, port);
    Ok(server)
}
