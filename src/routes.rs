//! The quote intake pipeline behind `POST /send`.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use serde_json::from_slice;
use tracing::info;

use crate::{
    config::Config,
    error::AppError,
    mailer::Envelope,
    models::{QuoteSubmission, SanitizedFields, SendResponse},
    state::AppState,
    validate::{check_format, check_lengths, check_presence},
};

/// Validates, sanitizes, and relays one quote submission. Strictly
/// sequential; the first failing step ends the request.
pub async fn send_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SendResponse>, AppError> {
    let submission: QuoteSubmission =
        from_slice(&body).map_err(|_| AppError::MalformedPayload)?;

    // Hidden form field humans never see. A value here means a bot filled
    // the form; answer with the normal success shape and do nothing.
    if !submission.trap.is_empty() {
        info!("Honeypot field set, absorbing submission");
        return Ok(Json(SendResponse::ok()));
    }

    check_presence(&submission)?;
    let cantidad = check_format(&submission)?;
    check_lengths(&submission)?;

    let safe = SanitizedFields::new(&submission, cantidad);
    let reply_to = submission.correo.trim().to_string();

    let Some(mailer) = state.mailer.as_ref() else {
        return Err(AppError::ConfigMissing);
    };

    info!(empresa = %safe.empresa, "Relaying quote request");
    mailer.send(build_envelope(&state.config, &safe, reply_to)).await?;

    Ok(Json(SendResponse::ok()))
}

/// Non-POST requests on the route land here.
pub async fn method_fallback() -> AppError {
    AppError::MethodNotAllowed
}

fn build_envelope(config: &Config, safe: &SanitizedFields, reply_to: String) -> Envelope {
    let mut html_body = format!(
        "<h1>Nueva Solicitud de Cotización</h1>\
         <p><strong>Empresa/Contacto:</strong> {}</p>\
         <p><strong>Ciudad:</strong> {}</p>\
         <p><strong>Producto:</strong> {}</p>\
         <p><strong>Cantidad:</strong> {} {}</p>\
         <p><strong>Email de Contacto:</strong> {}</p>",
        safe.empresa, safe.ciudad, safe.producto, safe.cantidad, safe.unidad_medida, safe.correo,
    );

    if !safe.telefono.is_empty() {
        html_body.push_str(&format!(
            "<p><strong>Teléfono del cliente:</strong> {}</p>",
            safe.telefono
        ));
    }

    Envelope {
        from: config.mail_from.clone(),
        to: config.mail_to.clone(),
        reply_to,
        subject: format!("Nueva Cotización: {} | {}", safe.empresa, safe.producto),
        html_body,
    }
}
