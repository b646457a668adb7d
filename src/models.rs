use serde::{Deserialize, Serialize};

use crate::sanitize::escape_html;

/// Fields accepted by the quote form. Field names match the form's wire
/// format; absent fields decode as empty so the presence check owns the
/// missing-field decision.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteSubmission {
    #[serde(default)]
    pub empresa: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub producto: String,
    #[serde(default)]
    pub cantidad: Quantity,
    #[serde(default, rename = "unidadMedida")]
    pub unidad_medida: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default, rename = "_trap")]
    pub trap: String,
}

/// The form posts `cantidad` as either a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
    Null,
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Null
    }
}

impl Quantity {
    /// Loose coercion matching the form runtime: numbers pass through,
    /// strings are trimmed and parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
            Quantity::Null => None,
        }
    }

    /// Empty in the falsy sense: absent, null, blank, or the number zero.
    /// The string `"0"` is present; it fails the range check instead.
    pub fn is_empty(&self) -> bool {
        match self {
            Quantity::Number(n) => *n == 0.0,
            Quantity::Text(s) => s.is_empty(),
            Quantity::Null => true,
        }
    }
}

/// Escaped copies of every field interpolated into the email body, plus the
/// validated quantity. The raw reply address is deliberately not part of
/// this set; it lives on the envelope's `reply_to` only.
#[derive(Debug)]
pub struct SanitizedFields {
    pub empresa: String,
    pub ciudad: String,
    pub producto: String,
    pub cantidad: f64,
    pub unidad_medida: String,
    pub correo: String,
    pub telefono: String,
}

impl SanitizedFields {
    pub fn new(submission: &QuoteSubmission, cantidad: f64) -> Self {
        Self {
            empresa: escape_html(&submission.empresa),
            ciudad: escape_html(&submission.ciudad),
            producto: escape_html(&submission.producto),
            cantidad,
            unidad_medida: escape_html(&submission.unidad_medida),
            correo: escape_html(&submission.correo),
            telefono: escape_html(&submission.telefono),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub ok: bool,
}

impl SendResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
