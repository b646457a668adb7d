//! Server-side checks applied to every quote submission before it is
//! relayed. The client form validates too, but nothing it sends is trusted.
//! All checks are pure; the first failing field wins.

use regex::Regex;

use crate::{error::AppError, models::QuoteSubmission};

/// Upper bound on the quantity field. Anything at or above this is treated
/// as garbage rather than a plausible order size.
pub const QUANTITY_MAX: f64 = 10_000_000.0;

/// Required fields in declared order, checked for the falsy sense of
/// missing: absent, empty, or (for the quantity) the number zero.
pub fn check_presence(submission: &QuoteSubmission) -> Result<(), AppError> {
    for (field, missing) in [
        ("empresa", submission.empresa.is_empty()),
        ("ciudad", submission.ciudad.is_empty()),
        ("producto", submission.producto.is_empty()),
        ("cantidad", submission.cantidad.is_empty()),
        ("correo", submission.correo.is_empty()),
    ] {
        if missing {
            return Err(AppError::MissingField(field));
        }
    }

    Ok(())
}

/// Email shape and quantity range. Returns the coerced quantity so the
/// dispatch step never re-parses it.
pub fn check_format(submission: &QuoteSubmission) -> Result<f64, AppError> {
    if !is_valid_email(&submission.correo) {
        return Err(AppError::InvalidFormat("correo"));
    }

    match submission.cantidad.as_number() {
        Some(n) if is_valid_quantity(n) => Ok(n),
        _ => Err(AppError::InvalidFormat("cantidad")),
    }
}

/// Per-field character limits, checked in declared order. The limit on
/// `correo` is the RFC 5321 maximum.
pub fn check_lengths(submission: &QuoteSubmission) -> Result<(), AppError> {
    for (field, value, limit) in [
        ("empresa", submission.empresa.as_str(), 120),
        ("ciudad", submission.ciudad.as_str(), 80),
        ("producto", submission.producto.as_str(), 120),
        ("unidadMedida", submission.unidad_medida.as_str(), 20),
        ("correo", submission.correo.as_str(), 254),
        ("telefono", submission.telefono.as_str(), 20),
    ] {
        if value.chars().count() > limit {
            return Err(AppError::FieldTooLong { field, limit });
        }
    }

    Ok(())
}

/// Permissive shape check, not full RFC validation: something before the
/// `@`, a dot in the domain, at least two characters after it, no
/// whitespace anywhere.
pub fn is_valid_email(value: &str) -> bool {
    let shape = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();

    shape.is_match(value.trim())
}

/// Strictly positive and finite, bounded by [`QUANTITY_MAX`].
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < QUANTITY_MAX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;

    fn submission() -> QuoteSubmission {
        QuoteSubmission {
            empresa: "Acme".to_string(),
            ciudad: "Quito".to_string(),
            producto: "Bolsas".to_string(),
            cantidad: Quantity::Number(500.0),
            unidad_medida: "Millares".to_string(),
            correo: "ventas@acme.com".to_string(),
            telefono: "+593 99 123 4567".to_string(),
            trap: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        let s = submission();

        assert!(check_presence(&s).is_ok());
        assert_eq!(check_format(&s).unwrap(), 500.0);
        assert!(check_lengths(&s).is_ok());
    }

    #[test]
    fn first_missing_field_wins() {
        let s = QuoteSubmission {
            empresa: String::new(),
            ciudad: String::new(),
            ..submission()
        };

        assert!(matches!(
            check_presence(&s),
            Err(AppError::MissingField("empresa"))
        ));
    }

    #[test]
    fn telefono_is_optional() {
        let s = QuoteSubmission {
            telefono: String::new(),
            ..submission()
        };

        assert!(check_presence(&s).is_ok());
    }

    #[test]
    fn zero_quantity_counts_as_missing() {
        let s = QuoteSubmission {
            cantidad: Quantity::Number(0.0),
            ..submission()
        };

        assert!(matches!(
            check_presence(&s),
            Err(AppError::MissingField("cantidad"))
        ));
    }

    #[test]
    fn quantity_string_zero_is_present_but_invalid() {
        let s = QuoteSubmission {
            cantidad: Quantity::Text("0".to_string()),
            ..submission()
        };

        assert!(check_presence(&s).is_ok());
        assert!(matches!(
            check_format(&s),
            Err(AppError::InvalidFormat("cantidad"))
        ));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("  user@example.com  "));
        assert!(is_valid_email("ventas+q@acme.com.ec"));

        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn quantity_ranges() {
        assert!(is_valid_quantity(5000.0));
        assert!(is_valid_quantity(0.5));
        assert!(is_valid_quantity(9_999_999.0));

        assert!(!is_valid_quantity(0.0));
        assert!(!is_valid_quantity(-5.0));
        assert!(!is_valid_quantity(10_000_000.0));
        assert!(!is_valid_quantity(f64::INFINITY));
        assert!(!is_valid_quantity(f64::NAN));
    }

    #[test]
    fn quantity_coercion_from_text() {
        assert_eq!(Quantity::Text("5000".to_string()).as_number(), Some(5000.0));
        assert_eq!(Quantity::Text(" 500 ".to_string()).as_number(), Some(500.0));
        assert_eq!(Quantity::Text("abc".to_string()).as_number(), None);

        let s = QuoteSubmission {
            cantidad: Quantity::Text("Infinity".to_string()),
            ..submission()
        };
        assert!(matches!(
            check_format(&s),
            Err(AppError::InvalidFormat("cantidad"))
        ));
    }

    #[test]
    fn length_limits_report_the_first_offender() {
        let s = QuoteSubmission {
            empresa: "a".repeat(121),
            ciudad: "b".repeat(81),
            ..submission()
        };

        assert!(matches!(
            check_lengths(&s),
            Err(AppError::FieldTooLong {
                field: "empresa",
                limit: 120
            })
        ));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let s = QuoteSubmission {
            ciudad: "ñ".repeat(80),
            ..submission()
        };

        assert!(check_lengths(&s).is_ok());
    }

    #[test]
    fn length_limit_on_unit_of_measure() {
        let s = QuoteSubmission {
            unidad_medida: "x".repeat(21),
            ..submission()
        };

        assert!(matches!(
            check_lengths(&s),
            Err(AppError::FieldTooLong {
                field: "unidadMedida",
                limit: 20
            })
        ));
    }
}
