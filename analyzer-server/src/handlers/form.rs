//! Upload form parsing & validation

use axum::extract::Multipart;
use boat_analyzer_core::RunMetadata;
use chrono::{NaiveDate, NaiveTime};
use validator::{Validate, ValidationError};

use crate::{AppError, AppResult};

/// Fields posted by the upload form
#[derive(Debug, Default, Validate)]
pub struct UploadForm {
    #[validate(length(min = 1, message = "departure date is required"))]
    pub date_depart: String,

    #[validate(length(min = 1, message = "departure time is required"))]
    pub heure_depart: String,

    #[validate(length(min = 1, max = 32, message = "vessel number must be 1-32 characters"))]
    pub numero: String,

    #[validate(
        custom(function = "validate_finite"),
        range(min = -60.0, max = 70.0, message = "ambient temperature out of range")
    )]
    pub ambient_temp: f64,

    #[validate(length(min = 1, message = "telemetry file is empty"))]
    pub file: Vec<u8>,

    pub file_name: Option<String>,
}

/// `range` lets NaN through
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("finite");
        err.message = Some("ambient temperature must be a number".into());
        Err(err)
    }
}

impl UploadForm {
    /// Drain a multipart body into a validated form
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();
        let mut ambient_seen = false;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    form.file_name = field.file_name().map(str::to_string);
                    form.file = field.bytes().await?.to_vec();
                }
                "date_depart" => form.date_depart = field.text().await?.trim().to_string(),
                "heure_depart" => form.heure_depart = field.text().await?.trim().to_string(),
                "numero" => form.numero = field.text().await?.trim().to_string(),
                "ambient_temp" => {
                    let raw = field.text().await?;
                    form.ambient_temp = raw.trim().replace(',', ".").parse().map_err(|_| {
                        AppError::ValidationError(format!("ambient temperature '{}' is not a number", raw.trim()))
                    })?;
                    ambient_seen = true;
                }
                other => {
                    tracing::debug!("Ignoring unknown form field '{}'", other);
                }
            }
        }

        if !ambient_seen {
            return Err(AppError::ValidationError(
                "ambient temperature is required".to_string(),
            ));
        }

        form.validate()?;
        Ok(form)
    }

    pub fn metadata(&self) -> AppResult<RunMetadata> {
        let date = NaiveDate::parse_from_str(&self.date_depart, "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError(format!("invalid departure date '{}'", self.date_depart))
        })?;
        let time = NaiveTime::parse_from_str(&self.heure_depart, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.heure_depart, "%H:%M:%S"))
            .map_err(|_| {
                AppError::ValidationError(format!("invalid departure time '{}'", self.heure_depart))
            })?;

        Ok(RunMetadata::new(date, time, self.numero.clone(), self.ambient_temp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UploadForm {
        UploadForm {
            date_depart: "2024-08-02".to_string(),
            heure_depart: "13:45".to_string(),
            numero: "21".to_string(),
            ambient_temp: 24.5,
            file: b"data".to_vec(),
            file_name: Some("run.csv".to_string()),
        }
    }

    #[test]
    fn test_metadata_parses_html_inputs() {
        let meta = form().metadata().unwrap();
        assert_eq!(meta.departure().to_string(), "2024-08-02 13:45:00");
        assert_eq!(meta.vessel_id, "21");
        assert_eq!(meta.ambient_temp, 24.5);
    }

    #[test]
    fn test_metadata_accepts_seconds() {
        let f = UploadForm {
            heure_depart: "13:45:10".to_string(),
            ..form()
        };
        assert!(f.metadata().is_ok());
    }

    #[test]
    fn test_bad_date_rejected() {
        let f = UploadForm {
            date_depart: "02/08/2024".to_string(),
            ..form()
        };
        assert!(matches!(f.metadata(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rules() {
        assert!(form().validate().is_ok());

        let empty_file = UploadForm {
            file: vec![],
            ..form()
        };
        assert!(empty_file.validate().is_err());

        let boiling = UploadForm {
            ambient_temp: 120.0,
            ..form()
        };
        assert!(boiling.validate().is_err());
    }

    #[test]
    fn test_non_finite_ambient_fails_validation() {
        for raw in ["NaN", "inf", "-inf"] {
            let f = UploadForm {
                ambient_temp: raw.parse().unwrap(),
                ..form()
            };
            assert!(f.validate().is_err(), "{} accepted", raw);
        }
    }
}
