//! Report generation request and its validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use memp_core::error::AppError;
use memp_core::result::AppResult;
use memp_entity::report::{ReportPeriod, TemplateKind};

/// Parameters of a report generation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_request"))]
pub struct GenerateReportRequest {
    #[validate(length(max = 64, message = "vessel id is too long"))]
    pub vessel_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    /// Template code, e.g. `EU_MRV`.
    pub template: String,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub vessel_id: String,
    pub period: ReportPeriod,
    pub template: TemplateKind,
}

impl GenerateReportRequest {
    /// Validate fields and resolve the template. Performs no I/O.
    pub fn into_validated(self) -> AppResult<ValidatedRequest> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid report request: {e}")))?;
        let template = self.template.parse::<TemplateKind>()?;
        Ok(ValidatedRequest {
            vessel_id: self.vessel_id.trim().to_string(),
            period: ReportPeriod::new(self.from_date, self.to_date),
            template,
        })
    }
}

fn validate_request(req: &GenerateReportRequest) -> Result<(), ValidationError> {
    if req.vessel_id.trim().is_empty() {
        return Err(ValidationError::new("vessel_id_required")
            .with_message("vessel id must not be empty".into()));
    }
    if !ReportPeriod::new(req.from_date, req.to_date).is_ordered() {
        return Err(ValidationError::new("period_order")
            .with_message("fromDate must not be after toDate".into()));
    }
    Ok(())
}
