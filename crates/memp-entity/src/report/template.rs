//! Regulatory template kinds a report can be shaped for.

use std::fmt;
use std::str::FromStr;

use memp_core::error::AppError;
use serde::{Deserialize, Serialize};

/// Downstream template the report view is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_template")]
pub enum TemplateKind {
    /// EU Monitoring, Reporting and Verification (Regulation 2015/757).
    #[serde(rename = "EU_MRV")]
    #[sqlx(rename = "EU_MRV")]
    EuMrv,
    /// IMO Data Collection System (MARPOL Annex VI, reg. 22A).
    #[serde(rename = "IMO_DCS")]
    #[sqlx(rename = "IMO_DCS")]
    ImoDcs,
    /// DNV class submission.
    #[serde(rename = "DNV")]
    #[sqlx(rename = "DNV")]
    Dnv,
    /// ABS class submission.
    #[serde(rename = "ABS")]
    #[sqlx(rename = "ABS")]
    Abs,
    /// ClassNK class submission.
    #[serde(rename = "ClassNK")]
    #[sqlx(rename = "ClassNK")]
    ClassNk,
}

impl TemplateKind {
    /// All supported templates, in display order.
    pub const ALL: [TemplateKind; 5] = [
        Self::EuMrv,
        Self::ImoDcs,
        Self::Dnv,
        Self::Abs,
        Self::ClassNk,
    ];

    /// Wire code of the template.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EuMrv => "EU_MRV",
            Self::ImoDcs => "IMO_DCS",
            Self::Dnv => "DNV",
            Self::Abs => "ABS",
            Self::ClassNk => "ClassNK",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::unsupported_template(format!("Unsupported template: '{s}'")))
    }
}
