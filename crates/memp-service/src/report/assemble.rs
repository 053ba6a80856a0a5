//! Assembly of aggregated totals into a report and its template view.
//!
//! Everything here is pure: the same inputs always give the same buckets
//! and a byte-identical view. Timestamps belong to the persisted envelope,
//! never to the view.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value, json};

use memp_entity::report::{ReportBuckets, ReportPeriod, TemplateKind};

use super::aggregate::{fuel_buckets, machinery_buckets};

/// A report ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    pub vessel_id: String,
    pub period: ReportPeriod,
    pub template: TemplateKind,
    pub buckets: ReportBuckets,
    pub view: Value,
}

/// Merge the per-category totals of one vessel and period.
pub fn assemble(
    vessel_id: &str,
    period: ReportPeriod,
    template: TemplateKind,
    fuel: BTreeMap<String, Decimal>,
    machinery: BTreeMap<String, Decimal>,
) -> AssembledReport {
    let buckets = ReportBuckets {
        fuel: fuel_buckets(fuel),
        machinery: machinery_buckets(machinery),
    };
    let view = shape(template, &buckets);
    AssembledReport {
        vessel_id: vessel_id.to_string(),
        period,
        template,
        buckets,
        view,
    }
}

/// Render buckets in the layout a downstream template expects.
pub fn shape(template: TemplateKind, buckets: &ReportBuckets) -> Value {
    match template {
        TemplateKind::EuMrv => json!({
            "template": template.as_str(),
            "regulation": "EU 2015/757",
            "fuelConsumption": buckets.fuel.iter().map(|b| json!({
                "fuelType": b.key,
                "massTonnes": number(b.total),
            })).collect::<Vec<_>>(),
            "machineryRunningHours": buckets.machinery.iter().map(|b| json!({
                "machinery": b.name,
                "hours": number(b.total),
            })).collect::<Vec<_>>(),
            "totalFuelTonnes": number(fuel_total(buckets)),
        }),
        TemplateKind::ImoDcs => json!({
            "template": template.as_str(),
            "regulation": "MARPOL Annex VI Reg. 22A",
            "fuelOilConsumption": keyed(buckets.fuel.iter().map(|b| (&b.key, b.total))),
            "machineryHours": keyed(buckets.machinery.iter().map(|b| (&b.name, b.total))),
            "totalFuelTonnes": number(fuel_total(buckets)),
        }),
        TemplateKind::Dnv | TemplateKind::Abs | TemplateKind::ClassNk => json!({
            "template": template.as_str(),
            "classSociety": class_society(template),
            "consumption": buckets.fuel.iter().map(|b| json!({
                "fuel": b.key,
                "tonnes": number(b.total),
            })).collect::<Vec<_>>(),
            "machinery": buckets.machinery.iter().map(|b| json!({
                "name": b.name,
                "runningHours": number(b.total),
            })).collect::<Vec<_>>(),
        }),
    }
}

fn class_society(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Dnv => "DNV",
        TemplateKind::Abs => "American Bureau of Shipping",
        TemplateKind::ClassNk => "Nippon Kaiji Kyokai",
        TemplateKind::EuMrv | TemplateKind::ImoDcs => "",
    }
}

fn fuel_total(buckets: &ReportBuckets) -> Decimal {
    buckets.fuel.iter().map(|b| b.total).sum()
}

fn keyed<'a>(entries: impl Iterator<Item = (&'a String, Decimal)>) -> Value {
    let map: Map<String, Value> = entries.map(|(k, v)| (k.clone(), number(v))).collect();
    Value::Object(map)
}

fn number(value: Decimal) -> Value {
    value.to_f64().map(Value::from).unwrap_or(Value::Null)
}
