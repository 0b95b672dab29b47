//! Report delivery documents: a JSON array of report tenants

use crate::decode::lenient::{LenientDecode, ObjectReader, ShapeIssues};
use crate::validation::error::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTenant {
    pub tenant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    pub emails: Vec<String>,
    pub schedules: Vec<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub days_to_collect: i64,
    pub cron_to_send: String,
}

/// Report sections to include; carried through but not validated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub rules: Option<bool>,
    pub entities: Option<bool>,
    pub stats: Option<bool>,
    pub matches: Option<bool>,
    pub blocks: Option<bool>,
}

impl LenientDecode for ReportTenant {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            tenant: object.field("tenant"),
            logo_path: object.field("logo_path"),
            emails: object.field("emails"),
            schedules: object.field("schedules"),
            features: object.field("features"),
        }
    }
}

impl LenientDecode for Schedule {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            days_to_collect: object.field("days_to_collect"),
            cron_to_send: object.field("cron_to_send"),
        }
    }
}

impl LenientDecode for Features {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        let mut object = ObjectReader::open(value, path, issues);
        Self {
            rules: object.field("rules"),
            entities: object.field("entities"),
            stats: object.field("stats"),
            matches: object.field("matches"),
            blocks: object.field("blocks"),
        }
    }
}
