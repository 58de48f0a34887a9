//! Boundary validation: untyped JSON payloads in, typed domain values out.
//!
//! Nothing here touches a store. A payload either becomes a complete
//! [`NewEntry`] / [`NewPatient`] or is rejected. No partially-populated value
//! is ever produced.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::{
  entry::{
    Discharge, EntryDetails, EntryKind, HealthCheckRating, NewEntry, SickLeave,
  },
  error::{FieldIssue, PayloadError, ValidationErrors},
  patient::{Gender, NewPatient},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// The text must re-format to itself, so `2024-1-5` and `2024-01-05T00:00`
/// are both rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(text, DATE_FORMAT)
    .ok()
    .filter(|d| d.format(DATE_FORMAT).to_string() == text)
}

// ─── Field access ────────────────────────────────────────────────────────────

/// A JSON object together with the path it was reached by, so that errors can
/// name nested fields as `discharge.date`.
struct Fields<'a> {
  obj:    &'a Map<String, Value>,
  prefix: &'static str,
}

impl<'a> Fields<'a> {
  fn root(payload: &'a Value) -> Result<Self, PayloadError> {
    payload
      .as_object()
      .map(|obj| Self { obj, prefix: "" })
      .ok_or(PayloadError::NotAnObject)
  }

  fn path(&self, key: &str) -> String {
    if self.prefix.is_empty() {
      key.to_owned()
    } else {
      format!("{}.{key}", self.prefix)
    }
  }

  /// JSON `null` counts as absent.
  fn get(&self, key: &str) -> Option<&'a Value> {
    self.obj.get(key).filter(|v| !v.is_null())
  }

  /// A present, non-blank string.
  fn text(&self, key: &str) -> Result<String, PayloadError> {
    match self.get(key) {
      None => Err(PayloadError::Missing { field: self.path(key) }),
      Some(Value::String(s)) if s.trim().is_empty() => {
        Err(PayloadError::Empty { field: self.path(key) })
      }
      Some(Value::String(s)) => Ok(s.clone()),
      Some(_) => Err(PayloadError::WrongType {
        field:    self.path(key),
        expected: "a string",
      }),
    }
  }

  fn date(&self, key: &str) -> Result<NaiveDate, PayloadError> {
    let text = self.text(key)?;
    parse_date(&text).ok_or_else(|| PayloadError::InvalidDate {
      field: self.path(key),
      value: text,
    })
  }

  /// A nested object, or `None` if the key is absent.
  fn nested(&self, key: &'static str) -> Result<Option<Fields<'a>>, PayloadError> {
    match self.get(key) {
      None => Ok(None),
      Some(Value::Object(obj)) => Ok(Some(Fields { obj, prefix: key })),
      Some(_) => Err(PayloadError::WrongType {
        field:    self.path(key),
        expected: "an object",
      }),
    }
  }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// Validate an entry payload, stopping at the first violation.
///
/// Checks run in a fixed order: shared fields, then the `type` tag, then the
/// variant's own fields, then `diagnosisCodes`. Fields belonging to other
/// variants are ignored and never copied into the result.
pub fn parse_new_entry(payload: &Value) -> Result<NewEntry, PayloadError> {
  let fields = Fields::root(payload)?;

  let description = fields.text("description")?;
  let date = fields.date("date")?;
  let specialist = fields.text("specialist")?;

  let kind = match fields.get("type") {
    Some(Value::String(tag)) => EntryKind::from_tag(tag),
    _ => None,
  }
  .ok_or(PayloadError::InvalidEntryType)?;

  let details = parse_details(kind, &fields)?;
  let diagnosis_codes = parse_diagnosis_codes(&fields)?;

  Ok(NewEntry {
    description,
    date,
    specialist,
    diagnosis_codes,
    details,
  })
}

fn parse_details(
  kind: EntryKind,
  fields: &Fields<'_>,
) -> Result<EntryDetails, PayloadError> {
  match kind {
    EntryKind::HealthCheck => Ok(EntryDetails::HealthCheck {
      health_check_rating: parse_rating(fields)?,
    }),
    EntryKind::OccupationalHealthcare => {
      let employer_name = fields.text("employerName")?;
      // A partial sick leave is rejected rather than dropped.
      let sick_leave = match fields.nested("sickLeave")? {
        Some(leave) => Some(SickLeave {
          start_date: leave.date("startDate")?,
          end_date:   leave.date("endDate")?,
        }),
        None => None,
      };
      Ok(EntryDetails::OccupationalHealthcare {
        employer_name,
        sick_leave,
      })
    }
    EntryKind::Hospital => {
      let discharge = fields.nested("discharge")?.ok_or_else(|| {
        PayloadError::Missing {
          field: fields.path("discharge"),
        }
      })?;
      Ok(EntryDetails::Hospital {
        discharge: Discharge {
          date:     discharge.date("date")?,
          criteria: discharge.text("criteria")?,
        },
      })
    }
  }
}

/// Only JSON integers 0–3 are accepted; `1.0`, `"1"`, and `-1` are not.
fn parse_rating(fields: &Fields<'_>) -> Result<HealthCheckRating, PayloadError> {
  let value = fields
    .get("healthCheckRating")
    .ok_or_else(|| PayloadError::Missing {
      field: fields.path("healthCheckRating"),
    })?;
  value
    .as_u64()
    .and_then(|n| u8::try_from(n).ok())
    .and_then(|n| HealthCheckRating::try_from(n).ok())
    .ok_or_else(|| PayloadError::InvalidRating {
      value: value.to_string(),
    })
}

fn parse_diagnosis_codes(
  fields: &Fields<'_>,
) -> Result<Vec<String>, PayloadError> {
  let wrong_type = || PayloadError::WrongType {
    field:    fields.path("diagnosisCodes"),
    expected: "an array of strings",
  };
  match fields.get("diagnosisCodes") {
    None => Ok(Vec::new()),
    Some(Value::Array(items)) => items
      .iter()
      .map(|item| item.as_str().map(str::to_owned).ok_or_else(wrong_type))
      .collect(),
    Some(_) => Err(wrong_type()),
  }
}

// ─── Patients ────────────────────────────────────────────────────────────────

const MAX_NAME_LEN: usize = 100;
const MAX_SSN_LEN: usize = 20;
const MAX_OCCUPATION_LEN: usize = 100;

#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
  fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
      Ok(value) => Some(value),
      Err(message) => {
        self.0.push(FieldIssue::new(field, message));
        None
      }
    }
  }
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
  match obj.get(key) {
    None | Some(Value::Null) => Err("Required".to_owned()),
    Some(Value::String(s)) => Ok(s.as_str()),
    Some(_) => Err("Expected string".to_owned()),
  }
}

fn bounded_text(
  obj: &Map<String, Value>,
  key: &str,
  label: &str,
  max: usize,
) -> Result<String, String> {
  let text = string_field(obj, key)?;
  match text.chars().count() {
    0 => Err(format!("{label} is required")),
    n if n > max => Err(format!("{label} too long")),
    _ => Ok(text.to_owned()),
  }
}

fn date_of_birth(obj: &Map<String, Value>) -> Result<NaiveDate, String> {
  let text = string_field(obj, "dateOfBirth")?;
  parse_date(text).ok_or_else(|| "Invalid date format. Expected YYYY-MM-DD".to_owned())
}

fn gender(obj: &Map<String, Value>) -> Result<Gender, String> {
  let text = string_field(obj, "gender")?;
  Gender::ALL
    .into_iter()
    .find(|g| g.as_str() == text)
    .ok_or_else(|| {
      let expected: Vec<_> = Gender::ALL.iter().map(|g| g.as_str()).collect();
      format!("Invalid gender. Expected one of: {}", expected.join(", "))
    })
}

/// Validate a new-patient payload, reporting every problem found.
pub fn parse_new_patient(payload: &Value) -> Result<NewPatient, ValidationErrors> {
  let Some(obj) = payload.as_object() else {
    return Err(ValidationErrors(vec![FieldIssue::new(
      "body",
      "Expected object",
    )]));
  };

  let mut issues = Issues::default();
  let name = issues.check("name", bounded_text(obj, "name", "Name", MAX_NAME_LEN));
  let date_of_birth = issues.check("dateOfBirth", date_of_birth(obj));
  let ssn = issues.check("ssn", bounded_text(obj, "ssn", "SSN", MAX_SSN_LEN));
  let gender = issues.check("gender", gender(obj));
  let occupation = issues.check(
    "occupation",
    bounded_text(obj, "occupation", "Occupation", MAX_OCCUPATION_LEN),
  );

  match (name, date_of_birth, ssn, gender, occupation) {
    (
      Some(name),
      Some(date_of_birth),
      Some(ssn),
      Some(gender),
      Some(occupation),
    ) => Ok(NewPatient {
      name,
      date_of_birth,
      ssn,
      gender,
      occupation,
    }),
    _ => Err(ValidationErrors(issues.0)),
  }
}
