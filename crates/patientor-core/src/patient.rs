//! Patients and their projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{entry::Entry, id::PatientId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male => "male",
      Self::Female => "female",
      Self::Other => "other",
    }
  }
}

/// The full patient record, including the sensitive `ssn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
  pub id:            PatientId,
  pub name:          String,
  pub date_of_birth: NaiveDate,
  pub ssn:           String,
  pub gender:        Gender,
  pub occupation:    String,
  /// Append order, which is not necessarily date order.
  #[serde(default)]
  pub entries:       Vec<Entry>,
}

/// A patient as shown in list views: everything except `ssn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
  pub id:            PatientId,
  pub name:          String,
  pub date_of_birth: NaiveDate,
  pub gender:        Gender,
  pub occupation:    String,
  pub entries:       Vec<Entry>,
}

impl From<&Patient> for NonSensitivePatient {
  fn from(p: &Patient) -> Self {
    Self {
      id:            p.id.clone(),
      name:          p.name.clone(),
      date_of_birth: p.date_of_birth,
      gender:        p.gender,
      occupation:    p.occupation.clone(),
      entries:       p.entries.clone(),
    }
  }
}

/// Input to [`crate::store::PatientStore::add_patient`]. The id and the empty
/// entry list are supplied by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
  pub name:          String,
  pub date_of_birth: NaiveDate,
  pub ssn:           String,
  pub gender:        Gender,
  pub occupation:    String,
}

impl NewPatient {
  pub fn into_patient(self, id: PatientId) -> Patient {
    Patient {
      id,
      name: self.name,
      date_of_birth: self.date_of_birth,
      ssn: self.ssn,
      gender: self.gender,
      occupation: self.occupation,
      entries: Vec::new(),
    }
  }
}
