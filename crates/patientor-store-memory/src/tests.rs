//! Tests for `MemoryStore` and the intake operations running against it.

use std::{
  collections::{HashSet, VecDeque},
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use patientor_core::{
  Error as CoreError,
  entry::{EntryDetails, EntryKind, HealthCheckRating},
  error::PayloadError,
  id::{IdGenerator, PatientId},
  intake::{add_entry, add_patient},
  patient::{Gender, NewPatient, Patient},
  store::PatientStore,
};
use serde_json::{Value, json};

use crate::{Error, MemoryStore, Seed};

/// Ids `"<prefix>-0"`, `"<prefix>-1"`, … in order.
struct Sequence {
  prefix: &'static str,
  next:   AtomicUsize,
}

impl Sequence {
  fn new(prefix: &'static str) -> Self {
    Self {
      prefix,
      next: AtomicUsize::new(0),
    }
  }
}

impl IdGenerator for Sequence {
  fn generate(&self) -> String {
    format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
  }
}

/// Hands out a fixed script of ids, repeating the last one forever.
struct Scripted(Mutex<VecDeque<&'static str>>);

impl Scripted {
  fn new(ids: &[&'static str]) -> Self {
    Self(Mutex::new(ids.iter().copied().collect()))
  }
}

impl IdGenerator for Scripted {
  fn generate(&self) -> String {
    let mut ids = self.0.lock().unwrap();
    if ids.len() > 1 {
      ids.pop_front().unwrap().to_owned()
    } else {
      ids.front().unwrap().to_string()
    }
  }
}

fn riggs(id: &str) -> Patient {
  NewPatient {
    name:          "Martin Riggs".into(),
    date_of_birth: "1979-01-30".parse().unwrap(),
    ssn:           "300179-777A".into(),
    gender:        Gender::Male,
    occupation:    "Cop".into(),
  }
  .into_patient(PatientId::new(id))
}

async fn store_with_p1() -> MemoryStore {
  let store = MemoryStore::with_id_generator(Sequence::new("e"));
  store.insert_patient(riggs("p1")).await.unwrap();
  store
}

async fn entry_count(store: &MemoryStore, id: &str) -> usize {
  store
    .get_patient(&PatientId::new(id))
    .await
    .unwrap()
    .unwrap()
    .entries
    .len()
}

fn yearly_check() -> Value {
  json!({
    "type": "HealthCheck",
    "description": "Yearly check",
    "date": "2024-01-10",
    "specialist": "Dr. A",
    "healthCheckRating": 1
  })
}

// ─── Patients ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_patient_assigns_id_and_empty_entries() {
  let store = MemoryStore::with_id_generator(Sequence::new("p"));
  let payload = json!({
    "name": "Dana Scully",
    "dateOfBirth": "1974-01-05",
    "ssn": "050174-432N",
    "gender": "female",
    "occupation": "Forensic Pathologist"
  });

  let patient = add_patient(&store, &payload).await.unwrap();
  assert_eq!(patient.id.as_str(), "p-0");
  assert!(patient.entries.is_empty());

  let fetched = store.get_patient(&patient.id).await.unwrap().unwrap();
  assert_eq!(fetched, patient);
  assert_eq!(fetched.ssn, "050174-432N");
}

#[tokio::test]
async fn add_patient_rejects_invalid_payload_without_mutation() {
  let store = MemoryStore::new();
  let err = add_patient(&store, &json!({ "name": "Nobody" })).await.unwrap_err();
  let CoreError::Validation(errors) = err else {
    panic!("expected validation errors, got {err:?}");
  };
  assert_eq!(errors.issues().len(), 4);
  assert!(store.is_empty().await);
}

#[tokio::test]
async fn list_patients_keeps_insertion_order_and_hides_ssn() {
  let store = MemoryStore::new();
  for id in ["b", "a", "c"] {
    store.insert_patient(riggs(id)).await.unwrap();
  }
  let listed = store.list_patients().await.unwrap();
  let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, ["b", "a", "c"]);

  let json = serde_json::to_value(&listed).unwrap();
  assert!(json[0].get("ssn").is_none());
}

#[tokio::test]
async fn get_patient_missing_returns_none() {
  let store = store_with_p1().await;
  let result = store.get_patient(&PatientId::new("nope")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn insert_patient_rejects_duplicate_id() {
  let store = store_with_p1().await;
  let err = store.insert_patient(riggs("p1")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePatient(id) if id.as_str() == "p1"));
  assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn add_patient_redraws_colliding_id() {
  let store = MemoryStore::with_id_generator(Scripted::new(&["p1", "p2"]));
  store.insert_patient(riggs("p1")).await.unwrap();
  let new = NewPatient {
    name:          "Dana Scully".into(),
    date_of_birth: "1974-01-05".parse().unwrap(),
    ssn:           "050174-432N".into(),
    gender:        Gender::Female,
    occupation:    "Forensic Pathologist".into(),
  };
  let patient = store.add_patient(new).await.unwrap();
  assert_eq!(patient.id.as_str(), "p2");
}

// ─── Entries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check_entry_is_appended() {
  let store = store_with_p1().await;
  assert_eq!(entry_count(&store, "p1").await, 0);

  let entry = add_entry(&store, &PatientId::new("p1"), &yearly_check())
    .await
    .unwrap();
  assert_eq!(entry.kind(), EntryKind::HealthCheck);
  assert_eq!(
    entry.details,
    EntryDetails::HealthCheck {
      health_check_rating: HealthCheckRating::LowRisk,
    }
  );
  assert!(!entry.id.as_str().is_empty());
  assert_eq!(entry_count(&store, "p1").await, 1);
}

#[tokio::test]
async fn out_of_range_rating_leaves_store_unchanged() {
  let store = store_with_p1().await;
  let mut payload = yearly_check();
  payload["healthCheckRating"] = json!(5);

  let err = add_entry(&store, &PatientId::new("p1"), &payload)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    CoreError::InvalidPayload(PayloadError::InvalidRating { .. })
  ));
  assert_eq!(entry_count(&store, "p1").await, 0);
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
  let store = store_with_p1().await;
  let payloads = [yearly_check(), json!({}), json!("garbage")];
  for payload in payloads {
    let err = add_entry(&store, &PatientId::new("nope"), &payload)
      .await
      .unwrap_err();
    assert!(matches!(&err, CoreError::PatientNotFound(id) if id.as_str() == "nope"));
  }
  assert_eq!(store.len().await, 1);
  assert_eq!(entry_count(&store, "p1").await, 0);
}

#[tokio::test]
async fn hospital_entry_keeps_discharge() {
  let store = store_with_p1().await;
  let payload = json!({
    "type": "Hospital",
    "description": "Fall",
    "date": "2024-02-02",
    "specialist": "Dr. B",
    "discharge": { "date": "2024-02-05", "criteria": "Stable" }
  });

  let entry = add_entry(&store, &PatientId::new("p1"), &payload)
    .await
    .unwrap();
  let EntryDetails::Hospital { discharge } = &entry.details else {
    panic!("expected a hospital entry");
  };
  assert_eq!(discharge.date.to_string(), "2024-02-05");
  assert_eq!(discharge.criteria, "Stable");
}

#[tokio::test]
async fn repeated_rejection_never_mutates() {
  let store = store_with_p1().await;
  add_entry(&store, &PatientId::new("p1"), &yearly_check())
    .await
    .unwrap();

  let invalid = json!({ "type": "OccupationalHealthcare", "description": "x",
                        "date": "2024-01-01", "specialist": "Dr. C" });
  for _ in 0..3 {
    let err = add_entry(&store, &PatientId::new("p1"), &invalid)
      .await
      .unwrap_err();
    assert!(matches!(err, CoreError::InvalidPayload(_)));
    assert_eq!(entry_count(&store, "p1").await, 1);
  }
}

#[tokio::test]
async fn appended_entry_is_last_with_fields_intact() {
  let store = store_with_p1().await;
  let id = PatientId::new("p1");
  add_entry(&store, &id, &yearly_check()).await.unwrap();

  let payload = json!({
    "type": "OccupationalHealthcare",
    "description": "Strained back",
    "date": "2024-03-01",
    "specialist": "Dr. C",
    "employerName": "HyPD",
    "diagnosisCodes": ["M24.2", "Z57.1"],
    "sickLeave": { "startDate": "2024-03-01", "endDate": "2024-03-14" }
  });
  let created = add_entry(&store, &id, &payload).await.unwrap();

  let patient = store.get_patient(&id).await.unwrap().unwrap();
  let last = patient.entries.last().unwrap();
  assert_eq!(last, &created);

  let mut json = serde_json::to_value(last).unwrap();
  json.as_object_mut().unwrap().remove("id");
  assert_eq!(json, payload);

  let ids: HashSet<_> = patient.entries.iter().map(|e| e.id.clone()).collect();
  assert_eq!(ids.len(), patient.entries.len());
}

#[tokio::test]
async fn entry_id_redrawn_on_collision_within_patient() {
  let store = MemoryStore::with_id_generator(Scripted::new(&["e1", "e1", "e2"]));
  store.insert_patient(riggs("p1")).await.unwrap();
  let id = PatientId::new("p1");

  let first = add_entry(&store, &id, &yearly_check()).await.unwrap();
  let second = add_entry(&store, &id, &yearly_check()).await.unwrap();
  assert_eq!(first.id.as_str(), "e1");
  assert_eq!(second.id.as_str(), "e2");
}

#[tokio::test]
async fn exhausted_id_generator_is_an_error_and_appends_nothing() {
  let store = MemoryStore::with_id_generator(Scripted::new(&["same"]));
  store.insert_patient(riggs("p1")).await.unwrap();
  let id = PatientId::new("p1");

  add_entry(&store, &id, &yearly_check()).await.unwrap();
  let err = add_entry(&store, &id, &yearly_check()).await.unwrap_err();
  assert!(matches!(err, CoreError::Store(_)));
  assert_eq!(entry_count(&store, "p1").await, 1);
}

#[tokio::test]
async fn append_to_missing_patient_returns_none() {
  let store = store_with_p1().await;
  let entry = patientor_core::validate::parse_new_entry(&yearly_check()).unwrap();
  let result = store
    .append_entry(&PatientId::new("nope"), entry)
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn sequential_appends_keep_commit_order() {
  let store = store_with_p1().await;
  let id = PatientId::new("p1");
  let mut created = Vec::new();
  for n in 0..5 {
    let mut payload = yearly_check();
    payload["description"] = json!(format!("visit {n}"));
    created.push(add_entry(&store, &id, &payload).await.unwrap().id);
  }
  let stored: Vec<_> = store
    .get_patient(&id)
    .await
    .unwrap()
    .unwrap()
    .entries
    .into_iter()
    .map(|e| e.id)
    .collect();
  assert_eq!(stored, created);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_are_all_kept() {
  let store = store_with_p1().await;
  let tasks: Vec<_> = (0..32)
    .map(|n| {
      let store = store.clone();
      tokio::spawn(async move {
        let mut payload = yearly_check();
        payload["description"] = json!(format!("visit {n}"));
        add_entry(&store, &PatientId::new("p1"), &payload).await
      })
    })
    .collect();

  let mut created = HashSet::new();
  for task in tasks {
    created.insert(task.await.unwrap().unwrap().id);
  }
  assert_eq!(created.len(), 32);

  let patient = store.get_patient(&PatientId::new("p1")).await.unwrap().unwrap();
  assert_eq!(patient.entries.len(), 32);
  let stored: HashSet<_> = patient.entries.into_iter().map(|e| e.id).collect();
  assert_eq!(stored, created);
}

// ─── Seed ────────────────────────────────────────────────────────────────────

const SEED: &str = r#"{
  "diagnoses": [
    { "code": "M24.2", "name": "Disorder of ligament", "latin": "Morbositas ligamenti" },
    { "code": "Z57.1", "name": "Occupational exposure to radiation" }
  ],
  "patients": [
    {
      "id": "d2773336-f723-11e9-8f0b-362b9e155667",
      "name": "John McClane",
      "dateOfBirth": "1986-07-09",
      "ssn": "090786-122X",
      "gender": "male",
      "occupation": "New york city cop",
      "entries": [
        {
          "id": "d811e46d-70b3-4d90-b090-4535c7cf8fb1",
          "date": "2015-01-02",
          "type": "Hospital",
          "specialist": "MD House",
          "diagnosisCodes": ["S62.5"],
          "description": "Healing time appr. 2 weeks.",
          "discharge": { "date": "2015-01-16", "criteria": "Thumb has healed." }
        }
      ]
    }
  ]
}"#;

#[tokio::test]
async fn seed_builds_store_and_catalog() {
  let (store, catalog) = Seed::from_json(SEED).unwrap().into_parts().unwrap();
  assert_eq!(catalog.len(), 2);
  assert_eq!(
    catalog.get("M24.2").unwrap().latin.as_deref(),
    Some("Morbositas ligamenti")
  );

  let id = PatientId::new("d2773336-f723-11e9-8f0b-362b9e155667");
  let patient = store.get_patient(&id).await.unwrap().unwrap();
  assert_eq!(patient.entries.len(), 1);
  assert_eq!(patient.entries[0].kind(), EntryKind::Hospital);

  add_entry(&store, &id, &yearly_check()).await.unwrap();
  assert_eq!(entry_count(&store, id.as_str()).await, 2);
}

#[tokio::test]
async fn seed_rejects_duplicate_patients() {
  let mut seed = Seed::from_json(SEED).unwrap();
  seed.patients.push(seed.patients[0].clone());
  assert!(matches!(seed.into_parts(), Err(Error::DuplicatePatient(_))));
}

#[tokio::test]
async fn seed_rejects_duplicate_entry_ids() {
  let mut seed = Seed::from_json(SEED).unwrap();
  let entry = seed.patients[0].entries[0].clone();
  seed.patients[0].entries.push(entry);
  assert!(matches!(seed.into_parts(), Err(Error::DuplicateEntry { .. })));
}

#[test]
fn seed_rejects_malformed_json() {
  assert!(matches!(Seed::from_json("{"), Err(Error::Json(_))));
}
