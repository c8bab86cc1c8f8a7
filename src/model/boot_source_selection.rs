use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::handler::Record;
use crate::model::{int_field, list_value, str_field, str_list_field, str_value, FieldType};

/// Composite identity of a selection: the owning boot source plus the
/// server-assigned record id. A selection is scoped to exactly one boot
/// source and cannot be moved to another, so the two halves travel
/// together from construction on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub boot_source_id: i64,
    pub id: i64,
}

/// The fields of a selection record: wire name, declared semantic type,
/// and whether the field may change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    BootSourceId,
    Id,
    Os,
    Release,
    Arches,
    Subarches,
    Labels,
}

impl Field {
    /// Key under which the field appears in server records.
    pub fn name(self) -> &'static str {
        match self {
            Field::BootSourceId => "boot_source_id",
            Field::Id => "id",
            Field::Os => "os",
            Field::Release => "release",
            Field::Arches => "arches",
            Field::Subarches => "subarches",
            Field::Labels => "labels",
        }
    }

    /// Declared semantic type, checked on every assignment.
    pub fn field_type(self) -> FieldType {
        match self {
            Field::BootSourceId | Field::Id => FieldType::Int,
            Field::Os | Field::Release => FieldType::Str,
            Field::Arches | Field::Subarches | Field::Labels => FieldType::StrList,
        }
    }

    /// Identity fields are fixed once the selection exists; writing them
    /// fails with [`Error::Immutable`].
    pub fn is_read_only(self) -> bool {
        matches!(self, Field::BootSourceId | Field::Id)
    }

    /// Whether the field belongs in a remote update. `boot_source_id` is
    /// attached client-side and `id` names the record, so neither is ever
    /// sent back; the payload fields are.
    pub fn is_updatable(self) -> bool {
        !self.is_read_only()
    }
}

/// A boot source selection: one filter over a boot source, naming which
/// OS/release/architecture/subarchitecture/label combinations should be
/// imported from it.
///
/// Values come from server records and are validated field by field. Local
/// writes stay local (the selection turns dirty); pushing them back is a
/// concern of the caller's save layer, which can consult
/// [`Field::is_updatable`] and [`BootSourceSelection::changed_fields`].
#[derive(Clone)]
pub struct BootSourceSelection {
    key: SelectionKey,
    /// The OS for which resources are imported, e.g. "ubuntu".
    os: String,
    /// The release codename, e.g. "focal".
    release: String,
    /// Architecture glob patterns; `["*"]` imports every architecture.
    arches: Vec<String>,
    /// Subarchitecture glob patterns.
    subarches: Vec<String>,
    /// Label glob patterns, e.g. "release" or "daily".
    labels: Vec<String>,
    changed: BTreeSet<Field>,
}

impl BootSourceSelection {
    /// Build a selection from a server record, attaching the client-side
    /// `boot_source_id` scope.
    ///
    /// Every known field is validated against its declared type; the
    /// record id must be positive and the pattern lists non-empty. Unknown
    /// record keys are ignored, as is any `boot_source_id` the record
    /// itself may carry; the scope argument wins.
    pub fn from_record(boot_source_id: i64, record: &Record) -> Result<Self> {
        if boot_source_id <= 0 {
            return Err(Error::InvalidArgument(format!(
                "boot_source_id must be positive, got {boot_source_id}"
            )));
        }
        let id = int_field(record, Field::Id.name())?;
        if id <= 0 {
            return Err(Error::TypeValidation {
                field: Field::Id.name(),
                reason: format!("must be positive, got {id}"),
            });
        }
        let os = str_field(record, Field::Os.name())?;
        let release = str_field(record, Field::Release.name())?;
        let arches = str_list_field(record, Field::Arches.name())?;
        let subarches = str_list_field(record, Field::Subarches.name())?;
        let labels = str_list_field(record, Field::Labels.name())?;
        check_not_empty(Field::Arches, &arches)?;
        check_not_empty(Field::Subarches, &subarches)?;
        check_not_empty(Field::Labels, &labels)?;
        Ok(Self {
            key: SelectionKey { boot_source_id, id },
            os,
            release,
            arches,
            subarches,
            labels,
            changed: BTreeSet::new(),
        })
    }

    pub fn key(&self) -> SelectionKey {
        self.key
    }

    pub fn boot_source_id(&self) -> i64 {
        self.key.boot_source_id
    }

    pub fn id(&self) -> i64 {
        self.key.id
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn arches(&self) -> &[String] {
        &self.arches
    }

    pub fn subarches(&self) -> &[String] {
        &self.subarches
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn set_os<S>(&mut self, os: S)
    where
        S: Into<String>,
    {
        self.os = os.into();
        self.touch(Field::Os);
    }

    pub fn set_release<S>(&mut self, release: S)
    where
        S: Into<String>,
    {
        self.release = release.into();
        self.touch(Field::Release);
    }

    pub fn set_arches(&mut self, arches: Vec<String>) -> Result<()> {
        check_not_empty(Field::Arches, &arches)?;
        self.arches = arches;
        self.touch(Field::Arches);
        Ok(())
    }

    pub fn set_subarches(&mut self, subarches: Vec<String>) -> Result<()> {
        check_not_empty(Field::Subarches, &subarches)?;
        self.subarches = subarches;
        self.touch(Field::Subarches);
        Ok(())
    }

    pub fn set_labels(&mut self, labels: Vec<String>) -> Result<()> {
        check_not_empty(Field::Labels, &labels)?;
        self.labels = labels;
        self.touch(Field::Labels);
        Ok(())
    }

    /// Assign a field from a dynamically-typed value, the way a record
    /// update would: the field's mutability is checked first, then the
    /// value against the field's declared type.
    pub fn set(&mut self, field: Field, value: Value) -> Result<()> {
        if field.is_read_only() {
            return Err(Error::Immutable(field.name()));
        }
        match field {
            Field::Os => self.os = str_value(field.name(), &value)?,
            Field::Release => self.release = str_value(field.name(), &value)?,
            Field::Arches => {
                let arches = list_value(field.name(), &value)?;
                check_not_empty(field, &arches)?;
                self.arches = arches;
            }
            Field::Subarches => {
                let subarches = list_value(field.name(), &value)?;
                check_not_empty(field, &subarches)?;
                self.subarches = subarches;
            }
            Field::Labels => {
                let labels = list_value(field.name(), &value)?;
                check_not_empty(field, &labels)?;
                self.labels = labels;
            }
            Field::BootSourceId | Field::Id => unreachable!("read-only fields rejected above"),
        }
        self.touch(field);
        Ok(())
    }

    /// Whether any field was written since construction.
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Fields written since construction, in declaration order.
    pub fn changed_fields(&self) -> Vec<Field> {
        self.changed.iter().copied().collect()
    }

    fn touch(&mut self, field: Field) {
        self.changed.insert(field);
    }
}

/// The pattern lists are never empty: "all" is spelt `["*"]`, not `[]`.
pub(crate) fn check_not_empty(field: Field, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::TypeValidation {
            field: field.name(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

impl fmt::Debug for BootSourceSelection {
    // Diagnostics form: payload fields only, the identifiers stay out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootSourceSelection")
            .field("arches", &self.arches)
            .field("labels", &self.labels)
            .field("os", &self.os)
            .field("release", &self.release)
            .field("subarches", &self.subarches)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn ubuntu_record() -> Record {
        json!({
            "id": 7,
            "os": "ubuntu",
            "release": "focal",
            "arches": ["amd64"],
            "subarches": ["*"],
            "labels": ["release"],
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_from_record_builds_a_scoped_selection() {
        let selection = BootSourceSelection::from_record(3, &ubuntu_record()).unwrap();
        assert_eq!(selection.boot_source_id(), 3);
        assert_eq!(selection.id(), 7);
        assert_eq!(selection.os(), "ubuntu");
        assert_eq!(selection.release(), "focal");
        assert_eq!(selection.arches(), ["amd64".to_string()]);
        assert_eq!(selection.subarches(), ["*".to_string()]);
        assert_eq!(selection.labels(), ["release".to_string()]);
        assert_eq!(
            selection.key(),
            SelectionKey {
                boot_source_id: 3,
                id: 7
            }
        );
        assert!(!selection.is_dirty());
    }

    #[test]
    fn test_from_record_scope_wins_over_record_key() {
        let mut record = ubuntu_record();
        record.insert("boot_source_id".into(), json!(999));
        let selection = BootSourceSelection::from_record(3, &record).unwrap();
        assert_eq!(selection.boot_source_id(), 3);
    }

    #[test]
    fn test_from_record_ignores_unknown_keys() {
        let mut record = ubuntu_record();
        record.insert("created".into(), json!("2026-08-01T00:00:00"));
        assert!(BootSourceSelection::from_record(3, &record).is_ok());
    }

    #[test]
    fn test_from_record_validates_field_types() {
        let mut record = ubuntu_record();
        record.insert("os".into(), json!(42));
        let err = BootSourceSelection::from_record(3, &record).unwrap_err();
        match err {
            Error::TypeValidation { field, reason } => {
                assert_eq!(field, "os");
                assert!(reason.contains("expected a string"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_record_rejects_fractional_ids() {
        let mut record = ubuntu_record();
        record.insert("id".into(), json!(7.5));
        let err = BootSourceSelection::from_record(3, &record).unwrap_err();
        assert!(matches!(err, Error::TypeValidation { field: "id", .. }));
    }

    #[test]
    fn test_from_record_rejects_non_positive_ids() {
        let mut record = ubuntu_record();
        record.insert("id".into(), json!(-7));
        let err = BootSourceSelection::from_record(3, &record).unwrap_err();
        match err {
            Error::TypeValidation { field, reason } => {
                assert_eq!(field, "id");
                assert!(reason.contains("must be positive"));
            }
            other => panic!("unexpected error: {other}"),
        }

        record.insert("id".into(), json!(0));
        assert!(matches!(
            BootSourceSelection::from_record(3, &record),
            Err(Error::TypeValidation { field: "id", .. })
        ));
    }

    #[test]
    fn test_from_record_requires_every_payload_field() {
        let mut record = ubuntu_record();
        record.remove("labels");
        let err = BootSourceSelection::from_record(3, &record).unwrap_err();
        assert!(matches!(err, Error::TypeValidation { field: "labels", .. }));
    }

    #[test]
    fn test_from_record_rejects_empty_pattern_lists() {
        let mut record = ubuntu_record();
        record.insert("arches".into(), json!([]));
        let err = BootSourceSelection::from_record(3, &record).unwrap_err();
        match err {
            Error::TypeValidation { field, reason } => {
                assert_eq!(field, "arches");
                assert_eq!(reason, "must not be empty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_record_rejects_unusable_scope() {
        let err = BootSourceSelection::from_record(0, &ubuntu_record()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_set_rejects_read_only_fields() {
        let mut selection = BootSourceSelection::from_record(3, &ubuntu_record()).unwrap();
        assert!(matches!(
            selection.set(Field::Id, json!(9)),
            Err(Error::Immutable("id"))
        ));
        assert!(matches!(
            selection.set(Field::BootSourceId, json!(9)),
            Err(Error::Immutable("boot_source_id"))
        ));
        // Mutability is checked before the value: a well-typed value
        // changes nothing about the outcome.
        assert!(matches!(
            selection.set(Field::Id, json!("nine")),
            Err(Error::Immutable("id"))
        ));
        assert!(!selection.is_dirty());
    }

    #[test]
    fn test_set_validates_against_the_declared_type() {
        let mut selection = BootSourceSelection::from_record(3, &ubuntu_record()).unwrap();
        assert!(matches!(
            selection.set(Field::Os, json!(42)),
            Err(Error::TypeValidation { field: "os", .. })
        ));
        assert!(matches!(
            selection.set(Field::Arches, json!("amd64")),
            Err(Error::TypeValidation { field: "arches", .. })
        ));
        assert!(matches!(
            selection.set(Field::Arches, json!([])),
            Err(Error::TypeValidation { field: "arches", .. })
        ));
        assert!(!selection.is_dirty());
    }

    #[test]
    fn test_set_assigns_and_marks_dirty() {
        let mut selection = BootSourceSelection::from_record(3, &ubuntu_record()).unwrap();
        selection.set(Field::Os, json!("centos")).unwrap();
        selection
            .set(Field::Arches, json!(["amd64", "arm64"]))
            .unwrap();
        assert_eq!(selection.os(), "centos");
        assert_eq!(
            selection.arches(),
            ["amd64".to_string(), "arm64".to_string()]
        );
        assert!(selection.is_dirty());
        assert_eq!(selection.changed_fields(), vec![Field::Os, Field::Arches]);
    }

    #[test]
    fn test_typed_setters_mirror_dynamic_assignment() {
        let mut selection = BootSourceSelection::from_record(3, &ubuntu_record()).unwrap();
        selection.set_release("jammy");
        selection.set_labels(vec!["daily".into()]).unwrap();
        assert_eq!(selection.release(), "jammy");
        assert_eq!(selection.labels(), ["daily".to_string()]);
        assert!(matches!(
            selection.set_subarches(vec![]),
            Err(Error::TypeValidation {
                field: "subarches",
                ..
            })
        ));
        assert_eq!(
            selection.changed_fields(),
            vec![Field::Release, Field::Labels]
        );
    }

    #[test]
    fn test_field_table_declares_names_types_and_mutability() {
        assert_eq!(Field::BootSourceId.name(), "boot_source_id");
        assert_eq!(Field::Subarches.name(), "subarches");
        assert_eq!(Field::Id.field_type(), FieldType::Int);
        assert_eq!(Field::Release.field_type(), FieldType::Str);
        assert_eq!(Field::Labels.field_type(), FieldType::StrList);
        assert!(Field::Id.is_read_only());
        assert!(Field::BootSourceId.is_read_only());
        assert!(!Field::Os.is_read_only());
        assert!(Field::Arches.is_updatable());
        assert!(!Field::BootSourceId.is_updatable());
    }

    #[test]
    fn test_debug_shows_payload_fields_and_no_identifiers() {
        let mut record = ubuntu_record();
        record.insert("id".into(), json!(7777));
        let selection = BootSourceSelection::from_record(4242, &record).unwrap();
        let repr = format!("{selection:?}");
        assert!(repr.contains("os"));
        assert!(repr.contains("ubuntu"));
        assert!(repr.contains("focal"));
        assert!(repr.contains("arches"));
        assert!(!repr.contains("id"));
        assert!(!repr.contains("7777"));
        assert!(!repr.contains("4242"));
    }
}
