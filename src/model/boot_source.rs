use crate::error::Result;
use crate::handler::Record;
use crate::model::{int_field, str_field};

/// A boot source: a remote repository of bootable OS images that the
/// region imports from.
///
/// Only the parts of the entity this binding consumes are modelled. The
/// boot source's own lifecycle (create/update/delete) belongs to a
/// different resource; here it acts purely as the scoping key for
/// selections and is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSource {
    /// Server-assigned identity.
    id: i64,
    /// Location of the image stream, e.g.
    /// "http://images.maas.io/ephemeral-v3/stable/".
    url: String,
}

impl BootSource {
    pub fn new<S>(id: i64, url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            id,
            url: url.into(),
        }
    }

    /// Build a boot source from a server record. Requires an integer `id`
    /// and a string `url`; anything else in the record is ignored.
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: int_field(record, "id")?,
            url: str_field(record, "url")?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
