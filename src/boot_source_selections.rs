use std::fmt;
use std::ops::Index;
use std::slice;
use std::vec;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::handler::SelectionsHandler;
use crate::model::boot_source::BootSource;
use crate::model::boot_source_selection::BootSourceSelection;
use crate::model::selection_filters::SelectionFilters;

/// The set of boot source selections under one boot source.
///
/// Selections arrive in whatever order the service lists them; the order
/// carries no meaning. Uniqueness of ids is the service's business, not
/// enforced here.
pub struct BootSourceSelections {
    selections: Vec<BootSourceSelection>,
}

/// The scoping argument for every remote call. The type system already
/// guarantees a boot source; what is left to check is that the reference
/// is usable, i.e. carries a server-assigned id.
fn scope_id(boot_source: &BootSource) -> Result<i64> {
    let id = boot_source.id();
    if id <= 0 {
        return Err(Error::InvalidArgument(format!(
            "boot_source must be a saved boot source, got id {id}"
        )));
    }
    Ok(id)
}

impl BootSourceSelections {
    /// Create a new boot source selection.
    ///
    /// Filters left unset default to the wildcard list `["*"]`. All
    /// validation happens before the handler is invoked; a remote failure
    /// propagates as-is, without retry.
    pub fn create<H>(
        handler: &H,
        boot_source: &BootSource,
        os: &str,
        release: &str,
        filters: SelectionFilters,
    ) -> Result<BootSourceSelection>
    where
        H: SelectionsHandler,
    {
        let boot_source_id = scope_id(boot_source)?;
        let (arches, subarches, labels) = filters.resolve()?;
        debug!(
            "create selection: boot_source_id={boot_source_id} os={os} release={release} \
             arches={arches:?} subarches={subarches:?} labels={labels:?}"
        );
        let record = handler.create(boot_source_id, os, release, &arches, &subarches, &labels)?;
        trace!("create selection: record={record:?}");
        BootSourceSelection::from_record(boot_source_id, &record)
    }

    /// Get the list of boot source selections scoped to `boot_source`.
    ///
    /// Every returned selection is tagged with the boot source's id, in
    /// the order the service returned them.
    pub fn read<H>(handler: &H, boot_source: &BootSource) -> Result<Self>
    where
        H: SelectionsHandler,
    {
        let boot_source_id = scope_id(boot_source)?;
        debug!("read selections: boot_source_id={boot_source_id}");
        let records = handler.read(boot_source_id)?;
        trace!("read selections: {} record(s)", records.len());
        let selections = records
            .iter()
            .map(|record| BootSourceSelection::from_record(boot_source_id, record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selections })
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, BootSourceSelection> {
        self.selections.iter()
    }
}

impl BootSourceSelection {
    /// Get one boot source selection by id.
    ///
    /// A missing record surfaces as the remote service's not-found error,
    /// untranslated.
    pub fn read<H>(handler: &H, boot_source: &BootSource, id: i64) -> Result<Self>
    where
        H: SelectionsHandler,
    {
        let boot_source_id = scope_id(boot_source)?;
        debug!("read selection: boot_source_id={boot_source_id} id={id}");
        let record = handler.read_one(boot_source_id, id)?;
        trace!("read selection: record={record:?}");
        BootSourceSelection::from_record(boot_source_id, &record)
    }

    /// Delete this boot source selection.
    ///
    /// The remote record is gone afterwards; this value stays as it was
    /// and is not guarded against further use.
    pub fn delete<H>(&self, handler: &H) -> Result<()>
    where
        H: SelectionsHandler,
    {
        debug!(
            "delete selection: boot_source_id={} id={}",
            self.boot_source_id(),
            self.id()
        );
        handler.delete(self.boot_source_id(), self.id())?;
        Ok(())
    }
}

impl Index<usize> for BootSourceSelections {
    type Output = BootSourceSelection;

    fn index(&self, index: usize) -> &Self::Output {
        &self.selections[index]
    }
}

impl IntoIterator for BootSourceSelections {
    type Item = BootSourceSelection;
    type IntoIter = vec::IntoIter<BootSourceSelection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.into_iter()
    }
}

impl<'a> IntoIterator for &'a BootSourceSelections {
    type Item = &'a BootSourceSelection;
    type IntoIter = slice::Iter<'a, BootSourceSelection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

impl fmt::Debug for BootSourceSelections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.selections).finish()
    }
}
