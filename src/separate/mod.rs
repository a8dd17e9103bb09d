//! Separate-entities shape - one collection per entity type
//!
//! Customers, addresses, payments and subscriptions each live in their own
//! collection and are joined at query time through the `customer` foreign
//! key.

pub mod reader;
pub mod updater;
pub mod writer;

pub use reader::query_separate_entities;
pub use updater::update_separate_entities;
pub use writer::insert_separate_entities;

use crate::error::{Error, Result};
use crate::types::{Doc, Record, IDENTITY_FIELD, INBOUND_IDENTITY_FIELD};

/// The four per-collection accumulators filled from a record stream
#[derive(Debug, Default)]
pub struct SeparateBatches {
    pub customers: Vec<Doc>,
    pub addresses: Vec<Doc>,
    pub payments: Vec<Doc>,
    pub subscriptions: Vec<Doc>,
}

impl SeparateBatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one record's sub-objects into their accumulators
    pub fn push_record(&mut self, record: Record) -> Result<()> {
        let mut customer = record.customer;
        rename_identity(&mut customer)?;
        self.customers.push(customer);

        self.addresses.extend(record.addresses);
        self.payments.extend(record.payments);
        self.subscriptions.extend(record.subscriptions);
        Ok(())
    }

    /// Drain a whole record stream, stopping at the first error
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut batches = Self::new();
        for record in records {
            batches.push_record(record?)?;
        }
        Ok(batches)
    }
}

/// Move the inbound identity key to its stored name.
///
/// Both names are currently `merchant_user_id`, so the only visible effect
/// is that the key moves to the end of the document.
fn rename_identity(customer: &mut Doc) -> Result<()> {
    let id = customer
        .shift_remove(INBOUND_IDENTITY_FIELD)
        .ok_or(Error::MissingField {
            entity: "customer",
            field: INBOUND_IDENTITY_FIELD,
        })?;
    customer.insert(IDENTITY_FIELD.to_string(), id);
    Ok(())
}
