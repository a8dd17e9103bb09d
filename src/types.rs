use crate::error::{Error, Result};
use bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema-less document, kept in insertion order
pub type Doc = Map<String, Value>;

/// Key the customer identity arrives under in the source file
pub const INBOUND_IDENTITY_FIELD: &str = "merchant_user_id";

/// Key the customer identity is stored under
pub const IDENTITY_FIELD: &str = "merchant_user_id";

/// Foreign key every address, payment and subscription carries
pub const CUSTOMER_FIELD: &str = "customer";

pub const ORDER_FIELD: &str = "merchant_order_id";

pub const ADDRESS_TYPE_FIELD: &str = "address_type";

pub const SHIPPING_ADDRESS: &str = "shipping_address";

/// Collection names used by both storage shapes
pub mod collections {
    pub const CUSTOMERS: &str = "customers";
    pub const ADDRESSES: &str = "addresses";
    pub const PAYMENTS: &str = "payments";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const EMBEDDED_CUSTOMERS: &str = "embedded_customers";
}

/// One line of the source file: a customer and everything attached to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub customer: Doc,
    pub addresses: Vec<Doc>,
    pub payments: Vec<Doc>,
    pub subscriptions: Vec<Doc>,
}

/// Identity of a customer, used as the upsert key in both shapes
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerKey {
    pub merchant_user_id: Bson,
}

impl CustomerKey {
    pub fn of(customer: &Doc) -> Result<Self> {
        Ok(CustomerKey {
            merchant_user_id: field(customer, "customer", IDENTITY_FIELD)?,
        })
    }

    pub fn filter(&self) -> Document {
        doc! { IDENTITY_FIELD: self.merchant_user_id.clone() }
    }
}

/// Compound key of a subscription: owning customer plus order
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionKey {
    pub customer: Bson,
    pub merchant_order_id: Bson,
}

impl SubscriptionKey {
    pub fn of(subscription: &Doc) -> Result<Self> {
        Ok(SubscriptionKey {
            customer: field(subscription, "subscription", CUSTOMER_FIELD)?,
            merchant_order_id: field(subscription, "subscription", ORDER_FIELD)?,
        })
    }

    pub fn filter(&self) -> Document {
        doc! {
            CUSTOMER_FIELD: self.customer.clone(),
            ORDER_FIELD: self.merchant_order_id.clone(),
        }
    }
}

/// Convert a JSON document to BSON for the driver
pub fn to_document(doc: &Doc) -> Result<Document> {
    Ok(bson::to_document(doc)?)
}

fn field(doc: &Doc, entity: &'static str, name: &'static str) -> Result<Bson> {
    let value = doc
        .get(name)
        .ok_or(Error::MissingField { entity, field: name })?;
    Ok(bson::to_bson(value)?)
}
