//! Insert-or-replace operations keyed by identity
//!
//! An [`Upsert`] is built from plain documents without touching the
//! database, then turned into a driver bulk-write model for the target
//! collection when the batch is sent.

use crate::connection::Connection;
use crate::error::Result;
use crate::types::{to_document, CustomerKey, Doc, SubscriptionKey};
use bson::{doc, Document};
use log::debug;
use mongodb::options::{UpdateOneModel, WriteModel};
use mongodb::Namespace;

/// `filter` selects the stored document, `update` sets every field of the
/// source document; the server creates it when nothing matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    pub filter: Document,
    pub update: Document,
}

impl Upsert {
    fn set(filter: Document, doc: &Doc) -> Result<Self> {
        Ok(Upsert {
            filter,
            update: doc! { "$set": to_document(doc)? },
        })
    }

    /// Upsert a customer (plain or embedded) by `merchant_user_id`
    pub fn customer(customer: &Doc) -> Result<Self> {
        Self::set(CustomerKey::of(customer)?.filter(), customer)
    }

    /// Upsert a subscription by `(customer, merchant_order_id)`
    pub fn subscription(subscription: &Doc) -> Result<Self> {
        Self::set(SubscriptionKey::of(subscription)?.filter(), subscription)
    }
}

/// Send all upserts for one collection as a single bulk write.
///
/// Returns the number of documents matched or created. An empty batch is
/// not sent.
pub fn bulk_upsert(conn: &Connection, collection: &str, upserts: Vec<Upsert>) -> Result<usize> {
    if upserts.is_empty() {
        return Ok(0);
    }

    let models = write_models(&conn.collection(collection).namespace(), upserts);
    debug!("bulk upsert of {} documents into {}", models.len(), collection);
    let result = conn.client().bulk_write(models).run()?;
    Ok((result.matched_count + result.upserted_count) as usize)
}

/// One `UpdateOne` model with `upsert: true` per upsert, all targeting
/// `namespace`
pub fn write_models(namespace: &Namespace, upserts: Vec<Upsert>) -> Vec<WriteModel> {
    upserts
        .into_iter()
        .map(|upsert| {
            WriteModel::UpdateOne(
                UpdateOneModel::builder()
                    .namespace(namespace.clone())
                    .filter(upsert.filter)
                    .update(upsert.update)
                    .upsert(true)
                    .build(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::options::UpdateModifications;
    use serde_json::json;

    #[test]
    fn test_customer_upsert() {
        let customer: Doc = serde_json::from_value(json!({
            "merchant_user_id": "u1",
            "first_name": "A"
        }))
        .unwrap();

        let upsert = Upsert::customer(&customer).unwrap();
        assert_eq!(upsert.filter, doc! { "merchant_user_id": "u1" });
        assert_eq!(
            upsert.update,
            doc! { "$set": { "merchant_user_id": "u1", "first_name": "A" } }
        );
    }

    #[test]
    fn test_subscription_upsert_uses_compound_key() {
        let sub: Doc = serde_json::from_value(json!({
            "customer": "u1",
            "merchant_order_id": "o1",
            "status": "active"
        }))
        .unwrap();

        let upsert = Upsert::subscription(&sub).unwrap();
        assert_eq!(
            upsert.filter,
            doc! { "customer": "u1", "merchant_order_id": "o1" }
        );
        assert_eq!(
            upsert.update.get_document("$set").unwrap().get_str("status").unwrap(),
            "active"
        );
    }

    #[test]
    fn test_customer_without_identity_is_rejected() {
        let customer: Doc = serde_json::from_value(json!({"first_name": "A"})).unwrap();
        assert!(Upsert::customer(&customer).is_err());
    }

    #[test]
    fn test_write_models_create_missing_documents() {
        let customers: Vec<Doc> = vec![
            serde_json::from_value(json!({"merchant_user_id": "u1", "first_name": "A"})).unwrap(),
            serde_json::from_value(json!({"merchant_user_id": "u2", "first_name": "B"})).unwrap(),
        ];
        let upserts = customers
            .iter()
            .map(Upsert::customer)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let namespace = Namespace::new("demo", "customers");

        let models = write_models(&namespace, upserts.clone());

        assert_eq!(models.len(), 2);
        for (model, upsert) in models.iter().zip(&upserts) {
            let WriteModel::UpdateOne(model) = model else {
                panic!("expected an UpdateOne model, got {:?}", model);
            };
            assert_eq!(model.upsert, Some(true));
            assert_eq!(model.namespace, namespace);
            assert_eq!(model.filter, upsert.filter);
            assert!(matches!(
                &model.update,
                UpdateModifications::Document(update) if *update == upsert.update
            ));
        }
    }

    #[test]
    fn test_write_models_keep_input_order() {
        let subs: Vec<Doc> = vec![
            serde_json::from_value(json!({"customer": "u1", "merchant_order_id": "o2"})).unwrap(),
            serde_json::from_value(json!({"customer": "u1", "merchant_order_id": "o1"})).unwrap(),
        ];
        let upserts = subs
            .iter()
            .map(Upsert::subscription)
            .collect::<Result<Vec<_>>>()
            .unwrap();

        let models = write_models(&Namespace::new("demo", "subscriptions"), upserts);
        let orders: Vec<&str> = models
            .iter()
            .map(|model| match model {
                WriteModel::UpdateOne(model) => model.filter.get_str("merchant_order_id").unwrap(),
                other => panic!("expected an UpdateOne model, got {:?}", other),
            })
            .collect();

        assert_eq!(orders, vec!["o2", "o1"]);
    }
}
