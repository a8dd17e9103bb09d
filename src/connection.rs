use crate::error::Result;
use bson::{doc, Document};
use log::info;
use mongodb::sync::{Client, Collection, Database};

pub const DEFAULT_URI: &str = "mongodb://mongodb:27017/";

pub const DEFAULT_DATABASE: &str = "demo";

/// Where the benchmark connects to
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// MongoDB connection string
    pub uri: String,

    /// Logical database holding every benchmark collection
    pub database: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            uri: String::from(DEFAULT_URI),
            database: String::from(DEFAULT_DATABASE),
        }
    }
}

/// Handle to the benchmark database, built once and shared by reference
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Connect and ping the server so a bad address fails here rather than
    /// inside the first timed call.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).run()?;

        info!("Connected to MongoDB at {} (database `{}`)", config.uri, config.database);
        Ok(Connection { client, database })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}
